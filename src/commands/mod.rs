pub mod ambiguity;
pub mod handlers;
pub mod intent;
pub mod message;
pub mod router;
pub mod startup;
pub mod url;
