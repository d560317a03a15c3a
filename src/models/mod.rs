pub mod intent;
pub mod session;
pub mod settings;

pub use intent::*;
pub use session::*;
pub use settings::*;
