pub mod automation;
pub mod input;
pub mod llm;
pub mod speech;
pub mod voice;
