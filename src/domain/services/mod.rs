pub mod actions;
pub mod checklist;
pub mod export;
pub mod prompts;
pub mod usage;

pub use actions::*;
