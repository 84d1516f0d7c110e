mod action;
mod backend;
mod error;
mod event;
mod message;
mod profile;
mod session;
mod settings;
mod topic;

pub use action::*;
pub use backend::*;
pub use error::*;
pub use event::*;
pub use message::*;
pub use profile::*;
pub use session::*;
pub use settings::*;
pub use topic::*;
