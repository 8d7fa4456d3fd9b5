pub mod config;
pub mod error;
pub mod events;
pub mod text;
pub mod types;

pub use config::ShellConfig;
pub use error::{Result, ShellError};
pub use events::SessionEvent;
pub use types::*;
