//! System orchestration, configuration, startup, and shutdown logic.

pub mod config;
pub mod error;
pub mod logging;
pub mod system;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use system::*;
