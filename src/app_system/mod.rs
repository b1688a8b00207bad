//! System orchestration, session lifecycle, configuration and tracing setup.

pub mod config;
pub mod pos_system;
pub mod session;
pub mod tracing;

pub use config::*;
pub use pos_system::*;
pub use session::*;
pub use self::tracing::*;
