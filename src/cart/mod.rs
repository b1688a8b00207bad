//! The line-item cart and the commands the UI issues against it.

mod actions;
pub mod entity;

pub use actions::*;
pub use entity::*;
