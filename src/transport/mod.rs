//! REST adapters: a token-bearing JSON transport and the backend built on it.

pub mod backend;
pub mod http;

pub use backend::*;
pub use http::*;
