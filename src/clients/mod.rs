pub mod checkout_coordinator;

pub use checkout_coordinator::*;
