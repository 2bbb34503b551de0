// hcs-logs - Library root
//
// Re-exports the store, prompt, maintenance, resolve, destination, and CLI
// modules.

pub mod cli;
pub mod destination;
pub mod error;
pub mod maintenance;
pub mod prompt;
pub mod resolve;
pub mod store;

pub use error::{HcsError, Result};
