pub mod client;
pub mod session_storage;
pub mod types;

pub use client::*;
pub use session_storage::*;
pub use types::*;
