pub mod auth;
pub mod request_id;
pub mod scope;

pub use auth::*;
pub use request_id::*;
pub use scope::*;
