pub mod identity;
pub mod scope;

pub use identity::{AuthUser, Role};
pub use scope::{ScopeError, ViewScope};
