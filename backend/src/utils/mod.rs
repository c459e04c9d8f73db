pub mod cookies;
pub mod email;
pub mod jwt;
pub mod template;

pub use jwt::*;
pub use template::*;
