pub mod guard;
pub mod idle;
pub mod impersonation;
pub mod layout;
