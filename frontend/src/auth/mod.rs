//! Session core: identity model, the single-writer session store, the
//! provider bridge, idle timeout, route guard and impersonation scoping.
//!
//! Nothing in here depends on Leptos; `state::auth` and
//! `components::guard` bind it to the reactive runtime.

pub mod bridge;
pub mod error;
pub mod guard;
pub mod identity;
pub mod impersonation;
pub mod inactivity;
pub mod provider;
pub mod session;
pub mod store;
pub mod subscription;

pub use bridge::SessionBridge;
pub use error::AuthError;
pub use guard::GuardDecision;
pub use identity::{Identity, Role};
pub use impersonation::{ImpersonationContext, ViewScope};
pub use inactivity::{IdleAction, InactivityConfig, InactivityMonitor};
pub use provider::{AuthEvent, IdentityProvider, SessionChange};
pub use session::{Session, SessionSnapshot};
pub use store::SessionStore;
pub use subscription::Subscription;
