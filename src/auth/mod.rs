//! Sign-in, sessions and roles.

pub mod firebase;
pub mod role;
pub mod types;

pub use firebase::FirebaseAuth;
pub use role::{resolve_role, RoleResolution, USERS};
pub use types::{AuthError, FederatedProvider, IdentityProvider, Role, Session};
