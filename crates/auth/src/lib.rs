//! `campuserp-auth` — authentication and role-based authorization.
//!
//! This crate is intentionally decoupled from any UI or storage: credential
//! checks run against an in-memory user list, and the navigation tree is
//! filtered by the permissions a principal resolves to.

pub mod menu;
pub mod permissions;
pub mod policy;
pub mod principal;
pub mod roles;
pub mod user;

pub use menu::{MenuItem, MenuTree};
pub use permissions::Permission;
pub use policy::permissions_for_role;
pub use principal::{authorize, AuthzError, Principal};
pub use roles::Role;
pub use user::{authenticate, User, UserStatus};
