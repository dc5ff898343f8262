/// Authorization module.
///
/// Authentication happens in the HTTP middleware (JWT verification);
/// this module owns the rest: resolving an authenticated user into a
/// role-carrying `Principal` and the pure permission predicates the
/// handlers consult before touching any object.

mod principal;
pub mod predicates;

pub use principal::{AuthUser, Principal, Role};
