//! Access control lists consumed by the definition extractor.
//!
//! An ACL maps role names to 4-bit permission masks, the bits being (from
//! most to least significant) Create, Read, Update and Delete. Denying all
//! permissions can be explicitly represented as `0`.
//!
//! The extractor itself never combines or escalates permissions: it consumes
//! an opaque predicate over an [`Acl`] and uniformly gates every resolved
//! node with it. [`grants`] builds the one predicate shape callers usually
//! need; anything more elaborate is up to the caller.

use std::collections::HashMap;

/// Role → 4-bit CRUD permission mask.
pub type Acl = HashMap<String, u8>;

/// Create permission bit.
pub const CREATE: u8 = 0b1000;
/// Read permission bit.
pub const READ: u8 = 0b0100;
/// Update permission bit.
pub const UPDATE: u8 = 0b0010;
/// Delete permission bit.
pub const DELETE: u8 = 0b0001;
/// All four permission bits.
pub const CRUD: u8 = CREATE | READ | UPDATE | DELETE;

/// Build a predicate granting access when any of the user's roles carries
/// the requested verb.
///
/// # Examples
///
/// ```
/// use casepath::acl::{self, Acl};
///
/// let check = acl::grants(acl::READ, &["caseworker"]);
/// let acl = Acl::from([("caseworker".to_string(), acl::READ | acl::UPDATE)]);
/// assert!(check(&acl));
/// assert!(!acl::grants(acl::DELETE, &["caseworker"])(&acl));
/// ```
pub fn grants(verb: u8, user_roles: &[&str]) -> impl Fn(&Acl) -> bool + use<> {
    let roles: Vec<String> = user_roles.iter().map(|role| role.to_string()).collect();
    move |acl| {
        roles
            .iter()
            .any(|role| acl.get(role).is_some_and(|mask| mask & verb != 0))
    }
}
