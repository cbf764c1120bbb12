//! Access checks against page metadata
//!
//! Pages only carry `requiresAuth` and `requiredRole`; whoever serves a page
//! decides who is viewing it and calls [`authorize`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::{PageMetadata, Role};

/// The signed-in user looking at a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub username: String,
    pub role: Role,
}

impl Viewer {
    /// Demo sign-in: the username is derived from the role
    pub fn demo(role: Role) -> Self {
        Self {
            username: role.as_str().to_ascii_lowercase(),
            role,
        }
    }
}

/// Why a page may not be shown
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    #[error("Unauthorized. Please login.")]
    Unauthorized,

    #[error("Forbidden. Insufficient permissions.")]
    Forbidden,
}

/// Check whether `viewer` may see a page with this metadata
pub fn authorize(meta: &PageMetadata, viewer: Option<&Viewer>) -> Result<(), AccessError> {
    if meta.requires_auth && viewer.is_none() {
        return Err(AccessError::Unauthorized);
    }

    if let Some(required) = meta.required_role {
        if viewer.map(|v| v.role) != Some(required) {
            return Err(AccessError::Forbidden);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(requires_auth: bool, required_role: Option<Role>) -> PageMetadata {
        let mut meta = PageMetadata::titled("T");
        meta.requires_auth = requires_auth;
        meta.required_role = required_role;
        meta
    }

    #[test]
    fn test_public_page() {
        assert_eq!(authorize(&meta(false, None), None), Ok(()));
    }

    #[test]
    fn test_requires_sign_in() {
        let m = meta(true, None);
        assert_eq!(authorize(&m, None), Err(AccessError::Unauthorized));
        assert_eq!(authorize(&m, Some(&Viewer::demo(Role::User))), Ok(()));
    }

    #[test]
    fn test_role_must_match() {
        let m = meta(true, Some(Role::Admin));
        assert_eq!(authorize(&m, None), Err(AccessError::Unauthorized));
        assert_eq!(
            authorize(&m, Some(&Viewer::demo(Role::User))),
            Err(AccessError::Forbidden)
        );
        assert_eq!(authorize(&m, Some(&Viewer::demo(Role::Admin))), Ok(()));
    }

    #[test]
    fn test_role_without_sign_in_flag() {
        assert_eq!(
            authorize(&meta(false, Some(Role::User)), None),
            Err(AccessError::Forbidden)
        );
    }
}
