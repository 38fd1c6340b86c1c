//! Identity collaborator used by the dashboard chrome.
//!
//! The editor never consults identity; only the navbar and sidebar render
//! it. `LocalIdentity` stands in for an external identity provider.

use tracing::info;

use crate::error::IdentityError;

/// The signed-in person as far as the dashboard cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub display_name: String,
}

/// Read side plus the sign-in trigger of an identity provider.
pub trait Identity {
    fn is_signed_in(&self) -> bool;
    fn current_user(&self) -> Option<&User>;
    fn sign_in(&mut self) -> Result<(), IdentityError>;
}

/// Identity backed by a locally configured user name.
#[derive(Debug, Clone, Default)]
pub struct LocalIdentity {
    known: Option<User>,
    signed_in: bool,
}

impl LocalIdentity {
    /// `name` falls back to `$USER` when not configured.
    pub fn new(name: Option<String>, signed_in: bool) -> Self {
        let name = name
            .or_else(|| std::env::var("USER").ok())
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        Self::with_user(name, signed_in)
    }

    fn with_user(name: Option<String>, signed_in: bool) -> Self {
        let known = name.map(|display_name| User { display_name });
        let signed_in = signed_in && known.is_some();
        LocalIdentity { known, signed_in }
    }
}

impl Identity for LocalIdentity {
    fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    fn current_user(&self) -> Option<&User> {
        if self.signed_in {
            self.known.as_ref()
        } else {
            None
        }
    }

    fn sign_in(&mut self) -> Result<(), IdentityError> {
        let user = self.known.as_ref().ok_or(IdentityError::NoUser)?;
        info!(user = %user.display_name, "signed in");
        self.signed_in = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_flow() {
        let mut id = LocalIdentity::with_user(Some("Ada".into()), false);
        assert!(!id.is_signed_in());
        assert!(id.current_user().is_none());
        id.sign_in().unwrap();
        assert!(id.is_signed_in());
        assert_eq!(id.current_user().map(|u| u.display_name.as_str()), Some("Ada"));
    }

    #[test]
    fn test_sign_in_without_user_fails() {
        let mut id = LocalIdentity::with_user(None, true);
        assert!(!id.is_signed_in());
        assert_eq!(id.sign_in(), Err(IdentityError::NoUser));
    }
}
