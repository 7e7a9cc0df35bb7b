//! Session identity.
//!
//! Commands ask the injected [`SessionProvider`] who is acting instead of
//! reading a global "current user". The only implementation shipped is
//! [`MockSession`]: signing in accepts any well-formed credentials and keeps
//! the configured user id.

/// Default id of the session user.
pub const DEFAULT_USER_ID: &str = "currentUser";

pub trait SessionProvider: Send {
    /// Id of the user acting in this session.
    fn user_id(&self) -> &str;

    fn is_authenticated(&self) -> bool;

    /// Mark the session signed in after a successful login or registration.
    fn sign_in(&mut self, email: &str);

    fn sign_out(&mut self);
}

/// A session that trusts every submission.
#[derive(Debug, Clone)]
pub struct MockSession {
    user_id: String,
    authenticated: bool,
}

impl MockSession {
    /// A signed-in session for `user_id`.
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            authenticated: true,
        }
    }

    /// A session that must log in before reaching protected pages.
    pub fn signed_out(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            authenticated: false,
        }
    }
}

impl Default for MockSession {
    fn default() -> Self {
        Self::signed_in(DEFAULT_USER_ID)
    }
}

impl SessionProvider for MockSession {
    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn sign_in(&mut self, email: &str) {
        tracing::debug!(user = %self.user_id, email, "session signed in");
        self.authenticated = true;
    }

    fn sign_out(&mut self) {
        tracing::debug!(user = %self.user_id, "session signed out");
        self.authenticated = false;
    }
}
