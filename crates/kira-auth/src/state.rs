//! Client auth state.

use crate::error::AuthError;
use crate::user::CurrentUser;
use kira_cache::{KeyValue, KeyValueExt};
use kira_commerce::checkout::{AuthToken, CredentialSource};
use tracing::{debug, warn};

/// Fixed key of the bearer token's persistence slot.
pub const TOKEN_STORAGE_KEY: &str = "kira.auth-token";

/// Who the client currently is.
///
/// The bearer token is persisted so a returning user stays logged in across
/// restarts; the user record is not (it is re-fetched from the profile
/// endpoint after restore, so a persisted token without a user record still
/// counts as authenticated).
pub struct AuthState<S: KeyValue> {
    storage: S,
    token: Option<AuthToken>,
    user: Option<CurrentUser>,
}

impl<S: KeyValue> AuthState<S> {
    /// Restore auth state from the persisted token, or start logged out.
    ///
    /// An unreadable token slot is treated as logged out, never as an error.
    pub fn load(storage: S) -> Self {
        let token = match storage.get::<AuthToken>(TOKEN_STORAGE_KEY) {
            Ok(Some(token)) => {
                debug!("restored auth token from storage");
                Some(token)
            }
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "discarding unreadable auth token");
                None
            }
        };
        Self {
            storage,
            token,
            user: None,
        }
    }

    /// Record a successful login and persist the token.
    pub fn login(&mut self, token: AuthToken, user: CurrentUser) -> Result<(), AuthError> {
        self.storage.set(TOKEN_STORAGE_KEY, &token)?;
        self.token = Some(token);
        self.user = Some(user);
        Ok(())
    }

    /// Forget the credential and delete the persisted token.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.storage.delete(TOKEN_STORAGE_KEY)?;
        self.token = None;
        self.user = None;
        Ok(())
    }

    /// Attach the user record fetched from the profile endpoint after a
    /// token-only restore.
    pub fn attach_user(&mut self, user: CurrentUser) {
        self.user = Some(user);
    }

    /// Whether a credential is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Whether the current user may use the admin surfaces.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(CurrentUser::is_admin)
    }

    /// The current user record, if known.
    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    /// The current credential, or an error suitable for call sites that
    /// require one.
    pub fn require_token(&self) -> Result<&AuthToken, AuthError> {
        self.token.as_ref().ok_or(AuthError::MissingToken)
    }
}

impl<S: KeyValue> CredentialSource for AuthState<S> {
    fn bearer_token(&self) -> Option<AuthToken> {
        self.token.clone()
    }
}
