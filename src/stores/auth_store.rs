// ============================================================================
// AUTH STORE - session lifecycle (login, register, verify, reset, refresh)
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::{
    AuthResponse, LoginRequest, ProfileUpdate, RegisterRequest, ResetPasswordRequest, User,
};
use crate::services::{ApiClient, ApiError};
use crate::state::{ReactiveState, SubscriptionId};
use crate::stores::ToastStore;
use crate::utils::{
    load_from_storage, remove_from_storage, save_to_storage, STORAGE_KEY_SESSION,
    STORAGE_KEY_TOKEN,
};

/// Client-side session state. `is_authenticated` is only true while a
/// token is present; both are written in the same synchronous step so no
/// caller can observe one without the other.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl AuthState {
    fn apply_login(&mut self, user: User, token: String) {
        self.user = Some(user);
        self.token = Some(token);
        self.is_authenticated = true;
        self.is_loading = false;
    }

    fn clear(&mut self) {
        self.user = None;
        self.token = None;
        self.is_authenticated = false;
        self.is_loading = false;
    }

    fn apply_check_auth_success(&mut self, user: User) {
        // Profile is replaced wholesale, never patched.
        self.user = Some(user);
        self.is_authenticated = true;
        self.is_loading = false;
    }

    /// Revalidation failed. Only an explicit rejection of the token kills
    /// the cached session; a transient failure merely degrades
    /// `is_authenticated` so a flaky request cannot destroy local data.
    fn apply_check_auth_failure(&mut self, err: &ApiError) {
        match err {
            ApiError::Unauthorized { .. } | ApiError::Forbidden => self.clear(),
            _ => {
                self.is_authenticated = false;
                self.is_loading = false;
            }
        }
    }

    fn snapshot_for_storage(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.user.clone(),
            token: self.token.clone(),
            is_authenticated: self.is_authenticated,
        }
    }
}

/// The slice of session state persisted across restarts.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

/// Owns authentication state and the session lifecycle operations. Created
/// once at app boot and handed to the UI through context.
#[derive(Clone)]
pub struct AuthStore {
    api: ApiClient,
    toasts: ToastStore,
    state: ReactiveState<AuthState>,
}

impl PartialEq for AuthStore {
    fn eq(&self, other: &Self) -> bool {
        self.state.ptr_eq(&other.state)
    }
}

impl AuthStore {
    /// Restores any persisted session from durable storage.
    pub fn new(api: ApiClient, toasts: ToastStore) -> Self {
        let mut state = AuthState::default();
        if let Some(snapshot) = load_from_storage::<SessionSnapshot>(STORAGE_KEY_SESSION) {
            log::info!(
                "💾 Restored session snapshot for {}",
                snapshot
                    .user
                    .as_ref()
                    .map(|u| u.username.as_str())
                    .unwrap_or("<anonymous>")
            );
            state.user = snapshot.user;
            state.token = snapshot.token;
            state.is_authenticated = snapshot.is_authenticated && state.token.is_some();
        }

        Self {
            api,
            toasts,
            state: ReactiveState::new(state),
        }
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.get_cloned()
    }

    pub fn subscribe(&self, callback: impl Fn() + 'static) -> SubscriptionId {
        self.state.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.state.unsubscribe(id)
    }

    /// Authenticate. On success the token and user are stored atomically.
    /// On failure prior state is untouched and the error is returned so the
    /// form can branch on `ApiError::is_unverified_email`.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<(), ApiError> {
        self.state.update(|s| s.is_loading = true);
        log::info!("🔐 Logging in {}", credentials.email);

        match self.api.login(credentials).await {
            Ok(AuthResponse { token, user }) => {
                self.persist(Some(token.as_str()), &user);
                self.state.update(|s| s.apply_login(user, token));
                log::info!("✅ Login successful");
                self.toasts.success("Login successful!");
                Ok(())
            }
            Err(err) => {
                log::warn!("❌ Login failed: {:?}", err);
                self.state.update(|s| s.is_loading = false);
                Err(err)
            }
        }
    }

    /// Create an account. Registration never authenticates; the user is
    /// sent to their inbox for verification instead.
    pub async fn register(&self, credentials: &RegisterRequest) -> Result<(), ApiError> {
        self.state.update(|s| s.is_loading = true);
        let result = self.api.register(credentials).await;
        self.state.update(|s| s.is_loading = false);

        match result {
            Ok(()) => {
                log::info!("📝 Registered {}", credentials.email);
                self.toasts
                    .success("Registration successful! Please check your email for verification.");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Best-effort server-side invalidation, then an unconditional local
    /// clear. Logout never fails from the caller's perspective.
    pub async fn logout(&self) {
        if let Err(err) = self.api.logout().await {
            log::warn!("⚠️ Server-side logout failed (ignored): {:?}", err);
        }

        self.clear_persisted();
        self.state.update(|s| s.clear());
        log::info!("👋 Logged out");
        self.toasts.success("Logged out successfully");
    }

    pub async fn verify_email(&self, token: String) -> Result<(), ApiError> {
        self.state.update(|s| s.is_loading = true);
        let result = self.api.verify_email(token).await;
        self.state.update(|s| s.is_loading = false);

        result.map(|()| {
            self.toasts
                .success("Email verified successfully! You can now login.");
        })
    }

    pub async fn resend_verification(&self, email: String) -> Result<(), ApiError> {
        self.api.resend_verification(email).await.map(|()| {
            self.toasts.success("Verification email sent!");
        })
    }

    pub async fn forgot_password(&self, email: String) -> Result<(), ApiError> {
        self.state.update(|s| s.is_loading = true);
        let result = self.api.forgot_password(email).await;
        self.state.update(|s| s.is_loading = false);

        result.map(|()| {
            self.toasts.success("Password reset email sent successfully!");
        })
    }

    pub async fn reset_password(&self, token: String, new_password: String) -> Result<(), ApiError> {
        self.state.update(|s| s.is_loading = true);
        let payload = ResetPasswordRequest {
            token,
            new_password,
        };
        let result = self.api.reset_password(&payload).await;
        self.state.update(|s| s.is_loading = false);

        result.map(|()| {
            self.toasts.success(
                "Password reset successfully! You can now login with your new password.",
            );
        })
    }

    /// Revalidate the stored token against the backend. Returns whether the
    /// session is authenticated afterwards.
    pub async fn check_auth(&self) -> Result<bool, ApiError> {
        let token = self.state.with(|s| s.token.clone());
        if token.is_none() {
            self.state.update(|s| s.is_authenticated = false);
            return Ok(false);
        }

        self.state.update(|s| s.is_loading = true);
        log::info!("🔄 Revalidating session token");

        match self.api.check_auth().await {
            Ok(response) => {
                self.persist(token.as_deref(), &response.user);
                self.state.update(|s| s.apply_check_auth_success(response.user));
                Ok(true)
            }
            Err(err) => {
                self.state.update(|s| s.apply_check_auth_failure(&err));
                if err.clears_session() || matches!(err, ApiError::Forbidden) {
                    log::warn!("🔐 Stored token rejected, clearing session");
                    self.clear_persisted();
                } else {
                    log::warn!("⚠️ Auth check failed transiently, keeping cached session");
                }
                Err(err)
            }
        }
    }

    /// Replace profile fields, waiting for server confirmation (no
    /// optimistic write).
    pub async fn update_profile(&self, fields: &ProfileUpdate) -> Result<(), ApiError> {
        self.state.update(|s| s.is_loading = true);

        match self.api.update_profile(fields).await {
            Ok(user) => {
                let token = self.state.with(|s| s.token.clone());
                self.persist(token.as_deref(), &user);
                self.state.update(|s| {
                    s.user = Some(user);
                    s.is_loading = false;
                });
                self.toasts.success("Profile updated successfully!");
                Ok(())
            }
            Err(err) => {
                self.state.update(|s| s.is_loading = false);
                Err(err)
            }
        }
    }

    /// Re-fetch the profile for the account views.
    pub async fn refresh_profile(&self) -> Result<(), ApiError> {
        let user = self.api.get_profile().await?;
        let token = self.state.with(|s| s.token.clone());
        self.persist(token.as_deref(), &user);
        self.state.update(|s| s.user = Some(user));
        Ok(())
    }

    /// Write the token and session snapshot to durable storage. Both keys
    /// are written back-to-back in the same task so the adapter never sees
    /// a token without its snapshot.
    fn persist(&self, token: Option<&str>, user: &User) {
        if let Some(token) = token {
            if let Err(e) = save_to_storage(STORAGE_KEY_TOKEN, &token) {
                log::error!("❌ Failed to persist token: {}", e);
            }
        }
        let snapshot = SessionSnapshot {
            user: Some(user.clone()),
            token: token.map(str::to_string),
            is_authenticated: token.is_some(),
        };
        if let Err(e) = save_to_storage(STORAGE_KEY_SESSION, &snapshot) {
            log::error!("❌ Failed to persist session snapshot: {}", e);
        }
    }

    fn clear_persisted(&self) {
        let _ = remove_from_storage(STORAGE_KEY_TOKEN);
        let _ = remove_from_storage(STORAGE_KEY_SESSION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64) -> User {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "username": format!("user{}", id),
            "email": format!("user{}@example.com", id),
        }))
        .unwrap()
    }

    #[test]
    fn login_stores_user_and_token_atomically() {
        let mut state = AuthState::default();
        state.apply_login(user(1), "tok".into());
        assert!(state.is_authenticated);
        assert_eq!(state.token.as_deref(), Some("tok"));
        assert!(state.user.is_some());
        assert!(!state.is_loading);
    }

    #[test]
    fn failed_login_leaves_prior_state_untouched() {
        // The store only flips is_loading on a failed attempt; user/token/
        // auth flags are not written at all, so prior state survives.
        let mut state = AuthState::default();
        state.apply_login(user(1), "tok".into());
        let before = state.clone();

        state.is_loading = true;
        state.is_loading = false;
        assert_eq!(state, before);
    }

    #[test]
    fn explicit_rejection_clears_the_session() {
        let mut state = AuthState::default();
        state.apply_login(user(1), "tok".into());

        state.apply_check_auth_failure(&ApiError::Unauthorized {
            auth_endpoint: true,
            detail: None,
        });
        assert_eq!(state, AuthState::default());

        let mut state = AuthState::default();
        state.apply_login(user(1), "tok".into());
        state.apply_check_auth_failure(&ApiError::Forbidden);
        assert!(state.user.is_none());
    }

    #[test]
    fn transient_failure_keeps_cached_user() {
        let mut state = AuthState::default();
        state.apply_login(user(1), "tok".into());

        state.apply_check_auth_failure(&ApiError::Network("offline".into()));
        assert!(!state.is_authenticated);
        assert_eq!(state.user, Some(user(1)));
        assert_eq!(state.token.as_deref(), Some("tok"));

        state.apply_check_auth_failure(&ApiError::Server);
        assert_eq!(state.user, Some(user(1)));
    }

    #[test]
    fn check_auth_replaces_profile_wholesale() {
        let mut state = AuthState::default();
        state.apply_login(user(1), "tok".into());

        let mut refreshed = user(1);
        refreshed.first_name = "Ada".into();
        state.apply_check_auth_success(refreshed.clone());
        assert_eq!(state.user, Some(refreshed));
        assert!(state.is_authenticated);
    }

    #[test]
    fn unverified_login_error_is_not_invalid_credentials() {
        let unverified = ApiError::from_status(
            400,
            true,
            r#"{"error":"Please verify your email address before logging in."}"#,
        );
        let bad_credentials = ApiError::from_status(401, true, "");

        assert!(unverified.is_unverified_email());
        assert!(!bad_credentials.is_unverified_email());

        // Neither failure authenticates anything.
        let mut state = AuthState::default();
        state.is_loading = false;
        assert!(!state.is_authenticated);
    }
}
