// ============================================================================
// AUTH API - typed wrappers for the /auth/ endpoints
// ============================================================================

use crate::models::{
    AuthResponse, CheckAuthResponse, EmailVerificationRequest, ForgotPasswordRequest,
    LoginRequest, ProfileUpdate, RegisterRequest, ResendVerificationRequest,
    ResetPasswordRequest, User,
};
use crate::services::error::ApiError;
use crate::services::http::ApiClient;

impl ApiClient {
    /// Login is handled quietly: the form owns the failure UX so it can
    /// distinguish unverified-email rejections from bad credentials.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/login/", credentials, true).await
    }

    pub async fn register(&self, credentials: &RegisterRequest) -> Result<(), ApiError> {
        self.post_json::<_, serde_json::Value>("/auth/register/", credentials, false)
            .await
            .map(|_| ())
    }

    /// Best-effort server-side invalidation; callers ignore the outcome.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.post_no_content("/auth/logout/", true).await
    }

    pub async fn verify_email(&self, token: String) -> Result<(), ApiError> {
        let payload = EmailVerificationRequest { token };
        self.post_json::<_, serde_json::Value>("/auth/verify-email/", &payload, false)
            .await
            .map(|_| ())
    }

    pub async fn resend_verification(&self, email: String) -> Result<(), ApiError> {
        let payload = ResendVerificationRequest { email };
        self.post_json::<_, serde_json::Value>("/auth/resend-verification/", &payload, false)
            .await
            .map(|_| ())
    }

    pub async fn forgot_password(&self, email: String) -> Result<(), ApiError> {
        let payload = ForgotPasswordRequest { email };
        self.post_json::<_, serde_json::Value>("/auth/forgot-password/", &payload, false)
            .await
            .map(|_| ())
    }

    pub async fn reset_password(&self, payload: &ResetPasswordRequest) -> Result<(), ApiError> {
        self.post_json::<_, serde_json::Value>("/auth/reset-password/", payload, false)
            .await
            .map(|_| ())
    }

    pub async fn get_profile(&self) -> Result<User, ApiError> {
        self.get("/auth/profile/", false).await
    }

    pub async fn update_profile(&self, fields: &ProfileUpdate) -> Result<User, ApiError> {
        self.put_json("/auth/profile/", fields, false).await
    }

    /// Revalidates the stored token. Quiet: the auth store decides what a
    /// failure means for cached session state.
    pub async fn check_auth(&self) -> Result<CheckAuthResponse, ApiError> {
        self.get("/auth/check-auth/", true).await
    }
}
