// ============================================================================
// HTTP CLIENT - single outbound gateway to the backend
// ============================================================================
// Attaches the bearer token, classifies failures, and owns the
// error-to-notification mapping. Stores never talk to gloo directly.
// ============================================================================

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::window;

use crate::services::error::ApiError;
use crate::stores::ToastStore;
use crate::utils::{
    load_from_storage, remove_from_storage, BACKEND_URL, STORAGE_KEY_SESSION, STORAGE_KEY_TOKEN,
};

/// Request body produced by the uniform encoder in `blog_api`: JSON unless
/// a binary field is attached, multipart otherwise.
pub enum EncodedBody {
    Json(serde_json::Value),
    Multipart(web_sys::FormData),
}

/// Whether a path is authentication-scoped. Only failures from these
/// endpoints are allowed to invalidate the session; a 401 from anywhere
/// else is treated as a false positive.
pub fn is_auth_endpoint(path: &str) -> bool {
    path.starts_with("/auth/")
}

/// HTTP client adapter. Cheap to clone; clones share the notification sink.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    toasts: ToastStore,
}

impl ApiClient {
    pub fn new(toasts: ToastStore) -> Self {
        Self {
            base_url: BACKEND_URL.to_string(),
            toasts,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    /// Bearer token from durable storage; absence is fine (anonymous reads).
    fn bearer(&self) -> Option<String> {
        load_from_storage::<String>(STORAGE_KEY_TOKEN)
    }

    fn authorize(&self, builder: RequestBuilder, path: &str) -> RequestBuilder {
        match self.bearer() {
            Some(token) => {
                log::debug!("🔐 Attaching auth token to request: {}", path);
                builder.header("Authorization", &format!("Bearer {}", token))
            }
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, quiet: bool) -> Result<T, ApiError> {
        self.get_with_query(path, &[], quiet).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        quiet: bool,
    ) -> Result<T, ApiError> {
        let mut builder = Request::get(&self.api_url(path));
        if !query.is_empty() {
            builder = builder.query(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        let request = self.authorize(builder, path).build();
        self.execute(request, path, quiet).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        quiet: bool,
    ) -> Result<T, ApiError> {
        let builder = self.authorize(Request::post(&self.api_url(path)), path);
        self.execute(builder.json(body), path, quiet).await
    }

    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        quiet: bool,
    ) -> Result<T, ApiError> {
        let builder = self.authorize(Request::put(&self.api_url(path)), path);
        self.execute(builder.json(body), path, quiet).await
    }

    pub async fn post_body<T: DeserializeOwned>(
        &self,
        path: &str,
        body: EncodedBody,
        quiet: bool,
    ) -> Result<T, ApiError> {
        let builder = self.authorize(Request::post(&self.api_url(path)), path);
        let request = match body {
            EncodedBody::Json(value) => builder.json(&value),
            EncodedBody::Multipart(form) => builder.body(form),
        };
        self.execute(request, path, quiet).await
    }

    pub async fn put_body<T: DeserializeOwned>(
        &self,
        path: &str,
        body: EncodedBody,
        quiet: bool,
    ) -> Result<T, ApiError> {
        let builder = self.authorize(Request::put(&self.api_url(path)), path);
        let request = match body {
            EncodedBody::Json(value) => builder.json(&value),
            EncodedBody::Multipart(form) => builder.body(form),
        };
        self.execute(request, path, quiet).await
    }

    /// POST whose response body is ignored (logout, publish, unpublish).
    pub async fn post_no_content(&self, path: &str, quiet: bool) -> Result<(), ApiError> {
        let request = self
            .authorize(Request::post(&self.api_url(path)), path)
            .build();
        self.send(request, path, quiet).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str, quiet: bool) -> Result<(), ApiError> {
        let request = self
            .authorize(Request::delete(&self.api_url(path)), path)
            .build();
        self.send(request, path, quiet).await.map(|_| ())
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: Result<Request, gloo_net::Error>,
        path: &str,
        quiet: bool,
    ) -> Result<T, ApiError> {
        let response = self.send(request, path, quiet).await?;
        match response.json::<T>().await {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                let err = ApiError::Decode(format!("{}", e));
                self.report(&err, path, quiet);
                Err(err)
            }
        }
    }

    /// Send the request and classify any failure. Exactly one notification
    /// per failure unless the caller asked for quiet handling.
    async fn send(
        &self,
        request: Result<Request, gloo_net::Error>,
        path: &str,
        quiet: bool,
    ) -> Result<Response, ApiError> {
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                let err = ApiError::Decode(format!("request build error: {}", e));
                self.report(&err, path, quiet);
                return Err(err);
            }
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = ApiError::Network(format!("{}", e));
                self.report(&err, path, quiet);
                return Err(err);
            }
        };

        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status, is_auth_endpoint(path), &body);
        self.report(&err, path, quiet);
        Err(err)
    }

    fn report(&self, err: &ApiError, path: &str, quiet: bool) {
        log::error!("❌ API error on {}: {:?}", path, err);
        if quiet {
            // Caller-specific handling: no toast, no session side effects.
            return;
        }

        match err {
            ApiError::Validation(messages) if !messages.is_empty() => {
                for message in messages {
                    self.toasts.error(message.clone());
                }
            }
            _ => self.toasts.error(err.user_message()),
        }

        if err.clears_session() {
            expire_session();
        }
    }
}

/// Irrecoverable auth failure: drop the persisted session and send the
/// user back to the login entry point.
fn expire_session() {
    log::warn!("🔐 Session expired, clearing stored credentials");
    let _ = remove_from_storage(STORAGE_KEY_TOKEN);
    let _ = remove_from_storage(STORAGE_KEY_SESSION);
    if let Some(win) = window() {
        let _ = win.location().set_href("/login");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_scope_is_path_based() {
        assert!(is_auth_endpoint("/auth/login/"));
        assert!(is_auth_endpoint("/auth/check-auth/"));
        assert!(!is_auth_endpoint("/blog/posts/"));
        assert!(!is_auth_endpoint("/blog/posts/my_posts/"));
    }
}
