pub mod auth_api;
pub mod blog_api;
pub mod error;
pub mod http;

pub use blog_api::PostQuery;
pub use error::ApiError;
pub use http::ApiClient;
