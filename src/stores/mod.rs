pub mod auth_store;
pub mod blog_store;
pub mod toast_store;

pub use auth_store::{AuthState, AuthStore, SessionSnapshot};
pub use blog_store::{BlogState, BlogStore, Filters, StatusFilter};
pub use toast_store::{Toast, ToastKind, ToastStore, TOAST_DURATION_MS};
