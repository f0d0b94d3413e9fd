pub mod store_provider;
pub mod use_auth;
pub mod use_blog;
pub mod use_toasts;

pub use store_provider::StoreProvider;
pub use use_auth::{use_auth, UseAuthHandle};
pub use use_blog::{use_blog, UseBlogHandle};
pub use use_toasts::{use_toasts, UseToastsHandle};
