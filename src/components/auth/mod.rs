pub mod login_form;
pub mod password_forms;
pub mod profile_view;
pub mod register_form;
pub mod verify_email_view;

pub use login_form::LoginForm;
pub use password_forms::{ForgotPasswordForm, ResetPasswordForm};
pub use profile_view::ProfileView;
pub use register_form::RegisterForm;
pub use verify_email_view::VerifyEmailView;
