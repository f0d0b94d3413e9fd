use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::app::Route;
use crate::components::link::Link;
use crate::hooks::use_auth;

#[derive(Clone, PartialEq)]
enum VerificationState {
    Pending,
    Verified,
    Failed,
}

#[derive(Properties, PartialEq)]
pub struct VerifyEmailViewProps {
    pub token: String,
}

/// Landing page for the verification link: confirms the token once on
/// mount and reports the outcome.
#[function_component(VerifyEmailView)]
pub fn verify_email_view(props: &VerifyEmailViewProps) -> Html {
    let auth = use_auth();
    let state = use_state(|| VerificationState::Pending);

    {
        let state = state.clone();
        let store = auth.store.clone();
        let token = props.token.clone();
        use_effect_with(token, move |token| {
            let token = token.clone();
            spawn_local(async move {
                match store.verify_email(token).await {
                    Ok(()) => state.set(VerificationState::Verified),
                    Err(_) => state.set(VerificationState::Failed),
                }
            });
            || ()
        });
    }

    html! {
        <div class="auth-screen">
            <div class="auth-card">
                {
                    match &*state {
                        VerificationState::Pending => html! {
                            <>
                                <h1>{"Verifying..."}</h1>
                                <p>{"Hold on while we confirm your email address."}</p>
                            </>
                        },
                        VerificationState::Verified => html! {
                            <>
                                <h1>{"✅ Email verified"}</h1>
                                <p>{"Your account is active. You can login now."}</p>
                                <Link to={Route::Login} class="btn btn-primary">{"Login"}</Link>
                            </>
                        },
                        VerificationState::Failed => html! {
                            <>
                                <h1>{"Verification failed"}</h1>
                                <p>{"The link is invalid or has expired. Request a new one from the login page."}</p>
                                <Link to={Route::Login} class="btn btn-primary">{"Back to login"}</Link>
                            </>
                        },
                    }
                }
            </div>
        </div>
    }
}
