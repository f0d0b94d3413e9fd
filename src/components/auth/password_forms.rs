use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::app::{Navigator, Route};
use crate::components::link::Link;
use crate::hooks::use_auth;

/// Request the password-reset email.
#[function_component(ForgotPasswordForm)]
pub fn forgot_password_form() -> Html {
    let auth = use_auth();
    let email = use_state(String::new);
    let sent = use_state(|| false);

    let on_email_change = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_submit = {
        let email = email.clone();
        let sent = sent.clone();
        let store = auth.store.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email_val = (*email).trim().to_string();
            if email_val.is_empty() {
                return;
            }
            let sent = sent.clone();
            let store = store.clone();
            spawn_local(async move {
                if store.forgot_password(email_val).await.is_ok() {
                    sent.set(true);
                }
            });
        })
    };

    if *sent {
        return html! {
            <div class="auth-screen">
                <div class="auth-card">
                    <h1>{"📬 Check your email"}</h1>
                    <p>{"If an account exists for that address, a reset link is on its way."}</p>
                    <Link to={Route::Login} class="btn btn-primary">{"Back to login"}</Link>
                </div>
            </div>
        };
    }

    html! {
        <div class="auth-screen">
            <div class="auth-card">
                <h1>{"Reset your password"}</h1>
                <p class="auth-subtitle">{"Enter your email and we will send you a reset link."}</p>

                <form class="auth-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="email">{"Email"}</label>
                        <input
                            type="email"
                            id="email"
                            value={(*email).clone()}
                            oninput={on_email_change}
                            required=true
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled={auth.auth.is_loading}>
                        {"Send reset link"}
                    </button>
                </form>

                <div class="auth-footer">
                    <Link to={Route::Login}>{"Back to login"}</Link>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ResetPasswordFormProps {
    pub token: String,
}

/// Complete the reset with the token from the e-mailed link.
#[function_component(ResetPasswordForm)]
pub fn reset_password_form(props: &ResetPasswordFormProps) -> Html {
    let auth = use_auth();
    let navigator = use_context::<Navigator>().expect("Navigator context is not provided");

    let password = use_state(String::new);
    let password_confirm = use_state(String::new);
    let form_error = use_state(|| None::<String>);

    let bind = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_submit = {
        let password = password.clone();
        let password_confirm = password_confirm.clone();
        let form_error = form_error.clone();
        let token = props.token.clone();
        let store = auth.store.clone();
        let navigator = navigator.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if password.len() < 8 {
                form_error.set(Some(
                    "Password must be at least 8 characters long.".to_string(),
                ));
                return;
            }
            if *password != *password_confirm {
                form_error.set(Some("Passwords do not match.".to_string()));
                return;
            }
            form_error.set(None);

            let token = token.clone();
            let new_password = (*password).clone();
            let store = store.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                if store.reset_password(token, new_password).await.is_ok() {
                    navigator.push(Route::Login);
                }
            });
        })
    };

    html! {
        <div class="auth-screen">
            <div class="auth-card">
                <h1>{"Choose a new password"}</h1>

                <form class="auth-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="password">{"New password"}</label>
                        <input
                            type="password"
                            id="password"
                            value={(*password).clone()}
                            oninput={bind(&password)}
                            required=true
                        />
                    </div>
                    <div class="form-group">
                        <label for="password_confirm">{"Confirm new password"}</label>
                        <input
                            type="password"
                            id="password_confirm"
                            value={(*password_confirm).clone()}
                            oninput={bind(&password_confirm)}
                            required=true
                        />
                    </div>

                    {
                        if let Some(message) = &*form_error {
                            html! { <p class="form-error">{ message }</p> }
                        } else {
                            html! {}
                        }
                    }

                    <button type="submit" class="btn btn-primary" disabled={auth.auth.is_loading}>
                        {"Reset password"}
                    </button>
                </form>
            </div>
        </div>
    }
}
