use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::app::{Navigator, Route};
use crate::components::link::Link;
use crate::hooks::use_auth;
use crate::models::LoginRequest;

/// Why the last login attempt failed; drives the inline form feedback.
#[derive(Clone, PartialEq)]
enum LoginIssue {
    InvalidCredentials,
    UnverifiedEmail,
}

#[function_component(LoginForm)]
pub fn login_form() -> Html {
    let auth = use_auth();
    let navigator = use_context::<Navigator>().expect("Navigator context is not provided");

    let email = use_state(String::new);
    let password = use_state(String::new);
    let issue = use_state(|| None::<LoginIssue>);

    let on_email_change = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let issue = issue.clone();
        let store = auth.store.clone();
        let navigator = navigator.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let email_val = (*email).trim().to_string();
            let password_val = (*password).clone();
            if email_val.is_empty() || password_val.is_empty() {
                return;
            }

            let issue = issue.clone();
            let store = store.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                let credentials = LoginRequest {
                    email: email_val,
                    password: password_val,
                };
                match store.login(&credentials).await {
                    Ok(()) => {
                        issue.set(None);
                        navigator.push(Route::Home);
                    }
                    Err(err) if err.is_unverified_email() => {
                        issue.set(Some(LoginIssue::UnverifiedEmail));
                    }
                    Err(_) => {
                        issue.set(Some(LoginIssue::InvalidCredentials));
                    }
                }
            });
        })
    };

    let on_resend = {
        let email = email.clone();
        let store = auth.store.clone();
        Callback::from(move |_: MouseEvent| {
            let email_val = (*email).trim().to_string();
            if email_val.is_empty() {
                return;
            }
            let store = store.clone();
            spawn_local(async move {
                let _ = store.resend_verification(email_val).await;
            });
        })
    };

    html! {
        <div class="auth-screen">
            <div class="auth-card">
                <h1>{"Welcome back"}</h1>
                <p class="auth-subtitle">{"Login to your account"}</p>

                <form class="auth-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="email">{"Email"}</label>
                        <input
                            type="email"
                            id="email"
                            placeholder="you@example.com"
                            value={(*email).clone()}
                            oninput={on_email_change}
                            required=true
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">{"Password"}</label>
                        <input
                            type="password"
                            id="password"
                            placeholder="Your password"
                            value={(*password).clone()}
                            oninput={on_password_change}
                            required=true
                        />
                    </div>

                    {
                        match &*issue {
                            Some(LoginIssue::InvalidCredentials) => html! {
                                <p class="form-error">{"Invalid email or password"}</p>
                            },
                            Some(LoginIssue::UnverifiedEmail) => html! {
                                <div class="form-warning">
                                    <p>{"Please verify your email address before logging in."}</p>
                                    <button type="button" class="btn btn-link" onclick={on_resend}>
                                        {"Resend verification email"}
                                    </button>
                                </div>
                            },
                            None => html! {},
                        }
                    }

                    <button type="submit" class="btn btn-primary" disabled={auth.auth.is_loading}>
                        { if auth.auth.is_loading { "Logging in..." } else { "Login" } }
                    </button>
                </form>

                <div class="auth-footer">
                    <Link to={Route::ForgotPassword}>{"Forgot password?"}</Link>
                    <span>
                        {"No account yet? "}
                        <Link to={Route::Register}>{"Sign up"}</Link>
                    </span>
                </div>
            </div>
        </div>
    }
}
