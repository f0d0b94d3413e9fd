use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::app::Route;
use crate::components::link::Link;
use crate::hooks::use_auth;
use crate::models::RegisterRequest;

const MIN_PASSWORD_LEN: usize = 8;

#[function_component(RegisterForm)]
pub fn register_form() -> Html {
    let auth = use_auth();

    let username = use_state(String::new);
    let email = use_state(String::new);
    let first_name = use_state(String::new);
    let last_name = use_state(String::new);
    let password = use_state(String::new);
    let password_confirm = use_state(String::new);
    let form_error = use_state(|| None::<String>);
    let registered = use_state(|| false);

    let bind = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_submit = {
        let username = username.clone();
        let email = email.clone();
        let first_name = first_name.clone();
        let last_name = last_name.clone();
        let password = password.clone();
        let password_confirm = password_confirm.clone();
        let form_error = form_error.clone();
        let registered = registered.clone();
        let store = auth.store.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if username.trim().is_empty() || email.trim().is_empty() {
                form_error.set(Some("Please fill in all required fields.".to_string()));
                return;
            }
            if password.len() < MIN_PASSWORD_LEN {
                form_error.set(Some(format!(
                    "Password must be at least {} characters long.",
                    MIN_PASSWORD_LEN
                )));
                return;
            }
            if *password != *password_confirm {
                form_error.set(Some("Passwords do not match.".to_string()));
                return;
            }
            form_error.set(None);

            let credentials = RegisterRequest {
                username: username.trim().to_string(),
                email: email.trim().to_string(),
                password: (*password).clone(),
                password_confirm: (*password_confirm).clone(),
                first_name: first_name.trim().to_string(),
                last_name: last_name.trim().to_string(),
            };

            let registered = registered.clone();
            let store = store.clone();
            spawn_local(async move {
                if store.register(&credentials).await.is_ok() {
                    registered.set(true);
                }
            });
        })
    };

    if *registered {
        return html! {
            <div class="auth-screen">
                <div class="auth-card">
                    <h1>{"📬 Check your email"}</h1>
                    <p>{"We sent you a verification link. Open it to activate your account."}</p>
                    <Link to={Route::Login} class="btn btn-primary">{"Back to login"}</Link>
                </div>
            </div>
        };
    }

    html! {
        <div class="auth-screen">
            <div class="auth-card">
                <h1>{"Create your account"}</h1>

                <form class="auth-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="username">{"Username"}</label>
                        <input
                            type="text"
                            id="username"
                            value={(*username).clone()}
                            oninput={bind(&username)}
                            required=true
                        />
                    </div>

                    <div class="form-group">
                        <label for="email">{"Email"}</label>
                        <input
                            type="email"
                            id="email"
                            value={(*email).clone()}
                            oninput={bind(&email)}
                            required=true
                        />
                    </div>

                    <div class="form-row">
                        <div class="form-group">
                            <label for="first_name">{"First name"}</label>
                            <input
                                type="text"
                                id="first_name"
                                value={(*first_name).clone()}
                                oninput={bind(&first_name)}
                            />
                        </div>
                        <div class="form-group">
                            <label for="last_name">{"Last name"}</label>
                            <input
                                type="text"
                                id="last_name"
                                value={(*last_name).clone()}
                                oninput={bind(&last_name)}
                            />
                        </div>
                    </div>

                    <div class="form-group">
                        <label for="password">{"Password"}</label>
                        <input
                            type="password"
                            id="password"
                            value={(*password).clone()}
                            oninput={bind(&password)}
                            required=true
                        />
                    </div>

                    <div class="form-group">
                        <label for="password_confirm">{"Confirm password"}</label>
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
                        { if auth.auth.is_loading { "Creating account..." } else { "Sign up" } }
                    </button>
                </form>

                <div class="auth-footer">
                    <span>
                        {"Already have an account? "}
                        <Link to={Route::Login}>{"Login"}</Link>
                    </span>
                </div>
            </div>
        </div>
    }
}
