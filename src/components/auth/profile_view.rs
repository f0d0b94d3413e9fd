use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_auth;
use crate::models::ProfileUpdate;

/// Account page: shows the cached profile and lets the user edit the
/// mutable fields. The update waits for server confirmation; there is no
/// optimistic write.
#[function_component(ProfileView)]
pub fn profile_view() -> Html {
    let auth = use_auth();

    let first_name = use_state(|| {
        auth.auth
            .user
            .as_ref()
            .map(|u| u.first_name.clone())
            .unwrap_or_default()
    });
    let last_name = use_state(|| {
        auth.auth
            .user
            .as_ref()
            .map(|u| u.last_name.clone())
            .unwrap_or_default()
    });
    let phone_number = use_state(|| {
        auth.auth
            .user
            .as_ref()
            .and_then(|u| u.phone_number.clone())
            .unwrap_or_default()
    });

    // Refresh the profile from the backend once when the page opens.
    {
        let store = auth.store.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let _ = store.refresh_profile().await;
            });
            || ()
        });
    }

    let bind = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_submit = {
        let first_name = first_name.clone();
        let last_name = last_name.clone();
        let phone_number = phone_number.clone();
        let store = auth.store.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let fields = ProfileUpdate {
                first_name: Some(first_name.trim().to_string()),
                last_name: Some(last_name.trim().to_string()),
                phone_number: if phone_number.trim().is_empty() {
                    None
                } else {
                    Some(phone_number.trim().to_string())
                },
            };
            let store = store.clone();
            spawn_local(async move {
                let _ = store.update_profile(&fields).await;
            });
        })
    };

    let Some(user) = auth.auth.user.clone() else {
        return html! {
            <div class="empty-state">
                <h2>{"No profile"}</h2>
                <p>{"Login to see your profile."}</p>
            </div>
        };
    };

    html! {
        <div class="profile-screen">
            <div class="profile-card">
                <h1>{ user.display_name() }</h1>
                <p class="profile-meta">
                    { format!("@{} · {}", user.username, user.email) }
                    {
                        if user.is_email_verified {
                            html! { <span class="badge badge-ok">{"verified"}</span> }
                        } else {
                            html! { <span class="badge badge-warn">{"unverified"}</span> }
                        }
                    }
                </p>

                <form class="profile-form" onsubmit={on_submit}>
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
                        <label for="phone_number">{"Phone number"}</label>
                        <input
                            type="tel"
                            id="phone_number"
                            value={(*phone_number).clone()}
                            oninput={bind(&phone_number)}
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled={auth.auth.is_loading}>
                        { if auth.auth.is_loading { "Saving..." } else { "Save changes" } }
                    </button>
                </form>
            </div>
        </div>
    }
}
