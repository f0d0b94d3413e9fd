use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::app::{Navigator, Route};
use crate::components::link::Link;
use crate::hooks::use_auth;

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let auth = use_auth();
    let navigator = use_context::<Navigator>().expect("Navigator context is not provided");

    let on_logout = {
        let store = auth.store.clone();
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            let store = store.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                store.logout().await;
                navigator.push(Route::Home);
            });
        })
    };

    html! {
        <nav class="navbar">
            <div class="navbar-brand">
                <Link to={Route::Home} class="navbar-logo">{"✒️ Blog Platform"}</Link>
            </div>
            <div class="navbar-links">
                <Link to={Route::Blog}>{"Blog"}</Link>
                {
                    if auth.auth.is_authenticated {
                        html! {
                            <>
                                <Link to={Route::NewPost}>{"Write"}</Link>
                                <Link to={Route::MyPosts}>{"My Posts"}</Link>
                                <Link to={Route::Profile} class="navbar-user">
                                    {
                                        auth.auth.user.as_ref()
                                            .map(|u| u.username.clone())
                                            .unwrap_or_else(|| "Profile".to_string())
                                    }
                                </Link>
                                <button class="btn btn-link" onclick={on_logout}>{"Logout"}</button>
                            </>
                        }
                    } else {
                        html! {
                            <>
                                <Link to={Route::Login}>{"Login"}</Link>
                                <Link to={Route::Register} class="btn btn-primary">{"Sign up"}</Link>
                            </>
                        }
                    }
                }
            </div>
        </nav>
    }
}
