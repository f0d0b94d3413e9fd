// ============================================================================
// APP - root component, route resolution and session boot
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::auth::{
    ForgotPasswordForm, LoginForm, ProfileView, RegisterForm, ResetPasswordForm, VerifyEmailView,
};
use crate::components::blog::{
    HomeView, MyPostsView, PostDetail, PostEditor, PostListView, TaxonomyKind, TaxonomyView,
};
use crate::components::navbar::Navbar;
use crate::components::toast_host::ToastHost;
use crate::hooks::{use_auth, StoreProvider};

/// Client-side routes. Deep links for the email flows
/// (`/verify-email/{token}`, `/reset-password/{token}`) must survive a
/// full page load, so routes are parsed from the location path.
#[derive(Clone, PartialEq, Debug)]
pub enum Route {
    Home,
    Blog,
    PostDetail { slug: String },
    NewPost,
    EditPost { id: u64 },
    MyPosts,
    Profile,
    Login,
    Register,
    ForgotPassword,
    ResetPassword { token: String },
    VerifyEmail { token: String },
    Category { id: u64 },
    Tag { id: u64 },
    NotFound,
}

impl Route {
    pub fn from_path(path: &str) -> Route {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["blog"] => Route::Blog,
            ["blog", slug] => Route::PostDetail {
                slug: (*slug).to_string(),
            },
            ["create-post"] => Route::NewPost,
            ["edit-post", id] => match id.parse() {
                Ok(id) => Route::EditPost { id },
                Err(_) => Route::NotFound,
            },
            ["my-posts"] => Route::MyPosts,
            ["profile"] => Route::Profile,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["forgot-password"] => Route::ForgotPassword,
            ["reset-password"] => Route::ForgotPassword,
            ["reset-password", token] => Route::ResetPassword {
                token: (*token).to_string(),
            },
            ["verify-email", token] => Route::VerifyEmail {
                token: (*token).to_string(),
            },
            ["category", id] => match id.parse() {
                Ok(id) => Route::Category { id },
                Err(_) => Route::NotFound,
            },
            ["tag", id] => match id.parse() {
                Ok(id) => Route::Tag { id },
                Err(_) => Route::NotFound,
            },
            _ => Route::NotFound,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Blog => "/blog".to_string(),
            Route::PostDetail { slug } => format!("/blog/{}", slug),
            Route::NewPost => "/create-post".to_string(),
            Route::EditPost { id } => format!("/edit-post/{}", id),
            Route::MyPosts => "/my-posts".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::ForgotPassword => "/forgot-password".to_string(),
            Route::ResetPassword { token } => format!("/reset-password/{}", token),
            Route::VerifyEmail { token } => format!("/verify-email/{}", token),
            Route::Category { id } => format!("/category/{}", id),
            Route::Tag { id } => format!("/tag/{}", id),
            Route::NotFound => "/404".to_string(),
        }
    }
}

/// Navigation handle injected through context.
#[derive(Clone, PartialEq)]
pub struct Navigator {
    go: Callback<Route>,
}

impl Navigator {
    pub fn push(&self, route: Route) {
        self.go.emit(route);
    }
}

fn current_route() -> Route {
    web_sys::window()
        .and_then(|win| win.location().pathname().ok())
        .map(|path| Route::from_path(&path))
        .unwrap_or(Route::Home)
}

fn push_history(route: &Route) {
    if let Some(win) = web_sys::window() {
        if let Ok(history) = win.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&route.to_path()));
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <StoreProvider>
            <AppShell />
        </StoreProvider>
    }
}

#[function_component(AppShell)]
fn app_shell() -> Html {
    let route = use_state(current_route);
    let auth = use_auth();

    let navigator = {
        let route = route.clone();
        Navigator {
            go: Callback::from(move |next: Route| {
                push_history(&next);
                route.set(next);
            }),
        }
    };

    // Revalidate any restored session once at boot.
    {
        let store = auth.store.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let _ = store.check_auth().await;
            });
            || ()
        });
    }

    // Keep the route in sync with browser back/forward.
    {
        let route = route.clone();
        use_effect_with((), move |_| {
            let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
                route.set(current_route());
            });
            if let Some(win) = web_sys::window() {
                let _ = win.add_event_listener_with_callback(
                    "popstate",
                    listener.as_ref().unchecked_ref(),
                );
            }
            move || {
                if let Some(win) = web_sys::window() {
                    let _ = win.remove_event_listener_with_callback(
                        "popstate",
                        listener.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let authenticated = auth.auth.is_authenticated;
    let page = match &*route {
        Route::Home => html! { <HomeView /> },
        Route::Blog => html! { <PostListView /> },
        Route::PostDetail { slug } => html! { <PostDetail slug={slug.clone()} /> },
        Route::NewPost if authenticated => html! { <PostEditor post_id={None::<u64>} /> },
        Route::EditPost { id } if authenticated => html! { <PostEditor post_id={Some(*id)} /> },
        Route::MyPosts if authenticated => html! { <MyPostsView /> },
        Route::Profile if authenticated => html! { <ProfileView /> },
        Route::NewPost | Route::EditPost { .. } | Route::MyPosts | Route::Profile => {
            html! { <LoginForm /> }
        }
        Route::Login => html! { <LoginForm /> },
        Route::Register => html! { <RegisterForm /> },
        Route::ForgotPassword => html! { <ForgotPasswordForm /> },
        Route::ResetPassword { token } => html! { <ResetPasswordForm token={token.clone()} /> },
        Route::VerifyEmail { token } => html! { <VerifyEmailView token={token.clone()} /> },
        Route::Category { id } => {
            html! { <TaxonomyView kind={TaxonomyKind::Category} id={*id} /> }
        }
        Route::Tag { id } => html! { <TaxonomyView kind={TaxonomyKind::Tag} id={*id} /> },
        Route::NotFound => html! {
            <div class="empty-state">
                <h2>{"Page not found"}</h2>
                <p>{"The page you are looking for does not exist."}</p>
            </div>
        },
    };

    html! {
        <ContextProvider<Navigator> context={navigator}>
            <Navbar />
            <main class="page">
                { page }
            </main>
            <ToastHost />
        </ContextProvider<Navigator>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_round_trip_through_paths() {
        let routes = [
            Route::Home,
            Route::Blog,
            Route::PostDetail {
                slug: "hello-world".into(),
            },
            Route::NewPost,
            Route::EditPost { id: 9 },
            Route::MyPosts,
            Route::Profile,
            Route::Login,
            Route::Register,
            Route::ForgotPassword,
            Route::ResetPassword {
                token: "abc123".into(),
            },
            Route::VerifyEmail {
                token: "tok".into(),
            },
            Route::Category { id: 2 },
            Route::Tag { id: 5 },
        ];
        for route in routes {
            assert_eq!(Route::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn unknown_paths_resolve_to_not_found() {
        assert_eq!(Route::from_path("/nope/nope/nope"), Route::NotFound);
        assert_eq!(Route::from_path("/edit-post/not-a-number"), Route::NotFound);
        assert_eq!(Route::from_path(""), Route::Home);
    }
}
