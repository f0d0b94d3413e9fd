// ============================================================================
// STORE PROVIDER - builds the application-state objects once and injects
// them into the component tree via context (no ambient singletons)
// ============================================================================

use yew::prelude::*;

use crate::services::ApiClient;
use crate::stores::{AuthStore, BlogStore, ToastStore};

#[derive(Properties, PartialEq)]
pub struct StoreProviderProps {
    pub children: Children,
}

#[function_component(StoreProvider)]
pub fn store_provider(props: &StoreProviderProps) -> Html {
    let stores = use_memo((), |_| {
        let toasts = ToastStore::new();
        let api = ApiClient::new(toasts.clone());
        let auth = AuthStore::new(api.clone(), toasts.clone());
        let blog = BlogStore::new(api, toasts.clone());
        (auth, blog, toasts)
    });
    let (auth, blog, toasts) = (*stores).clone();

    html! {
        <ContextProvider<AuthStore> context={auth}>
            <ContextProvider<BlogStore> context={blog}>
                <ContextProvider<ToastStore> context={toasts}>
                    {props.children.clone()}
                </ContextProvider<ToastStore>>
            </ContextProvider<BlogStore>>
        </ContextProvider<AuthStore>>
    }
}
