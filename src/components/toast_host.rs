use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::hooks::use_toasts;
use crate::stores::{Toast, ToastKind, ToastStore, TOAST_DURATION_MS};

/// Renders the active toast queue and auto-dismisses each entry.
#[function_component(ToastHost)]
pub fn toast_host() -> Html {
    let handle = use_toasts();

    html! {
        <div class="toast-host">
            {
                for handle.toasts.iter().map(|toast| html! {
                    <ToastItem
                        key={toast.id.to_string()}
                        toast={toast.clone()}
                        store={handle.store.clone()}
                    />
                })
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    store: ToastStore,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let kind_class = match props.toast.kind {
        ToastKind::Success => "toast toast-success",
        ToastKind::Error => "toast toast-error",
    };

    {
        let store = props.store.clone();
        let id = props.toast.id;
        use_effect_with(id, move |_| {
            let timeout = Timeout::new(TOAST_DURATION_MS, move || store.dismiss(id));
            move || drop(timeout)
        });
    }

    let on_dismiss = {
        let store = props.store.clone();
        let id = props.toast.id;
        Callback::from(move |_: MouseEvent| store.dismiss(id))
    };

    html! {
        <div class={kind_class} onclick={on_dismiss}>
            { &props.toast.message }
        </div>
    }
}
