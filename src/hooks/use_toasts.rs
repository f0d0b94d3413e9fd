use yew::prelude::*;

use crate::stores::{Toast, ToastStore};

#[derive(Clone)]
pub struct UseToastsHandle {
    pub toasts: Vec<Toast>,
    pub store: ToastStore,
}

#[hook]
pub fn use_toasts() -> UseToastsHandle {
    let store = use_context::<ToastStore>().expect("ToastStore context is not provided");
    let snapshot = use_state(|| store.snapshot());

    {
        let snapshot = snapshot.clone();
        let store = store.clone();
        use_effect_with((), move |_| {
            let reader = store.clone();
            let id = store.subscribe(move || snapshot.set(reader.snapshot()));
            move || store.unsubscribe(id)
        });
    }

    UseToastsHandle {
        toasts: (*snapshot).clone(),
        store,
    }
}
