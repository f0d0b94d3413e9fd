// ============================================================================
// USE BLOG HOOK - content state for components
// ============================================================================

use yew::prelude::*;

use crate::stores::{BlogState, BlogStore};

#[derive(Clone)]
pub struct UseBlogHandle {
    pub blog: BlogState,
    pub store: BlogStore,
}

#[hook]
pub fn use_blog() -> UseBlogHandle {
    let store = use_context::<BlogStore>().expect("BlogStore context is not provided");
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

    UseBlogHandle {
        blog: (*snapshot).clone(),
        store,
    }
}
