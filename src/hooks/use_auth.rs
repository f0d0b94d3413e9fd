// ============================================================================
// USE AUTH HOOK - session state for components
// ============================================================================

use yew::prelude::*;

use crate::stores::{AuthState, AuthStore};

/// Snapshot of session state plus the store handle for dispatching
/// actions. The snapshot re-renders the component on every store change.
#[derive(Clone)]
pub struct UseAuthHandle {
    pub auth: AuthState,
    pub store: AuthStore,
}

#[hook]
pub fn use_auth() -> UseAuthHandle {
    let store = use_context::<AuthStore>().expect("AuthStore context is not provided");
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

    UseAuthHandle {
        auth: (*snapshot).clone(),
        store,
    }
}
