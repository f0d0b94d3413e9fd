use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_blog;

/// Settle delay before a keystroke turns into a backend query.
const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Free-text search box. Input is debounced so typing does not flood the
/// posts endpoint; only the search field gets this treatment.
#[function_component(SearchBar)]
pub fn search_bar() -> Html {
    let handle = use_blog();
    let query = use_state(|| handle.blog.filters.search.clone());
    let pending = use_mut_ref(|| None::<Timeout>);

    let oninput = {
        let query = query.clone();
        let pending = pending.clone();
        let store = handle.store.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            query.set(value.clone());

            let store = store.clone();
            let task = Timeout::new(SEARCH_DEBOUNCE_MS, move || {
                store.set_search(value);
                let store = store.clone();
                spawn_local(async move {
                    let query = store.query_for_page(1);
                    let _ = store.fetch_posts(&query).await;
                });
            });
            // Dropping the previous timeout cancels it.
            *pending.borrow_mut() = Some(task);
        })
    };

    html! {
        <div class="search-bar">
            <input
                type="search"
                placeholder="Search posts..."
                value={(*query).clone()}
                {oninput}
            />
        </div>
    }
}
