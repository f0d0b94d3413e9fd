use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::hooks::use_blog;
use crate::stores::BlogStore;

/// Category filter + reset. Setters only mutate filter state, so the bar
/// issues the follow-up fetch itself to keep the listing in sync.
#[function_component(FilterBar)]
pub fn filter_bar() -> Html {
    let handle = use_blog();

    let refetch = |store: &BlogStore| {
        let store = store.clone();
        spawn_local(async move {
            let query = store.query_for_page(1);
            let _ = store.fetch_posts(&query).await;
        });
    };

    let on_category_change = {
        let store = handle.store.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let category = select.value().parse::<u64>().ok();
            store.set_category_filter(category);
            refetch(&store);
        })
    };

    let on_clear = {
        let store = handle.store.clone();
        Callback::from(move |_: MouseEvent| {
            store.clear_filters();
            refetch(&store);
        })
    };

    let selected = handle
        .blog
        .filters
        .category
        .map(|id| id.to_string())
        .unwrap_or_default();

    html! {
        <div class="filter-bar">
            <select onchange={on_category_change} value={selected}>
                <option value="" selected={handle.blog.filters.category.is_none()}>
                    {"All categories"}
                </option>
                {
                    for handle.blog.categories.iter().map(|category| html! {
                        <option
                            value={category.id.to_string()}
                            selected={handle.blog.filters.category == Some(category.id)}
                        >
                            { format!("{} ({})", category.name, category.post_count) }
                        </option>
                    })
                }
            </select>
            <button class="btn btn-link" onclick={on_clear}>{"Clear filters"}</button>
        </div>
    }
}
