use yew::prelude::*;

use crate::models::Pagination;

#[derive(Properties, PartialEq)]
pub struct PaginationControlsProps {
    pub pagination: Pagination,
    /// Fired with the page number to load.
    pub on_page: Callback<u32>,
}

#[function_component(PaginationControls)]
pub fn pagination_controls(props: &PaginationControlsProps) -> Html {
    let pagination = &props.pagination;
    if pagination.count == 0 {
        return html! {};
    }

    let current = pagination.current_page;

    let on_previous = {
        let on_page = props.on_page.clone();
        let page = current.saturating_sub(1).max(1);
        Callback::from(move |_: MouseEvent| on_page.emit(page))
    };
    let on_next = {
        let on_page = props.on_page.clone();
        let page = current + 1;
        Callback::from(move |_: MouseEvent| on_page.emit(page))
    };

    html! {
        <div class="pagination">
            <button
                class="btn"
                disabled={!pagination.has_previous()}
                onclick={on_previous}
            >
                {"← Previous"}
            </button>
            <span class="pagination-label">
                { format!("Page {} · {} posts", current, pagination.count) }
            </span>
            <button
                class="btn"
                disabled={!pagination.has_next()}
                onclick={on_next}
            >
                {"Next →"}
            </button>
        </div>
    }
}
