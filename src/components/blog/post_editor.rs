use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::app::{Navigator, Route};
use crate::hooks::use_blog;
use crate::models::{CreatePostData, Post, PostStatus, UpdatePostData};

#[derive(Properties, PartialEq)]
pub struct PostEditorProps {
    /// `None` creates a new post; `Some(id)` edits an existing one.
    pub post_id: Option<u64>,
}

#[function_component(PostEditor)]
pub fn post_editor(props: &PostEditorProps) -> Html {
    let handle = use_blog();

    {
        let store = handle.store.clone();
        use_effect_with(props.post_id, move |post_id| {
            let post_id = *post_id;
            spawn_local(async move {
                let _ = store.fetch_categories().await;
                let _ = store.fetch_tags().await;
                if let Some(id) = post_id {
                    let _ = store.fetch_post(id).await;
                }
            });
            || ()
        });
    }

    match props.post_id {
        None => html! { <PostFormInner existing={None::<Post>} /> },
        Some(id) => {
            let loaded = handle.blog.current_post.clone().filter(|p| p.id == id);
            match loaded {
                Some(post) => html! { <PostFormInner existing={Some(post)} /> },
                None if handle.blog.is_loading => {
                    html! { <div class="loading">{"Loading post..."}</div> }
                }
                None => html! {
                    <div class="empty-state">
                        <h2>{"Post not found"}</h2>
                        <p>{"The post you are trying to edit does not exist."}</p>
                    </div>
                },
            }
        }
    }
}

#[derive(Properties, PartialEq)]
struct PostFormInnerProps {
    existing: Option<Post>,
}

#[function_component(PostFormInner)]
fn post_form_inner(props: &PostFormInnerProps) -> Html {
    let handle = use_blog();
    let navigator = use_context::<Navigator>().expect("Navigator context is not provided");
    let existing = props.existing.clone();

    let title = use_state(|| {
        existing
            .as_ref()
            .map(|p| p.title.clone())
            .unwrap_or_default()
    });
    let excerpt = use_state(|| {
        existing
            .as_ref()
            .map(|p| p.excerpt.clone())
            .unwrap_or_default()
    });
    let content = use_state(|| {
        existing
            .as_ref()
            .map(|p| p.content.clone())
            .unwrap_or_default()
    });
    let status = use_state(|| {
        existing
            .as_ref()
            .map(|p| p.status)
            .unwrap_or(PostStatus::Draft)
    });
    let category_id = use_state(|| {
        existing
            .as_ref()
            .and_then(|p| p.category.as_ref())
            .map(|c| c.id)
    });
    let tag_ids = use_state(|| {
        existing
            .as_ref()
            .map(|p| p.tags.iter().map(|t| t.id).collect::<Vec<u64>>())
            .unwrap_or_default()
    });
    let featured_image = use_state(|| None::<web_sys::File>);
    let form_error = use_state(|| None::<String>);

    let on_title = {
        let title = title.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            title.set(input.value());
        })
    };
    let on_excerpt = {
        let excerpt = excerpt.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            excerpt.set(input.value());
        })
    };
    let on_content = {
        let content = content.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            content.set(area.value());
        })
    };
    let on_status = {
        let status = status.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            status.set(match select.value().as_str() {
                "published" => PostStatus::Published,
                _ => PostStatus::Draft,
            });
        })
    };
    let on_category = {
        let category_id = category_id.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            category_id.set(select.value().parse::<u64>().ok());
        })
    };
    let on_file = {
        let featured_image = featured_image.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            featured_image.set(input.files().and_then(|list| list.get(0)));
        })
    };

    let toggle_tag = {
        let tag_ids = tag_ids.clone();
        move |id: u64| {
            let tag_ids = tag_ids.clone();
            Callback::from(move |_: Event| {
                let mut selected = (*tag_ids).clone();
                if let Some(pos) = selected.iter().position(|t| *t == id) {
                    selected.remove(pos);
                } else {
                    selected.push(id);
                }
                tag_ids.set(selected);
            })
        }
    };

    let on_submit = {
        let title = title.clone();
        let excerpt = excerpt.clone();
        let content = content.clone();
        let status = status.clone();
        let category_id = category_id.clone();
        let tag_ids = tag_ids.clone();
        let featured_image = featured_image.clone();
        let form_error = form_error.clone();
        let existing = existing.clone();
        let store = handle.store.clone();
        let navigator = navigator.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if title.trim().is_empty() || content.trim().is_empty() {
                form_error.set(Some("Title and content are required.".to_string()));
                return;
            }
            form_error.set(None);

            let store = store.clone();
            let navigator = navigator.clone();
            let excerpt_val = excerpt.trim().to_string();

            match existing.clone() {
                None => {
                    let data = CreatePostData {
                        title: title.trim().to_string(),
                        content: (*content).clone(),
                        excerpt: if excerpt_val.is_empty() {
                            None
                        } else {
                            Some(excerpt_val)
                        },
                        status: *status,
                        category_id: *category_id,
                        tag_ids: (*tag_ids).clone(),
                        featured_image: (*featured_image).clone(),
                    };
                    spawn_local(async move {
                        if let Ok(post) = store.create_post(&data).await {
                            navigator.push(Route::PostDetail { slug: post.slug });
                        }
                    });
                }
                Some(post) => {
                    let data = UpdatePostData {
                        title: Some(title.trim().to_string()),
                        content: Some((*content).clone()),
                        excerpt: Some(excerpt_val),
                        status: Some(*status),
                        category_id: *category_id,
                        tag_ids: Some((*tag_ids).clone()),
                        featured_image: (*featured_image).clone(),
                    };
                    spawn_local(async move {
                        if store.update_post(post.id, &data).await.is_ok() {
                            // Slugs never change after creation.
                            navigator.push(Route::PostDetail { slug: post.slug });
                        }
                    });
                }
            }
        })
    };

    let busy = handle.blog.is_creating || handle.blog.is_updating;
    let heading = if existing.is_some() {
        "Edit post"
    } else {
        "Write a new post"
    };

    html! {
        <div class="editor-screen">
            <h1>{ heading }</h1>

            <form class="editor-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="title">{"Title"}</label>
                    <input
                        type="text"
                        id="title"
                        value={(*title).clone()}
                        oninput={on_title}
                        required=true
                    />
                </div>

                <div class="form-group">
                    <label for="excerpt">{"Excerpt"}</label>
                    <input
                        type="text"
                        id="excerpt"
                        placeholder="Short teaser shown in listings"
                        value={(*excerpt).clone()}
                        oninput={on_excerpt}
                    />
                </div>

                <div class="form-group">
                    <label for="content">{"Content"}</label>
                    <textarea
                        id="content"
                        rows="16"
                        value={(*content).clone()}
                        oninput={on_content}
                        required=true
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="status">{"Status"}</label>
                        <select id="status" onchange={on_status}>
                            <option value="draft" selected={*status == PostStatus::Draft}>
                                {"Draft"}
                            </option>
                            <option value="published" selected={*status == PostStatus::Published}>
                                {"Published"}
                            </option>
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="category">{"Category"}</label>
                        <select id="category" onchange={on_category}>
                            <option value="" selected={category_id.is_none()}>{"None"}</option>
                            {
                                for handle.blog.categories.iter().map(|category| html! {
                                    <option
                                        value={category.id.to_string()}
                                        selected={*category_id == Some(category.id)}
                                    >
                                        { &category.name }
                                    </option>
                                })
                            }
                        </select>
                    </div>
                </div>

                <div class="form-group">
                    <label>{"Tags"}</label>
                    <div class="tag-picker">
                        {
                            for handle.blog.tags.iter().map(|tag| {
                                let checked = tag_ids.contains(&tag.id);
                                html! {
                                    <label class="tag-option" key={tag.id}>
                                        <input
                                            type="checkbox"
                                            checked={checked}
                                            onchange={toggle_tag(tag.id)}
                                        />
                                        { &tag.name }
                                    </label>
                                }
                            })
                        }
                    </div>
                </div>

                <div class="form-group">
                    <label for="featured_image">{"Featured image"}</label>
                    <input
                        type="file"
                        id="featured_image"
                        accept="image/*"
                        onchange={on_file}
                    />
                </div>

                {
                    if let Some(message) = &*form_error {
                        html! { <p class="form-error">{ message }</p> }
                    } else {
                        html! {}
                    }
                }

                <button type="submit" class="btn btn-primary" disabled={busy}>
                    {
                        if busy {
                            "Saving..."
                        } else if existing.is_some() {
                            "Save changes"
                        } else {
                            "Create post"
                        }
                    }
                </button>
            </form>
        </div>
    }
}
