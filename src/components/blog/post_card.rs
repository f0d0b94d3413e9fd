use yew::prelude::*;

use crate::components::app::Route;
use crate::components::link::Link;
use crate::models::{Post, PostStatus};

#[derive(Properties, PartialEq)]
pub struct PostCardProps {
    pub post: Post,
}

#[function_component(PostCard)]
pub fn post_card(props: &PostCardProps) -> Html {
    let post = &props.post;

    let byline = post
        .author
        .as_ref()
        .map(|a| a.display_name())
        .unwrap_or_else(|| "Unknown author".to_string());
    let date = post
        .created_at
        .map(|d| d.format("%b %e, %Y").to_string())
        .unwrap_or_default();

    html! {
        <article class="post-card">
            {
                if let Some(image) = &post.featured_image {
                    html! { <img class="post-card-image" src={image.clone()} alt="" /> }
                } else {
                    html! {}
                }
            }
            <div class="post-card-body">
                <h3 class="post-card-title">
                    <Link to={Route::PostDetail { slug: post.slug.clone() }}>
                        { post.title.clone() }
                    </Link>
                    {
                        if post.status == PostStatus::Draft {
                            html! { <span class="badge badge-warn">{"draft"}</span> }
                        } else {
                            html! {}
                        }
                    }
                </h3>
                {
                    if let Some(category) = &post.category {
                        html! {
                            <Link to={Route::Category { id: category.id }} class="post-card-category">
                                { category.name.clone() }
                            </Link>
                        }
                    } else {
                        html! {}
                    }
                }
                <p class="post-card-excerpt">{ &post.excerpt }</p>
                <div class="post-card-tags">
                    {
                        for post.tags.iter().map(|tag| html! {
                            <Link to={Route::Tag { id: tag.id }} class="tag-chip">
                                { format!("#{}", tag.name) }
                            </Link>
                        })
                    }
                </div>
                <div class="post-card-meta">
                    <span>{ byline }</span>
                    <span>{ date }</span>
                    <span>{ format!("{} min read", post.reading_time.max(1)) }</span>
                </div>
            </div>
        </article>
    }
}
