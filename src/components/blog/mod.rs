pub mod filter_bar;
pub mod home;
pub mod my_posts;
pub mod pagination_controls;
pub mod post_card;
pub mod post_detail;
pub mod post_editor;
pub mod post_list;
pub mod search_bar;
pub mod taxonomy_view;

pub use home::HomeView;
pub use my_posts::MyPostsView;
pub use post_detail::PostDetail;
pub use post_editor::PostEditor;
pub use post_list::PostListView;
pub use taxonomy_view::{TaxonomyKind, TaxonomyView};
