use serde::{Deserialize, Serialize};

/// DRF-style list envelope: `{ count, next, previous, results }`.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Paginated<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Some list endpoints return a bare array instead of the envelope
/// (featured posts, and categories/tags when pagination is disabled).
#[derive(Clone, PartialEq, Deserialize, Debug)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated(Paginated<T>),
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Paginated(page) => page.results,
            ListResponse::Plain(items) => items,
        }
    }
}

/// Client-tracked position within a paged result set.
///
/// `current_page` is inferred from the `page` query parameter of the
/// next/previous links rather than reported by the backend. The inference
/// (including its default to page 1 when the parameter is absent) is kept
/// for compatibility with the deployed pagination scheme.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Pagination {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub current_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            current_page: 1,
        }
    }
}

impl Pagination {
    pub fn from_links(count: u64, next: Option<String>, previous: Option<String>) -> Self {
        let mut current_page = 1;
        if let Some(url) = next.as_deref() {
            if let Some(page) = page_param(url) {
                current_page = page.saturating_sub(1).max(1);
            }
        } else if let Some(url) = previous.as_deref() {
            if let Some(page) = page_param(url) {
                current_page = page.saturating_add(1);
            }
        }

        Self {
            count,
            next,
            previous,
            current_page,
        }
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

/// Extract the numeric `page` query parameter from a pagination link.
fn page_param(url: &str) -> Option<u32> {
    let query = url.split_once('?')?.1;
    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix("page=") {
            return value.parse().ok();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_current_page_from_next_link() {
        let p = Pagination::from_links(
            42,
            Some("http://localhost:8000/api/v1/blog/posts/?page=4&search=rust".into()),
            Some("http://localhost:8000/api/v1/blog/posts/?page=2".into()),
        );
        assert_eq!(p.current_page, 3);
        assert!(p.has_next());
        assert!(p.has_previous());
    }

    #[test]
    fn infers_current_page_from_previous_link() {
        let p = Pagination::from_links(
            42,
            None,
            Some("http://localhost:8000/api/v1/blog/posts/?page=3".into()),
        );
        assert_eq!(p.current_page, 4);
    }

    #[test]
    fn defaults_to_page_one_when_param_absent() {
        // DRF strips `page` from the previous link of page 2; the legacy
        // inference leaves current_page at 1 in that case.
        let p = Pagination::from_links(
            12,
            None,
            Some("http://localhost:8000/api/v1/blog/posts/".into()),
        );
        assert_eq!(p.current_page, 1);

        let p = Pagination::from_links(0, None, None);
        assert_eq!(p.count, 0);
        assert_eq!(p.current_page, 1);
    }

    #[test]
    fn envelope_and_bare_array_both_parse() {
        let enveloped: ListResponse<u32> =
            serde_json::from_str(r#"{"count":2,"next":null,"previous":null,"results":[1,2]}"#)
                .unwrap();
        assert_eq!(enveloped.into_items(), vec![1, 2]);

        let bare: ListResponse<u32> = serde_json::from_str("[3,4]").unwrap();
        assert_eq!(bare.into_items(), vec![3, 4]);
    }
}
