use crate::{
    models::{Repository, SortKey},
    Result,
};

/// Trait for search backends - makes testing easier
///
/// The real implementation talks to GitHub; tests swap in a mock so the
/// session logic can be exercised without a network.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    /// Fetch one page of results for an already-built query string
    async fn search(
        &self,
        query: &str,
        sort: SortKey,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>>;

    async fn get_repository(&self, owner: &str, name: &str) -> Result<Repository>;
}

/// Which list the user is looking at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Trending,
    Recent,
    Search,
    /// Served from memory, never hits the network
    Bookmarks,
}

impl Tab {
    /// Sort order sent with the request; `None` for the offline tab
    pub fn sort_key(&self) -> Option<SortKey> {
        match self {
            Tab::Trending | Tab::Search => Some(SortKey::Stars),
            Tab::Recent => Some(SortKey::Updated),
            Tab::Bookmarks => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Trending => "Trending",
            Tab::Recent => "Recent",
            Tab::Search => "Search",
            Tab::Bookmarks => "Bookmarks",
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_sort_keys() {
        assert_eq!(Tab::Trending.sort_key(), Some(SortKey::Stars));
        assert_eq!(Tab::Search.sort_key(), Some(SortKey::Stars));
        assert_eq!(Tab::Recent.sort_key(), Some(SortKey::Updated));
        assert_eq!(Tab::Bookmarks.sort_key(), None);
    }
}
