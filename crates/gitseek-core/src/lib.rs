// Core logic: query building, fetching, bookmarks, selection and export
pub mod bookmarks;
pub mod config;
pub mod error;
pub mod export;
pub mod filters;
pub mod gate;
pub mod insights;
pub mod models;
pub mod providers;
pub mod query;
pub mod search;
pub mod selection;
pub mod session;

pub use bookmarks::{Bookmark, BookmarkStore, Bookmarks};
pub use config::Config;
pub use error::Error;
pub use export::{ExportDocument, ExportFormat, ExportedRepo, Exporter};
pub use filters::{ForkTier, RecencyTier, SearchFilters, StarTier};
pub use gate::{SessionStore, SessionTimer, Unlimited, UsageGate};
pub use insights::{ActivityLevel, CommunityLevel, RepoInsight};
pub use models::{Repository, SortKey};
pub use providers::GitHubProvider;
pub use search::{SearchBackend, Tab};
pub use selection::Selection;
pub use session::{FetchRequest, FetchTicket, Session};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
