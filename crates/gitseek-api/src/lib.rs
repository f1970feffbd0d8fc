// Raw GitHub REST API client
pub mod github;

// Re-export common types
pub use github::{
    GitHubClient, GitHubError, GitHubLicense, GitHubOwner, GitHubRepo, SearchPage,
    GITHUB_API_BASE, GITHUB_API_VERSION,
};
