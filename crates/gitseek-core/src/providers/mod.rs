// Search backend implementations
pub mod github;

pub use github::GitHubProvider;
