// GitHub provider - bridges the API client with the SearchBackend trait
use async_trait::async_trait;
use gitseek_api::{GitHubClient, GitHubRepo};
use tracing::info;

use crate::{
    models::{License, Owner, OwnerKind, Repository, SortKey},
    search::SearchBackend,
    Result,
};

/// Wrapper around GitHubClient that implements SearchBackend
pub struct GitHubProvider {
    client: GitHubClient,
}

impl GitHubProvider {
    pub fn new(user_agent: &str, token: Option<String>) -> Result<Self> {
        Ok(Self {
            client: GitHubClient::new(user_agent, token)?,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.has_token()
    }
}

#[async_trait]
impl SearchBackend for GitHubProvider {
    async fn search(
        &self,
        query: &str,
        sort: SortKey,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>> {
        let page = self
            .client
            .search_repositories(query, sort.as_str(), page, per_page)
            .await?;

        info!(
            "GitHub matched {} repositories, got {} on this page",
            page.total_count,
            page.items.len()
        );
        Ok(page.items.into_iter().map(github_to_repo).collect())
    }

    async fn get_repository(&self, owner: &str, name: &str) -> Result<Repository> {
        let repo = self.client.get_repository(owner, name).await?;
        Ok(github_to_repo(repo))
    }
}

/// Convert GitHub API repo to our internal Repository model
pub(crate) fn github_to_repo(gh: GitHubRepo) -> Repository {
    Repository {
        id: gh.id,
        name: gh.name,
        full_name: gh.full_name,
        description: gh.description,
        owner: Owner {
            kind: OwnerKind::from_api(&gh.owner.owner_type),
            login: gh.owner.login,
            avatar_url: gh.owner.avatar_url,
        },
        stars: gh.stargazers_count,
        forks: gh.forks_count,
        watchers: gh.watchers_count,
        open_issues: gh.open_issues_count,
        language: gh.language,
        topics: gh.topics,
        license: gh.license.map(|l| License {
            key: l.key,
            name: l.name,
        }),
        created_at: gh.created_at,
        updated_at: gh.updated_at,
        // Empty repos were never pushed; creation is the closest thing
        pushed_at: gh.pushed_at.unwrap_or(gh.created_at),
        size: gh.size,
        html_url: gh.html_url,
        clone_url: gh.clone_url,
        ssh_url: gh.ssh_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_to_repo() {
        let gh: GitHubRepo = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "hello",
                "full_name": "octocat/hello",
                "description": null,
                "owner": { "login": "octocat", "avatar_url": "https://a/1", "type": "User" },
                "html_url": "https://github.com/octocat/hello",
                "clone_url": "https://github.com/octocat/hello.git",
                "ssh_url": "git@github.com:octocat/hello.git",
                "stargazers_count": 3,
                "forks_count": 2,
                "watchers_count": 3,
                "open_issues_count": 1,
                "language": null,
                "license": null,
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-02-01T00:00:00Z",
                "pushed_at": null,
                "size": 0
            }"#,
        )
        .unwrap();

        let repo = github_to_repo(gh);
        assert_eq!(repo.owner.kind, OwnerKind::User);
        assert_eq!(repo.owner.login, "octocat");
        assert_eq!(repo.stars, 3);
        assert!(repo.topics.is_empty());
        assert!(repo.license.is_none());
        assert_eq!(repo.pushed_at, repo.created_at);
        assert_eq!(repo.ssh_url, "git@github.com:octocat/hello.git");
    }
}
