use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository model - immutable once fetched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub owner: Owner,
    pub stars: u32,
    pub forks: u32,
    pub watchers: u32,
    pub open_issues: u32,
    pub language: Option<String>,
    /// Unordered
    pub topics: Vec<String>,
    pub license: Option<License>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: DateTime<Utc>,
    pub size: u64,
    pub html_url: String,
    pub clone_url: String,
    pub ssh_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
    pub kind: OwnerKind,
}

/// Account type of the repository owner
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OwnerKind {
    User,
    Organization,
    Bot,
    Other,
}

impl OwnerKind {
    pub fn from_api(kind: &str) -> Self {
        match kind {
            "User" => OwnerKind::User,
            "Organization" => OwnerKind::Organization,
            "Bot" => OwnerKind::Bot,
            _ => OwnerKind::Other,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct License {
    pub key: String,
    pub name: String,
}

/// How the API should order results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Stars,
    Updated,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Stars => "stars",
            SortKey::Updated => "updated",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// Repository with sensible defaults; tests tweak the fields they care about
    pub fn repo(id: u64, full_name: &str) -> Repository {
        let (owner, name) = full_name.split_once('/').unwrap_or(("someone", full_name));
        let when = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Repository {
            id,
            name: name.to_string(),
            full_name: full_name.to_string(),
            description: Some(format!("{} does things", name)),
            owner: Owner {
                login: owner.to_string(),
                avatar_url: format!("https://avatars.example.com/{}", owner),
                kind: OwnerKind::User,
            },
            stars: 10,
            forks: 1,
            watchers: 10,
            open_issues: 0,
            language: Some("Rust".to_string()),
            topics: vec!["cli".to_string()],
            license: Some(License {
                key: "mit".to_string(),
                name: "MIT License".to_string(),
            }),
            created_at: when,
            updated_at: when,
            pushed_at: when,
            size: 42,
            html_url: format!("https://github.com/{}", full_name),
            clone_url: format!("https://github.com/{}.git", full_name),
            ssh_url: format!("git@github.com:{}.git", full_name),
        }
    }
}
