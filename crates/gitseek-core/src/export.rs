use crate::{
    insights::{RepoInsight, MAINTAINED_WITHIN_DAYS},
    models::Repository,
    Error, Result,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Markdown report, one section per repository
    Report,
    /// Machine-readable JSON document
    Json,
    /// Markdown narrative with derived insights
    Summary,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "report" | "md" | "markdown" => Some(ExportFormat::Report),
            "json" | "data" => Some(ExportFormat::Json),
            "summary" => Some(ExportFormat::Summary),
            _ => None,
        }
    }

    /// Middle part of the file name
    fn kind(&self) -> &'static str {
        match self {
            ExportFormat::Report => "report",
            ExportFormat::Json => "data",
            ExportFormat::Summary => "summary",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Report | ExportFormat::Summary => "md",
            ExportFormat::Json => "json",
        }
    }

    /// `<app-slug>-<kind>-<YYYY-MM-DD>.<ext>`
    pub fn file_name(&self, app_name: &str, now: DateTime<Utc>) -> String {
        format!(
            "{}-{}-{}.{}",
            slugify(app_name),
            self.kind(),
            now.format("%Y-%m-%d"),
            self.extension()
        )
    }
}

/// Projection of a repository written to the JSON export
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportedRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub owner: String,
    pub html_url: String,
    pub clone_url: String,
    pub ssh_url: String,
    pub stars: u32,
    pub forks: u32,
    pub watchers: u32,
    pub open_issues: u32,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub license: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: DateTime<Utc>,
    pub size: u64,
}

impl From<&Repository> for ExportedRepo {
    fn from(repo: &Repository) -> Self {
        Self {
            id: repo.id,
            name: repo.name.clone(),
            full_name: repo.full_name.clone(),
            description: repo.description.clone(),
            owner: repo.owner.login.clone(),
            html_url: repo.html_url.clone(),
            clone_url: repo.clone_url.clone(),
            ssh_url: repo.ssh_url.clone(),
            stars: repo.stars,
            forks: repo.forks,
            watchers: repo.watchers,
            open_issues: repo.open_issues,
            language: repo.language.clone(),
            topics: repo.topics.clone(),
            license: repo.license.as_ref().map(|l| l.name.clone()),
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            pushed_at: repo.pushed_at,
            size: repo.size,
        }
    }
}

/// Top-level JSON export document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportDocument {
    pub generated_at: DateTime<Utc>,
    pub count: usize,
    pub repositories: Vec<ExportedRepo>,
}

/// Exporter for repository data
pub struct Exporter;

impl Exporter {
    /// Render the selection and write it into `dir`. Returns the file path.
    pub fn write(
        format: ExportFormat,
        repos: &[&Repository],
        dir: &Path,
        app_name: &str,
        now: DateTime<Utc>,
    ) -> Result<PathBuf> {
        let content = Self::render(format, repos, app_name, now)?;

        std::fs::create_dir_all(dir)?;
        let path = dir.join(format.file_name(app_name, now));
        std::fs::write(&path, content)?;

        info!("Exported {} repositories to {}", repos.len(), path.display());
        Ok(path)
    }

    /// Render without touching the filesystem
    pub fn render(
        format: ExportFormat,
        repos: &[&Repository],
        app_name: &str,
        now: DateTime<Utc>,
    ) -> Result<String> {
        if repos.is_empty() {
            return Err(Error::EmptySelection);
        }

        match format {
            ExportFormat::Report => Ok(Self::to_report(repos, app_name, now)),
            ExportFormat::Json => Self::to_json(repos, now),
            ExportFormat::Summary => Ok(Self::to_summary(repos, app_name, now)),
        }
    }

    /// Export repositories to JSON format
    pub fn to_json(repos: &[&Repository], now: DateTime<Utc>) -> Result<String> {
        let document = ExportDocument {
            generated_at: now,
            count: repos.len(),
            repositories: repos.iter().map(|r| ExportedRepo::from(*r)).collect(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Export repositories to a Markdown report
    pub fn to_report(repos: &[&Repository], app_name: &str, now: DateTime<Utc>) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {} Repository Report\n\n", app_name));
        output.push_str(&format!("Generated: {}\n\n", now.format("%Y-%m-%d %H:%M UTC")));
        output.push_str(&format!("Total repositories: {}\n\n", repos.len()));
        output.push_str("---\n\n");

        for (i, repo) in repos.iter().enumerate() {
            output.push_str(&format!(
                "## {}. [{}]({})\n\n",
                i + 1,
                repo.full_name,
                repo.html_url
            ));

            match &repo.description {
                Some(desc) if !desc.trim().is_empty() => {
                    output.push_str(&format!("> {}\n\n", desc.trim()))
                }
                _ => output.push_str("_No description provided._\n\n"),
            }

            output.push_str("**Stats**\n\n");
            output.push_str(&format!("- ⭐ Stars: {}\n", format_number(repo.stars)));
            output.push_str(&format!("- 🍴 Forks: {}\n", format_number(repo.forks)));
            output.push_str(&format!("- 👀 Watchers: {}\n", format_number(repo.watchers)));
            output.push_str(&format!(
                "- 🐛 Open issues: {}\n",
                format_number(repo.open_issues)
            ));
            output.push_str(&format!(
                "- 💻 Language: {}\n",
                repo.language.as_deref().unwrap_or("Unknown")
            ));
            output.push_str(&format!(
                "- 📜 License: {}\n",
                repo.license.as_ref().map(|l| l.name.as_str()).unwrap_or("None")
            ));
            output.push_str(&format!(
                "- 🔄 Last updated: {}\n\n",
                repo.updated_at.format("%Y-%m-%d")
            ));

            output.push_str("**Clone**\n\n");
            output.push_str("```bash\n");
            output.push_str(&format!("git clone {}\n", repo.clone_url));
            output.push_str("# or over SSH\n");
            output.push_str(&format!("git clone {}\n", repo.ssh_url));
            output.push_str("```\n\n");

            if !repo.topics.is_empty() {
                let topics: Vec<_> = repo.topics.iter().map(|t| format!("`{}`", t)).collect();
                output.push_str(&format!("**Topics:** {}\n\n", topics.join(" ")));
            }

            output.push_str("---\n\n");
        }

        output
    }

    /// Export a narrative summary with per-repo insights and aggregates
    pub fn to_summary(repos: &[&Repository], app_name: &str, now: DateTime<Utc>) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {} Summary\n\n", app_name));
        output.push_str(&format!(
            "Generated on {} for {} {}.\n\n",
            now.format("%Y-%m-%d"),
            repos.len(),
            if repos.len() == 1 { "repository" } else { "repositories" }
        ));

        output.push_str("## Repositories\n\n");
        for repo in repos {
            let insight = RepoInsight::of(repo, now);

            output.push_str(&format!("### [{}]({})\n\n", repo.full_name, repo.html_url));
            if let Some(desc) = repo.description.as_deref().filter(|d| !d.trim().is_empty()) {
                output.push_str(&format!("{}\n\n", desc.trim()));
            }
            output.push_str(&format!(
                "- Activity: {} {} ({} stars)\n",
                insight.activity.emoji(),
                insight.activity.label(),
                format_number(repo.stars)
            ));
            output.push_str(&format!(
                "- Community: {} ({} forks)\n",
                insight.community.label(),
                format_number(repo.forks)
            ));
            let maintenance = if insight.actively_maintained {
                "actively maintained".to_string()
            } else {
                format!("no updates in the last {} days", MAINTAINED_WITHIN_DAYS)
            };
            output.push_str(&format!(
                "- Last updated {} ({})\n\n",
                days_ago_phrase(insight.days_since_update),
                maintenance
            ));
        }

        output.push_str("## Highlights\n\n");

        if let Some(top) = most_starred(repos) {
            output.push_str("### Most starred\n\n");
            output.push_str(&format!(
                "**[{}]({})** leads with {} stars.\n\n",
                top.full_name,
                top.html_url,
                format_number(top.stars)
            ));
        }

        output.push_str("### Top languages\n\n");
        output.push_str("| Language | Repositories |\n");
        output.push_str("|----------|--------------|\n");
        for (language, count) in language_histogram(repos, 5) {
            output.push_str(&format!("| {} | {} |\n", language, count));
        }
        output.push('\n');

        output.push_str("### Recently updated\n\n");
        for (i, repo) in by_recent_update(repos).iter().enumerate() {
            let insight = RepoInsight::of(repo, now);
            output.push_str(&format!(
                "{}. {} - {} ({})\n",
                i + 1,
                repo.full_name,
                repo.updated_at.format("%Y-%m-%d"),
                days_ago_phrase(insight.days_since_update)
            ));
        }

        output
    }
}

/// Ties go to whichever comes first in the selection
fn most_starred<'a>(repos: &[&'a Repository]) -> Option<&'a Repository> {
    let mut best: Option<&'a Repository> = None;
    for &repo in repos {
        if best.map_or(true, |b| repo.stars > b.stars) {
            best = Some(repo);
        }
    }
    best
}

/// Most common languages, highest count first, ties by name
fn language_histogram(repos: &[&Repository], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for repo in repos {
        *counts
            .entry(repo.language.as_deref().unwrap_or("Unknown"))
            .or_insert(0) += 1;
    }

    let mut histogram: Vec<_> = counts
        .into_iter()
        .map(|(lang, count)| (lang.to_string(), count))
        .collect();
    histogram.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    histogram.truncate(limit);
    histogram
}

fn by_recent_update<'a>(repos: &[&'a Repository]) -> Vec<&'a Repository> {
    let mut sorted = repos.to_vec();
    // stable sort keeps selection order for equal timestamps
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sorted
}

fn days_ago_phrase(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        n => format!("{} days ago", n),
    }
}

/// Lowercase, with every run of non-alphanumerics collapsed to a single `-`
fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "export".to_string()
    } else {
        slug.to_string()
    }
}

/// Format numbers with k/M suffixes
pub fn format_number(num: u32) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}k", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}
