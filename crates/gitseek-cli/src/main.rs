use clap::{Args, Parser};
use gitseek_core::{ExportFormat, ForkTier, RecencyTier, SearchFilters, StarTier};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod clipboard;
mod commands;
mod output;

#[derive(Parser)]
#[command(name = "gitseek")]
#[command(version, about = "Search GitHub repositories, bookmark them and export reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Repositories created in the last 10 days, most starred first
    Trending {
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Repositories pushed to in the last week, most recently updated first
    Recent {
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Search with free text and filters
    Search {
        /// Free-text part of the query
        text: Vec<String>,
        #[command(flatten)]
        filters: FilterArgs,
        /// Print the query string before sending it
        #[arg(long)]
        show_query: bool,
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Manage bookmarked repositories
    Bookmarks {
        #[command(subcommand)]
        action: BookmarkAction,
    },
    /// List the country codes accepted by `search --country`
    Countries,
}

#[derive(clap::Subcommand)]
pub enum BookmarkAction {
    /// Show bookmarks (and optionally export them)
    List {
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Bookmark a repository by name
    Add {
        /// owner/name
        name: String,
        /// Free-text note to keep with the bookmark
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Remove a bookmark
    Remove {
        /// owner/name
        name: String,
    },
    /// Add the bookmark if missing, remove it otherwise
    Toggle {
        /// owner/name
        name: String,
    },
}

#[derive(Args)]
pub struct PageArgs {
    /// Result page to fetch
    #[arg(long, short, default_value_t = 1)]
    pub page: u32,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Primary language, e.g. Rust
    #[arg(long, short)]
    pub language: Option<String>,
    /// Minimum stars: any, 100+, 1000+, 10000+
    #[arg(long, default_value = "any")]
    pub stars: StarTier,
    /// Minimum forks: any, 10+, 100+, 1000+
    #[arg(long, default_value = "any")]
    pub forks: ForkTier,
    /// Pushed within: any, day, week, month
    #[arg(long, default_value = "any")]
    pub updated: RecencyTier,
    /// Only repositories that have topics
    #[arg(long)]
    pub has_topics: bool,
    /// Bias results toward a country (see `gitseek countries`)
    #[arg(long)]
    pub country: Option<String>,
}

impl FilterArgs {
    fn into_filters(self) -> SearchFilters {
        SearchFilters {
            language: self.language.unwrap_or_default(),
            stars: self.stars,
            forks: self.forks,
            updated: self.updated,
            has_topics: self.has_topics,
            country: self.country,
        }
    }
}

#[derive(Args)]
pub struct ExportArgs {
    /// Positions in the listing to export (1-based), e.g. 1,3,4
    #[arg(long, value_delimiter = ',', conflicts_with = "all")]
    pub select: Vec<usize>,
    /// Export every result on the page
    #[arg(long)]
    pub all: bool,
    /// Export format: report, json, summary (repeatable)
    #[arg(long = "format", short = 'f', value_parser = parse_format)]
    pub formats: Vec<ExportFormat>,
    /// Directory the export files go into
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    /// Also put the last export on the clipboard
    #[arg(long)]
    pub copy: bool,
}

impl ExportArgs {
    /// Any export flag at all means the user wants an export
    pub fn requested(&self) -> bool {
        self.all || self.copy || !self.select.is_empty() || !self.formats.is_empty()
    }

    /// Defaults to the Markdown report when no format was named
    pub fn formats(&self) -> Vec<ExportFormat> {
        if self.formats.is_empty() {
            vec![ExportFormat::Report]
        } else {
            self.formats.clone()
        }
    }
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    ExportFormat::from_name(s)
        .ok_or_else(|| format!("unknown format '{}' (expected report, json or summary)", s))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so result listings can be piped
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gitseek=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Countries => output::print_countries(),
        Commands::Trending { page, export } => {
            let app = commands::App::init()?;
            app.browse(commands::Listing::Trending, page.page, &export)
                .await?
        }
        Commands::Recent { page, export } => {
            let app = commands::App::init()?;
            app.browse(commands::Listing::Recent, page.page, &export)
                .await?
        }
        Commands::Search {
            text,
            filters,
            show_query,
            page,
            export,
        } => {
            let app = commands::App::init()?;
            let listing = commands::Listing::Search {
                text: text.join(" "),
                filters: filters.into_filters(),
                show_query,
            };
            app.browse(listing, page.page, &export).await?
        }
        Commands::Bookmarks { action } => {
            let app = commands::App::init()?;
            app.bookmarks(action).await?
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_flags() {
        let cli = Cli::try_parse_from([
            "gitseek", "search", "web", "framework", "--language", "Rust", "--stars", "1000+",
            "--updated", "week", "--country", "de", "--select", "1,3", "-f", "json", "-f",
            "summary",
        ])
        .unwrap();

        match cli.command {
            Commands::Search {
                text,
                filters,
                export,
                ..
            } => {
                assert_eq!(text.join(" "), "web framework");
                let filters = filters.into_filters();
                assert_eq!(filters.language, "Rust");
                assert_eq!(filters.stars, StarTier::Over1000);
                assert_eq!(filters.forks, ForkTier::Any);
                assert_eq!(filters.updated, RecencyTier::Week);
                assert_eq!(filters.country.as_deref(), Some("de"));
                assert_eq!(export.select, vec![1, 3]);
                assert_eq!(
                    export.formats(),
                    vec![ExportFormat::Json, ExportFormat::Summary]
                );
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_bad_tier_is_rejected() {
        assert!(Cli::try_parse_from(["gitseek", "search", "--stars", "5+"]).is_err());
        assert!(Cli::try_parse_from(["gitseek", "trending", "-f", "csv"]).is_err());
        assert!(Cli::try_parse_from(["gitseek", "trending", "--all", "--select", "2"]).is_err());
    }

    #[test]
    fn test_export_defaults() {
        let cli = Cli::try_parse_from(["gitseek", "trending", "--all"]).unwrap();
        match cli.command {
            Commands::Trending { export, page } => {
                assert_eq!(page.page, 1);
                assert!(export.requested());
                assert_eq!(export.formats(), vec![ExportFormat::Report]);
            }
            _ => panic!("expected trending"),
        }

        let cli = Cli::try_parse_from(["gitseek", "recent"]).unwrap();
        match cli.command {
            Commands::Recent { export, .. } => assert!(!export.requested()),
            _ => panic!("expected recent"),
        }

        let cli = Cli::try_parse_from(["gitseek", "recent", "--copy"]).unwrap();
        match cli.command {
            Commands::Recent { export, .. } => {
                assert!(export.requested());
                assert_eq!(export.formats(), vec![ExportFormat::Report]);
            }
            _ => panic!("expected recent"),
        }
    }
}
