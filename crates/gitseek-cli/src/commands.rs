// Subcommand handlers: one fetch per invocation, then optional export
use anyhow::{anyhow, Context};
use chrono::Utc;
use gitseek_core::{
    BookmarkStore, Config, ExportFormat, Exporter, GitHubProvider, SearchBackend, SearchFilters,
    Session, SessionStore, Tab, Unlimited, UsageGate,
};
use tracing::{debug, info, warn};

use crate::{clipboard, output, BookmarkAction, ExportArgs};

/// Which listing a browse command shows
pub enum Listing {
    Trending,
    Recent,
    Search {
        text: String,
        filters: SearchFilters,
        show_query: bool,
    },
}

pub struct App {
    config: Config,
    provider: GitHubProvider,
    gate: Box<dyn UsageGate>,
    store: BookmarkStore,
}

impl App {
    pub fn init() -> anyhow::Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        let token = config.github.token.clone();

        // Anonymous use is time-boxed across runs, a token lifts the limit
        let gate: Box<dyn UsageGate> = if token.is_some() {
            Box::new(Unlimited)
        } else {
            let sessions = SessionStore::default_location()?;
            let timer = sessions.resume_or_start(Utc::now())?;
            let remaining = timer.remaining();
            if remaining.is_zero() {
                warn!("Anonymous session expired, set GITHUB_TOKEN to keep searching");
            } else {
                debug!(
                    "Anonymous session from {} ({}), {} minutes left",
                    timer.started_at(),
                    sessions.path().display(),
                    remaining.as_secs() / 60
                );
            }
            Box::new(timer)
        };

        let provider = GitHubProvider::new(&config.user_agent(), token)?;
        let store = BookmarkStore::default_location()?;
        debug!(
            "Initialized (authenticated: {}, bookmarks: {})",
            provider.is_authenticated(),
            store.path().display()
        );

        Ok(Self {
            config,
            provider,
            gate,
            store,
        })
    }

    fn session(&self) -> anyhow::Result<Session> {
        let bookmarks = self.store.load().context("Failed to load bookmarks")?;
        Ok(Session::new(self.config.search.page_size).with_bookmarks(bookmarks))
    }

    pub async fn browse(&self, listing: Listing, page: u32, export: &ExportArgs) -> anyhow::Result<()> {
        let mut session = self.session()?;
        let now = Utc::now();

        match listing {
            Listing::Trending => session.switch_tab(Tab::Trending),
            Listing::Recent => session.switch_tab(Tab::Recent),
            Listing::Search {
                text,
                filters,
                show_query,
            } => {
                session.submit_search(text, filters);
                if show_query {
                    if let Some(query) = session.current_query(now) {
                        println!("query: {}", query);
                    }
                }
            }
        }
        session.set_page(page);

        session.fetch(&self.provider, self.gate.as_ref(), now).await;
        if let Some(err) = session.error() {
            eprintln!("Error: {}", err);
            return Ok(());
        }

        output::print_results(&session);
        self.export(&mut session, export)
    }

    pub async fn bookmarks(&self, action: BookmarkAction) -> anyhow::Result<()> {
        let now = Utc::now();

        match action {
            BookmarkAction::List { export } => {
                let mut session = self.session()?;
                session.switch_tab(Tab::Bookmarks);
                session.fetch(&self.provider, self.gate.as_ref(), now).await;
                output::print_bookmarks(session.bookmarks());
                self.export(&mut session, &export)?;
            }
            BookmarkAction::Add { name, note } => {
                let mut bookmarks = self.store.load()?;
                if bookmarks.find_by_name(&name).is_some() {
                    println!("{} is already bookmarked", name);
                    return Ok(());
                }
                let repo = self.lookup(&name).await?;
                let full_name = repo.full_name.clone();
                if !bookmarks.add(repo, note, now) {
                    // Renamed repos keep their id, so the name lookup above can miss
                    println!("{} is already bookmarked", full_name);
                    return Ok(());
                }
                self.store.save(&bookmarks)?;
                println!("Bookmarked {}", full_name);
            }
            BookmarkAction::Remove { name } => {
                let mut bookmarks = self.store.load()?;
                let id = bookmarks
                    .find_by_name(&name)
                    .map(|b| b.repo.id)
                    .ok_or_else(|| anyhow!("{} is not bookmarked", name))?;
                bookmarks.remove(id);
                self.store.save(&bookmarks)?;
                println!("Removed {}", name);
            }
            BookmarkAction::Toggle { name } => {
                let mut bookmarks = self.store.load()?;
                let added = match bookmarks.find_by_name(&name).map(|b| b.repo.id) {
                    Some(id) => {
                        bookmarks.remove(id);
                        false
                    }
                    None => {
                        let repo = self.lookup(&name).await?;
                        bookmarks.toggle(&repo, now)
                    }
                };
                self.store.save(&bookmarks)?;
                if added {
                    println!("Bookmarked {}", name);
                } else {
                    println!("Removed {}", name);
                }
            }
        }

        Ok(())
    }

    async fn lookup(&self, name: &str) -> anyhow::Result<gitseek_core::Repository> {
        let (owner, repo) = split_full_name(name)?;
        if !self.gate.may_continue() {
            return Err(gitseek_core::Error::SessionExpired.into());
        }
        Ok(self.provider.get_repository(owner, repo).await?)
    }

    fn export(&self, session: &mut Session, export: &ExportArgs) -> anyhow::Result<()> {
        if !export.requested() {
            return Ok(());
        }

        if export.all {
            session.select_all();
        } else {
            let ids = positions_to_ids(session.results(), &export.select);
            for id in ids {
                session.select(id);
            }
        }

        let selected = session.selected();
        if selected.is_empty() {
            eprintln!("Nothing selected to export");
            return Ok(());
        }

        let now = Utc::now();
        let app_name = &self.config.app.name;
        let formats = export.formats();
        for format in &formats {
            let path = Exporter::write(*format, &selected, &export.out, app_name, now)?;
            println!("Wrote {}", path.display());
        }

        if export.copy {
            // The last named format is the one that ends up on the clipboard
            let format = formats.last().copied().unwrap_or(ExportFormat::Report);
            let text = Exporter::render(format, &selected, app_name, now)?;
            if clipboard::copy(&text) {
                info!("Copied {} export to clipboard", format.extension());
                println!("Copied to clipboard");
            }
        }

        Ok(())
    }
}

/// `owner/name` into its two halves
fn split_full_name(name: &str) -> anyhow::Result<(&str, &str)> {
    match name.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner, repo))
        }
        _ => Err(anyhow!("Expected owner/name, got '{}'", name)),
    }
}

/// Map 1-based listing positions to repository ids, skipping ones off the page
fn positions_to_ids(results: &[gitseek_core::Repository], positions: &[usize]) -> Vec<u64> {
    positions
        .iter()
        .filter_map(|&pos| {
            let repo = pos.checked_sub(1).and_then(|i| results.get(i));
            if repo.is_none() {
                warn!("No result at position {}, skipping", pos);
            }
            repo.map(|r| r.id)
        })
        .collect()
}
