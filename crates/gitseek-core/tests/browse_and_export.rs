use chrono::{DateTime, TimeZone, Utc};
use gitseek_core::models::{License, Owner, OwnerKind};
use gitseek_core::{
    BookmarkStore, Error, ExportDocument, ExportFormat, Exporter, Repository, SearchBackend,
    SearchFilters, Session, SortKey, StarTier, Tab, Unlimited,
};
use std::sync::Mutex;

fn create_test_repo(id: u64, full_name: &str, stars: u32) -> Repository {
    let (owner, name) = full_name.split_once('/').unwrap();
    let when = Utc.with_ymd_and_hms(2024, 4, 20, 0, 0, 0).unwrap();
    Repository {
        id,
        name: name.to_string(),
        full_name: full_name.to_string(),
        description: Some(format!("{} for testing", name)),
        owner: Owner {
            login: owner.to_string(),
            avatar_url: String::new(),
            kind: OwnerKind::Organization,
        },
        stars,
        forks: stars / 10,
        watchers: stars,
        open_issues: 3,
        language: Some("Rust".to_string()),
        topics: vec!["test".to_string()],
        license: Some(License {
            key: "apache-2.0".to_string(),
            name: "Apache License 2.0".to_string(),
        }),
        created_at: when,
        updated_at: when,
        pushed_at: when,
        size: 2048,
        html_url: format!("https://github.com/{}", full_name),
        clone_url: format!("https://github.com/{}.git", full_name),
        ssh_url: format!("git@github.com:{}.git", full_name),
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// Serves a fixed page and records every query it was asked for
struct FakeBackend {
    page: Vec<Repository>,
    fail_with: Option<String>,
    queries: Mutex<Vec<(String, SortKey, u32, u32)>>,
}

impl FakeBackend {
    fn serving(page: Vec<Repository>) -> Self {
        Self {
            page,
            fail_with: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            page: Vec::new(),
            fail_with: Some(message.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, SortKey, u32, u32)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SearchBackend for FakeBackend {
    async fn search(
        &self,
        query: &str,
        sort: SortKey,
        page: u32,
        per_page: u32,
    ) -> gitseek_core::Result<Vec<Repository>> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), sort, page, per_page));
        match &self.fail_with {
            Some(message) => Err(Error::ApiError(message.clone())),
            None => Ok(self.page.clone()),
        }
    }

    async fn get_repository(&self, owner: &str, name: &str) -> gitseek_core::Result<Repository> {
        let full_name = format!("{}/{}", owner, name);
        self.page
            .iter()
            .find(|r| r.full_name == full_name)
            .cloned()
            .ok_or(Error::NotFound(full_name))
    }
}

#[tokio::test]
async fn test_search_select_and_export_json() {
    let backend = FakeBackend::serving(vec![
        create_test_repo(1, "rust-lang/rust", 98_000),
        create_test_repo(2, "tokio-rs/tokio", 25_000),
        create_test_repo(3, "serde-rs/serde", 9_000),
    ]);

    let mut session = Session::new(20);
    session.submit_search(
        "",
        SearchFilters {
            language: "Rust".into(),
            stars: StarTier::Over1000,
            ..Default::default()
        },
    );
    session.fetch(&backend, &Unlimited, now()).await;

    assert_eq!(
        backend.calls(),
        vec![(" language:Rust stars:>1000".to_string(), SortKey::Stars, 1, 20)]
    );

    session.toggle_selection(3);
    session.toggle_selection(1);
    let selected = session.selected();
    assert_eq!(selected.len(), 2);

    let json = Exporter::render(ExportFormat::Json, &selected, "gitseek", now()).unwrap();
    let doc: ExportDocument = serde_json::from_str(&json).unwrap();

    assert_eq!(doc.count, selected.len());
    assert_eq!(doc.repositories[0].full_name, "rust-lang/rust");
    assert_eq!(doc.repositories[0].stars, 98_000);
    assert_eq!(doc.repositories[0].license.as_deref(), Some("Apache License 2.0"));
    assert_eq!(doc.repositories[1].full_name, "serde-rs/serde");
    assert_eq!(doc.repositories[1].pushed_at, selected[1].pushed_at);
}

#[tokio::test]
async fn test_failed_fetch_surfaces_message() {
    let backend = FakeBackend::failing("GitHub returned 500: Internal Server Error");

    let mut session = Session::new(20);
    session.switch_tab(Tab::Recent);
    session.fetch(&backend, &Unlimited, now()).await;

    assert!(session.results().is_empty());
    assert_eq!(
        session.error(),
        Some("API request failed: GitHub returned 500: Internal Server Error")
    );
    assert_eq!(backend.calls()[0].1, SortKey::Updated);
}

#[tokio::test]
async fn test_bookmarks_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = BookmarkStore::new(dir.path().join("bookmarks.json"));
    let backend = FakeBackend::serving(vec![
        create_test_repo(1, "a/one", 5),
        create_test_repo(2, "b/two", 50),
    ]);

    // first run: bookmark one result
    let mut session = Session::new(20).with_bookmarks(store.load().unwrap());
    session.fetch(&backend, &Unlimited, now()).await;
    assert_eq!(session.toggle_bookmark(2, now()), Some(true));
    store.save(session.bookmarks()).unwrap();

    // second run: the Bookmarks tab is served from disk without a request
    let offline = FakeBackend::failing("should not be called");
    let mut session = Session::new(20).with_bookmarks(store.load().unwrap());
    session.switch_tab(Tab::Bookmarks);
    session.fetch(&offline, &Unlimited, now()).await;

    assert!(offline.calls().is_empty());
    assert_eq!(session.results().len(), 1);
    assert_eq!(session.results()[0].full_name, "b/two");

    session.select_all();
    let path = Exporter::write(
        ExportFormat::Report,
        &session.selected(),
        dir.path(),
        "gitseek",
        now(),
    )
    .unwrap();
    let report = std::fs::read_to_string(path).unwrap();
    assert!(report.contains("[b/two](https://github.com/b/two)"));
}
