// Plain-text listings for the terminal
use chrono::Utc;
use gitseek_core::export::format_number;
use gitseek_core::filters::countries;
use gitseek_core::{ActivityLevel, Bookmarks, Repository, Session};

pub fn print_results(session: &Session) {
    let results = session.results();
    if results.is_empty() {
        println!("No repositories found");
        return;
    }

    println!(
        "{} - page {} ({} results)",
        session.tab(),
        session.page(),
        results.len()
    );
    for (i, repo) in results.iter().enumerate() {
        let marker = if session.bookmarks().contains(repo.id) {
            "*"
        } else {
            " "
        };
        println!("{:>3}.{} {}", i + 1, marker, repo_line(repo));
        if let Some(desc) = &repo.description {
            println!("       {}", desc);
        }
    }
}

pub fn print_bookmarks(bookmarks: &Bookmarks) {
    if bookmarks.is_empty() {
        println!("No bookmarks yet");
        return;
    }

    let now = Utc::now();
    for (i, bookmark) in bookmarks.iter().enumerate() {
        let days = (now - bookmark.bookmarked_at).num_days();
        println!("{:>3}. {} (saved {}d ago)", i + 1, repo_line(&bookmark.repo), days);
        if !bookmark.note.is_empty() {
            println!("       note: {}", bookmark.note);
        }
    }
}

pub fn print_countries() {
    for country in countries() {
        println!("{:<4} {}", country.code, country.name);
    }
}

fn repo_line(repo: &Repository) -> String {
    format!(
        "{} {} ⭐ {} 🍴 {} [{}]",
        ActivityLevel::from_stars(repo.stars).emoji(),
        repo.full_name,
        format_number(repo.stars),
        format_number(repo.forks),
        repo.language.as_deref().unwrap_or("Unknown")
    )
}
