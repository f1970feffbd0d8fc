// Query builder - filters in, GitHub search string out
use chrono::{DateTime, Duration, Utc};

use crate::filters::{lookup_country, SearchFilters};

/// Window used when the user gives us nothing to search for
pub const DEFAULT_WINDOW_DAYS: i64 = 30;
/// "Trending" = created within this many days, sorted by stars
pub const TRENDING_WINDOW_DAYS: i64 = 10;
/// "Recent" = pushed within this many days, sorted by last update
pub const RECENT_WINDOW_DAYS: i64 = 7;

fn days_ago(now: DateTime<Utc>, days: i64) -> String {
    (now - Duration::days(days)).format("%Y-%m-%d").to_string()
}

/// Qualifier tokens for every non-default filter.
///
/// Order is fixed: language, stars, forks, updated, topics, country.
pub fn qualifier_tokens(filters: &SearchFilters, now: DateTime<Utc>) -> Vec<String> {
    let mut tokens = Vec::new();

    let language = filters.language.trim();
    if !language.is_empty() {
        tokens.push(format!("language:{}", language));
    }

    if let Some(min) = filters.stars.threshold() {
        tokens.push(format!("stars:>{}", min));
    }

    if let Some(min) = filters.forks.threshold() {
        tokens.push(format!("forks:>{}", min));
    }

    if let Some(days) = filters.updated.days() {
        tokens.push(format!("pushed:>{}", days_ago(now, days)));
    }

    if filters.has_topics {
        tokens.push("topics:>0".to_string());
    }

    // Unknown codes just don't contribute anything
    if let Some(country) = filters.country.as_deref().and_then(lookup_country) {
        tokens.push(country.query_token());
    }

    tokens
}

/// Build the full search string: free text, then one ` <token>` per filter.
///
/// Nothing is quoted or escaped here; the API client percent-encodes the
/// result right before it goes on the wire.
pub fn build_query(text: &str, filters: &SearchFilters, now: DateTime<Utc>) -> String {
    let text = text.trim();
    if text.is_empty() && filters.is_default() {
        return format!("created:>{}", days_ago(now, DEFAULT_WINDOW_DAYS));
    }

    let mut query = text.to_string();
    for token in qualifier_tokens(filters, now) {
        query.push(' ');
        query.push_str(&token);
    }
    query
}

/// Repositories created in the last ten days
pub fn trending_query(now: DateTime<Utc>) -> String {
    format!("created:>{}", days_ago(now, TRENDING_WINDOW_DAYS))
}

/// Repositories pushed to in the last week
pub fn recent_query(now: DateTime<Utc>) -> String {
    format!("pushed:>{}", days_ago(now, RECENT_WINDOW_DAYS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{ForkTier, RecencyTier, StarTier};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_language_and_stars() {
        let filters = SearchFilters {
            stars: StarTier::Over1000,
            language: "Rust".into(),
            ..Default::default()
        };
        assert_eq!(build_query("", &filters, now()), " language:Rust stars:>1000");
    }

    #[test]
    fn test_empty_everything_defaults_to_last_30_days() {
        let query = build_query("", &SearchFilters::default(), now());
        assert_eq!(query, "created:>2024-02-14");

        // whitespace-only text counts as empty
        assert_eq!(build_query("   ", &SearchFilters::default(), now()), query);
    }

    #[test]
    fn test_text_only() {
        let query = build_query("tokio runtime", &SearchFilters::default(), now());
        assert_eq!(query, "tokio runtime");
    }

    #[test]
    fn test_all_filters_in_stable_order() {
        let filters = SearchFilters {
            language: "Go".into(),
            stars: StarTier::Over100,
            forks: ForkTier::Over10,
            updated: RecencyTier::Week,
            has_topics: true,
            country: Some("jp".into()),
        };

        assert_eq!(
            build_query("http", &filters, now()),
            "http language:Go stars:>100 forks:>10 pushed:>2024-03-08 topics:>0 (japan OR japanese OR tokyo)"
        );
    }

    #[test]
    fn test_one_token_per_field() {
        let stars = [StarTier::Any, StarTier::Over100, StarTier::Over1000, StarTier::Over10000];
        let forks = [ForkTier::Any, ForkTier::Over10, ForkTier::Over100, ForkTier::Over1000];
        let updated = [RecencyTier::Any, RecencyTier::Day, RecencyTier::Week, RecencyTier::Month];

        for s in stars {
            for f in forks {
                for u in updated {
                    for has_topics in [false, true] {
                        let filters = SearchFilters {
                            stars: s,
                            forks: f,
                            updated: u,
                            has_topics,
                            ..Default::default()
                        };
                        let tokens = qualifier_tokens(&filters, now());
                        let expected = usize::from(s != StarTier::Any)
                            + usize::from(f != ForkTier::Any)
                            + usize::from(u != RecencyTier::Any)
                            + usize::from(has_topics);
                        assert_eq!(tokens.len(), expected, "{:?}", filters);

                        let prefixes = ["stars:", "forks:", "pushed:", "topics:"];
                        let positions: Vec<_> = tokens
                            .iter()
                            .map(|t| prefixes.iter().position(|p| t.starts_with(p)).unwrap())
                            .collect();
                        assert!(positions.windows(2).all(|w| w[0] < w[1]));
                    }
                }
            }
        }
    }

    #[test]
    fn test_recency_windows() {
        let day = SearchFilters {
            updated: RecencyTier::Day,
            ..Default::default()
        };
        assert_eq!(build_query("", &day, now()), " pushed:>2024-03-14");

        let month = SearchFilters {
            updated: RecencyTier::Month,
            ..Default::default()
        };
        assert_eq!(build_query("", &month, now()), " pushed:>2024-02-14");
    }

    #[test]
    fn test_unknown_country_is_ignored() {
        let filters = SearchFilters {
            country: Some("XX".into()),
            ..Default::default()
        };
        assert_eq!(build_query("cli", &filters, now()), "cli");
        // and with no text it falls back to the default window
        assert_eq!(build_query("", &filters, now()), "created:>2024-02-14");
    }

    #[test]
    fn test_blank_language_counts_as_default() {
        let filters = SearchFilters {
            language: "  ".into(),
            ..Default::default()
        };
        assert!(filters.is_default());
        assert_eq!(build_query("", &filters, now()), "created:>2024-02-14");
    }

    #[test]
    fn test_no_escaping() {
        let filters = SearchFilters {
            language: "C++".into(),
            ..Default::default()
        };
        assert_eq!(build_query("a \"b\"", &filters, now()), "a \"b\" language:C++");
    }

    #[test]
    fn test_canned_queries() {
        assert_eq!(trending_query(now()), "created:>2024-03-05");
        assert_eq!(recent_query(now()), "pushed:>2024-03-08");
    }
}
