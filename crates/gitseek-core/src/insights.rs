use crate::models::Repository;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Updated within this many days counts as actively maintained
pub const MAINTAINED_WITHIN_DAYS: i64 = 90;

/// Popularity bucket, driven purely by star count
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActivityLevel {
    /// 1000+ stars
    High,
    /// 100+ stars
    Moderate,
    Emerging,
}

impl ActivityLevel {
    pub fn from_stars(stars: u32) -> Self {
        match stars {
            1_000.. => ActivityLevel::High,
            100..=999 => ActivityLevel::Moderate,
            _ => ActivityLevel::Emerging,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::High => "High",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::Emerging => "Emerging",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ActivityLevel::High => "🔥",
            ActivityLevel::Moderate => "📈",
            ActivityLevel::Emerging => "🌱",
        }
    }
}

/// How many people have forked it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommunityLevel {
    /// 50+ forks
    Strong,
    /// 10+ forks
    Growing,
    /// 5+ forks
    Budding,
    Solo,
}

impl CommunityLevel {
    pub fn from_forks(forks: u32) -> Self {
        match forks {
            50.. => CommunityLevel::Strong,
            10..=49 => CommunityLevel::Growing,
            5..=9 => CommunityLevel::Budding,
            _ => CommunityLevel::Solo,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CommunityLevel::Strong => "Strong community",
            CommunityLevel::Growing => "Growing community",
            CommunityLevel::Budding => "Budding community",
            CommunityLevel::Solo => "Mostly solo",
        }
    }
}

/// Derived facts about one repository, as of a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepoInsight {
    pub days_since_update: i64,
    pub activity: ActivityLevel,
    pub community: CommunityLevel,
    pub actively_maintained: bool,
}

impl RepoInsight {
    pub fn of(repo: &Repository, now: DateTime<Utc>) -> Self {
        // Clock skew can put updated_at slightly ahead of us
        let days_since_update = (now - repo.updated_at).num_days().max(0);

        Self {
            days_since_update,
            activity: ActivityLevel::from_stars(repo.stars),
            community: CommunityLevel::from_forks(repo.forks),
            actively_maintained: days_since_update <= MAINTAINED_WITHIN_DAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::repo;
    use chrono::Duration;

    #[test]
    fn test_activity_thresholds() {
        assert_eq!(ActivityLevel::from_stars(0), ActivityLevel::Emerging);
        assert_eq!(ActivityLevel::from_stars(99), ActivityLevel::Emerging);
        assert_eq!(ActivityLevel::from_stars(100), ActivityLevel::Moderate);
        assert_eq!(ActivityLevel::from_stars(999), ActivityLevel::Moderate);
        assert_eq!(ActivityLevel::from_stars(1_000), ActivityLevel::High);
    }

    #[test]
    fn test_community_thresholds() {
        assert_eq!(CommunityLevel::from_forks(4), CommunityLevel::Solo);
        assert_eq!(CommunityLevel::from_forks(5), CommunityLevel::Budding);
        assert_eq!(CommunityLevel::from_forks(10), CommunityLevel::Growing);
        assert_eq!(CommunityLevel::from_forks(50), CommunityLevel::Strong);
    }

    #[test]
    fn test_maintenance_window() {
        let mut r = repo(1, "a/a");
        let now = r.updated_at + Duration::days(90);
        let insight = RepoInsight::of(&r, now);
        assert_eq!(insight.days_since_update, 90);
        assert!(insight.actively_maintained);

        r.updated_at = now - Duration::days(91);
        assert!(!RepoInsight::of(&r, now).actively_maintained);
    }

    #[test]
    fn test_future_update_clamps_to_zero() {
        let r = repo(1, "a/a");
        let insight = RepoInsight::of(&r, r.updated_at - Duration::hours(3));
        assert_eq!(insight.days_since_update, 0);
    }
}
