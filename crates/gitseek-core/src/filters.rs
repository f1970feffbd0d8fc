// Search filters the user can toggle before submitting a query
use std::str::FromStr;

use crate::{Error, Result};

/// Minimum star count tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StarTier {
    #[default]
    Any,
    Over100,
    Over1000,
    Over10000,
}

impl StarTier {
    pub fn threshold(&self) -> Option<u32> {
        match self {
            StarTier::Any => None,
            StarTier::Over100 => Some(100),
            StarTier::Over1000 => Some(1_000),
            StarTier::Over10000 => Some(10_000),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StarTier::Any => "any",
            StarTier::Over100 => "100+",
            StarTier::Over1000 => "1000+",
            StarTier::Over10000 => "10000+",
        }
    }
}

impl FromStr for StarTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().trim_end_matches('+') {
            "" | "any" => Ok(StarTier::Any),
            "100" => Ok(StarTier::Over100),
            "1000" | "1k" => Ok(StarTier::Over1000),
            "10000" | "10k" => Ok(StarTier::Over10000),
            other => Err(Error::ConfigError(format!(
                "Unknown star tier '{}' (expected any, 100+, 1000+ or 10000+)",
                other
            ))),
        }
    }
}

/// Minimum fork count tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ForkTier {
    #[default]
    Any,
    Over10,
    Over100,
    Over1000,
}

impl ForkTier {
    pub fn threshold(&self) -> Option<u32> {
        match self {
            ForkTier::Any => None,
            ForkTier::Over10 => Some(10),
            ForkTier::Over100 => Some(100),
            ForkTier::Over1000 => Some(1_000),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ForkTier::Any => "any",
            ForkTier::Over10 => "10+",
            ForkTier::Over100 => "100+",
            ForkTier::Over1000 => "1000+",
        }
    }
}

impl FromStr for ForkTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().trim_end_matches('+') {
            "" | "any" => Ok(ForkTier::Any),
            "10" => Ok(ForkTier::Over10),
            "100" => Ok(ForkTier::Over100),
            "1000" | "1k" => Ok(ForkTier::Over1000),
            other => Err(Error::ConfigError(format!(
                "Unknown fork tier '{}' (expected any, 10+, 100+ or 1000+)",
                other
            ))),
        }
    }
}

/// How recently the repository must have been pushed to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecencyTier {
    #[default]
    Any,
    Day,
    Week,
    Month,
}

impl RecencyTier {
    pub fn days(&self) -> Option<i64> {
        match self {
            RecencyTier::Any => None,
            RecencyTier::Day => Some(1),
            RecencyTier::Week => Some(7),
            RecencyTier::Month => Some(30),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecencyTier::Any => "any",
            RecencyTier::Day => "day",
            RecencyTier::Week => "week",
            RecencyTier::Month => "month",
        }
    }
}

impl FromStr for RecencyTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "any" => Ok(RecencyTier::Any),
            "day" | "today" => Ok(RecencyTier::Day),
            "week" => Ok(RecencyTier::Week),
            "month" => Ok(RecencyTier::Month),
            other => Err(Error::ConfigError(format!(
                "Unknown recency '{}' (expected any, day, week or month)",
                other
            ))),
        }
    }
}

/// Everything the query builder reads, in the order tokens are emitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Free text; blank means "any"
    pub language: String,
    pub stars: StarTier,
    pub forks: ForkTier,
    pub updated: RecencyTier,
    pub has_topics: bool,
    /// ISO-3166 alpha-2 code; codes missing from the table are ignored
    pub country: Option<String>,
}

impl SearchFilters {
    /// True when no field would contribute a query token
    pub fn is_default(&self) -> bool {
        self.language.trim().is_empty()
            && self.stars == StarTier::Any
            && self.forks == ForkTier::Any
            && self.updated == RecencyTier::Any
            && !self.has_topics
            && self.country.as_deref().and_then(lookup_country).is_none()
    }
}

/// A country the search can be biased toward.
///
/// GitHub has no location qualifier for repositories, so we match on
/// keywords that tend to show up in names, descriptions and topics.
#[derive(Debug, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

impl Country {
    /// `(kw1 OR kw2 OR ...)`
    pub fn query_token(&self) -> String {
        format!("({})", self.keywords.join(" OR "))
    }
}

const COUNTRIES: &[Country] = &[
    Country { code: "US", name: "United States", keywords: &["usa", "american", "america"] },
    Country { code: "CN", name: "China", keywords: &["china", "chinese", "beijing", "shanghai"] },
    Country { code: "IN", name: "India", keywords: &["india", "indian", "bangalore", "mumbai"] },
    Country { code: "DE", name: "Germany", keywords: &["germany", "german", "berlin", "munich"] },
    Country { code: "GB", name: "United Kingdom", keywords: &["uk", "british", "london", "england"] },
    Country { code: "FR", name: "France", keywords: &["france", "french", "paris"] },
    Country { code: "JP", name: "Japan", keywords: &["japan", "japanese", "tokyo"] },
    Country { code: "BR", name: "Brazil", keywords: &["brazil", "brasil", "brazilian"] },
    Country { code: "CA", name: "Canada", keywords: &["canada", "canadian", "toronto"] },
    Country { code: "RU", name: "Russia", keywords: &["russia", "russian", "moscow"] },
    Country { code: "KR", name: "South Korea", keywords: &["korea", "korean", "seoul"] },
    Country { code: "AU", name: "Australia", keywords: &["australia", "australian", "sydney"] },
    Country { code: "NL", name: "Netherlands", keywords: &["netherlands", "dutch", "amsterdam"] },
    Country { code: "ES", name: "Spain", keywords: &["spain", "spanish", "madrid", "barcelona"] },
    Country { code: "IT", name: "Italy", keywords: &["italy", "italian", "rome", "milan"] },
    Country { code: "SE", name: "Sweden", keywords: &["sweden", "swedish", "stockholm"] },
    Country { code: "PL", name: "Poland", keywords: &["poland", "polish", "warsaw"] },
    Country { code: "UA", name: "Ukraine", keywords: &["ukraine", "ukrainian", "kyiv"] },
    Country { code: "CH", name: "Switzerland", keywords: &["switzerland", "swiss", "zurich"] },
    Country { code: "TW", name: "Taiwan", keywords: &["taiwan", "taiwanese", "taipei"] },
    Country { code: "SG", name: "Singapore", keywords: &["singapore", "singaporean"] },
    Country { code: "ID", name: "Indonesia", keywords: &["indonesia", "indonesian", "jakarta"] },
    Country { code: "VN", name: "Vietnam", keywords: &["vietnam", "vietnamese", "hanoi"] },
    Country { code: "TR", name: "Turkey", keywords: &["turkey", "turkish", "istanbul"] },
    Country { code: "IL", name: "Israel", keywords: &["israel", "israeli", "telaviv"] },
    Country { code: "MX", name: "Mexico", keywords: &["mexico", "mexican"] },
    Country { code: "AR", name: "Argentina", keywords: &["argentina", "argentinian"] },
    Country { code: "NG", name: "Nigeria", keywords: &["nigeria", "nigerian", "lagos"] },
    Country { code: "PK", name: "Pakistan", keywords: &["pakistan", "pakistani", "karachi"] },
    Country { code: "BD", name: "Bangladesh", keywords: &["bangladesh", "bangladeshi", "dhaka"] },
    Country { code: "EG", name: "Egypt", keywords: &["egypt", "egyptian", "cairo"] },
    Country { code: "ZA", name: "South Africa", keywords: &["southafrica", "johannesburg", "capetown"] },
    Country { code: "KE", name: "Kenya", keywords: &["kenya", "kenyan", "nairobi"] },
    Country { code: "PH", name: "Philippines", keywords: &["philippines", "filipino", "manila"] },
    Country { code: "TH", name: "Thailand", keywords: &["thailand", "thai", "bangkok"] },
    Country { code: "MY", name: "Malaysia", keywords: &["malaysia", "malaysian", "kualalumpur"] },
    Country { code: "NO", name: "Norway", keywords: &["norway", "norwegian", "oslo"] },
    Country { code: "DK", name: "Denmark", keywords: &["denmark", "danish", "copenhagen"] },
    Country { code: "FI", name: "Finland", keywords: &["finland", "finnish", "helsinki"] },
    Country { code: "AT", name: "Austria", keywords: &["austria", "austrian", "vienna"] },
    Country { code: "BE", name: "Belgium", keywords: &["belgium", "belgian", "brussels"] },
    Country { code: "PT", name: "Portugal", keywords: &["portugal", "portuguese", "lisbon"] },
    Country { code: "CZ", name: "Czechia", keywords: &["czech", "czechia", "prague"] },
    Country { code: "IR", name: "Iran", keywords: &["iran", "iranian", "persian", "tehran"] },
    Country { code: "NZ", name: "New Zealand", keywords: &["newzealand", "auckland", "wellington"] },
];

/// All supported countries, in table order
pub fn countries() -> &'static [Country] {
    COUNTRIES
}

/// Case-insensitive lookup by ISO code
pub fn lookup_country(code: &str) -> Option<&'static Country> {
    let code = code.trim();
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}
