//! Query building for the GDELT article search.
//!
//! Turns the three free-form positional inputs (keyword, timespan, country)
//! into a [`QueryFilter`]. This stage never fails: bad input is replaced by a
//! safe default so that nothing arbitrary reaches the upstream query string.

use std::fmt;
use tracing::{debug, warn};

/// Keyword used when the caller supplies nothing (or only whitespace).
pub const DEFAULT_KEYWORD: &str = "earthquake";

/// Number of records requested from GDELT. Not caller-supplied.
pub const MAX_RECORDS: u32 = 250;

/// Look-back window accepted by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timespan {
    OneHour,
    SixHours,
    #[default]
    OneDay,
    ThreeDays,
    SevenDays,
}

impl Timespan {
    /// Parse one of the enumerated spellings. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1h" => Some(Timespan::OneHour),
            "6h" => Some(Timespan::SixHours),
            "24h" => Some(Timespan::OneDay),
            "3d" => Some(Timespan::ThreeDays),
            "7d" => Some(Timespan::SevenDays),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timespan::OneHour => "1h",
            Timespan::SixHours => "6h",
            Timespan::OneDay => "24h",
            Timespan::ThreeDays => "3d",
            Timespan::SevenDays => "7d",
        }
    }
}

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The validated request sent upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFilter {
    /// Trimmed, never empty.
    pub keyword: String,
    pub timespan: Timespan,
    /// `None` when the caller gave no country (never `Some("")`).
    pub country: Option<String>,
    pub max_records: u32,
}

impl QueryFilter {
    /// Build a filter from raw positional arguments.
    ///
    /// * keyword: trimmed; empty becomes [`DEFAULT_KEYWORD`]
    /// * timespan: trimmed; anything outside `{1h, 6h, 24h, 3d, 7d}` becomes `24h`
    /// * country: trimmed; empty is dropped
    ///
    /// Never fails; bad input is replaced by a default and logged.
    pub fn build(keyword: Option<&str>, timespan: Option<&str>, country: Option<&str>) -> Self {
        let keyword = match keyword.map(str::trim) {
            Some(k) if !k.is_empty() => k.to_string(),
            _ => DEFAULT_KEYWORD.to_string(),
        };

        let timespan = match timespan.map(str::trim) {
            None | Some("") => Timespan::default(),
            Some(raw) => Timespan::parse(raw).unwrap_or_else(|| {
                warn!(timespan = %raw, "Unsupported timespan; falling back to 24h");
                Timespan::default()
            }),
        };

        let country = country
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let filter = QueryFilter {
            keyword,
            timespan,
            country,
            max_records: MAX_RECORDS,
        };
        debug!(?filter, "Built query filter");
        filter
    }

    /// Render the GDELT `query` parameter.
    ///
    /// Multi-word keywords are sent as a quoted phrase. A country becomes a
    /// `sourcecountry:` operator with spaces removed (`United States` ->
    /// `UnitedStates`).
    pub fn query_string(&self) -> String {
        let mut query = if self.keyword.split_whitespace().count() > 1 {
            format!("\"{}\"", self.keyword)
        } else {
            self.keyword.clone()
        };
        if let Some(country) = &self.country {
            let compact: String = country.split_whitespace().collect();
            query.push_str(" sourcecountry:");
            query.push_str(&compact);
        }
        query
    }
}
