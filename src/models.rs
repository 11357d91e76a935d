//! Data models for article tables returned by GDELT and the ranked records we emit.
//!
//! - [`ArticleTable`]: the raw, variable-schema result of one search
//! - [`RawArticle`]: one row of that table, every cell optional
//! - [`ArticleRecord`]: a cleaned, typed row carrying its relevance score
//!
//! Absence is represented natively. On an [`ArticleRecord`] a text field is
//! `None` only when the column was not part of the response at all; a column
//! that exists but had no value for this row is `Some("")`. `seen_date` nests
//! one more level: `Some(None)` is a present column whose value was empty or
//! unreadable, emitted as `null`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::warn;

/// GDELT's compact UTC timestamp layout, e.g. `20250506T143000Z`.
pub const SEEN_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// A column the pipeline understands. Anything else in the response is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Url,
    Title,
    Domain,
    SourceCountry,
    Language,
    Content,
    Excerpt,
    SeenDate,
}

impl Column {
    /// Text columns, in the order they are cleaned.
    pub const TEXT: [Column; 7] = [
        Column::Title,
        Column::Url,
        Column::Domain,
        Column::SourceCountry,
        Column::Language,
        Column::Content,
        Column::Excerpt,
    ];

    /// Map an upstream key to a column. GDELT uses lowercase keys; the
    /// camelCase spellings we emit are accepted too.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "url" => Some(Column::Url),
            "title" => Some(Column::Title),
            "domain" => Some(Column::Domain),
            "sourcecountry" | "sourceCountry" => Some(Column::SourceCountry),
            "language" => Some(Column::Language),
            "content" => Some(Column::Content),
            "excerpt" => Some(Column::Excerpt),
            "seendate" | "seenDate" => Some(Column::SeenDate),
            _ => None,
        }
    }

    /// Output field name.
    pub fn name(&self) -> &'static str {
        match self {
            Column::Url => "url",
            Column::Title => "title",
            Column::Domain => "domain",
            Column::SourceCountry => "sourceCountry",
            Column::Language => "language",
            Column::Content => "content",
            Column::Excerpt => "excerpt",
            Column::SeenDate => "seenDate",
        }
    }
}

/// One article row as returned upstream, before cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArticle {
    pub url: Option<String>,
    pub title: Option<String>,
    pub domain: Option<String>,
    pub source_country: Option<String>,
    pub language: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    /// Kept as text until the row is turned into an [`ArticleRecord`].
    pub seen_date: Option<String>,
}

impl RawArticle {
    pub fn slot_mut(&mut self, column: Column) -> &mut Option<String> {
        match column {
            Column::Url => &mut self.url,
            Column::Title => &mut self.title,
            Column::Domain => &mut self.domain,
            Column::SourceCountry => &mut self.source_country,
            Column::Language => &mut self.language,
            Column::Content => &mut self.content,
            Column::Excerpt => &mut self.excerpt,
            Column::SeenDate => &mut self.seen_date,
        }
    }

    /// The parsed `seendate` of this row, if it has a readable one.
    pub fn seen_at(&self) -> Option<DateTime<Utc>> {
        self.seen_date.as_deref().and_then(parse_seen_date)
    }
}

/// A whole search result: the set of columns present plus the rows.
///
/// The column set is uniform across rows within one response but varies
/// between queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleTable {
    pub columns: BTreeSet<Column>,
    pub rows: Vec<RawArticle>,
}

impl ArticleTable {
    pub fn new(columns: impl IntoIterator<Item = Column>, rows: Vec<RawArticle>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            rows,
        }
    }

    /// Build a table from the JSON objects of an `articles` array.
    ///
    /// The schema is the union of recognised keys across rows. Strings are
    /// taken verbatim, other scalars are stringified, `null` is absent.
    pub fn from_json_rows(objects: &[Map<String, Value>]) -> Self {
        let mut columns = BTreeSet::new();
        let rows = objects
            .iter()
            .map(|obj| {
                let mut row = RawArticle::default();
                for (key, value) in obj {
                    if let Some(column) = Column::from_key(key) {
                        columns.insert(column);
                        *row.slot_mut(column) = coerce_cell(value);
                    }
                }
                row
            })
            .collect();
        Self::new(columns, rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Convert each row into an [`ArticleRecord`] with a zero score.
    ///
    /// Columns outside the schema stay `None`. When the table has a
    /// `seendate` column, every record gets `Some(..)`; a value that cannot be
    /// parsed becomes `Some(None)` with a warning.
    pub fn into_records(self) -> Vec<ArticleRecord> {
        let columns = self.columns;
        let dated = columns.contains(&Column::SeenDate);
        let keep = |column: Column, value: Option<String>| value.filter(|_| columns.contains(&column));

        self.rows
            .into_iter()
            .map(|row| {
                let seen_date = dated.then(|| {
                    row.seen_date
                        .as_deref()
                        .filter(|raw| !raw.is_empty())
                        .and_then(|raw| {
                            let parsed = parse_seen_date(raw);
                            if parsed.is_none() {
                                warn!(seendate = %raw, url = ?row.url, "Unparseable seendate; emitting null");
                            }
                            parsed
                        })
                });
                ArticleRecord {
                    url: keep(Column::Url, row.url),
                    title: keep(Column::Title, row.title),
                    domain: keep(Column::Domain, row.domain),
                    source_country: keep(Column::SourceCountry, row.source_country),
                    language: keep(Column::Language, row.language),
                    content: keep(Column::Content, row.content),
                    excerpt: keep(Column::Excerpt, row.excerpt),
                    seen_date,
                    relevance_score: 0.0,
                }
            })
            .collect()
    }
}

fn coerce_cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Parse a GDELT `seendate`. Accepts the compact form and RFC 3339.
pub fn parse_seen_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, SEEN_DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|d| d.with_timezone(&Utc))
        })
}

/// A cleaned, scored article ready for output.
///
/// Serialises with camelCase keys; fields whose column was missing from the
/// response are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Outer `None`: no `seendate` column. `Some(None)`: column present,
    /// value empty or unreadable.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_seen_date"
    )]
    pub seen_date: Option<Option<DateTime<Utc>>>,
    /// Always computed locally, in `[0, 10]`.
    pub relevance_score: f64,
}

impl ArticleRecord {
    /// The readable `seendate`, if any.
    pub fn seen_at(&self) -> Option<DateTime<Utc>> {
        self.seen_date.flatten()
    }
}

fn serialize_seen_date<S>(
    date: &Option<Option<DateTime<Utc>>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date.flatten() {
        Some(d) => serializer.serialize_str(&d.format(SEEN_DATE_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}
