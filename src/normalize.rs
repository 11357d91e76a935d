//! Cleaning of the raw article table before scoring.
//!
//! Steps, each skipped when the column it needs is missing:
//! 1. fill absent text cells with `""`
//! 2. drop repeated `url`s (first occurrence wins)
//! 3. drop repeated `title`s among the survivors (first occurrence wins)
//! 4. order by `seendate`, newest first (undated rows last)
//!
//! Filling first makes an absent cell and an empty one the same key for
//! deduplication. The date order is provisional; the ranker re-sorts by
//! relevance.

use crate::models::{ArticleTable, Column};
use itertools::Itertools;
use std::cmp::Reverse;
use tracing::{debug, instrument};

/// Fill, deduplicate, and order the table.
///
/// Blank cells in present text columns become `""`. Rows are then
/// deduplicated by `url` and by `title`, keeping the first of each, and
/// ordered newest `seendate` first with undated rows last. Running it twice
/// gives the same table.
///
/// # Arguments
///
/// * `table` - The table exactly as the source returned it
///
/// # Returns
///
/// The cleaned table, with the same column set.
#[instrument(level = "debug", skip_all, fields(rows = table.len()))]
pub fn normalize(mut table: ArticleTable) -> ArticleTable {
    let before = table.len();

    for column in Column::TEXT {
        if !table.has_column(column) {
            continue;
        }
        for row in &mut table.rows {
            row.slot_mut(column).get_or_insert_with(String::new);
        }
    }

    if table.has_column(Column::Url) {
        table.rows = std::mem::take(&mut table.rows)
            .into_iter()
            .unique_by(|r| r.url.clone())
            .collect();
    }
    if table.has_column(Column::Title) {
        table.rows = std::mem::take(&mut table.rows)
            .into_iter()
            .unique_by(|r| r.title.clone())
            .collect();
    }
    let deduped = table.len();

    if table.has_column(Column::SeenDate) {
        table.rows.sort_by_key(|r| Reverse(r.seen_at()));
    }

    debug!(before, after = deduped, "Normalized article table");
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawArticle;
    use proptest::prelude::*;

    fn row(url: &str, title: &str, seen: &str) -> RawArticle {
        RawArticle {
            url: Some(url.to_string()),
            title: Some(title.to_string()),
            seen_date: Some(seen.to_string()),
            ..Default::default()
        }
    }

    fn table(rows: Vec<RawArticle>) -> ArticleTable {
        ArticleTable::new([Column::Url, Column::Title, Column::SeenDate], rows)
    }

    #[test]
    fn duplicate_urls_collapse_to_first() {
        let t = table(vec![
            row("http://x/1", "First", "20250101T000000Z"),
            row("http://x/1", "Second", "20250102T000000Z"),
        ]);
        let out = normalize(t);
        assert_eq!(out.len(), 1);
        assert_eq!(out.rows[0].title.as_deref(), Some("First"));
    }

    #[test]
    fn duplicate_titles_with_distinct_urls_collapse() {
        let t = table(vec![
            row("http://x/1", "Same headline", "20250101T000000Z"),
            row("http://x/2", "Same headline", "20250102T000000Z"),
            row("http://x/3", "Other headline", "20250103T000000Z"),
        ]);
        let out = normalize(t);
        let urls: Vec<_> = out.rows.iter().filter_map(|r| r.url.as_deref()).collect();
        assert_eq!(urls, vec!["http://x/3", "http://x/1"]);
    }

    #[test]
    fn title_dedup_runs_after_url_dedup() {
        // The second row is removed by url; the third then only competes with
        // the first on title.
        let t = table(vec![
            row("http://x/1", "A", "20250101T000000Z"),
            row("http://x/1", "B", "20250101T000000Z"),
            row("http://x/2", "B", "20250101T000000Z"),
        ]);
        let out = normalize(t);
        assert_eq!(out.len(), 2);
        assert_eq!(out.rows[1].url.as_deref(), Some("http://x/2"));
    }

    #[test]
    fn sorted_newest_first_with_undated_last() {
        let undated = RawArticle {
            url: Some("http://x/0".into()),
            title: Some("undated".into()),
            ..Default::default()
        };
        let t = table(vec![
            undated,
            row("http://x/1", "old", "20240101T000000Z"),
            row("http://x/2", "new", "20250101T000000Z"),
        ]);
        let out = normalize(t);
        let titles: Vec<_> = out.rows.iter().map(|r| r.title.clone().unwrap()).collect();
        assert_eq!(titles, vec!["new", "old", "undated"]);
    }

    #[test]
    fn absent_text_becomes_empty_only_for_present_columns() {
        let t = ArticleTable::new(
            [Column::Url, Column::Title, Column::Excerpt],
            vec![RawArticle {
                url: Some("http://x/1".into()),
                ..Default::default()
            }],
        );
        let out = normalize(t);
        let r = &out.rows[0];
        assert_eq!(r.title.as_deref(), Some(""));
        assert_eq!(r.excerpt.as_deref(), Some(""));
        assert_eq!(r.content, None);
        assert_eq!(r.domain, None);
    }

    #[test]
    fn missing_columns_skip_their_steps() {
        let t = ArticleTable::new(
            [Column::Domain],
            vec![
                RawArticle {
                    domain: Some("a.com".into()),
                    ..Default::default()
                },
                RawArticle {
                    domain: Some("a.com".into()),
                    ..Default::default()
                },
            ],
        );
        let out = normalize(t);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn empty_table_stays_empty() {
        let out = normalize(ArticleTable::default());
        assert!(out.is_empty());
    }

    fn arb_row() -> impl Strategy<Value = RawArticle> {
        (
            proptest::option::of("http://x/[0-4]"),
            proptest::option::of("[a-c]"),
            proptest::option::of("2025010[1-5]T000000Z"),
        )
            .prop_map(|(url, title, seen_date)| RawArticle {
                url,
                title,
                seen_date,
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent_and_never_grows(rows in proptest::collection::vec(arb_row(), 0..20)) {
            let input = table(rows);
            let n = input.len();
            let once = normalize(input);
            prop_assert!(once.len() <= n);

            let urls: Vec<_> = once.rows.iter().map(|r| r.url.clone()).collect();
            prop_assert_eq!(urls.iter().unique().count(), urls.len());

            let twice = normalize(once.clone());
            prop_assert_eq!(once, twice);
        }
    }
}
