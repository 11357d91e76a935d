//! Upstream article sources.
//!
//! The pipeline only needs one capability: given a [`QueryFilter`], return a
//! table of article rows. [`ArticleSource`] is that seam; [`gdelt`] is the
//! production implementation.
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | GDELT DOC 2.0 | [`gdelt`] | `artlist` JSON endpoint, single request |

pub mod gdelt;

use crate::error::Result;
use crate::models::ArticleTable;
use crate::query::QueryFilter;

/// Something that can run one article search.
///
/// Implementors make a single attempt; retries, paging, and auth are theirs
/// to handle (or not).
pub trait ArticleSource {
    /// Fetch the raw, variable-schema article table for `filter`.
    async fn fetch_articles(&self, filter: &QueryFilter) -> Result<ArticleTable>;
}
