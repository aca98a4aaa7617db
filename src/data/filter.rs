use super::model::{Dataset, Page, Record};

/// Records per page.
pub const PAGE_SIZE: usize = 50;

// ---------------------------------------------------------------------------
// Name query: case-insensitive substring predicate
// ---------------------------------------------------------------------------

/// A lower-cased needle matched against record names.
///
/// An absent or empty query means "no filter" and is represented by `None`
/// from [`NameQuery::new`], so callers never scan for the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery {
    needle: String,
}

impl NameQuery {
    pub fn new(query: Option<&str>) -> Option<Self> {
        match query {
            Some(q) if !q.is_empty() => Some(NameQuery {
                needle: q.to_lowercase(),
            }),
            _ => None,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.name.to_lowercase().contains(&self.needle)
    }
}

// ---------------------------------------------------------------------------
// Page selection
// ---------------------------------------------------------------------------

/// Clamp a requested page to `1..`. Zero and negatives mean the first page.
pub fn normalize_page(page: i64) -> usize {
    if page <= 0 {
        1
    } else {
        usize::try_from(page).unwrap_or(usize::MAX)
    }
}

/// Return the records of 1-based `page` within the working sequence.
///
/// The working sequence is `dataset` filtered by `query` (if any), in source
/// order. Only matches are ranked, so a page is a window over match ranks
/// `(page-1)*50 + 1 ..= page*50`. Never fails; a page past the end is empty.
pub fn select(dataset: &Dataset, page: i64, query: Option<&str>) -> Page {
    let skip = (normalize_page(page) - 1).saturating_mul(PAGE_SIZE);

    match NameQuery::new(query) {
        Some(query) => dataset
            .iter()
            .filter(|record| query.matches(record))
            .skip(skip)
            .take(PAGE_SIZE)
            .cloned()
            .collect(),
        None => dataset.iter().skip(skip).take(PAGE_SIZE).cloned().collect(),
    }
}
