//! Boundary operations: one full load-then-select cycle per call.

use std::path::Path;

use crate::data::filter::select;
use crate::data::loader::{LoadError, load_file};
use crate::data::model::PriceListResponse;

/// Page `page` of the whole price list.
pub fn price_list(source: &Path, page: i64) -> Result<PriceListResponse, LoadError> {
    let dataset = load_file(source)?;
    Ok(select(&dataset, page, None).into())
}

/// Page `page` of the records whose name contains `query`, ignoring case.
/// An empty `query` is the same as [`price_list`].
pub fn price_list_query(
    source: &Path,
    page: i64,
    query: &str,
) -> Result<PriceListResponse, LoadError> {
    let dataset = load_file(source)?;
    let page = select(&dataset, page, Some(query));
    log::debug!("query {query:?}: {} records on page", page.len());
    Ok(page.into())
}
