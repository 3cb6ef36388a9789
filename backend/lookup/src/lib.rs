//! Lookup side of the pipeline: search a directory site, parse its result
//! list, and pick the single exact match.
//!
//! Also hosts the item catalog builder, which scrapes the market site's item
//! index into the catalog used for localized item-name lookups.

pub mod catalog;
pub mod client;
pub mod parse;
pub mod resolver;

#[cfg(test)]
mod test_support;

pub use catalog::{BuildSummary, CatalogBuilder};
pub use client::LookupClient;
pub use parse::{is_entry_marker, parse_search_results};
pub use resolver::resolve;

use kupo_core::PipelineError;

pub(crate) fn lookup_failed(context: &str, err: reqwest::Error) -> PipelineError {
    PipelineError::LookupFailed(format!("{context}: {err}"))
}
