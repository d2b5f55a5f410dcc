use crate::dataset::AircraftRecord;
use log::debug;
use std::sync::Arc;

/// Returns every record whose ICAO code, FAA designator, manufacturer or model
/// name contains `query` (case-insensitive), exact model-name hits first.
///
/// An empty or whitespace-only query yields no suggestions. Table order is kept
/// within each tier.
pub fn suggest(query: &str, table: &[Arc<AircraftRecord>]) -> Vec<Arc<AircraftRecord>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<Arc<AircraftRecord>> = table
        .iter()
        .filter(|record| matches_query(record, &query))
        .cloned()
        .collect();

    // sort_by_key is stable
    matches.sort_by_key(|record| !is_exact_model(record, &query));

    debug!(
        "suggest — query={:?} scanned={} matched={}",
        query,
        table.len(),
        matches.len()
    );
    matches
}

/// `query` must already be trimmed and lowercased.
fn matches_query(record: &AircraftRecord, query: &str) -> bool {
    record
        .identifiers()
        .any(|id| id.to_lowercase().contains(query))
}

fn is_exact_model(record: &AircraftRecord, query: &str) -> bool {
    record
        .model_name()
        .is_some_and(|m| m.to_lowercase() == query)
}
