use serde_json::Value;
use tracing::debug;

use crate::models::{BreakdownEntry, VolumeResponse};
use crate::usd::{derive_usd, text_at, UsdExtractor};

/// Where a provider keeps the fields the aggregator reads
pub struct RecordSchema {
    pub usd: &'static [UsdExtractor],
    pub hash: &'static str,
    pub time: &'static str,
}

/// Sum strictly positive USD amounts in a single pass.
///
/// Only positive amounts feed `volume_usd` and `count`; every record still
/// gets a breakdown entry (0 when no amount could be derived), in input order.
pub fn aggregate(records: &[Value], schema: &RecordSchema) -> VolumeResponse {
    let mut result = VolumeResponse::empty();
    result.breakdown.reserve(records.len());

    for record in records {
        let usd = derive_usd(record, schema.usd);

        if let Some(amount) = usd.filter(|a| *a > 0.0) {
            result.volume_usd += amount;
            result.count += 1;
        }

        result.breakdown.push(BreakdownEntry {
            hash: text_at(record, schema.hash),
            time: text_at(record, schema.time),
            usd: usd.unwrap_or(0.0),
        });
    }

    debug!(
        "Aggregated {} records → {} positive, {} USD",
        records.len(),
        result.count,
        result.volume_usd
    );

    result
}
