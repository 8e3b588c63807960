use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use crate::aggregator::RecordSchema;
use crate::chain::Chain;
use crate::config::Config;
use crate::error::ApiError;
use crate::usd::{money_at, number_at};

fn value_quote(tx: &Value) -> Option<f64> {
    number_at(tx, "/value_quote")
}

fn pretty_value_quote(tx: &Value) -> Option<f64> {
    money_at(tx, "/pretty_value_quote")
}

pub(super) static SCHEMA: RecordSchema = RecordSchema {
    usd: &[value_quote, pretty_value_quote],
    hash: "/tx_hash",
    time: "/block_signed_at",
};

/// GET transactions_v3 quoted in USD; upstream status is mirrored on failure.
pub(super) async fn fetch(
    client: &Client,
    cfg: &Config,
    chain: &Chain,
    address: &str,
) -> Result<Vec<Value>, ApiError> {
    let key = cfg.covalent_api_key.require("COVALENT_API_KEY")?;

    let url = format!(
        "{}/v1/{}/address/{}/transactions_v3/",
        cfg.covalent_base_url, chain.covalent_id, address
    );
    info!("📡 Covalent transactions_v3 → chain {} address {}", chain.covalent_id, address);

    let resp = client
        .get(&url)
        .query(&[("quote-currency", "USD"), ("no-logs", "true"), ("key", key)])
        .send()
        .await?;

    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        warn!("Covalent returned HTTP {} for {}", status, address);
        return Err(ApiError::Upstream {
            provider: "Covalent",
            status,
            body: text,
        });
    }

    let json: Value = serde_json::from_str(&text)?;
    Ok(items(json))
}

/// `data.items`, or nothing when the envelope is not the expected shape.
fn items(mut json: Value) -> Vec<Value> {
    match json.pointer_mut("/data/items").map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usd::derive_usd;
    use serde_json::json;

    #[test]
    fn missing_or_wrong_shape_yields_no_items() {
        assert!(items(json!(null)).is_empty());
        assert!(items(json!({ "data": null })).is_empty());
        assert!(items(json!({ "data": { "items": "nope" } })).is_empty());
        assert_eq!(items(json!({ "data": { "items": [{}, {}] } })).len(), 2);
    }

    #[test]
    fn pretty_quote_backs_up_missing_value_quote() {
        let tx = json!({ "value_quote": null, "pretty_value_quote": "$2,000.00" });
        assert_eq!(derive_usd(&tx, SCHEMA.usd), Some(2000.0));
    }
}
