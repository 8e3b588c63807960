use axum::http::StatusCode;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::aggregator::RecordSchema;
use crate::chain::Chain;
use crate::config::Config;
use crate::error::ApiError;
use crate::usd::number_at;

const DEX_TRADES_QUERY: &str = r#"
query ($network: evm_network, $address: String) {
  EVM(network: $network, dataset: combined) {
    DEXTrades(
      where: { Transaction: { From: { is: $address } } }
      orderBy: { descending: Block_Time }
      limit: { count: 1000 }
    ) {
      Block { Time }
      Transaction { Hash }
      Trade {
        Buy { Amount AmountInUSD }
        Sell { Amount AmountInUSD }
      }
    }
  }
}
"#;

fn buy_usd(trade: &Value) -> Option<f64> {
    number_at(trade, "/Trade/Buy/AmountInUSD")
}

fn sell_usd(trade: &Value) -> Option<f64> {
    number_at(trade, "/Trade/Sell/AmountInUSD")
}

// no USD quote at all: approximate with the larger raw side
fn larger_raw_amount(trade: &Value) -> Option<f64> {
    let buy = number_at(trade, "/Trade/Buy/Amount");
    let sell = number_at(trade, "/Trade/Sell/Amount");
    match (buy, sell) {
        (Some(b), Some(s)) => Some(b.max(s)),
        (b, s) => b.or(s),
    }
}

pub(super) static SCHEMA: RecordSchema = RecordSchema {
    usd: &[buy_usd, sell_usd, larger_raw_amount],
    hash: "/Transaction/Hash",
    time: "/Block/Time",
};

/// POST the DEXTrades query. Failures map to 502, including GraphQL `errors` on HTTP 200.
pub(super) async fn fetch(
    client: &Client,
    cfg: &Config,
    chain: &Chain,
    address: &str,
) -> Result<Vec<Value>, ApiError> {
    let key = cfg.bitquery_api_key.require("BITQUERY_API_KEY")?;

    let payload = json!({
        "query": DEX_TRADES_QUERY,
        "variables": { "network": chain.bitquery_network, "address": address },
    });

    info!("📡 Bitquery DEXTrades → network {} address {}", chain.bitquery_network, address);

    let resp = client
        .post(&cfg.bitquery_url)
        .bearer_auth(key)
        .json(&payload)
        .send()
        .await?;

    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        warn!("Bitquery returned HTTP {} for {}", status, address);
        return Err(ApiError::Upstream {
            provider: "Bitquery",
            status: StatusCode::BAD_GATEWAY,
            body: text,
        });
    }

    let json: Value = serde_json::from_str(&text)?;
    trades(json)
}

fn trades(mut json: Value) -> Result<Vec<Value>, ApiError> {
    if let Some(errors) = json.get("errors").filter(|e| has_errors(e)) {
        warn!("Bitquery GraphQL errors: {}", errors);
        return Err(ApiError::GraphQl(errors.to_string()));
    }

    match json.pointer_mut("/data/EVM/DEXTrades").map(Value::take) {
        Some(Value::Array(trades)) => Ok(trades),
        _ => Ok(Vec::new()),
    }
}

fn has_errors(errors: &Value) -> bool {
    match errors {
        Value::Null => false,
        Value::Array(list) => !list.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usd::derive_usd;

    #[test]
    fn graphql_errors_fail_even_with_data() {
        let body = json!({
            "data": { "EVM": { "DEXTrades": [] } },
            "errors": [{ "message": "network not supported" }]
        });

        match trades(body) {
            Err(ApiError::GraphQl(details)) => assert!(details.contains("network not supported")),
            other => panic!("expected GraphQL error, got {:?}", other),
        }
    }

    #[test]
    fn empty_errors_list_is_not_a_failure() {
        let body = json!({ "errors": [], "data": { "EVM": { "DEXTrades": [{}] } } });
        assert_eq!(trades(body).unwrap().len(), 1);
    }

    #[test]
    fn missing_trade_list_is_empty() {
        assert!(trades(json!({ "data": { "EVM": null } })).unwrap().is_empty());
    }

    #[test]
    fn extractor_priority() {
        let both = json!({ "Trade": { "Buy": { "AmountInUSD": "10.5" }, "Sell": { "AmountInUSD": "11" } } });
        let sell_only = json!({ "Trade": { "Buy": { "AmountInUSD": null }, "Sell": { "AmountInUSD": "11" } } });
        let raw_only = json!({ "Trade": { "Buy": { "Amount": "3" }, "Sell": { "Amount": "7.5" } } });
        let nothing = json!({ "Trade": {} });

        assert_eq!(derive_usd(&both, SCHEMA.usd), Some(10.5));
        assert_eq!(derive_usd(&sell_only, SCHEMA.usd), Some(11.0));
        assert_eq!(derive_usd(&raw_only, SCHEMA.usd), Some(7.5));
        assert_eq!(derive_usd(&nothing, SCHEMA.usd), None);
    }
}
