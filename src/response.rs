use serde::Serialize;

use crate::aggregate::{account_age_days, YearSummary};
use crate::models::ContractMeta;

/// The envelope returned by `GET /api/wrapped`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedResponse {
    pub address: String,
    pub voyager: VoyagerSection,
    pub act1: Act1,
    /// Reserved for the staking act; serialized as null until it exists.
    pub act2: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoyagerSection {
    pub sampled_txns: usize,
    pub partial: bool,
    pub contract: ContractSection,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSection {
    pub creation_timestamp: i64,
    pub is_account: Option<bool>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Act1 {
    pub account_age: u64,
    pub first_tx_date: String,
    pub total_transactions: usize,
    pub most_active_month: String,
    pub unique_contracts: usize,
    // Not yet computed: deriving these needs fee breakdowns and token pricing
    // endpoints. Explicit nulls until those data sources land.
    #[serde(rename = "gasSavedUSD")]
    pub gas_saved_usd: Option<f64>,
    #[serde(rename = "gasSavedETH")]
    pub gas_saved_eth: Option<f64>,
    pub total_value_transacted: Option<f64>,
    pub badges: Option<serde_json::Value>,
}

pub fn build_response(
    address: &str,
    contract: &ContractMeta,
    summary: &YearSummary,
    now: i64,
) -> WrappedResponse {
    WrappedResponse {
        address: address.to_string(),
        voyager: VoyagerSection {
            sampled_txns: summary.sampled,
            partial: summary.partial,
            contract: ContractSection {
                creation_timestamp: contract.creation_timestamp,
                is_account: contract.is_account,
                version: contract.version.clone(),
            },
        },
        act1: Act1 {
            account_age: account_age_days(now, contract.creation_timestamp),
            first_tx_date: iso_date(contract.creation_timestamp),
            total_transactions: summary.in_year.len(),
            most_active_month: summary.most_active_month(),
            unique_contracts: summary.unique_contracts.len(),
            gas_saved_usd: None,
            gas_saved_eth: None,
            total_value_transacted: None,
            badges: None,
        },
        act2: None,
    }
}

/// `YYYY-MM-DD` in UTC for a unix-seconds timestamp.
pub fn iso_date(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> ContractMeta {
        ContractMeta {
            address: "0xabcdef0123".to_string(),
            creation_timestamp: 1_650_000_000, // 2022-04-15
            is_account: Some(true),
            class_hash: None,
            version: Some("0.1.0".to_string()),
        }
    }

    #[test]
    fn envelope_uses_wire_field_names_and_null_placeholders() {
        let summary = YearSummary {
            sampled: 3,
            months: vec![("Mar".to_string(), 2)],
            ..Default::default()
        };
        let now = 1_650_000_000 + 10 * 86_400;

        let body =
            serde_json::to_value(build_response("0xabcdef0123", &meta(), &summary, now)).unwrap();

        assert_eq!(body["voyager"]["sampledTxns"], 3);
        assert_eq!(body["voyager"]["partial"], false);
        assert_eq!(body["voyager"]["contract"]["creationTimestamp"], 1_650_000_000);
        assert_eq!(body["act1"]["accountAge"], 10);
        assert_eq!(body["act1"]["firstTxDate"], "2022-04-15");
        assert_eq!(body["act1"]["mostActiveMonth"], "Mar");
        assert!(body["act1"]["gasSavedUSD"].is_null());
        assert!(body["act1"]["gasSavedETH"].is_null());
        assert!(body["act1"]["totalValueTransacted"].is_null());
        assert!(body["act1"]["badges"].is_null());
        assert!(body["act2"].is_null());
    }

    #[test]
    fn iso_date_formats_utc() {
        assert_eq!(iso_date(1_650_000_000), "2022-04-15");
        assert_eq!(iso_date(0), "1970-01-01");
    }
}
