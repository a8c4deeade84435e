use serde::Deserialize;

/// Contract metadata from `GET /contracts/{address}`. Fetched once per
/// aggregation; `creation_timestamp` stands in for the first-activity date.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractMeta {
    pub address: String,
    pub creation_timestamp: i64,
    #[serde(default)]
    pub is_account: Option<bool>,
    #[serde(default)]
    pub class_hash: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// One transaction row from the explorer's paged feed. Read-only; fields the
/// upstream omits arrive as `None`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxRecord {
    pub hash: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(rename = "type")]
    pub tx_type: String,
    #[serde(default)]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub sender_address: Option<String>,
    #[serde(default)]
    pub actual_fee: Option<String>,
}

/// One page of the transaction feed. `last_page` is the upstream's own claim
/// of how many pages exist and may change between fetches.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxPage {
    #[serde(default)]
    pub last_page: u32,
    #[serde(default)]
    pub items: Vec<TxRecord>,
}
