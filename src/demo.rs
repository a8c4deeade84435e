use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::response::iso_date;

/// Placeholder payload for when no real data is wanted or available. The
/// `demo` marker is always true so synthetic numbers are never mistaken for
/// explorer data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoWrapped {
    pub demo: bool,
    pub address: String,
    pub act1: DemoAct1,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoAct1 {
    pub account_age: u64,
    pub first_tx_date: String,
    pub total_transactions: u64,
    pub most_active_month: String,
    pub unique_contracts: u64,
    #[serde(rename = "gasSavedUSD")]
    pub gas_saved_usd: u64,
    #[serde(rename = "gasSavedETH")]
    pub gas_saved_eth: f64,
    pub total_value_transacted: u64,
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Builds stable fake statistics for an address. Seeded from the address
/// alone, so repeat calls for the same address produce identical numbers.
pub fn make_demo(address: &str, now: i64) -> DemoWrapped {
    let mut rng = StdRng::seed_from_u64(seed_from_address(address));

    let account_age = rng.gen_range(410..=520u64);
    let total_transactions = rng.gen_range(1200..=5200);
    let gas_saved_usd = rng.gen_range(520..=2100);
    let gas_saved_eth = (rng.gen_range(0.15..0.9f64) * 1000.0).round() / 1000.0;
    let most_active_month = MONTHS[rng.gen_range(0..MONTHS.len())].to_string();
    let total_value_transacted = rng.gen_range(2500..=95_000);
    let unique_contracts = rng.gen_range(60..=420);

    DemoWrapped {
        demo: true,
        address: address.to_string(),
        act1: DemoAct1 {
            account_age,
            first_tx_date: iso_date(now - account_age as i64 * 86_400),
            total_transactions,
            most_active_month,
            unique_contracts,
            gas_saved_usd,
            gas_saved_eth,
            total_value_transacted,
        },
    }
}

/// FNV-1a over the lowercased address, the same scheme the UI used to keep
/// repeat visits stable.
fn seed_from_address(address: &str) -> u64 {
    let mut h: u32 = 2_166_136_261;
    for b in address.to_lowercase().bytes() {
        h ^= u32::from(b);
        h = h.wrapping_mul(16_777_619);
    }
    u64::from(h)
}
