use std::collections::HashSet;

use crate::models::{ContractMeta, TxRecord};
use crate::voyager::{Explorer, UpstreamError};

pub const PAGE_SIZE: u32 = 100;
/// Bounds worst-case latency and upstream load per request; hitting it marks
/// the result partial.
pub const HARD_PAGE_CAP: u32 = 40;

/// 2024-01-01T00:00:00Z and 2025-01-01T00:00:00Z, unix seconds.
pub const YEAR_START: i64 = 1_704_067_200;
pub const YEAR_END: i64 = 1_735_689_600;

/// Placeholder month when the address had no in-year activity.
pub const NO_ACTIVITY_MONTH: &str = "—";

/// Everything the year scan accumulates for one address. Lives for one
/// request; nothing is shared across requests.
#[derive(Debug, Default)]
pub struct YearSummary {
    /// Transactions whose timestamp falls inside the 2024 window, in feed
    /// order (newest first).
    pub in_year: Vec<TxRecord>,
    /// Counterpart contract addresses seen anywhere in the sampled feed, not
    /// just in-year.
    pub unique_contracts: HashSet<String>,
    /// Month abbreviation to count, in first-seen order. Twelve entries at
    /// most, so a Vec keeps the tie-break order explicit.
    pub months: Vec<(String, u32)>,
    /// Total items inspected across all fetched pages.
    pub sampled: usize,
    /// True when the page cap cut the scan short while the upstream still
    /// reported more pages; counts are then a lower bound.
    pub partial: bool,
}

impl YearSummary {
    /// Highest month count wins; ties go to the month seen first.
    pub fn most_active_month(&self) -> String {
        let mut best: Option<(&str, u32)> = None;
        for (month, count) in &self.months {
            match best {
                Some((_, top)) if *count <= top => {}
                _ => best = Some((month, *count)),
            }
        }
        best.map(|(month, _)| month.to_string())
            .unwrap_or_else(|| NO_ACTIVITY_MONTH.to_string())
    }

    fn bump_month(&mut self, label: String) {
        if let Some(entry) = self.months.iter_mut().find(|(m, _)| *m == label) {
            entry.1 += 1;
        } else {
            self.months.push((label, 1));
        }
    }
}

/// Pages through the address's transaction feed and builds its 2024 summary.
///
/// Fetches are strictly sequential: the early-stop rule needs the previous
/// page's minimum timestamp before deciding whether the next fetch is worth
/// issuing. Any upstream failure aborts the whole scan; accumulated partial
/// progress is discarded rather than returned as a half-built summary.
pub async fn aggregate_year<E: Explorer + ?Sized>(
    explorer: &E,
    address: &str,
) -> Result<(ContractMeta, YearSummary), UpstreamError> {
    aggregate_year_with(explorer, address, PAGE_SIZE, HARD_PAGE_CAP).await
}

pub async fn aggregate_year_with<E: Explorer + ?Sized>(
    explorer: &E,
    address: &str,
    page_size: u32,
    page_cap: u32,
) -> Result<(ContractMeta, YearSummary), UpstreamError> {
    // Creation timestamp seeds the account-age and first-tx-date statistics.
    // It is a metadata-derived approximation, not a guaranteed first tx.
    let contract = explorer.contract(address).await?;

    let mut summary = YearSummary::default();
    let mut page = 1u32;
    let mut last_page = 1u32;
    let mut oldest_seen: Option<i64> = None;

    while page <= last_page && page <= page_cap {
        let fetched = explorer.transactions(address, page, page_size).await?;
        last_page = fetched.last_page.max(1);

        if fetched.items.is_empty() {
            break;
        }

        summary.sampled += fetched.items.len();

        let mut page_min: Option<i64> = None;
        let mut page_max: Option<i64> = None;
        for tx in fetched.items {
            let Some(ts) = tx.timestamp else { continue };
            page_min = Some(page_min.map_or(ts, |m| m.min(ts)));
            page_max = Some(page_max.map_or(ts, |m| m.max(ts)));

            if let Some(counterpart) = tx.contract_address.as_deref().filter(|c| !c.is_empty()) {
                summary.unique_contracts.insert(counterpart.to_string());
            }

            if (YEAR_START..YEAR_END).contains(&ts) {
                if let Some(label) = month_short(ts) {
                    summary.bump_month(label);
                }
                summary.in_year.push(tx);
            }
        }

        // The feed is assumed newest-first. If a page holds something newer
        // than an earlier page's oldest item, that assumption broke and the
        // early stop below may have undercounted.
        if let (Some(oldest), Some(max)) = (oldest_seen, page_max) {
            if max > oldest {
                tracing::warn!(
                    page,
                    "transaction feed is not newest-first; 2024 totals may be a lower bound"
                );
            }
        }

        if let Some(min) = page_min {
            // Newest-first: once a page's oldest item predates the window,
            // every later page is entirely out of range.
            if min < YEAR_START {
                break;
            }
            oldest_seen = Some(oldest_seen.map_or(min, |o| o.min(min)));
        }

        page += 1;
    }

    if page > page_cap && last_page > page_cap {
        summary.partial = true;
    }

    Ok((contract, summary))
}

/// Whole days since creation, rounded, clamped at zero for clock skew.
pub fn account_age_days(now: i64, creation_ts: i64) -> u64 {
    let days = (now - creation_ts) as f64 / 86_400.0;
    days.round().max(0.0) as u64
}

fn month_short(ts: i64) -> Option<String> {
    chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.format("%b").to_string())
}
