use serde::{Deserialize, Serialize};

/// Normalized per-coin record used by the list view.
///
/// Produced from one upstream record, immutable once created, and replaced
/// wholesale on every refresh — there is no incremental merge.
///
/// The `*_usd` fields carry the upstream quote: a USD-only source always
/// quotes USD regardless of the active currency; a currency-aware source
/// quotes the active currency under the same field names. The naming is kept
/// for compatibility with the upstream list contract.
///
/// Numeric fields may be `NaN` when the upstream sent an invalid or missing
/// numeric string. `NaN` is deliberate — it is never coerced to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalCoin {
    /// Upstream identifier, opaque (e.g., "90" or "bitcoin").
    pub id: String,

    /// Human-readable name (e.g., "Bitcoin").
    pub name: String,

    /// Ticker symbol as sent by the upstream (e.g., "BTC").
    pub symbol: String,

    /// Best-effort icon URL; the first entry of the fallback chain when the
    /// upstream supplies no image of its own.
    pub icon_url: String,

    pub price_usd: f64,
    pub market_cap_usd: f64,

    /// Market-cap rank; absent for unranked assets.
    pub rank: Option<u32>,

    pub percent_change_24h: f64,
}

/// Normalized per-coin record used by the detail view.
/// Superset of [`CanonicalCoin`]'s fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub icon_url: String,
    pub price_usd: f64,
    pub market_cap_usd: f64,
    pub rank: Option<u32>,
    pub percent_change_24h: f64,

    pub circulating_supply: f64,
    pub volume_24h: f64,

    /// 7-day percent change; not every upstream reports it.
    pub percent_change_7d: Option<f64>,

    /// 24-hour high/low in the quote currency. Only currency-aware upstreams
    /// supply these.
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
}
