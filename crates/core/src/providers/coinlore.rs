use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::traits::MarketDataProvider;
use crate::errors::CoreError;
use crate::models::coin::{CanonicalCoin, CoinDetail};
use crate::models::currency::CurrencySelection;
use crate::models::icon::icon_candidates;

const BASE_URL: &str = "https://api.coinlore.net/api";

/// CoinLore API provider.
///
/// - **Free**: No API key required.
/// - **Quotes**: USD only — the `vs` currency is ignored; display conversion
///   uses the static FX table.
/// - **Endpoints**: `/tickers/`, `/ticker/?id={id}`. No time-series endpoint,
///   so detail charts are synthesized.
///
/// Numeric fields arrive as strings. Invalid or missing numeric strings
/// become `NaN` (never 0) after a warning at the parse boundary — downstream
/// consumers rely on that propagation.
pub struct CoinLoreProvider {
    client: Client,
}

impl CoinLoreProvider {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for CoinLoreProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinLore API response types ─────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TickersResponse {
    pub data: Vec<TickerRecord>,
}

/// One raw ticker record. Numeric amounts are string-typed upstream except
/// `rank` and `volume24`.
#[derive(Debug, Deserialize)]
pub struct TickerRecord {
    pub id: String,
    pub symbol: String,
    pub name: String,
    /// Lowercase slug (e.g., "bitcoin"), used for icon URLs.
    #[serde(default)]
    pub nameid: Option<String>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub percent_change_24h: Option<String>,
    #[serde(default)]
    pub percent_change_7d: Option<String>,
    #[serde(default)]
    pub market_cap_usd: Option<String>,
    #[serde(default, rename = "volume24")]
    pub volume_24h: Option<f64>,
    #[serde(default)]
    pub csupply: Option<String>,
}

/// Parse a string-typed numeric field, propagating `NaN` on absence or
/// garbage. The warning makes the degradation distinguishable in logs even
/// though the value itself stays a plain `NaN`.
fn parse_decimal(field: &'static str, raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        tracing::warn!(field, "numeric field missing; propagating NaN");
        return f64::NAN;
    };
    match raw.trim().parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(field, raw, "numeric field unparseable; propagating NaN");
            f64::NAN
        }
    }
}

impl From<TickerRecord> for CanonicalCoin {
    fn from(r: TickerRecord) -> Self {
        let slug = r.nameid.as_deref().unwrap_or(&r.id);
        let icon_url = icon_candidates(slug, &r.symbol).swap_remove(0);
        Self {
            price_usd: parse_decimal("price_usd", r.price_usd.as_deref()),
            market_cap_usd: parse_decimal("market_cap_usd", r.market_cap_usd.as_deref()),
            percent_change_24h: parse_decimal(
                "percent_change_24h",
                r.percent_change_24h.as_deref(),
            ),
            rank: r.rank,
            icon_url,
            id: r.id,
            name: r.name,
            symbol: r.symbol,
        }
    }
}

impl From<TickerRecord> for CoinDetail {
    fn from(r: TickerRecord) -> Self {
        let circulating_supply = parse_decimal("csupply", r.csupply.as_deref());
        let volume_24h = match r.volume_24h {
            Some(v) => v,
            None => {
                tracing::warn!("volume24 missing; propagating NaN");
                f64::NAN
            }
        };
        let percent_change_7d = r
            .percent_change_7d
            .as_deref()
            .map(|raw| parse_decimal("percent_change_7d", Some(raw)));

        let coin = CanonicalCoin::from(r);
        Self {
            id: coin.id,
            name: coin.name,
            symbol: coin.symbol,
            icon_url: coin.icon_url,
            price_usd: coin.price_usd,
            market_cap_usd: coin.market_cap_usd,
            rank: coin.rank,
            percent_change_24h: coin.percent_change_24h,
            circulating_supply,
            volume_24h,
            percent_change_7d,
            // CoinLore has no intraday high/low
            high_24h: None,
            low_24h: None,
        }
    }
}

#[async_trait]
impl MarketDataProvider for CoinLoreProvider {
    fn name(&self) -> &str {
        "CoinLore"
    }

    async fn fetch_coins(
        &self,
        _currency: &CurrencySelection,
    ) -> Result<Vec<CanonicalCoin>, CoreError> {
        let url = format!("{BASE_URL}/tickers/");

        let resp: TickersResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::MalformedPayload(format!("CoinLore tickers: {e}")))?;

        Ok(resp.data.into_iter().map(CanonicalCoin::from).collect())
    }

    async fn fetch_detail(
        &self,
        coin_id: &str,
        _currency: &CurrencySelection,
    ) -> Result<CoinDetail, CoreError> {
        let url = format!("{BASE_URL}/ticker/?id={coin_id}");

        let records: Vec<TickerRecord> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::MalformedPayload(format!("CoinLore ticker {coin_id}: {e}")))?;

        let record = records
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::CoinNotFound(coin_id.to_string()))?;

        Ok(CoinDetail::from(record))
    }
}
