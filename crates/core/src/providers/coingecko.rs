use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::traits::MarketDataProvider;
use crate::errors::CoreError;
use crate::models::coin::{CanonicalCoin, CoinDetail};
use crate::models::currency::CurrencySelection;
use crate::models::icon::icon_candidates;
use crate::models::series::{HistoricalSeries, SeriesPoint};

const BASE_URL: &str = "https://api.coingecko.com/api/v3";
const API_KEY_HEADER: &str = "x-cg-pro-api-key";

/// CoinGecko API provider.
///
/// - **Quotes**: per-currency — `vs_currency` is honored on every endpoint.
/// - **Endpoints**: `/coins/markets`, `/coins/{id}`,
///   `/coins/{id}/market_chart`. Real time-series data, nothing synthesized.
/// - **API key**: optional; sent as the `x-cg-pro-api-key` header when set.
pub struct CoinGeckoProvider {
    client: Client,
    api_key: Option<String>,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_api_key(None)
    }

    pub fn with_api_key(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let req = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.api_key {
            Some(key) => req.header(API_KEY_HEADER, key),
            None => req,
        }
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinGecko API response types ────────────────────────────────────

/// One record from `/coins/markets`. Numerics are JSON numbers; `null`s
/// degrade to `NaN` in the canonical record.
#[derive(Debug, Deserialize)]
pub struct MarketRecord {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

impl From<MarketRecord> for CanonicalCoin {
    fn from(r: MarketRecord) -> Self {
        let icon_url = r
            .image
            .unwrap_or_else(|| icon_candidates(&r.id, &r.symbol).swap_remove(0));
        Self {
            price_usd: r.current_price.unwrap_or(f64::NAN),
            market_cap_usd: r.market_cap.unwrap_or(f64::NAN),
            rank: r.market_cap_rank,
            percent_change_24h: r.price_change_percentage_24h.unwrap_or(f64::NAN),
            icon_url,
            id: r.id,
            name: r.name,
            symbol: r.symbol,
        }
    }
}

/// `/coins/{id}` detail payload, nested per-currency maps included.
#[derive(Debug, Deserialize)]
pub struct DetailResponse {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<DetailImage>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    pub market_data: MarketData,
}

#[derive(Debug, Deserialize)]
pub struct DetailImage {
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MarketData {
    #[serde(default)]
    pub current_price: HashMap<String, f64>,
    #[serde(default)]
    pub market_cap: HashMap<String, f64>,
    #[serde(default)]
    pub high_24h: HashMap<String, f64>,
    #[serde(default)]
    pub low_24h: HashMap<String, f64>,
    #[serde(default)]
    pub total_volume: HashMap<String, f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_7d: Option<f64>,
    #[serde(default)]
    pub circulating_supply: Option<f64>,
}

impl DetailResponse {
    /// Flatten the nested per-currency maps for one currency code. A code
    /// absent from a map degrades that field to `NaN` (or `None` for the
    /// optional high/low), consistent with the list normalization.
    pub fn into_detail(self, code: &str) -> CoinDetail {
        let md = &self.market_data;
        let pick = |map: &HashMap<String, f64>, field: &'static str| -> f64 {
            match map.get(code) {
                Some(v) => *v,
                None => {
                    tracing::warn!(field, code, "currency missing from detail map; propagating NaN");
                    f64::NAN
                }
            }
        };

        let price_usd = pick(&md.current_price, "current_price");
        let market_cap_usd = pick(&md.market_cap, "market_cap");
        let high_24h = md.high_24h.get(code).copied();
        let low_24h = md.low_24h.get(code).copied();
        let volume_24h = md.total_volume.get(code).copied().unwrap_or(f64::NAN);
        let percent_change_24h = md.price_change_percentage_24h.unwrap_or(f64::NAN);
        let percent_change_7d = md.price_change_percentage_7d;
        let circulating_supply = md.circulating_supply.unwrap_or(f64::NAN);

        let icon_url = self
            .image
            .and_then(|i| i.large.or(i.small))
            .unwrap_or_else(|| icon_candidates(&self.id, &self.symbol).swap_remove(0));

        CoinDetail {
            id: self.id,
            name: self.name,
            symbol: self.symbol,
            icon_url,
            price_usd,
            market_cap_usd,
            rank: self.market_cap_rank,
            percent_change_24h,
            circulating_supply,
            volume_24h,
            percent_change_7d,
            high_24h,
            low_24h,
        }
    }
}

/// `/coins/{id}/market_chart` payload: `[timestamp_ms, value]` pairs.
#[derive(Debug, Deserialize)]
pub struct MarketChartResponse {
    pub prices: Vec<(f64, f64)>,
    #[serde(default)]
    pub market_caps: Vec<(f64, f64)>,
    #[serde(default)]
    pub total_volumes: Vec<(f64, f64)>,
}

fn to_points(pairs: Vec<(f64, f64)>) -> Vec<SeriesPoint> {
    pairs
        .into_iter()
        .map(|(ts, value)| SeriesPoint {
            timestamp_ms: ts as i64,
            value,
        })
        .collect()
}

impl From<MarketChartResponse> for HistoricalSeries {
    fn from(r: MarketChartResponse) -> Self {
        Self {
            prices: to_points(r.prices),
            market_caps: to_points(r.market_caps),
            total_volumes: to_points(r.total_volumes),
        }
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "CoinGecko"
    }

    fn supports_currency(&self) -> bool {
        true
    }

    fn supports_history(&self) -> bool {
        true
    }

    async fn fetch_coins(
        &self,
        currency: &CurrencySelection,
    ) -> Result<Vec<CanonicalCoin>, CoreError> {
        let url = format!(
            "{BASE_URL}/coins/markets?vs_currency={}&order=market_cap_desc&per_page=100&page=1&sparkline=false",
            currency.code
        );

        let records: Vec<MarketRecord> = self
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::MalformedPayload(format!("CoinGecko markets: {e}")))?;

        Ok(records.into_iter().map(CanonicalCoin::from).collect())
    }

    async fn fetch_detail(
        &self,
        coin_id: &str,
        currency: &CurrencySelection,
    ) -> Result<CoinDetail, CoreError> {
        let url = format!("{BASE_URL}/coins/{coin_id}");

        let resp = self.get(&url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CoreError::CoinNotFound(coin_id.to_string()));
        }
        let detail: DetailResponse = resp
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::MalformedPayload(format!("CoinGecko coin {coin_id}: {e}")))?;

        Ok(detail.into_detail(&currency.code))
    }

    async fn fetch_history(
        &self,
        coin_id: &str,
        currency: &CurrencySelection,
        days: u32,
    ) -> Result<HistoricalSeries, CoreError> {
        let url = format!(
            "{BASE_URL}/coins/{coin_id}/market_chart?vs_currency={}&days={days}&interval=daily",
            currency.code
        );

        let chart: MarketChartResponse = self
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| {
                CoreError::MalformedPayload(format!("CoinGecko market_chart {coin_id}: {e}"))
            })?;

        Ok(HistoricalSeries::from(chart))
    }
}
