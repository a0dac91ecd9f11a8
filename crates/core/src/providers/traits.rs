use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::coin::{CanonicalCoin, CoinDetail};
use crate::models::currency::CurrencySelection;
use crate::models::series::HistoricalSeries;

/// Trait abstraction for market data upstreams.
///
/// Each API (CoinLore, CoinGecko) implements this trait. If an API stops
/// working or changes shape, we replace only that one implementation — the
/// stores are untouched.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this upstream (for logs/errors).
    fn name(&self) -> &str;

    /// Whether list/detail prices are quoted in the requested currency.
    /// When `false`, every quote is USD and the static FX table applies at
    /// display time only.
    fn supports_currency(&self) -> bool {
        false
    }

    /// Whether the upstream has a true time-series endpoint. When `false`,
    /// the detail view synthesizes an approximate series instead.
    fn supports_history(&self) -> bool {
        false
    }

    /// Fetch the full tradable-asset list, normalized, in upstream order.
    async fn fetch_coins(
        &self,
        currency: &CurrencySelection,
    ) -> Result<Vec<CanonicalCoin>, CoreError>;

    /// Fetch single-asset detail by upstream identifier.
    async fn fetch_detail(
        &self,
        coin_id: &str,
        currency: &CurrencySelection,
    ) -> Result<CoinDetail, CoreError>;

    /// Fetch a daily price series covering the last `days` days.
    async fn fetch_history(
        &self,
        coin_id: &str,
        currency: &CurrencySelection,
        days: u32,
    ) -> Result<HistoricalSeries, CoreError> {
        let _ = (coin_id, currency, days);
        Err(CoreError::HistoryUnsupported(self.name().to_string()))
    }
}
