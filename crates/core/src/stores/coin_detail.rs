use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::watch;

use crate::errors::CoreError;
use crate::models::coin::CoinDetail;
use crate::models::currency::{usd_rate, CurrencySelection};
use crate::models::series::{HistoricalSeries, SERIES_DAYS};
use crate::providers::traits::MarketDataProvider;

/// Everything the detail page renders. `series` is only `Some` when it is
/// renderable; `error` is a human-readable message for the retry view.
#[derive(Debug, Clone, Default)]
pub struct DetailState {
    pub detail: Option<CoinDetail>,
    pub series: Option<HistoricalSeries>,
    pub loading: bool,
    pub error: Option<String>,
}

/// View-model for a single coin's detail page.
///
/// Each `load` discards prior detail/series/error before starting and keeps
/// `loading` set until it resolves either way. Loads are generation-guarded:
/// when the coin or currency changes mid-flight, the superseded load's result
/// is discarded rather than overwriting the newer one.
pub struct CoinDetailView {
    provider: Arc<dyn MarketDataProvider>,
    currency: watch::Receiver<CurrencySelection>,
    coin_id: Mutex<String>,
    state: Mutex<DetailState>,
    generation: AtomicU64,
}

impl CoinDetailView {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        currency: watch::Receiver<CurrencySelection>,
        coin_id: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            currency,
            coin_id: Mutex::new(coin_id.into()),
            state: Mutex::new(DetailState::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn coin_id(&self) -> String {
        self.coin_id
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Cloned snapshot of the current view state.
    pub fn state(&self) -> DetailState {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Re-key the view to another coin and reload.
    pub async fn set_coin(&self, coin_id: impl Into<String>) {
        *self.coin_id.lock().unwrap_or_else(|e| e.into_inner()) = coin_id.into();
        self.load().await;
    }

    /// Fetch detail and series for the current coin. Never fails to the
    /// caller: failures land in `DetailState.error`.
    pub async fn load(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let coin_id = self.coin_id();
        let currency = self.currency.borrow().clone();

        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = DetailState {
            loading: true,
            ..DetailState::default()
        };

        let outcome = self.fetch(&coin_id, &currency).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(coin = %coin_id, generation, "discarding stale detail load");
            return;
        }

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.loading = false;
        match outcome {
            Ok((detail, series)) => {
                state.detail = Some(detail);
                state.series = Some(series);
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    coin = %coin_id,
                    error = %e,
                    "coin detail load failed"
                );
                state.error = Some(e.to_string());
            }
        }
    }

    async fn fetch(
        &self,
        coin_id: &str,
        currency: &CurrencySelection,
    ) -> Result<(CoinDetail, HistoricalSeries), CoreError> {
        let detail = self.provider.fetch_detail(coin_id, currency).await?;

        let series = if self.provider.supports_history() {
            self.provider
                .fetch_history(coin_id, currency, SERIES_DAYS as u32)
                .await?
        } else {
            HistoricalSeries::synthesize(&detail, Utc::now(), &mut rand::thread_rng())
        };

        Ok((detail, series))
    }

    /// Drive the view: reload on every currency change, until the currency
    /// sender is dropped. The initial load is the caller's `load()`.
    pub async fn run(&self) {
        let mut currency = self.currency.clone();
        while currency.changed().await.is_ok() {
            self.load().await;
        }
    }

    /// Headline price in the active currency.
    ///
    /// A currency-aware provider already quoted the detail in the active
    /// currency. A USD-only provider gets the static FX multiplier applied
    /// here, at display time only — the historical series stays
    /// USD-denominated (known inconsistency, preserved).
    pub fn display_price(&self) -> Option<f64> {
        let price = self
            .state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .detail
            .as_ref()?
            .price_usd;
        if self.provider.supports_currency() {
            return Some(price);
        }
        let code = self.currency.borrow().code.clone();
        Some(price * usd_rate(&code))
    }
}
