use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;

use crate::models::coin::CanonicalCoin;
use crate::models::currency::CurrencySelection;
use crate::providers::traits::MarketDataProvider;

/// Fixed, unconditional pause before every list fetch. A rate-limit hedge,
/// not a retry or a response to any observed failure.
pub const REFRESH_PAUSE: Duration = Duration::from_millis(100);

/// Tagged state of the coin list.
///
/// `Loaded` is never empty — a successful fetch of zero records is `Empty`,
/// so the three cases are mutually exclusive and callers must handle each.
#[derive(Debug, Clone, PartialEq)]
pub enum CoinList {
    Loaded(Vec<CanonicalCoin>),
    Empty,
    Failed(String),
}

impl CoinList {
    /// The rows to render; empty for `Empty` and `Failed`. Consumers that
    /// only want rows get the legacy "nothing to show" degradation.
    pub fn coins(&self) -> &[CanonicalCoin] {
        match self {
            CoinList::Loaded(coins) => coins,
            CoinList::Empty | CoinList::Failed(_) => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CoinList::Failed(_))
    }
}

/// Fetches and republishes the full tradable-asset list.
///
/// State lives in a single cell written only by this store's fetch
/// continuations. Overlapping refreshes are allowed; a refresh generation
/// counter discards late stale completions instead of letting them overwrite
/// a newer result.
pub struct CoinListStore {
    provider: Arc<dyn MarketDataProvider>,
    currency: watch::Receiver<CurrencySelection>,
    state: Mutex<CoinList>,
    generation: AtomicU64,
}

impl CoinListStore {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        currency: watch::Receiver<CurrencySelection>,
    ) -> Self {
        Self {
            provider,
            currency,
            state: Mutex::new(CoinList::Empty),
            generation: AtomicU64::new(0),
        }
    }

    /// Cloned snapshot of the current list state.
    pub fn state(&self) -> CoinList {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Re-fetch the list. Never fails to the caller: every error is logged
    /// and published as `CoinList::Failed`. Ordering of a successful fetch is
    /// the upstream's (descending market cap) — no re-sort here.
    pub async fn refresh(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::time::sleep(REFRESH_PAUSE).await;

        let currency = self.currency.borrow().clone();
        let next = match self.provider.fetch_coins(&currency).await {
            Ok(coins) if coins.is_empty() => CoinList::Empty,
            Ok(coins) => CoinList::Loaded(coins),
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    currency = %currency.code,
                    error = %e,
                    "coin list refresh failed"
                );
                CoinList::Failed(e.to_string())
            }
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "discarding stale coin list refresh");
            return;
        }
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }

    /// Drive the store: one refresh on activation, then another on every
    /// currency change, until the currency sender is dropped.
    pub async fn run(&self) {
        let mut currency = self.currency.clone();
        self.refresh().await;
        while currency.changed().await.is_ok() {
            self.refresh().await;
        }
    }
}
