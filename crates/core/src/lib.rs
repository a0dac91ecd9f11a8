pub mod errors;
pub mod models;
pub mod providers;
pub mod stores;

use std::sync::Arc;

use tokio::sync::watch;

use models::currency::CurrencySelection;
use providers::coingecko::CoinGeckoProvider;
use providers::coinlore::CoinLoreProvider;
use providers::traits::MarketDataProvider;
use stores::coin_detail::CoinDetailView;
use stores::coin_list::CoinListStore;
use stores::currency::CurrencyStore;

/// Main entry point for the Coin Watch core library.
///
/// Wires one market data provider to the shared stores the frontend
/// consumes: the currency selection, the coin list, and per-coin detail
/// views. The frontend spawns `coin_list().run()` (and each view's `run()`)
/// on its event loop so currency changes propagate; everything else is
/// plain method calls against snapshots.
#[must_use]
pub struct CoinWatch {
    provider: Arc<dyn MarketDataProvider>,
    currency: CurrencyStore,
    coins: Arc<CoinListStore>,
}

impl std::fmt::Debug for CoinWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinWatch")
            .field("provider", &self.provider.name())
            .field("currency", &self.currency.current())
            .finish()
    }
}

impl CoinWatch {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        let currency = CurrencyStore::default();
        let coins = Arc::new(CoinListStore::new(
            Arc::clone(&provider),
            currency.subscribe(),
        ));
        Self {
            provider,
            currency,
            coins,
        }
    }

    /// Track prices via CoinLore (USD-only quotes, synthesized charts).
    pub fn with_coinlore() -> Self {
        Self::new(Arc::new(CoinLoreProvider::new()))
    }

    /// Track prices via CoinGecko (per-currency quotes, real charts).
    pub fn with_coingecko(api_key: Option<String>) -> Self {
        Self::new(Arc::new(CoinGeckoProvider::with_api_key(api_key)))
    }

    // ── Currency ────────────────────────────────────────────────────

    /// The active display currency.
    pub fn currency(&self) -> CurrencySelection {
        self.currency.current()
    }

    /// Change the display currency. Dependent stores re-fetch; there is no
    /// validation of the code here.
    pub fn set_currency(&self, selection: CurrencySelection) {
        self.currency.set(selection);
    }

    /// Read handle for components that react to currency changes.
    pub fn subscribe_currency(&self) -> watch::Receiver<CurrencySelection> {
        self.currency.subscribe()
    }

    // ── Stores ──────────────────────────────────────────────────────

    /// The shared coin list store.
    pub fn coin_list(&self) -> Arc<CoinListStore> {
        Arc::clone(&self.coins)
    }

    /// A fresh detail view-model keyed to `coin_id` (from the router).
    pub fn detail_view(&self, coin_id: impl Into<String>) -> CoinDetailView {
        CoinDetailView::new(
            Arc::clone(&self.provider),
            self.currency.subscribe(),
            coin_id,
        )
    }
}
