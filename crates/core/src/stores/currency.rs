use tokio::sync::watch;

use crate::models::currency::CurrencySelection;

/// Single-writer container for the active display currency.
///
/// Write access is narrow: only the holder of the store (the facade hands it
/// to the currency picker) can `set`. Read access is broad: any component
/// takes a [`watch::Receiver`] via `subscribe()` — dependent stores await
/// changes on it and re-fetch, which is the only side effect of a write.
///
/// `set` performs no validation; an unsupported code silently degrades
/// display conversion downstream.
pub struct CurrencyStore {
    tx: watch::Sender<CurrencySelection>,
}

impl CurrencyStore {
    pub fn new(initial: CurrencySelection) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Snapshot of the current selection.
    pub fn current(&self) -> CurrencySelection {
        self.tx.borrow().clone()
    }

    /// A read handle that observes every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<CurrencySelection> {
        self.tx.subscribe()
    }

    /// Replace the selection and notify all subscribers.
    pub fn set(&self, selection: CurrencySelection) {
        self.tx.send_replace(selection);
    }
}

impl Default for CurrencyStore {
    fn default() -> Self {
        Self::new(CurrencySelection::default())
    }
}
