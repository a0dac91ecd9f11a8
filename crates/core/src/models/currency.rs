use serde::{Deserialize, Serialize};

/// The active display currency: lowercase code plus the symbol the
/// presentation layer prefixes to prices.
///
/// The code is lowercased on construction; no further validation happens.
/// Selecting a code outside the static FX table degrades display conversion
/// to `NaN` (see [`usd_rate`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySelection {
    pub code: String,
    pub symbol: String,
}

impl CurrencySelection {
    pub fn new(code: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            code: code.into().to_lowercase(),
            symbol: symbol.into(),
        }
    }

    /// The currencies the frontend's picker offers.
    pub fn usd() -> Self {
        Self::new("usd", "$")
    }

    pub fn eur() -> Self {
        Self::new("eur", "€")
    }

    pub fn inr() -> Self {
        Self::new("inr", "₹")
    }
}

impl Default for CurrencySelection {
    fn default() -> Self {
        Self::usd()
    }
}

/// Static approximate USD exchange rates, applied at display time to prices
/// from USD-only upstreams. These are deliberately coarse — the tracker shows
/// ballpark figures, not settlement-grade conversion.
const USD_RATES: &[(&str, f64)] = &[
    ("usd", 1.0),
    ("eur", 0.85),
    ("gbp", 0.73),
    ("inr", 83.0),
    ("jpy", 110.0),
];

/// Multiplier from USD to `code`. Unknown codes yield `NaN` (the displayed
/// price degrades rather than erroring) after a diagnostic warning.
pub fn usd_rate(code: &str) -> f64 {
    match USD_RATES.iter().find(|(c, _)| code.eq_ignore_ascii_case(c)) {
        Some((_, rate)) => *rate,
        None => {
            tracing::warn!(code, "no static FX rate for currency; display price degrades to NaN");
            f64::NAN
        }
    }
}
