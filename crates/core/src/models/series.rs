use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::coin::CoinDetail;

/// A single time/value pair in a historical series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Unix timestamp in milliseconds.
    pub timestamp_ms: i64,
    pub value: f64,
}

/// Number of daily points in a synthesized series (and the day-range
/// requested from a real time-series endpoint).
pub const SERIES_DAYS: usize = 10;

/// Maximum relative deviation for synthesized filler days.
const JITTER: f64 = 0.05;

/// Ordered price/market-cap/volume series feeding the detail chart.
///
/// All three vectors are ascending by timestamp. `prices` is never empty for
/// a series handed to the presentation layer — an absent series means the
/// chart is not rendered at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    pub prices: Vec<SeriesPoint>,
    pub market_caps: Vec<SeriesPoint>,
    pub total_volumes: Vec<SeriesPoint>,
}

impl HistoricalSeries {
    /// Approximate a 10-day daily price history from a detail record, for
    /// upstreams without a time-series endpoint.
    ///
    /// Ending at `now`, oldest point first:
    /// - today: the current price;
    /// - yesterday: `price / (1 + pct_24h/100)`;
    /// - 7 days back: `price / (1 + pct_7d/100)` when the upstream reported
    ///   a 7-day change, otherwise jittered like the filler days;
    /// - every other day: `price * (1 + u)`, `u` uniform in ±5%, drawn
    ///   independently per call. The filler days are visual approximation
    ///   only and differ between calls.
    ///
    /// Market caps are price × circulating supply pointwise; volumes repeat
    /// the single 24h figure from the detail record.
    pub fn synthesize(detail: &CoinDetail, now: DateTime<Utc>, rng: &mut impl Rng) -> Self {
        let mut prices = Vec::with_capacity(SERIES_DAYS);
        for days_back in (0..SERIES_DAYS as i64).rev() {
            let timestamp_ms = (now - Duration::days(days_back)).timestamp_millis();
            let value = match days_back {
                0 => detail.price_usd,
                1 => detail.price_usd / (1.0 + detail.percent_change_24h / 100.0),
                7 => match detail.percent_change_7d {
                    Some(pct) => detail.price_usd / (1.0 + pct / 100.0),
                    None => jitter(detail.price_usd, rng),
                },
                _ => jitter(detail.price_usd, rng),
            };
            prices.push(SeriesPoint {
                timestamp_ms,
                value,
            });
        }

        let market_caps = prices
            .iter()
            .map(|p| SeriesPoint {
                timestamp_ms: p.timestamp_ms,
                value: p.value * detail.circulating_supply,
            })
            .collect();

        let total_volumes = prices
            .iter()
            .map(|p| SeriesPoint {
                timestamp_ms: p.timestamp_ms,
                value: detail.volume_24h,
            })
            .collect();

        Self {
            prices,
            market_caps,
            total_volumes,
        }
    }

    /// Whether the chart can be drawn from this series.
    pub fn is_renderable(&self) -> bool {
        !self.prices.is_empty()
    }
}

fn jitter(price: f64, rng: &mut impl Rng) -> f64 {
    price * (1.0 + rng.gen_range(-JITTER..=JITTER))
}
