// ═══════════════════════════════════════════════════════════════════
// Model Tests — CurrencySelection, FX table, icon chain, series
// synthesis
// ═══════════════════════════════════════════════════════════════════

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use coin_watch_core::models::coin::CoinDetail;
use coin_watch_core::models::currency::{usd_rate, CurrencySelection};
use coin_watch_core::models::icon::{icon_candidates, PLACEHOLDER_ICON};
use coin_watch_core::models::series::{HistoricalSeries, SERIES_DAYS};

fn sample_detail() -> CoinDetail {
    CoinDetail {
        id: "90".into(),
        name: "Bitcoin".into(),
        symbol: "BTC".into(),
        icon_url: "https://c1.coinlore.com/img/bitcoin.png".into(),
        price_usd: 50_000.0,
        market_cap_usd: 9e11,
        rank: Some(1),
        percent_change_24h: 2.5,
        circulating_supply: 19_000_000.0,
        volume_24h: 3.0e10,
        percent_change_7d: Some(-1.0),
        high_24h: None,
        low_24h: None,
    }
}

// ═══════════════════════════════════════════════════════════════════
// CurrencySelection & FX
// ═══════════════════════════════════════════════════════════════════

#[test]
fn currency_code_is_lowercased() {
    let selection = CurrencySelection::new("EUR", "€");
    assert_eq!(selection.code, "eur");
    assert_eq!(selection.symbol, "€");
}

#[test]
fn default_currency_is_usd() {
    let selection = CurrencySelection::default();
    assert_eq!(selection.code, "usd");
    assert_eq!(selection.symbol, "$");
}

#[test]
fn preset_currencies() {
    assert_eq!(CurrencySelection::eur().code, "eur");
    assert_eq!(CurrencySelection::inr().symbol, "₹");
}

#[test]
fn usd_rate_known_codes() {
    assert_eq!(usd_rate("usd"), 1.0);
    assert_eq!(usd_rate("eur"), 0.85);
    assert_eq!(usd_rate("inr"), 83.0);
    // case-insensitive lookup
    assert_eq!(usd_rate("EUR"), 0.85);
}

#[test]
fn usd_rate_unknown_code_is_nan() {
    assert!(usd_rate("xyz").is_nan());
}

// ═══════════════════════════════════════════════════════════════════
// Icon fallback chain
// ═══════════════════════════════════════════════════════════════════

#[test]
fn icon_chain_has_alternatives_and_placeholder() {
    let chain = icon_candidates("bitcoin", "BTC");
    assert!(chain.len() >= 3);
    assert_eq!(chain.last().unwrap(), PLACEHOLDER_ICON);
    assert!(chain[0].contains("bitcoin"));
    // symbol-derived hosts use the lowercase ticker
    assert!(chain[1].contains("btc"));
}

// ═══════════════════════════════════════════════════════════════════
// Series synthesis
// ═══════════════════════════════════════════════════════════════════

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

#[test]
fn synthesized_series_shape() {
    let detail = sample_detail();
    let mut rng = StdRng::seed_from_u64(7);
    let series = HistoricalSeries::synthesize(&detail, fixed_now(), &mut rng);

    assert_eq!(series.prices.len(), SERIES_DAYS);
    assert_eq!(series.market_caps.len(), SERIES_DAYS);
    assert_eq!(series.total_volumes.len(), SERIES_DAYS);
    assert!(series.is_renderable());

    // daily spacing, ascending, ending at `now`
    let last = series.prices.last().unwrap();
    assert_eq!(last.timestamp_ms, fixed_now().timestamp_millis());
    for pair in series.prices.windows(2) {
        assert_eq!(pair[1].timestamp_ms - pair[0].timestamp_ms, 86_400_000);
    }
}

#[test]
fn synthesized_anchor_days_are_deterministic() {
    let detail = sample_detail();
    let mut a = StdRng::seed_from_u64(1);
    let mut b = StdRng::seed_from_u64(2);
    let first = HistoricalSeries::synthesize(&detail, fixed_now(), &mut a);
    let second = HistoricalSeries::synthesize(&detail, fixed_now(), &mut b);

    // index 9 = today, 8 = yesterday, 2 = seven days back
    assert_eq!(first.prices[9].value, 50_000.0);
    assert_eq!(first.prices[8].value, 50_000.0 / (1.0 + 2.5 / 100.0));
    assert_eq!(first.prices[2].value, 50_000.0 / (1.0 - 1.0 / 100.0));

    assert_eq!(first.prices[9].value, second.prices[9].value);
    assert_eq!(first.prices[8].value, second.prices[8].value);
    assert_eq!(first.prices[2].value, second.prices[2].value);
}

#[test]
fn synthesized_filler_days_stay_within_five_percent() {
    let detail = sample_detail();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let series = HistoricalSeries::synthesize(&detail, fixed_now(), &mut rng);
        for idx in [0usize, 1, 3, 4, 5, 6, 7] {
            let value = series.prices[idx].value;
            assert!(
                (47_500.0..=52_500.0).contains(&value),
                "seed {seed} idx {idx}: {value} outside ±5% band"
            );
        }
    }
}

#[test]
fn zero_24h_change_makes_yesterday_equal_today() {
    let mut detail = sample_detail();
    detail.percent_change_24h = 0.0;
    let mut rng = StdRng::seed_from_u64(3);
    let series = HistoricalSeries::synthesize(&detail, fixed_now(), &mut rng);
    assert_eq!(series.prices[8].value, series.prices[9].value);
}

#[test]
fn missing_7d_change_falls_back_to_jitter() {
    let mut detail = sample_detail();
    detail.percent_change_7d = None;
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let series = HistoricalSeries::synthesize(&detail, fixed_now(), &mut rng);
        let value = series.prices[2].value;
        assert!((47_500.0..=52_500.0).contains(&value));
    }
}

#[test]
fn derived_series_use_static_supply_and_volume() {
    let detail = sample_detail();
    let mut rng = StdRng::seed_from_u64(11);
    let series = HistoricalSeries::synthesize(&detail, fixed_now(), &mut rng);

    for (price, cap) in series.prices.iter().zip(&series.market_caps) {
        assert_eq!(cap.timestamp_ms, price.timestamp_ms);
        assert_eq!(cap.value, price.value * detail.circulating_supply);
    }
    for volume in &series.total_volumes {
        assert_eq!(volume.value, detail.volume_24h);
    }
}
