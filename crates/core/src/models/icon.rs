/// Generic placeholder shown when every icon host fails.
pub const PLACEHOLDER_ICON: &str = "https://via.placeholder.com/64/1f2937/ffffff?text=%3F";

/// Best-effort icon URLs for a coin, in the order the presentation layer
/// should try them on load failure. `slug` is the upstream's lowercase name
/// identifier (e.g., "bitcoin"); `symbol` the ticker (e.g., "BTC").
///
/// The chain always terminates in [`PLACEHOLDER_ICON`].
pub fn icon_candidates(slug: &str, symbol: &str) -> Vec<String> {
    let sym = symbol.to_lowercase();
    vec![
        format!("https://c1.coinlore.com/img/{slug}.png"),
        format!("https://assets.coincap.io/assets/icons/{sym}@2x.png"),
        format!("https://cryptoicons.org/api/icon/{sym}/64"),
        PLACEHOLDER_ICON.to_string(),
    ]
}
