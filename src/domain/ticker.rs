//! Ticker normalization.
//!
//! Bare exchange symbols (no dot, at most six characters) get the default
//! market suffix, so `bbas3` becomes `BBAS3.SA`. An empty input falls back
//! to a fixed ticker.

pub const DEFAULT_SUFFIX: &str = ".SA";
pub const FALLBACK_TICKER: &str = "BBAS3.SA";

const MAX_BARE_LEN: usize = 6;

pub fn normalize_ticker(input: &str, default_suffix: &str, fallback: &str) -> String {
    let ticker = input.trim().to_uppercase();
    if ticker.is_empty() {
        return fallback.to_uppercase();
    }
    if !ticker.contains('.')
        && ticker.chars().count() <= MAX_BARE_LEN
        && !default_suffix.is_empty()
    {
        return format!("{}{}", ticker, default_suffix.to_uppercase());
    }
    ticker
}
