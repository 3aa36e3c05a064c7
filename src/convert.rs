use crate::models::ExchangeRateSnapshot;
use log::debug;

/// Converts `amount` from one currency to another using the snapshot's rate
/// table, routing through the base currency when neither side is the base.
///
/// A missing rate degrades to identity passthrough: the amount comes back
/// unchanged instead of failing. No rounding is applied here; display
/// precision is the formatter's job.
pub fn convert(amount: f64, from: &str, to: &str, snapshot: &ExchangeRateSnapshot) -> f64 {
    if from == to {
        return amount;
    }

    if from == snapshot.base {
        return match snapshot.rates.get(to) {
            Some(rate) => amount * rate,
            None => passthrough(amount, from, to),
        };
    }

    if to == snapshot.base {
        return match snapshot.rates.get(from) {
            Some(rate) => amount / rate,
            None => passthrough(amount, from, to),
        };
    }

    // Neither side is the base: convert into the base, then out of it.
    match (snapshot.rates.get(from), snapshot.rates.get(to)) {
        (Some(from_rate), Some(to_rate)) => amount / from_rate * to_rate,
        _ => passthrough(amount, from, to),
    }
}

fn passthrough(amount: f64, from: &str, to: &str) -> f64 {
    debug!("no rate for {}/{}, passing amount through", from, to);
    amount
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn snapshot() -> ExchangeRateSnapshot {
        let rates: HashMap<String, f64> = [("EUR".to_string(), 0.9), ("GBP".to_string(), 0.8)]
            .into_iter()
            .collect();
        ExchangeRateSnapshot::new("USD", rates)
    }

    #[test]
    fn same_currency_is_exact_identity() {
        let snap = snapshot();
        assert_eq!(convert(123.456, "EUR", "EUR", &snap), 123.456);
        assert_eq!(convert(0.0, "USD", "USD", &snap), 0.0);
    }

    #[test]
    fn from_base_multiplies() {
        let snap = snapshot();
        assert_relative_eq!(convert(50.0, "USD", "EUR", &snap), 45.0);
    }

    #[test]
    fn to_base_divides() {
        let snap = snapshot();
        assert_relative_eq!(convert(45.0, "EUR", "USD", &snap), 50.0);
    }

    #[test]
    fn cross_rate_routes_through_base() {
        let snap = snapshot();
        assert_relative_eq!(
            convert(100.0, "EUR", "GBP", &snap),
            100.0 / 0.9 * 0.8,
            epsilon = 1e-9
        );
    }

    #[test]
    fn base_round_trip_is_stable() {
        let snap = snapshot();
        let there = convert(250.0, "USD", "GBP", &snap);
        let back = convert(there, "GBP", "USD", &snap);
        assert_relative_eq!(back, 250.0, epsilon = 1e-9);
    }

    #[test]
    fn missing_rate_passes_amount_through() {
        let snap = snapshot();
        assert_eq!(convert(10.0, "USD", "JPY", &snap), 10.0);
        assert_eq!(convert(10.0, "JPY", "USD", &snap), 10.0);
        assert_eq!(convert(10.0, "JPY", "EUR", &snap), 10.0);
        assert_eq!(convert(10.0, "EUR", "JPY", &snap), 10.0);
    }

    #[test]
    fn empty_snapshot_passes_everything_through() {
        let snap = ExchangeRateSnapshot::empty("USD");
        assert_eq!(convert(99.0, "EUR", "GBP", &snap), 99.0);
    }
}
