//! Rental price computation.

use chrono::NaiveDate;

/// Computes the total price of a rental period at a whole-unit per-day rate.
///
/// The day count is the absolute difference between the two dates, so a
/// reversed range prices the same as its forward equivalent instead of
/// failing. This leniency is deliberate; callers that want to reject
/// reversed ranges must do so before pricing.
pub fn rental_price(date_from: NaiveDate, date_to: NaiveDate, price_per_day: i64) -> i64 {
    (date_to - date_from).num_days().abs() * price_per_day
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_three_day_rental_at_rate_100() {
        let price = rental_price(date(2021, 10, 8), date(2021, 10, 11), 100);
        assert_eq!(price, 300);
    }

    #[test]
    fn test_reversed_range_prices_like_forward_range() {
        let forward = rental_price(date(2024, 3, 1), date(2024, 3, 15), 2500);
        let reversed = rental_price(date(2024, 3, 15), date(2024, 3, 1), 2500);
        assert_eq!(forward, reversed);
        assert_eq!(forward, 14 * 2500);
    }

    #[test]
    fn test_same_day_rental_is_free() {
        assert_eq!(rental_price(date(2022, 1, 1), date(2022, 1, 1), 9999), 0);
    }

    #[test]
    fn test_zero_rate() {
        assert_eq!(rental_price(date(2022, 1, 1), date(2022, 2, 1), 0), 0);
    }

    #[test]
    fn test_crosses_month_boundary() {
        assert_eq!(rental_price(date(2021, 1, 30), date(2021, 2, 2), 100), 300);
    }
}
