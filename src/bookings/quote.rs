use chrono::{DateTime, Duration, NaiveTime, Utc};
use rust_decimal::Decimal;

/// Whole-day delivery performance figures for a booking
///
/// All values are calendar-day differences relative to the booking's
/// creation date; `variance_days` is negative when delivery was early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryVariance {
    pub estimated_days: i64,
    pub actual_days: i64,
    pub variance_days: i64,
    pub on_time: bool,
}

/// Calculator for booking prices and delivery schedules
///
/// Pure and deterministic given its inputs; quantity validation is the
/// caller's responsibility.
pub struct QuoteCalculator;

impl QuoteCalculator {
    /// Calculate the total price for a booking
    ///
    /// # Arguments
    /// * `base_price` - Service price per unit quantity
    /// * `quantity` - Number of units booked
    ///
    /// # Returns
    /// Total as Decimal (base_price * quantity)
    pub fn total_price(base_price: Decimal, quantity: i32) -> Decimal {
        base_price * Decimal::from(quantity)
    }

    /// Calculate the estimated delivery date for a booking created now
    ///
    /// The creation instant is truncated to midnight UTC before the day
    /// offset is added, so the result is always a midnight instant. Month
    /// and year boundaries roll over correctly.
    pub fn estimated_delivery(
        now: DateTime<Utc>,
        estimated_delivery_days: i32,
    ) -> DateTime<Utc> {
        let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        midnight + Duration::days(i64::from(estimated_delivery_days))
    }

    /// Compute delivery performance for a delivered booking
    ///
    /// Day counts are differences between calendar dates, so the time of day
    /// on any of the three instants does not affect the result.
    pub fn delivery_variance(
        created_at: DateTime<Utc>,
        estimated_delivery_date: DateTime<Utc>,
        actual_delivery_date: DateTime<Utc>,
    ) -> DeliveryVariance {
        let created = created_at.date_naive();
        let estimated_days = (estimated_delivery_date.date_naive() - created).num_days();
        let actual_days = (actual_delivery_date.date_naive() - created).num_days();

        DeliveryVariance {
            estimated_days,
            actual_days,
            variance_days: actual_days - estimated_days,
            on_time: actual_days <= estimated_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 30, 15).unwrap()
    }

    #[test]
    fn test_total_price_basic() {
        assert_eq!(QuoteCalculator::total_price(dec!(150.00), 2), dec!(300.00));
    }

    #[test]
    fn test_total_price_single_unit() {
        assert_eq!(QuoteCalculator::total_price(dec!(99.99), 1), dec!(99.99));
    }

    #[test]
    fn test_total_price_is_exact() {
        // 0.10 * 3 must be exactly 0.30, not a float approximation
        assert_eq!(QuoteCalculator::total_price(dec!(0.10), 3), dec!(0.30));
    }

    #[test]
    fn test_total_price_zero_base() {
        assert_eq!(QuoteCalculator::total_price(dec!(0), 50), dec!(0));
    }

    #[test]
    fn test_estimated_delivery_truncates_to_midnight() {
        let eta = QuoteCalculator::estimated_delivery(utc(2024, 6, 10, 17), 3);
        assert_eq!(eta, Utc.with_ymd_and_hms(2024, 6, 13, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_estimated_delivery_rolls_over_month_boundary() {
        // Day 30 of a 31-day month plus 3 days lands in February
        let eta = QuoteCalculator::estimated_delivery(utc(2024, 1, 30, 9), 3);
        assert_eq!(eta, Utc.with_ymd_and_hms(2024, 2, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_estimated_delivery_rolls_over_year_boundary() {
        let eta = QuoteCalculator::estimated_delivery(utc(2024, 12, 30, 23), 5);
        assert_eq!(eta, Utc.with_ymd_and_hms(2025, 1, 4, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_estimated_delivery_zero_days_is_same_day_midnight() {
        let eta = QuoteCalculator::estimated_delivery(utc(2024, 3, 15, 22), 0);
        assert_eq!(eta, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_delivery_variance_on_time() {
        let created = utc(2024, 1, 30, 14);
        let estimated = Utc.with_ymd_and_hms(2024, 2, 2, 0, 0, 0).unwrap();
        let actual = utc(2024, 2, 2, 18);

        let variance = QuoteCalculator::delivery_variance(created, estimated, actual);
        assert_eq!(variance.estimated_days, 3);
        assert_eq!(variance.actual_days, 3);
        assert_eq!(variance.variance_days, 0);
        assert!(variance.on_time);
    }

    #[test]
    fn test_delivery_variance_one_day_late() {
        let created = utc(2024, 1, 30, 14);
        let estimated = Utc.with_ymd_and_hms(2024, 2, 2, 0, 0, 0).unwrap();
        let actual = utc(2024, 2, 3, 8);

        let variance = QuoteCalculator::delivery_variance(created, estimated, actual);
        assert_eq!(variance.variance_days, 1);
        assert!(!variance.on_time);
    }

    #[test]
    fn test_delivery_variance_early() {
        let created = utc(2024, 1, 30, 14);
        let estimated = Utc.with_ymd_and_hms(2024, 2, 2, 0, 0, 0).unwrap();
        let actual = utc(2024, 1, 31, 8);

        let variance = QuoteCalculator::delivery_variance(created, estimated, actual);
        assert_eq!(variance.variance_days, -2);
        assert!(variance.on_time);
    }

    #[test]
    fn test_delivery_variance_ignores_time_of_day() {
        // Late in the evening vs. early morning must not change day counts
        let created = utc(2024, 5, 1, 23);
        let estimated = Utc.with_ymd_and_hms(2024, 5, 4, 0, 0, 0).unwrap();
        let actual = Utc.with_ymd_and_hms(2024, 5, 4, 23, 59, 59).unwrap();

        let variance = QuoteCalculator::delivery_variance(created, estimated, actual);
        assert_eq!(variance.actual_days, 3);
        assert_eq!(variance.variance_days, 0);
        assert!(variance.on_time);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    /// total_price equals base_price * quantity exactly for all valid inputs
    #[test]
    fn prop_total_price_invariant() {
        proptest!(|(
            quantity in 1i32..=1000,
            price_cents in 0u32..=10_000_000u32
        )| {
            let base = Decimal::from(price_cents) / Decimal::from(100);
            let total = QuoteCalculator::total_price(base, quantity);
            prop_assert_eq!(total, base * Decimal::from(quantity));
            prop_assert!(total >= Decimal::ZERO);
        });
    }

    /// The estimated delivery date is exactly the configured number of days
    /// after the creation day's midnight, across arbitrary dates
    #[test]
    fn prop_estimated_delivery_day_offset() {
        proptest!(|(
            epoch_day in 0i64..=25_000,
            seconds in 0u32..86_400,
            days in 0i32..=365
        )| {
            let now = Utc.timestamp_opt(epoch_day * 86_400 + i64::from(seconds), 0).unwrap();
            let eta = QuoteCalculator::estimated_delivery(now, days);

            prop_assert_eq!(
                (eta.date_naive() - now.date_naive()).num_days(),
                i64::from(days)
            );
            prop_assert_eq!(eta.time(), chrono::NaiveTime::MIN);
        });
    }

    /// variance_days is consistent with on_time: on time iff variance <= 0
    /// relative to the estimate derived from the same creation date
    #[test]
    fn prop_variance_consistent_with_on_time() {
        proptest!(|(
            epoch_day in 0i64..=25_000,
            estimated_offset in 0i64..=60,
            actual_offset in 0i64..=120
        )| {
            let created = Utc.timestamp_opt(epoch_day * 86_400 + 3_600, 0).unwrap();
            let estimated = created + Duration::days(estimated_offset);
            let actual = created + Duration::days(actual_offset);

            let variance = QuoteCalculator::delivery_variance(created, estimated, actual);
            prop_assert_eq!(variance.variance_days, actual_offset - estimated_offset);
            prop_assert_eq!(variance.on_time, variance.variance_days <= 0);
        });
    }
}
