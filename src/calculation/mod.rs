//! Time and pay calculation for the shift engine.
//!
//! Pure, deterministic functions with no I/O: elapsed hours between two
//! instants, break segment minutes under a rounding policy, effective hours
//! after breaks, two-place storage rounding, and earnings.

mod break_minutes;
mod elapsed;
mod pay;

pub use break_minutes::{BreakRounding, break_segment_minutes};
pub use elapsed::{MILLIS_PER_HOUR, MILLIS_PER_MINUTE, elapsed_hours, elapsed_millis};
pub use pay::{ShiftHours, earnings, effective_hours, round2, settle_hours};

#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap()
    }

    proptest! {
        #[test]
        fn elapsed_hours_is_never_negative(offset_ms in -100_000_000i64..100_000_000i64) {
            let end = base() + Duration::milliseconds(offset_ms);
            prop_assert!(elapsed_hours(base(), end) >= Decimal::ZERO);
        }

        #[test]
        fn effective_never_exceeds_raw(
            shift_ms in 0i64..86_400_000i64,
            break_minutes in 0i64..2_000i64,
        ) {
            let hours = settle_hours(base(), base() + Duration::milliseconds(shift_ms), break_minutes);
            prop_assert!(hours.effective_hours >= Decimal::ZERO);
            prop_assert!(hours.effective_hours <= hours.raw_hours);
        }

        #[test]
        fn effective_matches_raw_minus_breaks_within_rounding(
            shift_minutes in 0i64..1_440i64,
            break_minutes in 0i64..120i64,
        ) {
            prop_assume!(break_minutes <= shift_minutes);
            let hours = settle_hours(base(), base() + Duration::minutes(shift_minutes), break_minutes);
            let expected = hours.raw_hours - Decimal::from(break_minutes) / Decimal::from(60);
            let tolerance = Decimal::new(1, 2);
            prop_assert!((hours.effective_hours - expected).abs() <= tolerance);
        }

        #[test]
        fn nearest_is_floor_or_one_more(segment_ms in 0i64..10_000_000i64) {
            let end = base() + Duration::milliseconds(segment_ms);
            let floor = break_segment_minutes(base(), end, BreakRounding::Floor);
            let nearest = break_segment_minutes(base(), end, BreakRounding::Nearest);
            prop_assert!(nearest == floor || nearest == floor + 1);
        }

        #[test]
        fn round2_stays_within_half_a_cent(units in 0i64..10_000_000i64) {
            let value = Decimal::new(units, 4);
            let rounded = round2(value);
            prop_assert!((rounded - value).abs() <= Decimal::new(5, 3));
            prop_assert_eq!(rounded.scale(), 2);
        }
    }
}
