//! Client-side reporting periods.
//!
//! The API has no period endpoint; the picker offers the most recent
//! calendar months computed from the system clock (UTC).

use std::time::{SystemTime, UNIX_EPOCH};

use crate::api::types::Period;

/// How many months the period picker offers.
pub const PERIOD_CHOICES: usize = 12;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The most recent `count` monthly periods, current month first.
pub fn recent_monthly_periods(count: usize) -> Vec<Period> {
    let days = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| (elapsed.as_secs() / 86_400) as i64)
        .unwrap_or(0);
    let (year, month) = civil_from_days(days);
    periods_ending_at(year, month, count)
}

/// `count` monthly periods ending at (year, month), newest first.
fn periods_ending_at(mut year: i64, mut month: u32, count: usize) -> Vec<Period> {
    let mut periods = Vec::with_capacity(count);
    for _ in 0..count {
        periods.push(Period {
            id: format!("{year:04}{month:02}"),
            name: format!("{} {year}", MONTH_NAMES[(month - 1) as usize]),
        });
        month -= 1;
        if month == 0 {
            month = 12;
            year -= 1;
        }
    }
    periods
}

/// Year and month for a day count since 1970-01-01, proleptic Gregorian.
/// Days-to-civil conversion per Hinnant's date algorithms.
fn civil_from_days(days: i64) -> (i64, u32) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    (if m <= 2 { y + 1 } else { y }, m as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_january_1970() {
        assert_eq!(civil_from_days(0), (1970, 1));
    }

    #[test]
    fn known_dates_convert() {
        // 2024-01-01 and 2025-08-25 as epoch days.
        assert_eq!(civil_from_days(19_723), (2024, 1));
        assert_eq!(civil_from_days(20_325), (2025, 8));
    }

    #[test]
    fn periods_walk_backwards_across_a_year_boundary() {
        let periods = periods_ending_at(2025, 1, 3);
        let ids: Vec<_> = periods.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["202501", "202412", "202411"]);
        assert_eq!(periods[1].name, "December 2024");
    }

    #[test]
    fn current_month_comes_first() {
        let periods = periods_ending_at(2025, 8, 2);
        assert_eq!(periods[0].id, "202508");
        assert_eq!(periods[0].name, "August 2025");
    }
}
