//! Conversions between calendar timestamps and a continuous day count.
//!
//! The continuous scale is [JulianDate], which is stored as days since the
//! J2000.0 epoch rather than as a raw Julian date. A raw Julian date near
//! 2.45 million days only resolves ~40 microseconds in an `f64`, which is not
//! enough for calendar round trips; the offset from J2000 resolves ~1
//! microsecond anywhere in 1900-2100.
//!
//! The inverse conversion ([JulianDate::to_calendar]) uses the truncated
//! century approximation from Vallado (algorithm 22), which is only trusted
//! between 1900 and 2100. Both directions refuse years outside that range.

use std::fmt::Display;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::consts::{J2000_JD, SECONDS_PER_DAY};
use crate::error::{OrbitError, Result};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

// Integer Julian day number of 2000 January 1 (noon)
const J2000_DAY_NUMBER: i64 = 2_451_545;
// 1900 January 0.0 is JD 2415019.5, which is 36525.5 days before J2000
const DAYS_FROM_1900_JAN0_TO_J2000: f64 = 36_525.0;

// The inverse conversion adds this much to the day count so that instants
// sitting exactly on a day boundary don't round down into the previous day,
// and then takes the equivalent amount back off the seconds field. Net bias
// is below one microsecond.
const BOUNDARY_NUDGE_DAYS: f64 = 1e-11;
const BOUNDARY_NUDGE_SECONDS: f64 = 8.64e-7;

const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const LEAP_MONTH_LENGTHS: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A point on the continuous time scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct JulianDate {
    days: f64,
}

/// A proleptic Gregorian calendar timestamp, broken into fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calendar {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn month_lengths(year: i32) -> &'static [u32; 12] {
    if is_leap_year(year) {
        &LEAP_MONTH_LENGTHS
    } else {
        &MONTH_LENGTHS
    }
}

fn check_year(year: i32) -> Result<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(OrbitError::CalendarRange { year })
    }
}

/// Returns the Julian day number (the Julian date at noon) of the given
/// calendar day.
pub fn julian_day(year: i32, month: u32, day: u32) -> i64 {
    let (year, month, day) = (year as i64, month as i64, day as i64);
    // January and February count as months 13 and 14 of the previous year
    let janfeb = if month < 3 { 1 } else { 0 };

    day + (1461 * (year + 4800 - janfeb)).div_euclid(4)
        + (367 * (month - 2 + janfeb * 12)).div_euclid(12)
        - (3 * (year + 4900 - janfeb).div_euclid(100)).div_euclid(4)
        - 32075
}

/// Splits a fractional day-of-year (1.0 is January 1, 00:00) into month,
/// day, hour, minute and second. This is the same decomposition used for
/// TLE epochs.
pub fn days_to_mdhms(year: i32, days: f64) -> (u32, u32, u32, u32, f64) {
    let lengths = month_lengths(year);
    let day_of_year = days.floor();
    let whole_days = day_of_year as u32;

    let mut month = 1;
    let mut elapsed = 0;
    while month < 12 && whole_days > elapsed + lengths[month - 1] {
        elapsed += lengths[month - 1];
        month += 1;
    }
    let day = whole_days - elapsed;

    let mut temp = (days - day_of_year) * 24.0;
    let hour = temp.floor();
    temp = (temp - hour) * 60.0;
    let minute = temp.floor();
    let second = (temp - minute) * 60.0;

    (month as u32, day, hour as u32, minute as u32, second)
}

/// Days from 1900 January 0.0 to January 0.0 of `year`. Leap years are
/// counted with truncating division, which is exact for 1900 through 2100.
fn days_before_year(year: i32) -> f64 {
    ((year - 1900) * 365 + (year - 1901) / 4) as f64
}

impl Calendar {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Calendar {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub fn date(year: i32, month: u32, day: u32) -> Self {
        Self::new(year, month, day, 0, 0, 0.0)
    }

    /// Builds a timestamp from a year and a fractional day-of-year, the way
    /// TLE epochs are written (e.g. `19289.08873013`).
    pub fn from_day_of_year(year: i32, day_of_year: f64) -> Result<Self> {
        check_year(year)?;
        let year_length = if is_leap_year(year) { 366.0 } else { 365.0 };
        if !(1.0..year_length + 1.0).contains(&day_of_year) {
            return Err(OrbitError::InvalidCalendar(format!(
                "day of year {} is outside 1..{} for {}",
                day_of_year,
                year_length + 1.0,
                year
            )));
        }

        let (month, day, hour, minute, second) = days_to_mdhms(year, day_of_year);
        Ok(Self::new(year, month, day, hour, minute, second))
    }

    pub fn from_datetime(datetime: &NaiveDateTime) -> Self {
        Self::new(
            datetime.year(),
            datetime.month(),
            datetime.day(),
            datetime.hour(),
            datetime.minute(),
            datetime.second() as f64 + datetime.nanosecond() as f64 * 1e-9,
        )
    }

    pub fn to_datetime(&self) -> Result<NaiveDateTime> {
        // Hand-built timestamps may carry a tiny negative second
        let second = self.second.max(0.0);
        let whole_seconds = second.floor();
        let nanos = (((second - whole_seconds) * 1e9).round() as u32).min(999_999_999);

        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|date| {
                date.and_hms_nano_opt(self.hour, self.minute, whole_seconds as u32, nanos)
            })
            .ok_or_else(|| OrbitError::InvalidCalendar(format!("{} is not a valid date", self)))
    }

    fn validate(&self) -> Result<()> {
        check_year(self.year)?;

        let field_error = |name: &str, value: String| -> Result<()> {
            Err(OrbitError::InvalidCalendar(format!(
                "{} {} out of range in {}",
                name, value, self
            )))
        };

        if !(1..=12).contains(&self.month) {
            return field_error("month", self.month.to_string());
        }
        let month_length = month_lengths(self.year)[self.month as usize - 1];
        if !(1..=month_length).contains(&self.day) {
            return field_error("day", self.day.to_string());
        }
        if self.hour >= 24 {
            return field_error("hour", self.hour.to_string());
        }
        if self.minute >= 60 {
            return field_error("minute", self.minute.to_string());
        }
        // Allow for a leap second
        if !(0.0..61.0).contains(&self.second) {
            return field_error("second", self.second.to_string());
        }
        Ok(())
    }
}

impl Display for Calendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:09.6}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl JulianDate {
    pub fn from_jd(jd: f64) -> Self {
        JulianDate {
            days: jd - J2000_JD,
        }
    }

    pub fn from_j2000_days(days: f64) -> Self {
        JulianDate { days }
    }

    pub fn j2000() -> Self {
        Self::from_j2000_days(0.0)
    }

    /// The full Julian date. Only good to ~40 microseconds; use
    /// [JulianDate::j2000_days] for arithmetic.
    pub fn jd(&self) -> f64 {
        self.days + J2000_JD
    }

    pub fn j2000_days(&self) -> f64 {
        self.days
    }

    pub fn j2000_centuries(&self) -> f64 {
        self.days / crate::consts::DAYS_PER_JULIAN_CENTURY
    }

    pub fn from_calendar(calendar: &Calendar) -> Result<Self> {
        calendar.validate()?;

        let day_number = julian_day(calendar.year, calendar.month, calendar.day) - J2000_DAY_NUMBER;
        let seconds = calendar.second
            + calendar.minute as f64 * 60.0
            + calendar.hour as f64 * 3600.0;

        // Julian days start at noon, so midnight is half a day earlier
        Ok(Self::from_j2000_days(
            day_number as f64 - 0.5 + seconds / SECONDS_PER_DAY,
        ))
    }

    pub fn from_datetime(datetime: &NaiveDateTime) -> Result<Self> {
        Self::from_calendar(&Calendar::from_datetime(datetime))
    }

    pub fn to_calendar(&self) -> Result<Calendar> {
        // Work in days since 1900 January 0.0, keeping the whole and fractional
        // parts apart so the day-of-year subtraction below stays exact.
        let whole = self.days.floor();
        let temp_whole = whole + DAYS_FROM_1900_JAN0_TO_J2000;
        let temp_fraction = (self.days - whole) + 0.5;
        let temp = temp_whole + temp_fraction;

        let mut year = MIN_YEAR + (temp / 365.25).floor() as i32;
        let mut days = (temp_whole - days_before_year(year)) + temp_fraction + BOUNDARY_NUDGE_DAYS;

        // The estimate overshoots by a year in the first day or so of January
        if days < 1.0 {
            year -= 1;
            days = (temp_whole - days_before_year(year)) + temp_fraction + BOUNDARY_NUDGE_DAYS;
        }
        // ...and undershoots just past the end of the range, after 2100
        let year_length = if is_leap_year(year) { 366.0 } else { 365.0 };
        if days >= year_length + 1.0 {
            year += 1;
            days -= year_length;
        }
        check_year(year)?;

        let (month, day, hour, minute, second) = days_to_mdhms(year, days);
        // Rounding can leave a sub-microsecond negative remainder
        let second = (second - BOUNDARY_NUDGE_SECONDS).max(0.0);
        Ok(Calendar::new(year, month, day, hour, minute, second))
    }

    pub fn to_datetime(&self) -> Result<NaiveDateTime> {
        self.to_calendar()?.to_datetime()
    }

    pub fn offset_minutes(self, minutes: f64) -> Self {
        Self::from_j2000_days(self.days + minutes * 60.0 / SECONDS_PER_DAY)
    }

    pub fn minutes_since(&self, other: JulianDate) -> f64 {
        (self.days - other.days) * SECONDS_PER_DAY / 60.0
    }
}

/// The time-scale value of every sample in a propagation grid, given in
/// minutes past `start`.
pub fn julian_dates_since(start: JulianDate, minutes: &[f64]) -> Vec<JulianDate> {
    minutes.iter().map(|&m| start.offset_minutes(m)).collect()
}

pub fn to_calendars(dates: &[JulianDate]) -> Result<Vec<Calendar>> {
    dates.iter().map(JulianDate::to_calendar).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn jd_of(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> f64 {
        JulianDate::from_calendar(&Calendar::new(year, month, day, hour, minute, second))
            .unwrap()
            .jd()
    }

    fn assert_same_instant(actual: &Calendar, expected: &Calendar, tolerance: f64) {
        assert_eq!(
            (actual.year, actual.month, actual.day, actual.hour, actual.minute),
            (
                expected.year,
                expected.month,
                expected.day,
                expected.hour,
                expected.minute
            ),
            "{} != {}",
            actual,
            expected
        );
        assert_abs_diff_eq!(actual.second, expected.second, epsilon = tolerance);
    }

    #[test]
    fn test_julian_day_number() {
        assert_eq!(julian_day(2000, 1, 1), 2_451_545);
        assert_eq!(julian_day(2000, 2, 29), 2_451_604);
        assert_eq!(julian_day(2000, 3, 1), 2_451_605);
        // 1900 has no February 29th
        assert_eq!(julian_day(1900, 3, 1) - julian_day(1900, 2, 28), 1);
        assert_eq!(julian_day(2100, 3, 1) - julian_day(2100, 2, 28), 1);
    }

    #[test]
    fn test_vallado_julian_dates() {
        // Vallado, examples 3-4 and 11-5
        assert_abs_diff_eq!(jd_of(1996, 10, 26, 14, 20, 0.0), 2450383.09722222, epsilon = 1e-8);
        assert_abs_diff_eq!(jd_of(1997, 4, 2, 1, 8, 0.0), 2450540.5472, epsilon = 1e-4);
        assert_abs_diff_eq!(jd_of(2006, 4, 2, 0, 0, 0.0), 2453827.5, epsilon = 1e-12);
        assert_abs_diff_eq!(jd_of(2000, 1, 1, 12, 0, 0.0), J2000_JD, epsilon = 1e-12);
    }

    #[test]
    fn test_datetime_matches_fields() {
        let datetime = NaiveDate::from_ymd_opt(2004, 4, 6)
            .unwrap()
            .and_hms_micro_opt(7, 51, 27, 946_039)
            .unwrap();
        let from_datetime = JulianDate::from_datetime(&datetime).unwrap();
        let from_fields =
            JulianDate::from_calendar(&Calendar::new(2004, 4, 6, 7, 51, 28.386 - 0.439961))
                .unwrap();

        assert_abs_diff_eq!(from_datetime.jd(), 2453101.8274067827, epsilon = 1e-9);
        assert_abs_diff_eq!(
            from_datetime.j2000_days(),
            from_fields.j2000_days(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_inverse_single() {
        let original = Calendar::new(1996, 10, 26, 14, 20, 1.123456);
        let jd = JulianDate::from_calendar(&original).unwrap();
        assert_same_instant(&jd.to_calendar().unwrap(), &original, 1e-5);
    }

    #[test]
    fn test_inverse_vectorized() {
        let jds = [
            2451723.53495062,
            2451723.78495062,
            2451724.03495062,
            2451724.28495062,
            2451724.53495062,
            2451724.78495062,
            2451725.03495062,
            2451725.28495062,
            2451725.53495062,
            2451725.78495062,
            2451726.03495062,
            2451726.28495062,
        ];
        let dates: Vec<_> = jds.iter().map(|&jd| JulianDate::from_jd(jd)).collect();
        let calendars = to_calendars(&dates).unwrap();

        for (i, calendar) in calendars.iter().enumerate() {
            let expected = Calendar::new(2000, 6, 28 + i as u32 / 4, 6 * (i as u32 % 4), 50, 19.733571);
            assert_same_instant(calendar, &expected, 1e-6);
            // Scalar and batch conversion agree exactly
            assert_eq!(*calendar, dates[i].to_calendar().unwrap());
        }
    }

    #[test]
    fn test_offset_grid() {
        let start = JulianDate::from_calendar(&Calendar::new(2000, 6, 28, 0, 50, 19.733571)).unwrap();
        let minutes: Vec<f64> = (0..12).map(|i| i as f64 * 360.0).collect();
        let grid = julian_dates_since(start, &minutes);

        for (i, date) in grid.iter().enumerate() {
            assert_abs_diff_eq!(date.jd(), 2451723.53495062 + 0.25 * i as f64, epsilon = 1e-8);
            assert_abs_diff_eq!(date.minutes_since(start), minutes[i], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_round_trip_boundaries() {
        // First and last instants of every month, including the century years
        // that are (2000) and aren't (1900, 2100) leap years.
        for year in [1900, 1901, 1904, 1999, 2000, 2001, 2024, 2099, 2100] {
            for month in 1..=12 {
                let last_day = month_lengths(year)[month as usize - 1];
                for day in [1, last_day] {
                    for (hour, minute, second) in [(0, 0, 0.0), (12, 0, 0.0), (23, 59, 59.99999)] {
                        let calendar = Calendar::new(year, month, day, hour, minute, second);
                        let round_trip = JulianDate::from_calendar(&calendar)
                            .unwrap()
                            .to_calendar()
                            .unwrap();
                        assert_same_instant(&round_trip, &calendar, 1e-5);
                    }
                }
            }
        }
    }

    #[test]
    fn test_round_trip_sweep() {
        // Walk through the whole supported range in steps that hit every
        // day of the month and a spread of times of day.
        let mut year = MIN_YEAR;
        let mut counter: u32 = 0;
        while year <= MAX_YEAR {
            for month in 1..=12u32 {
                let day = 1 + (counter * 7) % month_lengths(year)[month as usize - 1];
                let hour = counter % 24;
                let minute = (counter * 13) % 60;
                let second = (counter as f64 * 7.123_457) % 60.0;
                let calendar = Calendar::new(year, month, day, hour, minute, second);

                let round_trip = JulianDate::from_calendar(&calendar)
                    .unwrap()
                    .to_calendar()
                    .unwrap();
                assert_same_instant(&round_trip, &calendar, 1e-5);
                counter += 1;
            }
            year += 1;
        }
    }

    #[test]
    fn test_round_trip_last_day_of_year() {
        // The year estimate overshoots late on December 31, which takes the
        // step-back branch of the inverse.
        for year in MIN_YEAR..MAX_YEAR {
            for hour in 0..24 {
                for minute in 0..60 {
                    let calendar = Calendar::new(year, 12, 31, hour, minute, 0.0);
                    let round_trip = JulianDate::from_calendar(&calendar)
                        .unwrap()
                        .to_calendar()
                        .unwrap();
                    assert_same_instant(&round_trip, &calendar, 1e-6);
                    assert!(round_trip.second >= 0.0, "{}", round_trip);
                    // The result is itself a valid timestamp
                    JulianDate::from_calendar(&round_trip).unwrap();
                }
            }
        }
    }

    #[test]
    fn test_exact_boundary_has_no_negative_second() {
        let t = JulianDate::from_calendar(&Calendar::new(2000, 12, 31, 12, 0, 0.0)).unwrap();
        let calendar = t.to_calendar().unwrap();
        assert_eq!((calendar.hour, calendar.minute), (12, 0));
        assert!(calendar.second >= 0.0 && calendar.second < 1e-6);
    }

    #[test]
    fn test_calendar_range() {
        assert!(matches!(
            JulianDate::from_calendar(&Calendar::date(1899, 12, 31)),
            Err(OrbitError::CalendarRange { year: 1899 })
        ));
        assert!(matches!(
            JulianDate::from_calendar(&Calendar::date(2101, 1, 1)),
            Err(OrbitError::CalendarRange { year: 2101 })
        ));
        // Half a day before 1900 January 1 lands in 1899
        let before = JulianDate::from_jd(2415020.5 - 0.5);
        assert!(matches!(
            before.to_calendar(),
            Err(OrbitError::CalendarRange { year: 1899 })
        ));
        let after = JulianDate::from_calendar(&Calendar::new(2100, 12, 31, 23, 0, 0.0))
            .unwrap()
            .offset_minutes(120.0);
        assert!(matches!(
            after.to_calendar(),
            Err(OrbitError::CalendarRange { year: 2101 })
        ));
    }

    #[test]
    fn test_invalid_fields() {
        for calendar in [
            Calendar::date(2001, 2, 29),
            Calendar::date(2000, 13, 1),
            Calendar::date(2000, 4, 31),
            Calendar::new(2000, 1, 1, 24, 0, 0.0),
            Calendar::new(2000, 1, 1, 0, 60, 0.0),
            Calendar::new(2000, 1, 1, 0, 0, -1.0),
        ] {
            assert!(matches!(
                JulianDate::from_calendar(&calendar),
                Err(OrbitError::InvalidCalendar(_))
            ));
        }
    }

    #[test]
    fn test_day_of_year() {
        // Epoch of a TLE for Terra: 19289.08873013
        let calendar = Calendar::from_day_of_year(2019, 289.08873013).unwrap();
        assert_eq!(
            (calendar.month, calendar.day, calendar.hour, calendar.minute),
            (10, 16, 2, 7)
        );
        assert_abs_diff_eq!(calendar.second, 46.283232, epsilon = 1e-5);

        // Leap-year aware
        let leap = Calendar::from_day_of_year(2000, 60.5).unwrap();
        assert_eq!((leap.month, leap.day, leap.hour), (2, 29, 12));
        let common = Calendar::from_day_of_year(2001, 60.5).unwrap();
        assert_eq!((common.month, common.day, common.hour), (3, 1, 12));

        assert!(Calendar::from_day_of_year(2001, 366.5).is_err());
        assert!(Calendar::from_day_of_year(2001, 0.5).is_err());
    }

    #[test]
    fn test_datetime_round_trip() {
        let datetime = NaiveDate::from_ymd_opt(2019, 10, 16)
            .unwrap()
            .and_hms_milli_opt(2, 7, 46, 283)
            .unwrap();
        let back = JulianDate::from_datetime(&datetime)
            .unwrap()
            .to_datetime()
            .unwrap();
        let drift = (back - datetime).num_microseconds().unwrap();
        assert!(drift.abs() <= 10, "drifted by {} us", drift);
    }
}
