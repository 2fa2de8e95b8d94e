//! Calendar arithmetic for the dates embedded in GRAZ, SWARM and COST-G filenames
//!
//! Leap years use the simple `year % 4 == 0` rule. The missions these files
//! come from all fall between 1901 and 2099, where that rule agrees with the
//! Gregorian calendar.

const DAYS_PER_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const DAYS_PER_MONTH_LEAP: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Temporal metadata derived from a model filename
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelEpoch {
    /// Mid-period date in decimal years
    pub time: f64,
    /// Julian date of the period start
    pub start: f64,
    /// Julian date of the period end
    pub end: f64,
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0
}

pub fn days_per_year(year: i32) -> f64 {
    if is_leap_year(year) {
        366.0
    } else {
        365.0
    }
}

pub fn days_per_month(year: i32) -> &'static [u32; 12] {
    if is_leap_year(year) {
        &DAYS_PER_MONTH_LEAP
    } else {
        &DAYS_PER_MONTH
    }
}

/// First and last day-of-year of `month` (1-based)
pub fn month_day_range(year: i32, month: u32) -> (u32, u32) {
    let dpm = days_per_month(year);
    let before: u32 = dpm.iter().take(month.saturating_sub(1) as usize).sum();
    let through: u32 = dpm.iter().take(month as usize).sum();
    (before + 1, through)
}

/// Julian date at 0h of day-of-year `day` in `year`
///
/// Fliegel and Van Flandern style closed form evaluated with January as the
/// month and the day-of-year as the day of month, which rolls over correctly
/// through the rest of the year.
pub fn julian_day(year: f64, day: f64) -> f64 {
    367.0 * year - (7.0 * year / 4.0).floor()
        - (3.0 * (((year - 8.0 / 7.0) / 100.0).floor() + 1.0) / 4.0).floor()
        + (275.0_f64 / 9.0).floor()
        + day
        + 1_721_028.5
}

/// Epoch of a monthly solution (GRAZ and SWARM naming)
pub fn monthly_epoch(year: i32, month: u32) -> ModelEpoch {
    let (start_day, end_day) = month_day_range(year, month);
    let (start_day, end_day) = (f64::from(start_day), f64::from(end_day));
    let mid_day = (start_day + end_day) / 2.0;
    let year_f = f64::from(year);

    ModelEpoch {
        time: year_f + mid_day / days_per_year(year),
        start: julian_day(year_f, start_day),
        end: julian_day(year_f, end_day),
    }
}

/// Epoch of a solution spanning two (year, day-of-year) pairs (COST-G naming)
///
/// The mid-point uses the end day made continuous across at most one year
/// boundary; the Julian dates use the literal pairs.
pub fn day_span_epoch(start_year: i32, start_day: u32, end_year: i32, end_day: u32) -> ModelEpoch {
    let dpy = days_per_year(start_year);
    let (start_day, end_day) = (f64::from(start_day), f64::from(end_day));
    let end_cyclic = f64::from(end_year - start_year) * dpy + end_day;
    let mid_day = (start_day + end_cyclic) / 2.0;

    ModelEpoch {
        time: f64::from(start_year) + mid_day / dpy,
        start: julian_day(f64::from(start_year), start_day),
        end: julian_day(f64::from(end_year), end_day),
    }
}
