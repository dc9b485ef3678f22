//! Spreadsheet serial numbers: days since 1899-12-30, time as the
//! fractional part of a day.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

fn epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
}

pub fn date_to_serial(d: NaiveDate) -> Option<f64> {
    Some((d - epoch()?).num_days() as f64)
}

pub fn time_to_serial(t: NaiveTime) -> f64 {
    t.num_seconds_from_midnight() as f64 / 86_400.0
}

/// Parse a serial day number (`"45352"`, `"45352.5"`) into a date.
/// Values outside 1900-01-01 ..= 9999-12-31 are rejected.
pub fn serial_to_date(s: &str) -> Option<NaiveDate> {
    let serial: f64 = s.trim().parse().ok()?;
    if !(1.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    epoch()?.checked_add_signed(Duration::days(serial.trunc() as i64))
}

/// Date and time of a serial value (`45352.375` → 2024-03-01 09:00:00),
/// rounded to the second.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !(0.0..2_958_466.0).contains(&serial) {
        return None;
    }
    let days = Duration::days(serial.trunc() as i64);
    let seconds = Duration::seconds((serial.fract() * 86_400.0).round() as i64);
    epoch()?.and_hms_opt(0, 0, 0)?.checked_add_signed(days + seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serials_match_spreadsheet_convention() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(date_to_serial(d), Some(45352.0));
        assert_eq!(serial_to_date("45352"), Some(d));
        assert_eq!(serial_to_date("45352.75"), Some(d));
        assert_eq!(serial_to_date("0"), None);
        assert_eq!(
            time_to_serial(NaiveTime::from_hms_opt(18, 0, 0).unwrap()),
            0.75
        );
        assert_eq!(
            serial_to_datetime(45352.375),
            d.and_hms_opt(9, 0, 0)
        );
        // 09:30 is not exact in binary
        assert_eq!(
            serial_to_datetime(time_to_serial(NaiveTime::from_hms_opt(9, 30, 0).unwrap()))
                .map(|dt| dt.time()),
            NaiveTime::from_hms_opt(9, 30, 0)
        );
    }
}
