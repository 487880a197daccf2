//! Wall-clock conversion for the reminder scheduler
//!
//! Reminder times are stored as local wall-clock hours at a fixed offset
//! from UTC (`Config::local_utc_offset_hours`, default UTC-5). There is no
//! timezone database and no DST: the offset is a design constant of the
//! deployment.

use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};

/// Calendar date and local time parts for one scheduler tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickTime {
    /// UTC calendar date, `YYYY-MM-DD`. Task due dates are stored on the
    /// UTC calendar, so the date is deliberately not shifted.
    pub date: String,
    /// Hour of day after applying the fixed local offset.
    pub local_hour: u32,
    /// Minute of hour. The offset is whole hours, so this is the UTC minute.
    pub minute: u32,
}

/// Split an absolute instant into the parts the matcher compares against.
pub fn local_parts(instant: DateTime<Utc>, offset_hours: i32) -> TickTime {
    let local_hour = (instant.hour() as i32 + offset_hours).rem_euclid(24) as u32;
    TickTime {
        date: instant.format("%Y-%m-%d").to_string(),
        local_hour,
        minute: instant.minute(),
    }
}

/// Unix timestamp for a `YYYY-MM-DD` due date, anchored at local noon, for
/// Discord's `<t:...>` timestamp tokens. Noon keeps the rendered day stable
/// for viewers within a few hours of the configured offset.
pub fn due_date_epoch(date: &str, offset_hours: i32) -> Option<i64> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let noon_utc = Utc.from_utc_datetime(&day.and_hms_opt(12, 0, 0)?);
    Some(noon_utc.timestamp() - i64::from(offset_hours) * 3600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, h, m, 0).unwrap()
    }

    #[test]
    fn test_utc_afternoon_maps_to_local_morning() {
        let parts = local_parts(at(14, 30), -5);
        assert_eq!(parts.local_hour, 9);
        assert_eq!(parts.minute, 30);
        assert_eq!(parts.date, "2024-01-02");
    }

    #[test]
    fn test_utc_early_morning_wraps_to_previous_local_evening() {
        let parts = local_parts(at(3, 15), -5);
        assert_eq!(parts.local_hour, 22);
        assert_eq!(parts.minute, 15);
        // date stays on the UTC calendar
        assert_eq!(parts.date, "2024-01-02");
    }

    #[test]
    fn test_offset_is_configurable() {
        assert_eq!(local_parts(at(1, 0), -5).local_hour, 20);
        assert_eq!(local_parts(at(1, 0), 0).local_hour, 1);
        assert_eq!(local_parts(at(23, 0), 2).local_hour, 1);
    }

    #[test]
    fn test_date_is_zero_padded() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        assert_eq!(local_parts(instant, -5).date, "2024-03-07");
    }

    #[test]
    fn test_due_date_epoch_shifts_noon_by_offset() {
        // 2024-01-01T12:00:00Z is 1704110400; UTC-5 pushes the anchor +5h.
        assert_eq!(due_date_epoch("2024-01-01", -5), Some(1_704_110_400 + 5 * 3600));
        assert_eq!(due_date_epoch("2024-01-01", 0), Some(1_704_110_400));
    }

    #[test]
    fn test_due_date_epoch_rejects_garbage() {
        assert_eq!(due_date_epoch("not-a-date", -5), None);
        assert_eq!(due_date_epoch("2024-13-40", -5), None);
    }
}
