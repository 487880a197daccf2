//! Jitter-tolerant reminder time matching
//!
//! The scheduler polls on a coarse fixed interval, so a tick can land one
//! minute early or late relative to a reminder's target minute, including
//! across an hour rollover. Rather than enumerating the boundary cases,
//! both times are flattened to minutes-of-day and compared by circular
//! distance on the 1440-minute day. The circle means the midnight boundary
//! is tolerated like any other: a reminder at 00:00 fires on a 23:59 tick
//! and vice versa.

/// How far, in minutes, a tick may drift from the reminder's target minute
/// and still fire. One minute covers a single tick of skew either way.
pub const TOLERANCE_MINUTES: u32 = 1;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Whether a reminder configured for `(reminder_hour, reminder_minute)`
/// should fire on a tick observed at `(current_hour, current_minute)`.
///
/// Pure over its four integers. Out-of-range inputs never match.
pub fn matches(
    reminder_hour: u32,
    reminder_minute: u32,
    current_hour: u32,
    current_minute: u32,
) -> bool {
    if reminder_hour >= 24 || current_hour >= 24 || reminder_minute >= 60 || current_minute >= 60
    {
        return false;
    }
    let target = reminder_hour * 60 + reminder_minute;
    let now = current_hour * 60 + current_minute;
    circular_distance(target, now) <= TOLERANCE_MINUTES
}

/// Shortest distance between two minutes-of-day on the 24h circle.
fn circular_distance(a: u32, b: u32) -> u32 {
    let direct = a.abs_diff(b);
    direct.min(MINUTES_PER_DAY - direct)
}
