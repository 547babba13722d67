//! Elapsed-time rendering for notification titles.

use std::time::Duration;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Formats a number of seconds as `HH:MM:SS`.
///
/// Hours are padded to two digits but never wrap, so 100 hours renders as
/// `100:00:00`. Fractional seconds are rounded to the nearest whole second
/// before splitting, which keeps `59.6` from rendering as `00:00:60`.
pub fn format_hms(secs: f64) -> String {
    let total = secs.round() as u64;
    let hours = total / SECS_PER_HOUR;
    let minutes = (total % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = total % SECS_PER_MINUTE;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

pub fn format_hms_duration(duration: Duration) -> String {
    format_hms(duration.as_secs_f64())
}

/// Formats a duration as `H:MM:SS`, with a `.ffffff` microsecond suffix when
/// the sub-second part is non-zero and a `N day(s), ` prefix past 24 hours.
///
/// ```
/// use std::time::Duration;
/// use pushwrappers::duration::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::from_millis(1500)), "0:00:01.500000");
/// assert_eq!(format_elapsed(Duration::from_secs(90_000)), "1 day, 1:00:00");
/// ```
pub fn format_elapsed(duration: Duration) -> String {
    let total = duration.as_secs();
    let days = total / SECS_PER_DAY;
    let rem = total % SECS_PER_DAY;
    let hours = rem / SECS_PER_HOUR;
    let minutes = (rem % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = rem % SECS_PER_MINUTE;
    let micros = duration.subsec_micros();

    let mut out = String::new();
    if days > 0 {
        let unit = if days == 1 { "day" } else { "days" };
        out.push_str(&format!("{days} {unit}, "));
    }
    out.push_str(&format!("{hours}:{minutes:02}:{seconds:02}"));
    if micros != 0 {
        out.push_str(&format!(".{micros:06}"));
    }
    out
}
