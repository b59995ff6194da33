//! Time source for the `date` command.

use time::macros::format_description;
use time::OffsetDateTime;

use crate::error::CommandError;

pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock in the local offset, falling back to UTC when the offset
/// cannot be determined.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// `Sun Oct 18 2026 14:03:09 GMT+0200`
pub fn format_date(moment: OffsetDateTime) -> Result<String, CommandError> {
    let format = format_description!(
        "[weekday repr:short] [month repr:short] [day] [year] [hour]:[minute]:[second] GMT[offset_hour sign:mandatory][offset_minute]"
    );
    Ok(moment.format(format)?)
}

#[cfg(test)]
mod tests {
    use super::{format_date, Clock, FixedClock};
    use time::macros::datetime;

    #[test]
    fn formats_like_a_browser_date_string() {
        let clock = FixedClock(datetime!(2026-10-18 14:03:09 +02:00));
        assert_eq!(
            format_date(clock.now()).expect("format"),
            "Sun Oct 18 2026 14:03:09 GMT+0200"
        );
    }

    #[test]
    fn negative_offsets_and_single_digit_days() {
        let moment = datetime!(2025-03-04 07:05:00 -05:30);
        assert_eq!(
            format_date(moment).expect("format"),
            "Tue Mar 04 2025 07:05:00 GMT-0530"
        );
    }
}
