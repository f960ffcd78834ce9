//! Calendar bin shapes
//!
//! A bin is the half-open interval `[floor(t), ceil(t))` containing a
//! timestamp. A timestamp sitting exactly on a boundary starts a new bin, so
//! `ceil` is always one full unit after `floor`.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};

/// Width of the calendar buckets a binned rule thins into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinShape {
    /// One bin per calendar day
    Daily,
    /// One bin per week, starting at midnight of the given weekday
    Weekly(Weekday),
    /// One bin per calendar month
    Monthly,
    /// One bin per calendar year
    Yearly,
}

impl BinShape {
    /// Weekly bins starting on Saturday
    pub fn weekly() -> Self {
        Self::Weekly(Weekday::Sat)
    }

    /// Start of the bin containing `t`
    pub fn floor(&self, t: NaiveDateTime) -> NaiveDateTime {
        let date = t.date();
        let back = match self {
            Self::Daily => 0,
            Self::Weekly(weekday) => days_since(date.weekday(), *weekday),
            Self::Monthly => i64::from(date.day0()),
            Self::Yearly => i64::from(date.ordinal0()),
        };
        // Clamps at the start of the representable calendar.
        let start = date
            .checked_sub_signed(TimeDelta::days(back))
            .unwrap_or(NaiveDate::MIN);
        midnight(start)
    }

    /// End of the bin containing `t` (the next boundary strictly after the floor)
    ///
    /// `None` when that boundary lies past the end of the representable
    /// calendar.
    pub fn ceil(&self, t: NaiveDateTime) -> Option<NaiveDateTime> {
        let start = self.floor(t).date();
        let end = match self {
            Self::Daily => start.succ_opt(),
            Self::Weekly(_) => start.checked_add_signed(TimeDelta::days(7)),
            Self::Monthly => start.checked_add_months(Months::new(1)),
            Self::Yearly => start.checked_add_months(Months::new(12)),
        };
        end.map(midnight)
    }

    /// Nearest boundary of the bin containing `t`, and the distance to it
    ///
    /// The ceiling wins only when strictly closer; equal distances go to the
    /// floor, as does a bin with no representable ceiling.
    pub fn nearest_boundary(&self, t: NaiveDateTime) -> (NaiveDateTime, TimeDelta) {
        let floor = self.floor(t);
        let to_floor = t - floor;

        match self.ceil(t) {
            Some(ceil) if ceil - t < to_floor => (ceil, ceil - t),
            _ => (floor, to_floor),
        }
    }

    /// Short name used in rule labels
    pub fn name(&self) -> String {
        match self {
            Self::Daily => "daily".to_string(),
            Self::Weekly(weekday) => format!("weekly({})", weekday),
            Self::Monthly => "monthly".to_string(),
            Self::Yearly => "yearly".to_string(),
        }
    }
}

impl fmt::Display for BinShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    NaiveDateTime::new(date, NaiveTime::MIN)
}

/// Days from the most recent `start` weekday back to `day` (0..=6)
fn days_since(day: Weekday, start: Weekday) -> i64 {
    let day = i64::from(day.num_days_from_monday());
    let start = i64::from(start.num_days_from_monday());
    (day - start).rem_euclid(7)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_daily_bounds() {
        let t = dt(2014, 7, 4, 12, 43);
        assert_eq!(BinShape::Daily.floor(t), dt(2014, 7, 4, 0, 0));
        assert_eq!(BinShape::Daily.ceil(t), Some(dt(2014, 7, 5, 0, 0)));
    }

    #[test]
    fn test_weekly_bounds_saturday() {
        // 2014-07-04 is a Friday
        let t = dt(2014, 7, 4, 8, 0);
        assert_eq!(BinShape::weekly().floor(t), dt(2014, 6, 28, 0, 0));
        assert_eq!(BinShape::weekly().ceil(t), Some(dt(2014, 7, 5, 0, 0)));

        // On the weekday itself the bin starts that midnight
        let sat = dt(2014, 7, 5, 8, 0);
        assert_eq!(BinShape::weekly().floor(sat), dt(2014, 7, 5, 0, 0));
        assert_eq!(BinShape::weekly().ceil(sat), Some(dt(2014, 7, 12, 0, 0)));
    }

    #[test]
    fn test_weekly_bounds_monday() {
        let shape = BinShape::Weekly(Weekday::Mon);
        let t = dt(2014, 7, 6, 23, 59); // Sunday
        assert_eq!(shape.floor(t), dt(2014, 6, 30, 0, 0));
        assert_eq!(shape.ceil(t), Some(dt(2014, 7, 7, 0, 0)));
    }

    #[test]
    fn test_monthly_bounds_with_year_rollover() {
        let t = dt(2013, 12, 15, 6, 0);
        assert_eq!(BinShape::Monthly.floor(t), dt(2013, 12, 1, 0, 0));
        assert_eq!(BinShape::Monthly.ceil(t), Some(dt(2014, 1, 1, 0, 0)));

        let feb = dt(2012, 2, 29, 6, 0);
        assert_eq!(BinShape::Monthly.floor(feb), dt(2012, 2, 1, 0, 0));
        assert_eq!(BinShape::Monthly.ceil(feb), Some(dt(2012, 3, 1, 0, 0)));
    }

    #[test]
    fn test_yearly_bounds() {
        let t = dt(2012, 6, 1, 8, 0);
        assert_eq!(BinShape::Yearly.floor(t), dt(2012, 1, 1, 0, 0));
        assert_eq!(BinShape::Yearly.ceil(t), Some(dt(2013, 1, 1, 0, 0)));
    }

    #[test]
    fn test_boundary_timestamp_starts_new_bin() {
        let shapes = [
            (BinShape::Daily, dt(2014, 7, 4, 0, 0)),
            (BinShape::weekly(), dt(2014, 7, 5, 0, 0)),
            (BinShape::Monthly, dt(2014, 7, 1, 0, 0)),
            (BinShape::Yearly, dt(2014, 1, 1, 0, 0)),
        ];
        for (shape, t) in shapes {
            assert_eq!(shape.floor(t), t, "{shape}");
            assert!(shape.ceil(t).is_some_and(|c| c > t), "{shape}");
        }
    }

    #[test]
    fn test_nearest_boundary() {
        let (edge, delta) = BinShape::Daily.nearest_boundary(dt(2014, 7, 4, 8, 0));
        assert_eq!(edge, dt(2014, 7, 4, 0, 0));
        assert_eq!(delta, TimeDelta::hours(8));

        let (edge, delta) = BinShape::Daily.nearest_boundary(dt(2014, 7, 4, 20, 0));
        assert_eq!(edge, dt(2014, 7, 5, 0, 0));
        assert_eq!(delta, TimeDelta::hours(4));
    }

    #[test]
    fn test_nearest_boundary_tie_goes_to_floor() {
        let (edge, delta) = BinShape::Daily.nearest_boundary(dt(2014, 7, 4, 12, 0));
        assert_eq!(edge, dt(2014, 7, 4, 0, 0));
        assert_eq!(delta, TimeDelta::hours(12));
    }

    #[test]
    fn test_no_ceil_past_calendar_end() {
        let t = NaiveDateTime::new(NaiveDate::MAX, NaiveTime::MIN);
        assert_eq!(BinShape::Daily.ceil(t), None);
        assert_eq!(BinShape::Yearly.ceil(t), None);
    }

    #[test]
    fn test_nearest_boundary_at_calendar_end_uses_floor() {
        let t = NaiveDate::MAX.and_hms_opt(12, 0, 0).unwrap();
        let shapes = [
            BinShape::Daily,
            BinShape::weekly(),
            BinShape::Weekly(Weekday::Mon),
            BinShape::Monthly,
            BinShape::Yearly,
        ];
        for shape in shapes {
            let floor = shape.floor(t);
            let (edge, delta) = shape.nearest_boundary(t);
            assert_eq!(edge, floor, "{shape}");
            assert_eq!(delta, t - floor, "{shape}");
            assert!(delta >= TimeDelta::zero(), "{shape}");
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(BinShape::Daily.name(), "daily");
        assert_eq!(BinShape::weekly().name(), "weekly(Sat)");
        assert_eq!(BinShape::Yearly.to_string(), "yearly");
    }
}
