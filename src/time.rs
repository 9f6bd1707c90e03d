use crate::error::QueryError;
use core::cmp::Ordering;
use core::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use std::convert::TryFrom;

/// First minute of the day.
pub const START_OF_DAY: u16 = 0;
/// Last minute of the day. Ranges are half-open, so the day ends *after* it.
pub const END_OF_DAY: u16 = 1439;
pub const MINUTES_PER_DAY: u16 = END_OF_DAY + 1;

/// Half-open `[start, end)` range of minutes within a single day.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTimeRange"))]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TimeRange {
    start: u16,
    end: u16,
}

/// The range spanning every minute of the day.
pub const WHOLE_DAY: TimeRange = TimeRange {
    start: START_OF_DAY,
    end: MINUTES_PER_DAY,
};

impl TimeRange {
    /// Construct a TimeRange from a start and a length in minutes
    ///
    /// # Examples
    /// ```
    /// use freizeit_libs::time::TimeRange;
    ///
    /// let test = TimeRange::from_start_duration(60, 30);
    ///
    /// assert_eq!(test.start(), 60);
    /// assert_eq!(test.end(), 90);
    /// assert_eq!(test.duration(), 30);
    /// ```
    pub fn from_start_duration(start: u16, duration: u16) -> TimeRange {
        debug_assert!(start <= MINUTES_PER_DAY - duration.min(MINUTES_PER_DAY));
        TimeRange {
            start,
            end: start + duration,
        }
    }

    /// Construct a TimeRange from its two boundaries.
    /// When `inclusive` is set, `end` is the last minute *inside* the range.
    ///
    /// # Examples
    /// ```
    /// use freizeit_libs::time::{TimeRange, END_OF_DAY, START_OF_DAY, WHOLE_DAY};
    ///
    /// assert_eq!(TimeRange::from_start_end(START_OF_DAY, END_OF_DAY, true), WHOLE_DAY);
    /// assert_eq!(TimeRange::from_start_end(0, 30, false).duration(), 30);
    /// ```
    pub fn from_start_end(start: u16, end: u16, inclusive: bool) -> TimeRange {
        let end = if inclusive { end + 1 } else { end };
        debug_assert!(start <= end && end <= MINUTES_PER_DAY);
        TimeRange { start, end }
    }

    /// Checked counterpart of `from_start_end(start, end, false)`.
    pub fn try_new(start: u16, end: u16) -> Result<TimeRange, QueryError> {
        if start > end || end > MINUTES_PER_DAY {
            Err(QueryError::InvalidTimeRange { start, end })
        } else {
            Ok(TimeRange { start, end })
        }
    }

    pub fn start(self) -> u16 {
        self.start
    }

    /// Exclusive end of the range
    pub fn end(self) -> u16 {
        self.end
    }

    pub fn duration(self) -> u16 {
        self.end - self.start
    }

    pub fn contains_point(self, minute: u16) -> bool {
        self.start <= minute && minute < self.end
    }

    /// True if `other` lies entirely within this range.
    /// An empty range contains nothing, and an empty `other` is contained
    /// when its start point is.
    ///
    /// # Examples
    /// ```
    /// use freizeit_libs::time::TimeRange;
    ///
    /// let outer = TimeRange::from_start_end(0, 100, false);
    ///
    /// assert!(outer.contains(TimeRange::from_start_end(10, 100, false)));
    /// assert!(!outer.contains(TimeRange::from_start_end(10, 101, false)));
    /// assert!(!TimeRange::from_start_duration(5, 0).contains(TimeRange::from_start_duration(5, 0)));
    /// ```
    pub fn contains(self, other: TimeRange) -> bool {
        if self.duration() == 0 {
            return false;
        }

        if other.duration() == 0 {
            return self.contains_point(other.start);
        }

        self.contains_point(other.start) && self.contains_point(other.end - 1)
    }

    /// # Examples
    /// ```
    /// use freizeit_libs::time::TimeRange;
    ///
    /// let a = TimeRange::from_start_end(0, 60, false);
    /// let b = TimeRange::from_start_end(30, 90, false);
    /// let c = TimeRange::from_start_end(60, 90, false);
    ///
    /// assert!(a.overlaps(b));
    /// assert!(b.overlaps(a));
    /// // Touching is not overlapping
    /// assert!(!a.overlaps(c));
    /// ```
    pub fn overlaps(self, other: TimeRange) -> bool {
        self.contains_point(other.start) || other.contains_point(self.start)
    }
}

impl Ord for TimeRange {
    /// Ascending by start. When two ranges start together the one that ends
    /// later sorts first.
    fn cmp(&self, other: &Self) -> Ordering {
        match self.start.cmp(&other.start) {
            Ordering::Equal => other.end.cmp(&self.end),
            order => order,
        }
    }
}

impl PartialOrd for TimeRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawTimeRange {
    start: u16,
    end: u16,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTimeRange> for TimeRange {
    type Error = QueryError;

    fn try_from(raw: RawTimeRange) -> Result<Self, Self::Error> {
        TimeRange::try_new(raw.start, raw.end)
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for TimeRange {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let start = u.int_in_range(START_OF_DAY..=END_OF_DAY)?;
        let end = u.int_in_range(start..=MINUTES_PER_DAY)?;
        Ok(TimeRange { start, end })
    }
}
