use crate::busy::BusyInterval;
use crate::error::QueryError;
use crate::time::{TimeRange, MINUTES_PER_DAY, START_OF_DAY};
use log::trace;

pub trait FreeGaps {
    fn free_gaps(self, duration: u16) -> Result<Vec<TimeRange>, QueryError>;
}

impl<'a, T> FreeGaps for T
where
    T: Iterator<Item = &'a BusyInterval>,
{
    /// Self is busy time ordered by start. Intervals may overlap one another,
    /// as they do once two tiers are merged.
    /// Returns the free ranges of the day, in order, that are at least
    /// `duration` minutes long, including those before the first and after
    /// the last busy interval.
    ///
    /// # Errors
    /// `QueryError::OutOfOrder` if an interval starts before its predecessor.
    ///
    /// # Examples
    /// ```
    /// use freizeit_libs::busy::BusyInterval;
    /// use freizeit_libs::gaps::FreeGaps;
    /// use freizeit_libs::time::TimeRange;
    ///
    /// let busy = vec![BusyInterval(60, 90), BusyInterval(100, 200)];
    ///
    /// assert_eq!(
    ///     busy.iter().free_gaps(30),
    ///     Ok(vec![
    ///         TimeRange::from_start_end(0, 60, false),
    ///         TimeRange::from_start_end(200, 1440, false),
    ///     ])
    /// );
    /// ```
    fn free_gaps(self, duration: u16) -> Result<Vec<TimeRange>, QueryError> {
        let mut gaps = Vec::new();
        let mut previous_start = START_OF_DAY;
        let mut previous_end = START_OF_DAY;

        let push_gap = |gaps: &mut Vec<TimeRange>, from: u16, until: u16| {
            if until > from && until - from >= duration {
                gaps.push(TimeRange::from_start_duration(from, until - from));
            }
        };

        for &busy in self {
            if busy.start() < previous_start {
                return Err(QueryError::OutOfOrder {
                    previous: previous_start,
                    next: busy.start(),
                });
            }

            push_gap(&mut gaps, previous_end, busy.start());
            previous_start = busy.start();
            previous_end = previous_end.max(busy.end());
        }

        push_gap(&mut gaps, previous_end, MINUTES_PER_DAY);
        trace!("{} gap(s) of at least {} minutes", gaps.len(), duration);

        Ok(gaps)
    }
}
