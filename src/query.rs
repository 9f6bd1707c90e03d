use crate::attendee::AttendeeFilter;
use crate::busy::{BusyInterval, BusyTimes};
use crate::error::QueryError;
use crate::event::{Event, MeetingRequest};
use crate::gaps::FreeGaps;
use crate::sort::{include_if, merge_sort};
use crate::time::{TimeRange, MINUTES_PER_DAY, WHOLE_DAY};
use itertools::Itertools;
use log::{debug, trace};
use num::ToPrimitive;

/// What to fall back on when no slot suits every attendee.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RelaxationPolicy {
    /// Drop all optional attendees at once and answer for the mandatory ones.
    MandatoryFallback,
    /// Keep as many optional attendees as possible before dropping all of
    /// them. Subsets are tried from the largest down, so the cost grows
    /// exponentially with the number of optional attendees.
    MostOptionalAttendees,
}

impl Default for RelaxationPolicy {
    fn default() -> Self {
        RelaxationPolicy::MandatoryFallback
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct FindMeetingQuery {
    policy: RelaxationPolicy,
}

impl FindMeetingQuery {
    pub fn new() -> FindMeetingQuery {
        FindMeetingQuery::default()
    }

    pub fn with_policy(mut self, policy: RelaxationPolicy) -> FindMeetingQuery {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> RelaxationPolicy {
        self.policy
    }

    /// Finds every range of the day long enough for `request`.
    ///
    /// Slots suiting mandatory and optional attendees alike are preferred.
    /// When there are none the optional attendees are relaxed according to
    /// the policy, and slots for the mandatory attendees alone are returned
    /// if any of them has something on the calendar. A slot never clashes
    /// with a mandatory attendee.
    ///
    /// A duration of zero fits the whole day; a negative one, or one longer
    /// than a day, fits nowhere.
    ///
    /// # Errors
    /// `QueryError::OutOfOrder` only if busy time was not sorted internally.
    ///
    /// # Examples
    /// ```
    /// use freizeit_libs::event::{Event, MeetingRequest};
    /// use freizeit_libs::query::FindMeetingQuery;
    /// use freizeit_libs::time::TimeRange;
    ///
    /// let events = vec![
    ///     Event::new("1", "dentist", vec!["alice"], TimeRange::from_start_end(60, 90, false)),
    ///     Event::new("2", "gym", vec!["bob"], TimeRange::from_start_end(100, 200, false)),
    /// ];
    /// let request = MeetingRequest::new(vec!["alice"], 30).with_optional_attendees(vec!["bob"]);
    ///
    /// assert_eq!(
    ///     FindMeetingQuery::new().query(&events, &request),
    ///     Ok(vec![
    ///         TimeRange::from_start_end(0, 60, false),
    ///         TimeRange::from_start_end(200, 1440, false),
    ///     ])
    /// );
    /// ```
    pub fn query<'a, I>(&self, events: I, request: &MeetingRequest) -> Result<Vec<TimeRange>, QueryError>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let duration = match request.duration.to_u16() {
            Some(0) => {
                debug!("Meeting takes no time, the whole day is free");
                return Ok(vec![WHOLE_DAY]);
            }
            Some(duration) if duration <= MINUTES_PER_DAY => duration,
            _ => {
                debug!("Meeting duration {} does not fit in a day", request.duration);
                return Ok(vec![]);
            }
        };

        let events: Vec<&Event> = events.into_iter().collect();

        let mandatory_busy = tier_busy(&events, &AttendeeFilter::new(&request.attendees))?;
        let optional_busy = tier_busy(&events, &AttendeeFilter::new(&request.optional_attendees))?;
        trace!(
            "{} mandatory and {} optional busy interval(s)",
            mandatory_busy.len(),
            optional_busy.len()
        );

        let combined_free = combined_gaps(&mandatory_busy, &optional_busy, duration)?;
        if !combined_free.is_empty() {
            debug!("Found {} slot(s) for every attendee", combined_free.len());
            return Ok(combined_free);
        }

        if self.policy == RelaxationPolicy::MostOptionalAttendees {
            if let Some(free) = most_optional_attendees(&events, request, &mandatory_busy, duration)? {
                return Ok(free);
            }
        }

        if !mandatory_busy.is_empty() {
            let mandatory_free = mandatory_busy.iter().free_gaps(duration)?;
            if !mandatory_free.is_empty() {
                debug!(
                    "Found {} slot(s) for mandatory attendees only",
                    mandatory_free.len()
                );
                return Ok(mandatory_free);
            }
        }

        debug!("No slot of {} minutes found", duration);
        Ok(vec![])
    }

    /// Answers each request against the same events.
    /// With the `rayon` feature the requests are answered in parallel.
    pub fn query_all(
        &self,
        events: &[Event],
        requests: &[MeetingRequest],
    ) -> Vec<Result<Vec<TimeRange>, QueryError>> {
        #[cfg(feature = "rayon")]
        use rayon::prelude::*;

        #[cfg(feature = "rayon")]
        let requests = requests.par_iter();
        #[cfg(not(feature = "rayon"))]
        let requests = requests.iter();

        requests
            .map(|request| self.query(events, request))
            .collect()
    }
}

fn tier_busy(events: &[&Event], filter: &AttendeeFilter) -> Result<Vec<BusyInterval>, QueryError> {
    include_if(events.iter().copied(), |event| filter.matches(event))
        .into_iter()
        .busy_times()
}

fn combined_gaps(
    first: &[BusyInterval],
    second: &[BusyInterval],
    duration: u16,
) -> Result<Vec<TimeRange>, QueryError> {
    let mut combined = Vec::with_capacity(first.len() + second.len());
    combined.extend_from_slice(first);
    combined.extend_from_slice(second);
    merge_sort(&mut combined);

    combined.iter().free_gaps(duration)
}

/// Largest subset of the optional attendees that still leaves a slot, tried
/// from one attendee fewer than requested down to a single one. Among
/// subsets of the same size the one leaving the most free minutes wins, the
/// first in id order on ties.
fn most_optional_attendees(
    events: &[&Event],
    request: &MeetingRequest,
    mandatory_busy: &[BusyInterval],
    duration: u16,
) -> Result<Option<Vec<TimeRange>>, QueryError> {
    let optional = request.optional_attendees.iter().collect_vec();
    if optional.len() < 2 {
        return Ok(None);
    }

    let attendee_busy = optional
        .iter()
        .map(|&attendee| tier_busy(events, &AttendeeFilter::new(Some(attendee))))
        .collect::<Result<Vec<_>, _>>()?;

    for size in (1..optional.len()).rev() {
        let mut best: Option<(u32, Vec<usize>, Vec<TimeRange>)> = None;

        for subset in (0..optional.len()).combinations(size) {
            let subset_busy = subset
                .iter()
                .flat_map(|&index| attendee_busy[index].iter().copied())
                .collect_vec();
            let free = combined_gaps(mandatory_busy, &subset_busy, duration)?;
            if free.is_empty() {
                continue;
            }

            let minutes: u32 = free.iter().map(|time| u32::from(time.duration())).sum();
            if best.as_ref().map_or(true, |(most, _, _)| minutes > *most) {
                best = Some((minutes, subset, free));
            }
        }

        if let Some((_, subset, free)) = best {
            debug!(
                "Found {} slot(s) for optional attendees {:?}",
                free.len(),
                subset.iter().map(|&index| optional[index]).collect_vec()
            );
            return Ok(Some(free));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u16, end: u16) -> TimeRange {
        TimeRange::from_start_end(start, end, false)
    }

    fn event(id: &str, attendees: Vec<&str>, when: TimeRange) -> Event {
        Event::new(id, &format!("Event {}", id), attendees, when)
    }

    #[test]
    fn duration_bounds() {
        let events = vec![event("1", vec!["A"], range(0, 1440))];
        let query = FindMeetingQuery::new();

        assert_eq!(
            query.query(&events, &MeetingRequest::new(vec!["A"], 0)),
            Ok(vec![WHOLE_DAY])
        );
        assert_eq!(
            query.query(&events, &MeetingRequest::new(vec!["B"], 1441)),
            Ok(vec![])
        );
        assert_eq!(
            query.query(&events, &MeetingRequest::new(vec!["B"], -1)),
            Ok(vec![])
        );
        assert_eq!(
            query.query(&events, &MeetingRequest::new(vec!["B"], i64::MAX)),
            Ok(vec![])
        );
        assert_eq!(
            query.query(&events, &MeetingRequest::new(vec!["B"], 1440)),
            Ok(vec![WHOLE_DAY])
        );
    }

    #[test]
    fn most_optional_attendees_keeps_the_larger_subset() {
        // B is busy all morning, C all afternoon, D not at all
        let events = vec![
            event("1", vec!["A"], range(0, 60)),
            event("2", vec!["B"], range(0, 720)),
            event("3", vec!["C"], range(720, 1440)),
        ];
        let request = MeetingRequest::new(vec!["A"], 60).with_optional_attendees(vec!["B", "C", "D"]);

        assert_eq!(
            FindMeetingQuery::new().query(&events, &request),
            Ok(vec![range(60, 1440)])
        );

        // {B, D} leaves 720..1440 and {C, D} leaves 60..720; the afternoon is longer
        assert_eq!(
            FindMeetingQuery::new()
                .with_policy(RelaxationPolicy::MostOptionalAttendees)
                .query(&events, &request),
            Ok(vec![range(720, 1440)])
        );
    }

    #[test]
    fn most_optional_attendees_breaks_ties_by_id() {
        let events = vec![
            event("1", vec!["B"], range(0, 720)),
            event("2", vec!["C"], range(720, 1440)),
        ];
        let request = MeetingRequest::new(Vec::<&str>::new(), 60).with_optional_attendees(vec!["B", "C"]);

        // {B} leaves the afternoon, {C} the morning: both 720 minutes long
        assert_eq!(
            FindMeetingQuery::new()
                .with_policy(RelaxationPolicy::MostOptionalAttendees)
                .query(&events, &request),
            Ok(vec![range(720, 1440)])
        );

        // Without relaxation nobody mandatory is busy, so nothing is offered
        assert_eq!(FindMeetingQuery::new().query(&events, &request), Ok(vec![]));
    }

    #[test]
    fn most_optional_attendees_falls_back_to_mandatory() {
        let events = vec![
            event("1", vec!["A"], range(0, 30)),
            event("2", vec!["B", "C"], range(30, 1440)),
        ];
        let request = MeetingRequest::new(vec!["A"], 30).with_optional_attendees(vec!["B", "C"]);

        assert_eq!(
            FindMeetingQuery::new()
                .with_policy(RelaxationPolicy::MostOptionalAttendees)
                .query(&events, &request),
            Ok(vec![range(30, 1440)])
        );
    }

    #[test]
    fn answers_many_requests() {
        let events = vec![event("1", vec!["A"], range(60, 90))];
        let requests = vec![
            MeetingRequest::new(vec!["A"], 30),
            MeetingRequest::new(vec!["A"], 0),
            MeetingRequest::new(vec!["A"], -5),
        ];

        assert_eq!(
            FindMeetingQuery::new().query_all(&events, &requests),
            vec![
                Ok(vec![range(0, 60), range(90, 1440)]),
                Ok(vec![WHOLE_DAY]),
                Ok(vec![]),
            ]
        );
    }
}
