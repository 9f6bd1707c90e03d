use crate::time::TimeRange;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Something already on the calendar of one or more attendees.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub attendees: BTreeSet<String>,
    pub when: TimeRange,
}

impl Event {
    pub fn new<I, S>(id: &str, name: &str, attendees: I, when: TimeRange) -> Event
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Event {
            id: id.to_string(),
            name: name.to_string(),
            attendees: attendees.into_iter().map(Into::into).collect(),
            when,
        }
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Event {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Event {
            id: u.arbitrary::<uuid::Uuid>()?.to_string(),
            name: u.arbitrary()?,
            attendees: arbitrary_attendees(u, 4)?,
            when: u.arbitrary()?,
        })
    }
}

/// Draws from a small pool of names so that attendees collide across events
#[cfg(feature = "arbitrary")]
fn arbitrary_attendees(
    u: &mut arbitrary::Unstructured<'_>,
    max: usize,
) -> arbitrary::Result<BTreeSet<String>> {
    let len = u.int_in_range(0..=max)?;
    let mut attendees = BTreeSet::new();
    for _ in 0..len {
        attendees.insert(format!("attendee-{}", u.int_in_range(0u8..=7)?));
    }
    Ok(attendees)
}

/// A meeting to find room for.
///
/// `duration` is in minutes. It is signed so that out-of-range requests can be
/// expressed and answered, rather than rejected at construction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MeetingRequest {
    pub attendees: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub optional_attendees: BTreeSet<String>,
    pub duration: i64,
}

impl MeetingRequest {
    /// Creates a request where every attendee is mandatory.
    ///
    /// # Examples
    /// ```
    /// use freizeit_libs::event::MeetingRequest;
    ///
    /// let request = MeetingRequest::new(vec!["alice", "bob"], 30)
    ///     .with_optional_attendees(vec!["carol"]);
    ///
    /// assert!(request.attendees.contains("alice"));
    /// assert!(request.optional_attendees.contains("carol"));
    /// assert_eq!(request.duration, 30);
    /// ```
    pub fn new<I, S>(attendees: I, duration: i64) -> MeetingRequest
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MeetingRequest {
            attendees: attendees.into_iter().map(Into::into).collect(),
            optional_attendees: BTreeSet::new(),
            duration,
        }
    }

    pub fn with_optional_attendees<I, S>(mut self, optional_attendees: I) -> MeetingRequest
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional_attendees
            .extend(optional_attendees.into_iter().map(Into::into));
        self
    }

    pub fn add_optional_attendee(&mut self, attendee: &str) {
        self.optional_attendees.insert(attendee.to_string());
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for MeetingRequest {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(MeetingRequest {
            attendees: arbitrary_attendees(u, 3)?,
            optional_attendees: arbitrary_attendees(u, 3)?,
            duration: u.int_in_range(-10..=1500)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_optional_attendees() {
        let mut request = MeetingRequest::new(vec!["A"], 30);
        request.add_optional_attendee("C");
        request.add_optional_attendee("B");
        request.add_optional_attendee("C");

        assert_eq!(
            request.optional_attendees.iter().collect::<Vec<_>>(),
            vec!["B", "C"]
        );
        assert_eq!(request.attendees.len(), 1);
    }
}
