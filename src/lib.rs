pub mod attendee;
pub mod busy;
pub mod error;
pub mod event;
pub mod gaps;
pub mod query;
pub mod sort;
pub mod time;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::QueryError;
pub use event::{Event, MeetingRequest};
pub use query::{FindMeetingQuery, RelaxationPolicy};
pub use time::TimeRange;
