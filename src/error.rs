use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum QueryError {
    #[error("Intervals are not in order. A start of {next} followed a start of {previous}")]
    OutOfOrder { previous: u16, next: u16 },
    #[error("Invalid TimeRange found. Expected start <= end <= 1440, got [{start}, {end})")]
    InvalidTimeRange { start: u16, end: u16 },
}
