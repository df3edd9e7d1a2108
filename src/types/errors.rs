use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("Timestamp error: Value is an empty string")]
    Empty,
    #[error("Timestamp error: [{value}] is not an ISO-8601 instant")]
    InvalidFormat {
        value: String
    }
}
