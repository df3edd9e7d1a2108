mod errors;
#[cfg(test)]
mod tests;
mod timestamp;

pub use errors::TimestampError;
pub use timestamp::{hour_bucket, parse_timestamp};

pub type AccountId = String;
pub type TransactionId = String;
