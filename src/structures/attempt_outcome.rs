use crate::structures::Error;

/// Result of a single attempt at installing one file.
#[derive(Debug)]
pub enum AttemptOutcome {
  Success,
  RetryableFailure(Error),
  FatalFailure(Error),
}
