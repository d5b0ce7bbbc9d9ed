use crate::structures::{AttemptOutcome, Error};

impl From<Result<(), Error>> for AttemptOutcome {
  fn from(result: Result<(), Error>) -> Self {
    match result {
      Ok(()) => Self::Success,
      Err(error) if error.is_retryable() => Self::RetryableFailure(error),
      Err(error) => Self::FatalFailure(error),
    }
  }
}
