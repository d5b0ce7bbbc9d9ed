use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

use crate::structures::Error;

pub trait CancellableTrait<A: Future> {
  /// Resolves to `Err(Error::Cancelled())` as soon as `token` fires, dropping the wrapped future.
  fn cancellable(self, token: &CancellationToken) -> Cancellable<A>;
}

impl<A: Future> CancellableTrait<A> for A {
  fn cancellable(self, token: &CancellationToken) -> Cancellable<A> {
    Cancellable {
      a: Box::pin(self),
      cancelled: Box::pin(token.clone().cancelled_owned()),
    }
  }
}

pub struct Cancellable<A: Future> {
  a: Pin<Box<A>>,
  cancelled: Pin<Box<WaitForCancellationFutureOwned>>,
}

impl<A: Future> Future for Cancellable<A> {
  type Output = Result<A::Output, Error>;

  fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    if self.cancelled.as_mut().poll(cx).is_ready() {
      return Poll::Ready(Err(Error::Cancelled()));
    }
    self.a.as_mut().poll(cx).map(Ok)
  }
}
