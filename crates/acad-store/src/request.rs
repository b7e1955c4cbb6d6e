//! Latest-wins requests for debounced searches.
//!
//! Starting a request aborts the one still in flight, and a completed request
//! only yields its result if no newer request was started meanwhile. A slow,
//! stale response can therefore never overwrite a newer one.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

use crate::error::{Result, StoreError};

#[derive(Debug, Default)]
pub struct SupersedingRequest {
    latest: Arc<AtomicU64>,
    in_flight: Option<AbortHandle>,
    debounce: Duration,
}

impl SupersedingRequest {
    pub fn new(debounce: Duration) -> Self {
        Self {
            latest: Arc::new(AtomicU64::new(0)),
            in_flight: None,
            debounce,
        }
    }

    /// Spawn `request` after the debounce delay, aborting any earlier one.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start<F, T>(&mut self, request: F) -> PendingRequest<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
            debug!("Aborted superseded request");
        }

        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let debounce = self.debounce;
        let handle = tokio::spawn(async move {
            if !debounce.is_zero() {
                tokio::time::sleep(debounce).await;
            }
            request.await
        });
        self.in_flight = Some(handle.abort_handle());

        PendingRequest {
            handle,
            generation,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Abort the in-flight request, if any, without starting another.
    pub fn cancel(&mut self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }
    }
}

impl Drop for SupersedingRequest {
    fn drop(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }
    }
}

/// Handle to one started request.
#[derive(Debug)]
pub struct PendingRequest<T> {
    handle: JoinHandle<T>,
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl<T> PendingRequest<T> {
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }

    /// Wait for the result.
    ///
    /// # Errors
    ///
    /// [`StoreError::Cancelled`] when a newer request was started, even if
    /// this one managed to finish first.
    pub async fn wait(self) -> Result<T> {
        let output = self.handle.await.map_err(|e| {
            if e.is_cancelled() {
                StoreError::Cancelled
            } else {
                StoreError::Task(e.to_string())
            }
        })?;
        if self.latest.load(Ordering::SeqCst) != self.generation {
            debug!(generation = self.generation, "Discarding stale response");
            return Err(StoreError::Cancelled);
        }
        Ok(output)
    }
}
