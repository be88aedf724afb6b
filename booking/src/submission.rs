//! Submission of a reviewed booking to an external capability.
//!
//! The engine never assumes the submitter succeeds. It tracks one attempt
//! at a time in [`SubmissionStatus`] and leaves the draft untouched when an
//! attempt fails.

use crate::summary::BookingSubmission;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use garden_booking_core::environment::Clock;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use uuid::Uuid;

/// Acknowledgement returned by a successful submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    /// Identifier assigned by the submitter
    pub confirmation_id: Uuid,
    /// When the submitter accepted the booking
    pub submitted_at: NaiveDateTime,
}

/// Why a submission attempt failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The submitter refused the booking
    #[error("Booking rejected: {0}")]
    Rejected(String),

    /// The submitter could not be reached
    #[error("Booking service unavailable: {0}")]
    Unavailable(String),
}

/// External "submit booking" capability
#[async_trait]
pub trait BookingSubmitter: Send + Sync {
    /// Submit a reviewed booking
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError`] when the booking was not accepted.
    async fn submit(&self, booking: BookingSubmission) -> Result<SubmissionReceipt, SubmissionError>;
}

/// Submitter that logs the record and accepts it
#[derive(Clone)]
pub struct LoggingSubmitter {
    clock: Arc<dyn Clock>,
}

impl LoggingSubmitter {
    /// Create a submitter stamping receipts with `clock`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl BookingSubmitter for LoggingSubmitter {
    async fn submit(&self, booking: BookingSubmission) -> Result<SubmissionReceipt, SubmissionError> {
        let receipt = SubmissionReceipt {
            confirmation_id: Uuid::new_v4(),
            submitted_at: self.clock.now(),
        };
        tracing::info!(
            confirmation_id = %receipt.confirmation_id,
            service_type = %booking.service_type,
            date = %booking.date,
            time_slot = %booking.time_slot,
            total_price = booking.total_price,
            "Booking submitted"
        );
        Ok(receipt)
    }
}

/// In-memory submitter that keeps every accepted record
///
/// Can be switched to fail, which makes it useful for exercising retry paths.
#[derive(Clone)]
pub struct RecordingSubmitter {
    clock: Arc<dyn Clock>,
    inner: Arc<Mutex<Recorded>>,
}

#[derive(Default)]
struct Recorded {
    accepted: Vec<BookingSubmission>,
    attempts: usize,
    failure: Option<SubmissionError>,
}

impl RecordingSubmitter {
    /// Create a submitter that accepts everything
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            inner: Arc::new(Mutex::new(Recorded::default())),
        }
    }

    /// Fail every following attempt with `error`, or accept again with `None`
    pub fn fail_with(&self, error: Option<SubmissionError>) {
        self.lock().failure = error;
    }

    /// Records accepted so far
    #[must_use]
    pub fn accepted(&self) -> Vec<BookingSubmission> {
        self.lock().accepted.clone()
    }

    /// Number of attempts, accepted or not
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.lock().attempts
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl BookingSubmitter for RecordingSubmitter {
    async fn submit(&self, booking: BookingSubmission) -> Result<SubmissionReceipt, SubmissionError> {
        let mut recorded = self.lock();
        recorded.attempts += 1;
        if let Some(error) = recorded.failure.clone() {
            return Err(error);
        }
        recorded.accepted.push(booking);
        Ok(SubmissionReceipt {
            confirmation_id: Uuid::new_v4(),
            submitted_at: self.clock.now(),
        })
    }
}

/// Progress of the submission of the reviewed booking
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "camelCase")]
pub enum SubmissionStatus {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// An attempt is running
    InFlight,
    /// The booking was accepted
    Confirmed(SubmissionReceipt),
    /// The last attempt failed and may be retried
    Failed(String),
}

impl SubmissionStatus {
    /// Whether the draft must not change (attempt running or booking accepted)
    #[must_use]
    pub const fn locks_draft(&self) -> bool {
        matches!(self, Self::InFlight | Self::Confirmed(_))
    }

    /// Whether a new attempt may start
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        matches!(self, Self::Idle | Self::Failed(_))
    }

    /// Receipt of the accepted booking
    #[must_use]
    pub const fn receipt(&self) -> Option<&SubmissionReceipt> {
        match self {
            Self::Confirmed(receipt) => Some(receipt),
            Self::Idle | Self::InFlight | Self::Failed(_) => None,
        }
    }
}
