//! # Garden Booking
//!
//! Booking workflow engine for a garden services business.
//!
//! A customer picks a service (a gardening visit plan or a one-off garden
//! setup), a date and an hourly slot, enters contact details and reviews a
//! priced summary before submitting it. The engine is a pure decision layer:
//!
//! - [`catalog`]: static offerings and prices
//! - [`slots`]: bookable slots of a date relative to "now", and the horizon
//! - [`validation`]: step-scoped field validation
//! - [`machine`]: the step state machine as a [`Reducer`](garden_booking_core::reducer::Reducer)
//! - [`summary`]: the priced review summary and the submission record
//! - [`submission`]: the seam to the external "submit booking" capability
//!
//! ## Example
//!
//! ```ignore
//! use garden_booking::{BookingAction, BookingEnvironment, BookingReducer, BookingState};
//! use garden_booking_runtime::Store;
//!
//! let store = Store::new(BookingState::new(), BookingReducer::new(), environment);
//! store.send(BookingAction::Next).await?;
//! let errors = store.state(|s| s.errors().clone()).await;
//! ```

pub mod catalog;
pub mod config;
pub mod draft;
pub mod error;
pub mod machine;
pub mod slots;
pub mod submission;
pub mod summary;
pub mod types;
pub mod validation;
pub mod workflow;

pub use catalog::{PricingCatalog, PricingError, ServiceDescriptor, ServiceOffering};
pub use config::{BookingConfig, ConfigError};
pub use draft::{BookingDraft, ValidationErrors};
pub use error::BookingError;
pub use machine::{BookingAction, BookingEnvironment, BookingReducer, BookingState};
pub use slots::{BookingHorizon, BookingPolicy, SlotGenerator, SlotWindow};
pub use submission::{
    BookingSubmitter, LoggingSubmitter, RecordingSubmitter, SubmissionError, SubmissionReceipt,
    SubmissionStatus,
};
pub use summary::{BookingSubmission, BookingSummary, BookingSummaryBuilder};
pub use types::{BookingStep, Field, FieldUpdate, Money, PlanId, ServiceType, TimeSlot};
pub use validation::ValidationEngine;
pub use workflow::BookingWorkflow;
