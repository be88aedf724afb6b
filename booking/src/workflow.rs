//! Synchronous shell over [`BookingReducer`] for callers without a `Store`.
//!
//! Every call is handled to completion before it returns. Submission is not
//! offered here: hand [`BookingWorkflow::submission`] to a submitter
//! yourself, or drive the reducer through a `Store` to get the effect.

use crate::draft::{BookingDraft, ValidationErrors};
use crate::error::BookingError;
use crate::machine::{BookingAction, BookingEnvironment, BookingReducer, BookingState};
use crate::summary::{BookingSubmission, BookingSummary};
use crate::types::{BookingStep, Field, FieldUpdate, TimeSlot};
use garden_booking_core::reducer::Reducer;

/// One booking session driven by direct method calls
pub struct BookingWorkflow {
    reducer: BookingReducer,
    environment: BookingEnvironment,
    state: BookingState,
}

impl BookingWorkflow {
    /// Start an empty workflow
    #[must_use]
    pub fn new(environment: BookingEnvironment) -> Self {
        Self {
            reducer: BookingReducer::new(),
            environment,
            state: BookingState::new(),
        }
    }

    fn dispatch(&mut self, action: BookingAction) {
        let effects = self.reducer.reduce(&mut self.state, action, &self.environment);
        debug_assert!(effects.iter().all(garden_booking_core::effect::Effect::is_none));
    }

    /// Assign a typed field value
    pub fn update_field(&mut self, update: FieldUpdate) {
        self.dispatch(BookingAction::UpdateField(update));
    }

    /// Assign a field from raw renderer input (`"serviceType"`, `"gardening"`)
    ///
    /// # Errors
    ///
    /// - [`BookingError::UnknownField`] if `field` names no draft field
    /// - [`BookingError::InvalidValue`] if `value` cannot be parsed for it
    pub fn update_raw(&mut self, field: &str, value: &str) -> Result<(), BookingError> {
        let field: Field = field.parse()?;
        let update = FieldUpdate::parse(field, value)?;
        self.update_field(update);
        Ok(())
    }

    /// Validate the current step and advance if it passes
    ///
    /// Returns the errors that blocked the transition, empty on success.
    pub fn next(&mut self) -> ValidationErrors {
        self.dispatch(BookingAction::Next);
        self.state.errors().clone()
    }

    /// Return to the previous step
    pub fn back(&mut self) {
        self.dispatch(BookingAction::Back);
    }

    /// Re-derive the slots of the selected date
    pub fn refresh_slots(&mut self) {
        self.dispatch(BookingAction::RefreshSlots);
    }

    /// Discard the draft and start over
    pub fn reset(&mut self) {
        self.dispatch(BookingAction::Reset);
    }

    /// Full workflow state
    #[must_use]
    pub const fn state(&self) -> &BookingState {
        &self.state
    }

    /// Current step
    #[must_use]
    pub const fn step(&self) -> BookingStep {
        self.state.step()
    }

    /// The in-progress booking
    #[must_use]
    pub const fn draft(&self) -> &BookingDraft {
        self.state.draft()
    }

    /// Pending errors
    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        self.state.errors()
    }

    /// Slots offered for the selected date
    #[must_use]
    pub fn available_slots(&self) -> &[TimeSlot] {
        self.state.available_slots()
    }

    /// Priced summary, once `Review` is reached
    #[must_use]
    pub const fn summary(&self) -> Option<&BookingSummary> {
        self.state.summary()
    }

    /// Handoff record for the reviewed booking
    #[must_use]
    pub fn submission(&self) -> Option<BookingSubmission> {
        self.summary().map(BookingSummary::submission)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::submission::LoggingSubmitter;
    use garden_booking_core::environment::Clock;
    use garden_booking_testing::test_clock;
    use std::sync::Arc;

    fn workflow() -> BookingWorkflow {
        let clock: Arc<dyn Clock> = Arc::new(test_clock());
        BookingWorkflow::new(BookingEnvironment::new(
            Arc::clone(&clock),
            Arc::new(LoggingSubmitter::new(clock)),
        ))
    }

    #[test]
    fn raw_updates_drive_the_workflow() {
        let mut workflow = workflow();
        workflow.update_raw("serviceType", "setup").unwrap();
        assert!(workflow.next().is_empty());
        assert_eq!(workflow.step(), BookingStep::DateTime);

        workflow.update_raw("date", "2025-06-12").unwrap();
        workflow.update_raw("timeSlot", "2:00 PM").unwrap();
        assert!(workflow.next().is_empty());
        assert_eq!(workflow.available_slots().len(), 9);

        for (field, value) in [("name", "A"), ("email", "a@b.com"), ("phone", "123"), ("address", "X")] {
            workflow.update_raw(field, value).unwrap();
        }
        assert!(workflow.next().is_empty());
        assert_eq!(workflow.step(), BookingStep::Review);

        let record = workflow.submission().unwrap();
        assert!((record.total_price - 299.99).abs() < f64::EPSILON);
        assert_eq!(record.service_plan, None);
    }

    #[test]
    fn bad_raw_input_leaves_state_alone() {
        let mut workflow = workflow();
        assert!(matches!(
            workflow.update_raw("colour", "green"),
            Err(BookingError::UnknownField(_))
        ));
        assert!(workflow.update_raw("servicePlan", "3-visits").is_err());
        assert!(workflow.draft().is_empty());
    }

    #[test]
    fn next_returns_blocking_errors() {
        let mut workflow = workflow();
        let errors = workflow.next();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::ServiceType]);
        assert_eq!(workflow.step(), BookingStep::ServiceSelection);
    }
}
