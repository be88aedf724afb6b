//! The booking workflow as a reducer.
//!
//! `ServiceSelection → DateTime → ContactDetails → Review`, one step at a
//! time. `Next` is the only forward gate: it validates the current step and
//! advances only when nothing fails. Field edits apply the cross-field rules
//! immediately (a non-gardening service drops the plan, a new date drops a
//! slot it does not offer). Submission is a single explicit action from
//! `Review` and runs as an effect against the injected submitter.

use crate::draft::{BookingDraft, ValidationErrors};
use crate::slots::{BookingPolicy, SlotGenerator};
use crate::submission::{BookingSubmitter, SubmissionReceipt, SubmissionStatus};
use crate::summary::{BookingSummary, BookingSummaryBuilder};
use crate::types::{BookingStep, Field, FieldUpdate, ServiceType, TimeSlot};
use crate::validation::{ValidationEngine, messages};
use garden_booking_core::{SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// State
// ============================================================================

/// Everything a renderer needs to draw the workflow
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingState {
    step: BookingStep,
    draft: BookingDraft,
    errors: ValidationErrors,
    available_slots: Vec<TimeSlot>,
    summary: Option<BookingSummary>,
    submission: SubmissionStatus,
    last_error: Option<String>,
}

impl BookingState {
    /// A fresh workflow at `ServiceSelection` with an empty draft
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A workflow positioned at `step` holding `draft`
    ///
    /// No summary or slot list is derived; send `RefreshSlots` to populate
    /// the slots of the draft's date.
    #[must_use]
    pub fn at_step(step: BookingStep, draft: BookingDraft) -> Self {
        Self {
            step,
            draft,
            ..Self::default()
        }
    }

    /// Current step
    #[must_use]
    pub const fn step(&self) -> BookingStep {
        self.step
    }

    /// The in-progress booking
    #[must_use]
    pub const fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Pending errors from the last rejected `Next` or edit
    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Slots offered for the draft's date (empty means none are left)
    #[must_use]
    pub fn available_slots(&self) -> &[TimeSlot] {
        &self.available_slots
    }

    /// Priced summary, present only at `Review`
    #[must_use]
    pub const fn summary(&self) -> Option<&BookingSummary> {
        self.summary.as_ref()
    }

    /// Submission progress
    #[must_use]
    pub const fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    /// Last internal fault, never shown as a field error
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Inputs to the booking workflow
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BookingAction {
    /// Assign a draft field
    UpdateField(FieldUpdate),
    /// Validate the current step and advance
    Next,
    /// Return to the previous step
    Back,
    /// Re-derive the slots of the selected date against the current time
    RefreshSlots,
    /// Hand the reviewed booking to the submitter
    Submit,
    /// The submitter accepted the booking
    SubmissionSucceeded {
        /// Acknowledgement from the submitter
        receipt: SubmissionReceipt,
    },
    /// The submitter did not accept the booking
    SubmissionFailed {
        /// Why the attempt failed
        reason: String,
    },
    /// Abandon the workflow and start over
    Reset,
}

// ============================================================================
// Environment
// ============================================================================

/// Injected dependencies of the booking workflow
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Local wall clock; "now" for slot generation and the horizon
    pub clock: Arc<dyn Clock>,
    /// External "submit booking" capability
    pub submitter: Arc<dyn BookingSubmitter>,
    /// Operating window and booking horizon
    pub policy: BookingPolicy,
}

impl BookingEnvironment {
    /// Creates a new `BookingEnvironment` with the default policy
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, submitter: Arc<dyn BookingSubmitter>) -> Self {
        Self {
            clock,
            submitter,
            policy: BookingPolicy::default(),
        }
    }

    /// Use a configured window and horizon
    #[must_use]
    pub const fn with_policy(mut self, policy: BookingPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn slots(&self) -> SlotGenerator {
        SlotGenerator::with_window(self.policy.window)
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Reducer for the booking workflow
#[derive(Clone, Debug, Default)]
pub struct BookingReducer;

impl BookingReducer {
    /// Creates a new `BookingReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn update_field(state: &mut BookingState, update: FieldUpdate, env: &BookingEnvironment) {
        let field = update.field();
        let now = env.clock.now();

        match update {
            FieldUpdate::ServiceType(service_type) => {
                state.draft.assign(FieldUpdate::ServiceType(service_type));
                if service_type != Some(ServiceType::Gardening) && state.draft.service_plan().is_some() {
                    tracing::debug!("Service is not gardening, clearing plan");
                    state.draft.clear_plan();
                }
                state.errors.clear();
            },
            FieldUpdate::ServicePlan(Some(plan))
                if state.draft.service_type() != Some(ServiceType::Gardening) =>
            {
                tracing::warn!(%plan, "Rejected plan for a non-gardening service");
                state
                    .errors
                    .insert(Field::ServicePlan, messages::SERVICE_PLAN_NOT_APPLICABLE);
                return;
            },
            FieldUpdate::Date(Some(date)) if !env.policy.horizon.contains(date, now.date()) => {
                tracing::warn!(%date, "Rejected date outside the booking horizon");
                state.errors.insert(
                    Field::Date,
                    messages::date_outside_horizon(env.policy.horizon.days_ahead()),
                );
                return;
            },
            FieldUpdate::Date(date) => {
                state.draft.assign(FieldUpdate::Date(date));
                state.errors.remove(field);
                Self::derive_slots(state, env);
            },
            other => {
                state.draft.assign(other);
                state.errors.remove(field);
            },
        }

        tracing::debug!(%field, "Field updated");
        state.summary = None;
        Self::reopen(state, field);
    }

    /// Recompute the slot list and drop a selected slot it no longer offers
    ///
    /// Returns whether the selected slot was dropped.
    fn derive_slots(state: &mut BookingState, env: &BookingEnvironment) -> bool {
        let now = env.clock.now();
        state.available_slots = state
            .draft
            .date()
            .map_or_else(Vec::new, |date| env.slots().generate(date, now));
        tracing::debug!(slots = state.available_slots.len(), "Slots derived");

        match state.draft.time_slot() {
            Some(slot) if !state.available_slots.contains(&slot) => {
                tracing::debug!(%slot, "Selected slot not offered, clearing");
                state.draft.clear_time_slot();
                true
            },
            _ => false,
        }
    }

    /// `field` changed: if a later step is showing, return to the step that owns it
    ///
    /// Every step before the current one has passed validation with the
    /// draft as it stands, which is what lets `Review` always price it.
    fn reopen(state: &mut BookingState, field: Field) {
        let owner = match field {
            Field::ServiceType | Field::ServicePlan => BookingStep::ServiceSelection,
            Field::Date | Field::TimeSlot => BookingStep::DateTime,
            Field::Name | Field::Email | Field::Phone | Field::Address | Field::Notes => {
                BookingStep::ContactDetails
            },
        };
        if state.step <= owner {
            return;
        }
        tracing::info!(%field, from = %state.step, to = %owner, "Earlier step changed, reopening it");
        state.step = owner;
        state.summary = None;
        state.submission = SubmissionStatus::Idle;
    }

    /// Re-derive slots and flag a selected slot that is no longer offered
    fn refresh_slots(state: &mut BookingState, env: &BookingEnvironment) {
        if Self::derive_slots(state, env) {
            state
                .errors
                .insert(Field::TimeSlot, messages::TIME_SLOT_UNAVAILABLE);
            Self::reopen(state, Field::TimeSlot);
        }
    }

    fn next(state: &mut BookingState, env: &BookingEnvironment) {
        let errors = ValidationEngine::with_policy(env.policy).validate(
            state.step,
            &state.draft,
            env.clock.now(),
        );
        if !errors.is_empty() {
            tracing::info!(step = %state.step, failing = errors.len(), "Step validation failed");
            state.errors = errors;
            return;
        }

        state.errors.clear();
        if state.step.is_terminal() {
            return;
        }
        let target = state.step.next();

        if target == BookingStep::Review {
            match BookingSummaryBuilder::build(&state.draft) {
                Ok(summary) => state.summary = Some(summary),
                Err(error) => {
                    tracing::error!(%error, "Could not build booking summary");
                    state.last_error = Some(error.to_string());
                    return;
                },
            }
        }

        tracing::info!(from = %state.step, to = %target, "Step advanced");
        state.step = target;
        state.last_error = None;
        if target == BookingStep::DateTime {
            Self::refresh_slots(state, env);
        }
    }

    fn submit(state: &mut BookingState, env: &BookingEnvironment) -> SmallVec<[Effect<BookingAction>; 4]> {
        let Some(summary) = state.summary.as_ref().filter(|_| state.step.is_terminal()) else {
            tracing::warn!(step = %state.step, "Ignored submit outside review");
            return SmallVec::new();
        };
        if !state.submission.can_submit() {
            tracing::warn!(status = ?state.submission, "Ignored duplicate submit");
            return SmallVec::new();
        }

        let record = summary.submission();
        state.submission = SubmissionStatus::InFlight;
        tracing::info!(total = %summary.total_price(), "Submitting booking");

        let submitter = Arc::clone(&env.submitter);
        smallvec![Effect::future(async move {
            match submitter.submit(record).await {
                Ok(receipt) => Some(BookingAction::SubmissionSucceeded { receipt }),
                Err(error) => Some(BookingAction::SubmissionFailed {
                    reason: error.to_string(),
                }),
            }
        })]
    }
}

impl Reducer for BookingReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            BookingAction::UpdateField(update) => {
                if state.submission.locks_draft() {
                    tracing::warn!(field = %update.field(), "Ignored edit while submission is locked");
                } else {
                    Self::update_field(state, update, env);
                }
            },

            BookingAction::Next => {
                if state.submission.locks_draft() {
                    tracing::warn!("Ignored next while submission is locked");
                } else {
                    Self::next(state, env);
                }
            },

            BookingAction::Back => {
                if state.submission.locks_draft() {
                    tracing::warn!("Ignored back while submission is locked");
                } else {
                    let target = state.step.previous();
                    tracing::info!(from = %state.step, to = %target, "Step back");
                    state.step = target;
                    state.errors.clear();
                    state.summary = None;
                    state.submission = SubmissionStatus::Idle;
                    if target == BookingStep::DateTime {
                        Self::refresh_slots(state, env);
                    }
                }
            },

            BookingAction::RefreshSlots => {
                if state.submission.locks_draft() {
                    tracing::warn!("Ignored slot refresh while submission is locked");
                } else {
                    Self::refresh_slots(state, env);
                }
            },

            BookingAction::Submit => return Self::submit(state, env),

            BookingAction::SubmissionSucceeded { receipt } => {
                if state.submission == SubmissionStatus::InFlight {
                    tracing::info!(confirmation_id = %receipt.confirmation_id, "Booking confirmed");
                    state.submission = SubmissionStatus::Confirmed(receipt);
                } else {
                    tracing::warn!("Ignored submission result with no submission in flight");
                }
            },

            BookingAction::SubmissionFailed { reason } => {
                if state.submission == SubmissionStatus::InFlight {
                    tracing::warn!(%reason, "Booking submission failed");
                    state.submission = SubmissionStatus::Failed(reason);
                } else {
                    tracing::warn!("Ignored submission result with no submission in flight");
                }
            },

            BookingAction::Reset => {
                if state.submission == SubmissionStatus::InFlight {
                    tracing::warn!("Ignored reset while submission is in flight");
                } else {
                    tracing::info!("Booking workflow reset");
                    *state = BookingState::default();
                }
            },
        }

        SmallVec::new()
    }
}
