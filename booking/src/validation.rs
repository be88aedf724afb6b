//! Step-scoped validation of a booking draft.
//!
//! Validation is a pure function of `(step, draft, now)`. It reports every
//! failing field of the step, never just the first.

use crate::draft::{BookingDraft, ValidationErrors};
use crate::slots::{BookingPolicy, SlotGenerator};
use crate::types::{BookingStep, Field, ServiceType};
use chrono::NaiveDateTime;

/// User-facing error messages
pub mod messages {
    /// No service type chosen
    pub const SERVICE_TYPE_REQUIRED: &str = "Please select a service type";
    /// Gardening chosen without a plan
    pub const SERVICE_PLAN_REQUIRED: &str = "Please select a service plan";
    /// Plan chosen while the service is not gardening
    pub const SERVICE_PLAN_NOT_APPLICABLE: &str =
        "Please select the gardening service before choosing a plan";
    /// No date chosen
    pub const DATE_REQUIRED: &str = "Please select a date";
    /// No time slot chosen
    pub const TIME_SLOT_REQUIRED: &str = "Please select a time slot";
    /// Chosen slot is not offered for the chosen date anymore
    pub const TIME_SLOT_UNAVAILABLE: &str = "Selected time slot is no longer available";
    /// Missing name
    pub const NAME_REQUIRED: &str = "Name is required";
    /// Missing email
    pub const EMAIL_REQUIRED: &str = "Email is required";
    /// Missing phone number
    pub const PHONE_REQUIRED: &str = "Phone number is required";
    /// Missing address
    pub const ADDRESS_REQUIRED: &str = "Address is required";

    /// Date outside the booking horizon
    #[must_use]
    pub fn date_outside_horizon(days_ahead: u32) -> String {
        format!("Please select a date within the next {days_ahead} days")
    }
}

const CONTACT_FIELDS: [(Field, &str); 4] = [
    (Field::Name, messages::NAME_REQUIRED),
    (Field::Email, messages::EMAIL_REQUIRED),
    (Field::Phone, messages::PHONE_REQUIRED),
    (Field::Address, messages::ADDRESS_REQUIRED),
];

/// Validates the fields a step is responsible for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationEngine {
    policy: BookingPolicy,
}

impl ValidationEngine {
    /// Engine using the default window and horizon
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine using a configured window and horizon
    #[must_use]
    pub const fn with_policy(policy: BookingPolicy) -> Self {
        Self { policy }
    }

    /// Policy the engine checks against
    #[must_use]
    pub const fn policy(&self) -> BookingPolicy {
        self.policy
    }

    /// Validate the fields owned by `step`
    ///
    /// An empty result means the step may be left forwards.
    #[must_use]
    pub fn validate(
        &self,
        step: BookingStep,
        draft: &BookingDraft,
        now: NaiveDateTime,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        match step {
            BookingStep::ServiceSelection => Self::service_selection(draft, &mut errors),
            BookingStep::DateTime => self.date_time(draft, now, &mut errors),
            BookingStep::ContactDetails => Self::contact_details(draft, &mut errors),
            BookingStep::Review => {},
        }
        errors
    }

    fn service_selection(draft: &BookingDraft, errors: &mut ValidationErrors) {
        match (draft.service_type(), draft.service_plan()) {
            (None, _) => errors.insert(Field::ServiceType, messages::SERVICE_TYPE_REQUIRED),
            (Some(ServiceType::Gardening), None) => {
                errors.insert(Field::ServicePlan, messages::SERVICE_PLAN_REQUIRED);
            },
            (Some(ServiceType::Setup), Some(_)) => {
                errors.insert(Field::ServicePlan, messages::SERVICE_PLAN_NOT_APPLICABLE);
            },
            (Some(ServiceType::Gardening), Some(_)) | (Some(ServiceType::Setup), None) => {},
        }
    }

    fn date_time(&self, draft: &BookingDraft, now: NaiveDateTime, errors: &mut ValidationErrors) {
        let today = now.date();
        match draft.date() {
            None => errors.insert(Field::Date, messages::DATE_REQUIRED),
            Some(date) if !self.policy.horizon.contains(date, today) => {
                errors.insert(
                    Field::Date,
                    messages::date_outside_horizon(self.policy.horizon.days_ahead()),
                );
            },
            Some(_) => {},
        }

        match (draft.time_slot(), draft.date()) {
            (None, _) => errors.insert(Field::TimeSlot, messages::TIME_SLOT_REQUIRED),
            (Some(slot), Some(date))
                if SlotGenerator::with_window(self.policy.window).is_available(date, slot, now) => {},
            (Some(_), _) => errors.insert(Field::TimeSlot, messages::TIME_SLOT_UNAVAILABLE),
        }
    }

    fn contact_details(draft: &BookingDraft, errors: &mut ValidationErrors) {
        for (field, message) in CONTACT_FIELDS {
            let missing = draft.text(field).is_none_or(|text| text.trim().is_empty());
            if missing {
                errors.insert(field, message);
            }
        }
    }
}

/// Validate `step` with the default policy
#[must_use]
pub fn validate(step: BookingStep, draft: &BookingDraft, now: NaiveDateTime) -> ValidationErrors {
    ValidationEngine::new().validate(step, draft, now)
}
