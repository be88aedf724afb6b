//! The priced review summary and the record handed to the submitter.

use crate::catalog::PricingCatalog;
use crate::draft::BookingDraft;
use crate::error::BookingError;
use crate::types::{Field, Money, PlanId, ServiceType, TimeSlot};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Immutable, priced view of a completed draft
///
/// Built fresh from the draft every time the workflow reaches review;
/// never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    service_type: ServiceType,
    service_name: &'static str,
    service_plan: Option<PlanId>,
    offering_name: &'static str,
    price: Money,
    date: NaiveDate,
    formatted_date: String,
    time_slot: TimeSlot,
    name: String,
    email: String,
    phone: String,
    address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    total_price: Money,
}

impl BookingSummary {
    /// Service type booked
    #[must_use]
    pub const fn service_type(&self) -> ServiceType {
        self.service_type
    }

    /// Display name of the service type
    #[must_use]
    pub const fn service_name(&self) -> &'static str {
        self.service_name
    }

    /// Gardening plan, absent for setup
    #[must_use]
    pub const fn service_plan(&self) -> Option<PlanId> {
        self.service_plan
    }

    /// Display name of the resolved offering (`"4 Visits Package"`)
    #[must_use]
    pub const fn offering_name(&self) -> &'static str {
        self.offering_name
    }

    /// Price of the offering
    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// Booking date
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Long-form date (`"June 11, 2025"`)
    #[must_use]
    pub fn formatted_date(&self) -> &str {
        &self.formatted_date
    }

    /// Booked slot
    #[must_use]
    pub const fn time_slot(&self) -> TimeSlot {
        self.time_slot
    }

    /// Contact name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Contact phone number
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Service address
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Notes
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Amount due
    #[must_use]
    pub const fn total_price(&self) -> Money {
        self.total_price
    }

    /// The record handed to the external submitter
    #[must_use]
    pub fn submission(&self) -> BookingSubmission {
        BookingSubmission {
            service_type: self.service_type,
            service_plan: self.service_plan,
            date: self.date,
            time_slot: self.time_slot,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            notes: self.notes.clone(),
            total_price: self.total_price.as_decimal(),
        }
    }
}

/// Handoff record for the "submit booking" capability
///
/// ```json
/// { "serviceType": "gardening", "servicePlan": "4-visits", "date": "2025-06-11",
///   "timeSlot": "11:00 AM", "name": "A", "email": "a@b.com", "phone": "123",
///   "address": "X", "totalPrice": 179.99 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSubmission {
    /// Service type booked
    pub service_type: ServiceType,
    /// Gardening plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_plan: Option<PlanId>,
    /// ISO-8601 date
    pub date: NaiveDate,
    /// Slot label
    pub time_slot: TimeSlot,
    /// Contact name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Service address
    pub address: String,
    /// Notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Amount due, in dollars
    pub total_price: f64,
}

/// Derives a [`BookingSummary`] from a draft
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingSummaryBuilder;

impl BookingSummaryBuilder {
    /// Build the summary for a draft that passed every step
    ///
    /// The draft is only read.
    ///
    /// # Errors
    ///
    /// - [`BookingError::IncompleteDraft`] if a required field is unset
    /// - [`BookingError::Pricing`] if the service/plan combination has no offering
    pub fn build(draft: &BookingDraft) -> Result<BookingSummary, BookingError> {
        let service_type = draft.service_type().ok_or(BookingError::IncompleteDraft {
            field: Field::ServiceType,
        })?;
        let offering = PricingCatalog::resolve(service_type, draft.service_plan())?;
        let date = draft
            .date()
            .ok_or(BookingError::IncompleteDraft { field: Field::Date })?;
        let time_slot = draft.time_slot().ok_or(BookingError::IncompleteDraft {
            field: Field::TimeSlot,
        })?;

        Ok(BookingSummary {
            service_type,
            service_name: PricingCatalog::service_type(service_type).name,
            service_plan: draft.service_plan(),
            offering_name: offering.name,
            price: offering.price,
            date,
            formatted_date: date.format("%B %-d, %Y").to_string(),
            time_slot,
            name: draft.name().trim().to_string(),
            email: draft.email().trim().to_string(),
            phone: draft.phone().trim().to_string(),
            address: draft.address().trim().to_string(),
            notes: draft.notes().map(|notes| notes.trim().to_string()),
            total_price: offering.price,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::PricingError;
    use crate::types::FieldUpdate;

    fn gardening_draft() -> BookingDraft {
        BookingDraft::new()
            .with(FieldUpdate::ServiceType(Some(ServiceType::Gardening)))
            .with(FieldUpdate::ServicePlan(Some(PlanId::FourVisits)))
            .with(FieldUpdate::Date(NaiveDate::from_ymd_opt(2025, 6, 11)))
            .with(FieldUpdate::TimeSlot(TimeSlot::at_hour(11)))
            .with(FieldUpdate::Name("A".to_string()))
            .with(FieldUpdate::Email("a@b.com".to_string()))
            .with(FieldUpdate::Phone("123".to_string()))
            .with(FieldUpdate::Address("X".to_string()))
    }

    #[test]
    fn gardening_summary_is_priced_from_plan() {
        let summary = BookingSummaryBuilder::build(&gardening_draft()).unwrap();
        assert_eq!(summary.total_price(), Money::from_cents(17_999));
        assert_eq!(summary.offering_name(), "4 Visits Package");
        assert_eq!(summary.service_name(), "Gardening Service");
        assert_eq!(summary.formatted_date(), "June 11, 2025");
        assert_eq!(summary.time_slot().label(), "11:00 AM");
        assert_eq!(summary.notes(), None);
    }

    #[test]
    fn building_twice_is_pure() {
        let draft = gardening_draft();
        let before = draft.clone();
        let first = BookingSummaryBuilder::build(&draft).unwrap();
        let second = BookingSummaryBuilder::build(&draft).unwrap();
        assert_eq!(first, second);
        assert_eq!(draft, before);
    }

    #[test]
    fn setup_summary_has_no_plan() {
        let draft = gardening_draft()
            .with(FieldUpdate::ServiceType(Some(ServiceType::Setup)))
            .with(FieldUpdate::ServicePlan(None));
        let summary = BookingSummaryBuilder::build(&draft).unwrap();
        assert_eq!(summary.total_price().to_string(), "$299.99");
        assert_eq!(summary.service_plan(), None);
    }

    #[test]
    fn broken_invariants_are_internal_errors() {
        let draft = gardening_draft().with(FieldUpdate::ServicePlan(None));
        let error = BookingSummaryBuilder::build(&draft).unwrap_err();
        assert_eq!(error, BookingError::Pricing(PricingError::MissingPlan));
        assert!(error.is_invariant_violation());

        let draft = gardening_draft().with(FieldUpdate::TimeSlot(None));
        assert_eq!(
            BookingSummaryBuilder::build(&draft),
            Err(BookingError::IncompleteDraft { field: Field::TimeSlot })
        );
    }

    #[test]
    fn submission_record_matches_handoff_shape() {
        let draft = gardening_draft().with(FieldUpdate::Notes("side gate".to_string()));
        let record = BookingSummaryBuilder::build(&draft).unwrap().submission();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "serviceType": "gardening",
                "servicePlan": "4-visits",
                "date": "2025-06-11",
                "timeSlot": "11:00 AM",
                "name": "A",
                "email": "a@b.com",
                "phone": "123",
                "address": "X",
                "notes": "side gate",
                "totalPrice": 179.99
            })
        );
    }

    #[test]
    fn optional_fields_are_omitted_from_record() {
        let draft = gardening_draft()
            .with(FieldUpdate::ServiceType(Some(ServiceType::Setup)))
            .with(FieldUpdate::ServicePlan(None));
        let json = serde_json::to_value(BookingSummaryBuilder::build(&draft).unwrap().submission()).unwrap();
        assert!(json.get("servicePlan").is_none());
        assert!(json.get("notes").is_none());
    }
}
