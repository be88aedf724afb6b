//! The in-progress booking and its pending error map.

use crate::types::{Field, FieldUpdate, PlanId, ServiceType, TimeSlot};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The in-progress booking selection
///
/// Fields are private: the state machine is the only writer, so the
/// "plan iff gardening" and "slot belongs to date" rules hold for every
/// draft reachable through [`BookingAction`](crate::machine::BookingAction).
/// [`BookingDraft::with`] assigns raw values without those rules and exists
/// for building fixtures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    service_type: Option<ServiceType>,
    service_plan: Option<PlanId>,
    date: Option<NaiveDate>,
    time_slot: Option<TimeSlot>,
    name: String,
    email: String,
    phone: String,
    address: String,
    notes: String,
}

impl BookingDraft {
    /// An empty draft
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `update` assigned verbatim
    #[must_use]
    pub fn with(mut self, update: FieldUpdate) -> Self {
        self.assign(update);
        self
    }

    /// Selected service type
    #[must_use]
    pub const fn service_type(&self) -> Option<ServiceType> {
        self.service_type
    }

    /// Selected gardening plan
    #[must_use]
    pub const fn service_plan(&self) -> Option<PlanId> {
        self.service_plan
    }

    /// Selected date
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Selected time slot
    #[must_use]
    pub const fn time_slot(&self) -> Option<TimeSlot> {
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

    /// Notes, if any non-blank text was entered
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        if self.notes.trim().is_empty() {
            None
        } else {
            Some(self.notes.as_str())
        }
    }

    /// Raw text of a contact field, `None` for selection fields
    #[must_use]
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(self.name.as_str()),
            Field::Email => Some(self.email.as_str()),
            Field::Phone => Some(self.phone.as_str()),
            Field::Address => Some(self.address.as_str()),
            Field::Notes => Some(self.notes.as_str()),
            Field::ServiceType | Field::ServicePlan | Field::Date | Field::TimeSlot => None,
        }
    }

    /// Whether the draft is still empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn assign(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::ServiceType(value) => self.service_type = value,
            FieldUpdate::ServicePlan(value) => self.service_plan = value,
            FieldUpdate::Date(value) => self.date = value,
            FieldUpdate::TimeSlot(value) => self.time_slot = value,
            FieldUpdate::Name(value) => self.name = value,
            FieldUpdate::Email(value) => self.email = value,
            FieldUpdate::Phone(value) => self.phone = value,
            FieldUpdate::Address(value) => self.address = value,
            FieldUpdate::Notes(value) => self.notes = value,
        }
    }

    pub(crate) fn clear_plan(&mut self) {
        self.service_plan = None;
    }

    pub(crate) fn clear_time_slot(&mut self) {
        self.time_slot = None;
    }
}

/// Per-field error messages, ordered by workflow field order
///
/// Empty means valid. Serializes as a JSON object keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    /// No errors
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Whether there are no errors
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for a field
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether a field has an error
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// `(field, message)` pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Failing fields in field order
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub(crate) fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub(crate) fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<(Field, String)> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn with_assigns_without_side_rules() {
        let draft = BookingDraft::new()
            .with(FieldUpdate::ServiceType(Some(ServiceType::Setup)))
            .with(FieldUpdate::ServicePlan(Some(PlanId::TenVisits)));
        assert_eq!(draft.service_type(), Some(ServiceType::Setup));
        assert_eq!(draft.service_plan(), Some(PlanId::TenVisits));
    }

    #[test]
    fn blank_notes_are_absent() {
        let draft = BookingDraft::new().with(FieldUpdate::Notes("   ".to_string()));
        assert_eq!(draft.notes(), None);
        let draft = draft.with(FieldUpdate::Notes("gate code 42".to_string()));
        assert_eq!(draft.notes(), Some("gate code 42"));
    }

    #[test]
    fn empty_draft_is_empty() {
        assert!(BookingDraft::new().is_empty());
        assert!(!BookingDraft::new()
            .with(FieldUpdate::Name("A".to_string()))
            .is_empty());
    }

    #[test]
    fn errors_iterate_in_field_order() {
        let mut errors = ValidationErrors::new();
        errors.insert(Field::Address, "Address is required");
        errors.insert(Field::Name, "Name is required");
        let fields: Vec<Field> = errors.fields().collect();
        assert_eq!(fields, vec![Field::Name, Field::Address]);

        errors.remove(Field::Name);
        assert_eq!(errors.len(), 1);
        assert!(!errors.contains(Field::Name));
    }

    #[test]
    fn errors_serialize_as_object() {
        let mut errors = ValidationErrors::new();
        errors.insert(Field::TimeSlot, "Please select a time slot");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "timeSlot": "Please select a time slot" }));
    }
}
