//! Domain types for the garden booking workflow.
//!
//! Value objects shared by every part of the engine: the service choices,
//! money, hourly time slots, workflow steps and the typed field updates a
//! rendering surface sends in.

use crate::error::BookingError;
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Service selection
// ============================================================================

/// The two kinds of service a customer can book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    /// Recurring garden maintenance, sold as a visit plan
    Gardening,
    /// One-off garden design and installation
    Setup,
}

impl ServiceType {
    /// Every service type, in display order
    pub const ALL: [Self; 2] = [Self::Gardening, Self::Setup];

    /// Wire identifier (`"gardening"` / `"setup"`)
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Gardening => "gardening",
            Self::Setup => "setup",
        }
    }

    /// Whether a service plan must be chosen for this service
    #[must_use]
    pub const fn requires_plan(self) -> bool {
        matches!(self, Self::Gardening)
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ServiceType {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|service| service.id() == s.trim())
            .ok_or_else(|| BookingError::InvalidValue {
                field: Field::ServiceType,
                value: s.to_string(),
                reason: "expected \"gardening\" or \"setup\"".to_string(),
            })
    }
}

/// Gardening visit plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanId {
    /// 4 visits per year
    #[serde(rename = "4-visits")]
    FourVisits,
    /// 10 visits per year
    #[serde(rename = "10-visits")]
    TenVisits,
    /// 20 visits per year
    #[serde(rename = "20-visits")]
    TwentyVisits,
}

impl PlanId {
    /// Every plan, cheapest first
    pub const ALL: [Self; 3] = [Self::FourVisits, Self::TenVisits, Self::TwentyVisits];

    /// Wire identifier (`"4-visits"`, ...)
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::FourVisits => "4-visits",
            Self::TenVisits => "10-visits",
            Self::TwentyVisits => "20-visits",
        }
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PlanId {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|plan| plan.id() == s.trim())
            .ok_or_else(|| BookingError::InvalidValue {
                field: Field::ServicePlan,
                value: s.to_string(),
                reason: "expected one of \"4-visits\", \"10-visits\", \"20-visits\"".to_string(),
            })
    }
}

// ============================================================================
// Money
// ============================================================================

/// Money amount in cents (avoids floating point errors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Creates a `Money` value from cents
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Returns the amount in cents
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Returns the amount in dollars (rounded down)
    #[must_use]
    pub const fn dollars(&self) -> u64 {
        self.0 / 100
    }

    /// Returns the amount as a decimal number of dollars (`179.99`)
    ///
    /// Only meant for handing prices to consumers that expect a JSON number.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Prices are far below 2^52 cents
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.dollars(), self.0 % 100)
    }
}

// ============================================================================
// Time slots
// ============================================================================

/// An hourly bookable start time
///
/// Displayed and serialized as a 12-hour label such as `"11:00 AM"`.
/// Parsing also accepts the 24-hour form `"11:00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TimeSlot {
    start: NaiveTime,
}

impl TimeSlot {
    /// Creates the slot starting at `hour:00`, or `None` for hours past 23
    #[must_use]
    pub fn at_hour(hour: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, 0, 0).map(|start| Self { start })
    }

    /// Start time of the slot
    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    /// Start hour of the slot (0-23)
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.start.hour()
    }

    /// Display label, e.g. `"6:00 PM"`
    #[must_use]
    pub fn label(&self) -> String {
        self.start.format("%-I:%M %p").to_string()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for TimeSlot {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = |reason: &str| BookingError::InvalidValue {
            field: Field::TimeSlot,
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let start = NaiveTime::parse_from_str(raw, "%I:%M %p")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
            .map_err(|_| invalid("expected a time such as \"11:00 AM\" or \"11:00\""))?;

        if start.minute() != 0 || start.second() != 0 {
            return Err(invalid("time slots start on the hour"));
        }

        Ok(Self { start })
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.label()
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ============================================================================
// Workflow steps
// ============================================================================

/// The linear steps of the booking workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingStep {
    /// Choose gardening (with a plan) or setup
    #[default]
    ServiceSelection,
    /// Choose a date in the horizon and one of its slots
    DateTime,
    /// Name, email, phone, address and optional notes
    ContactDetails,
    /// Priced summary, ready to be submitted
    Review,
}

impl BookingStep {
    /// Every step, in workflow order
    pub const ALL: [Self; 4] = [
        Self::ServiceSelection,
        Self::DateTime,
        Self::ContactDetails,
        Self::Review,
    ];

    /// The following step, capped at `Review`
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::ServiceSelection => Self::DateTime,
            Self::DateTime => Self::ContactDetails,
            Self::ContactDetails | Self::Review => Self::Review,
        }
    }

    /// The preceding step, floored at `ServiceSelection`
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::ServiceSelection | Self::DateTime => Self::ServiceSelection,
            Self::ContactDetails => Self::DateTime,
            Self::Review => Self::ContactDetails,
        }
    }

    /// 1-based position for progress indicators
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::ServiceSelection => 1,
            Self::DateTime => 2,
            Self::ContactDetails => 3,
            Self::Review => 4,
        }
    }

    /// Heading shown for the step
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ServiceSelection => "Select Service Type",
            Self::DateTime => "Select Date & Time",
            Self::ContactDetails => "Contact Details",
            Self::Review => "Review & Confirm",
        }
    }

    /// Whether this is the terminal step of the workflow
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Review)
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ============================================================================
// Fields and field updates
// ============================================================================

/// The fields of a booking draft
///
/// Ordered as they appear in the workflow, which is also the order errors
/// are listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Gardening or setup
    ServiceType,
    /// Gardening plan
    ServicePlan,
    /// Booking date
    Date,
    /// Booking time slot
    TimeSlot,
    /// Contact name
    Name,
    /// Contact email
    Email,
    /// Contact phone number
    Phone,
    /// Service address
    Address,
    /// Free-form notes
    Notes,
}

impl Field {
    /// Every field, in workflow order
    pub const ALL: [Self; 9] = [
        Self::ServiceType,
        Self::ServicePlan,
        Self::Date,
        Self::TimeSlot,
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::Notes,
    ];

    /// Field name as used by rendering surfaces (`"serviceType"`, ...)
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ServiceType => "serviceType",
            Self::ServicePlan => "servicePlan",
            Self::Date => "date",
            Self::TimeSlot => "timeSlot",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Notes => "notes",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| BookingError::UnknownField(s.to_string()))
    }
}

/// A typed `(field, value)` edit coming from the rendering surface
///
/// `None` clears an optional selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    /// Select or clear the service type
    ServiceType(Option<ServiceType>),
    /// Select or clear the gardening plan
    ServicePlan(Option<PlanId>),
    /// Select or clear the booking date
    Date(Option<NaiveDate>),
    /// Select or clear the time slot
    TimeSlot(Option<TimeSlot>),
    /// Set the contact name
    Name(String),
    /// Set the contact email
    Email(String),
    /// Set the contact phone number
    Phone(String),
    /// Set the service address
    Address(String),
    /// Set the notes
    Notes(String),
}

impl FieldUpdate {
    /// The field this update assigns
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::ServiceType(_) => Field::ServiceType,
            Self::ServicePlan(_) => Field::ServicePlan,
            Self::Date(_) => Field::Date,
            Self::TimeSlot(_) => Field::TimeSlot,
            Self::Name(_) => Field::Name,
            Self::Email(_) => Field::Email,
            Self::Phone(_) => Field::Phone,
            Self::Address(_) => Field::Address,
            Self::Notes(_) => Field::Notes,
        }
    }

    /// Build an update from raw renderer input
    ///
    /// Selections are parsed into their typed form and an empty string
    /// clears them. Dates use ISO-8601 (`2025-06-11`). Text fields are
    /// taken as-is.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::InvalidValue`] when a selection cannot be parsed.
    pub fn parse(field: Field, raw: &str) -> Result<Self, BookingError> {
        let selection = raw.trim();
        let update = match field {
            Field::ServiceType => Self::ServiceType(parse_optional(selection)?),
            Field::ServicePlan => Self::ServicePlan(parse_optional(selection)?),
            Field::TimeSlot => Self::TimeSlot(parse_optional(selection)?),
            Field::Date => Self::Date(if selection.is_empty() {
                None
            } else {
                Some(NaiveDate::parse_from_str(selection, "%Y-%m-%d").map_err(|_| {
                    BookingError::InvalidValue {
                        field,
                        value: raw.to_string(),
                        reason: "expected an ISO-8601 date such as 2025-06-11".to_string(),
                    }
                })?)
            }),
            Field::Name => Self::Name(raw.to_string()),
            Field::Email => Self::Email(raw.to_string()),
            Field::Phone => Self::Phone(raw.to_string()),
            Field::Address => Self::Address(raw.to_string()),
            Field::Notes => Self::Notes(raw.to_string()),
        };
        Ok(update)
    }
}

fn parse_optional<T>(selection: &str) -> Result<Option<T>, BookingError>
where
    T: FromStr<Err = BookingError>,
{
    if selection.is_empty() {
        Ok(None)
    } else {
        selection.parse().map(Some)
    }
}
