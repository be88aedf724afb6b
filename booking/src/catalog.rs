//! Pricing catalog: the fixed set of bookable offerings.
//!
//! The catalog is static reference data built at compile time. Gardening is
//! sold as one of three visit plans; setup is a single fixed-price offering.

use crate::types::{Money, PlanId, ServiceType};
use serde::Serialize;
use thiserror::Error;

/// A priced, named service choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceOffering {
    /// Offering identifier (`"4-visits"`, ..., `"setup"`)
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Price of the offering
    pub price: Money,
    /// What the offering includes
    pub features: &'static [&'static str],
}

/// Display information for a service type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    /// The service type described
    pub service_type: ServiceType,
    /// Display name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
}

/// Resolution failures
///
/// These only occur when the draft breaks the "plan iff gardening" rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Gardening was selected without a plan
    #[error("gardening service requires a plan")]
    MissingPlan,

    /// Setup was selected together with a gardening plan
    #[error("setup service does not take a plan (got {0})")]
    UnexpectedPlan(PlanId),
}

static FOUR_VISITS: ServiceOffering = ServiceOffering {
    id: "4-visits",
    name: "4 Visits Package",
    description: "Monthly garden maintenance (4 visits/year)",
    price: Money::from_cents(17_999),
    features: &[
        "Seasonal pruning and trimming",
        "Basic pest control",
        "Weed management",
        "Plant health assessment",
    ],
};

static TEN_VISITS: ServiceOffering = ServiceOffering {
    id: "10-visits",
    name: "10 Visits Package",
    description: "Bi-monthly garden maintenance",
    price: Money::from_cents(39_999),
    features: &[
        "All features of 4 visits package",
        "Fertilization service",
        "Soil health monitoring",
        "Plant replacement recommendations",
    ],
};

static TWENTY_VISITS: ServiceOffering = ServiceOffering {
    id: "20-visits",
    name: "20 Visits Package",
    description: "Weekly garden maintenance",
    price: Money::from_cents(69_999),
    features: &[
        "All features of 10 visits package",
        "Priority scheduling",
        "Monthly garden report",
        "Emergency visit support",
    ],
};

static SETUP: ServiceOffering = ServiceOffering {
    id: "setup",
    name: "Garden Setup Service",
    description: "Professional garden design and installation service",
    price: Money::from_cents(29_999),
    features: &[
        "Initial consultation",
        "Custom design plan",
        "Plant selection assistance",
        "Installation service",
        "Post-setup care guide",
    ],
};

static GARDENING_PLANS: [&ServiceOffering; 3] = [&FOUR_VISITS, &TEN_VISITS, &TWENTY_VISITS];

static SERVICE_TYPES: [ServiceDescriptor; 2] = [
    ServiceDescriptor {
        service_type: ServiceType::Gardening,
        name: "Gardening Service",
        description: "Regular maintenance and care for your garden",
    },
    ServiceDescriptor {
        service_type: ServiceType::Setup,
        name: "Garden Setup",
        description: "Professional garden design and installation",
    },
];

/// Static lookup from a service selection to its offering
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingCatalog;

impl PricingCatalog {
    /// Resolve the offering for a service type and optional plan
    ///
    /// # Errors
    ///
    /// - [`PricingError::MissingPlan`] for gardening without a plan
    /// - [`PricingError::UnexpectedPlan`] for setup with a plan
    pub fn resolve(
        service_type: ServiceType,
        plan: Option<PlanId>,
    ) -> Result<&'static ServiceOffering, PricingError> {
        match (service_type, plan) {
            (ServiceType::Gardening, Some(plan)) => Ok(Self::plan(plan)),
            (ServiceType::Gardening, None) => Err(PricingError::MissingPlan),
            (ServiceType::Setup, None) => Ok(&SETUP),
            (ServiceType::Setup, Some(plan)) => Err(PricingError::UnexpectedPlan(plan)),
        }
    }

    /// The offering for a gardening plan
    #[must_use]
    pub fn plan(plan: PlanId) -> &'static ServiceOffering {
        match plan {
            PlanId::FourVisits => &FOUR_VISITS,
            PlanId::TenVisits => &TEN_VISITS,
            PlanId::TwentyVisits => &TWENTY_VISITS,
        }
    }

    /// Gardening plans, cheapest first
    #[must_use]
    pub fn gardening_plans() -> &'static [&'static ServiceOffering] {
        &GARDENING_PLANS
    }

    /// The single setup offering
    #[must_use]
    pub fn setup_offering() -> &'static ServiceOffering {
        &SETUP
    }

    /// Descriptors for the service type picker
    #[must_use]
    pub fn service_types() -> &'static [ServiceDescriptor] {
        &SERVICE_TYPES
    }

    /// Descriptor for one service type
    #[must_use]
    pub fn service_type(service_type: ServiceType) -> &'static ServiceDescriptor {
        match service_type {
            ServiceType::Gardening => &SERVICE_TYPES[0],
            ServiceType::Setup => &SERVICE_TYPES[1],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn gardening_plans_resolve_to_their_tier() {
        let cases = [
            (PlanId::FourVisits, 17_999),
            (PlanId::TenVisits, 39_999),
            (PlanId::TwentyVisits, 69_999),
        ];
        for (plan, cents) in cases {
            let offering = PricingCatalog::resolve(ServiceType::Gardening, Some(plan)).unwrap();
            assert_eq!(offering.id, plan.id());
            assert_eq!(offering.price, Money::from_cents(cents));
            assert_eq!(offering.features.len(), 4);
        }
    }

    #[test]
    fn setup_resolves_without_plan() {
        let offering = PricingCatalog::resolve(ServiceType::Setup, None).unwrap();
        assert_eq!(offering.price.to_string(), "$299.99");
        assert_eq!(offering.name, "Garden Setup Service");
        assert_eq!(offering.features.len(), 5);
    }

    #[test]
    fn incomplete_combinations_are_rejected() {
        assert_eq!(
            PricingCatalog::resolve(ServiceType::Gardening, None),
            Err(PricingError::MissingPlan)
        );
        assert_eq!(
            PricingCatalog::resolve(ServiceType::Setup, Some(PlanId::TenVisits)),
            Err(PricingError::UnexpectedPlan(PlanId::TenVisits))
        );
    }

    #[test]
    fn plans_are_listed_cheapest_first() {
        let prices: Vec<u64> = PricingCatalog::gardening_plans()
            .iter()
            .map(|offering| offering.price.cents())
            .collect();
        assert!(prices.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn descriptors_match_service_types() {
        for service_type in ServiceType::ALL {
            assert_eq!(
                PricingCatalog::service_type(service_type).service_type,
                service_type
            );
        }
        assert_eq!(PricingCatalog::service_types().len(), 2);
    }
}
