//! Rule-based executive decisions.
//!
//! Each decision type belongs to one [`ExecutiveRole`] and maps to a pure calculation over a
//! JSON context. The [`DecisionDispatcher`] is the only entry point callers need: it resolves
//! the decision type, runs the optional model-backed strategy, falls back to the rule-based
//! path, and converts every failure into a JSON payload instead of an error.

pub mod advisor;
pub mod allocation;
pub mod capacity;
pub(crate) mod context;
pub mod dispatcher;
pub mod domain;
pub mod marketing;
pub mod policy;
pub mod quality;
pub mod router;
pub mod strategy;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use advisor::{
    DecisionRequest, DecisionStrategy, LanguageModel, ModelBackedStrategy, ModelError,
    RuleBasedStrategy,
};
pub use allocation::{AllocationOutcome, IndividualAllocation};
pub use capacity::{CapacityOutcome, Schedule, ScheduleOutcome, StaffAssignment};
pub use dispatcher::{DecisionDispatcher, ExecutiveSummary, SystemStatus};
pub use domain::{
    BookingRequest, EquipmentRecord, FeedbackEntry, RecordId, ServiceMetrics, StaffRecord,
    WorkerRecord,
};
pub use policy::{
    AllocationPolicy, ExecutivePolicy, MarketingPolicy, QualityPolicy, SchedulingPolicy,
    StrategyPolicy,
};
pub use quality::QualityOutcome;
pub use router::decision_router;

/// Virtual executive responsible for a family of decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExecutiveRole {
    Ceo,
    Cmo,
    Coo,
}

impl ExecutiveRole {
    pub const ALL: [ExecutiveRole; 3] = [ExecutiveRole::Ceo, ExecutiveRole::Cmo, ExecutiveRole::Coo];

    pub fn label(&self) -> &'static str {
        match self {
            ExecutiveRole::Ceo => "CEO",
            ExecutiveRole::Cmo => "CMO",
            ExecutiveRole::Coo => "COO",
        }
    }

    /// Decision types this role answers, in a stable order.
    pub fn decision_types(&self) -> Vec<DecisionType> {
        DecisionType::ALL
            .into_iter()
            .filter(|decision_type| decision_type.role() == *self)
            .collect()
    }
}

impl fmt::Display for ExecutiveRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExecutiveRole {
    type Err = UnknownTag;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ceo" => Ok(Self::Ceo),
            "cmo" => Ok(Self::Cmo),
            "coo" => Ok(Self::Coo),
            _ => Err(UnknownTag(value.to_string())),
        }
    }
}

/// Every decision the rule-based path knows how to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    ResourceAllocation,
    StrategicPlanning,
    ContentStrategy,
    PartnershipDevelopment,
    PricingOptimization,
    BookingOptimization,
    StaffScheduling,
    QualityAssurance,
}

impl DecisionType {
    pub const ALL: [DecisionType; 8] = [
        DecisionType::ResourceAllocation,
        DecisionType::StrategicPlanning,
        DecisionType::ContentStrategy,
        DecisionType::PartnershipDevelopment,
        DecisionType::PricingOptimization,
        DecisionType::BookingOptimization,
        DecisionType::StaffScheduling,
        DecisionType::QualityAssurance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionType::ResourceAllocation => "resource_allocation",
            DecisionType::StrategicPlanning => "strategic_planning",
            DecisionType::ContentStrategy => "content_strategy",
            DecisionType::PartnershipDevelopment => "partnership_development",
            DecisionType::PricingOptimization => "pricing_optimization",
            DecisionType::BookingOptimization => "booking_optimization",
            DecisionType::StaffScheduling => "staff_scheduling",
            DecisionType::QualityAssurance => "quality_assurance",
        }
    }

    pub fn role(&self) -> ExecutiveRole {
        match self {
            DecisionType::ResourceAllocation | DecisionType::StrategicPlanning => ExecutiveRole::Ceo,
            DecisionType::ContentStrategy
            | DecisionType::PartnershipDevelopment
            | DecisionType::PricingOptimization => ExecutiveRole::Cmo,
            DecisionType::BookingOptimization
            | DecisionType::StaffScheduling
            | DecisionType::QualityAssurance => ExecutiveRole::Coo,
        }
    }
}

impl fmt::Display for DecisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecisionType {
    type Err = UnknownTag;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        DecisionType::ALL
            .into_iter()
            .find(|decision_type| decision_type.as_str() == normalized)
            .ok_or_else(|| UnknownTag(value.to_string()))
    }
}

/// Tag that does not name a known role or decision type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized tag '{0}'")]
pub struct UnknownTag(pub String);

/// Failure inside a rule-based calculation. The dispatcher turns these into fallback payloads.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    #[error("decision context must be a JSON object")]
    ContextNotObject,
    #[error("field '{field}' must be {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },
    #[error("field '{field}' is malformed: {source}")]
    Malformed {
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unable to serialize decision: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Model(#[from] ModelError),
}
