use serde::{Deserialize, Serialize};

use super::context::DecisionContext;
use super::domain::DEFAULT_RATING;
use super::policy::StrategyPolicy;
use super::DecisionError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyInputs {
    pub average_rating: f64,
    pub booking_growth: f64,
    pub revenue_growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategicPlan {
    pub decision: String,
    pub strategic_priorities: Vec<String>,
    pub focus_areas: Vec<String>,
    pub reasoning: String,
}

pub fn plan(inputs: &StrategyInputs, policy: &StrategyPolicy) -> StrategicPlan {
    let mut strategic_priorities = Vec::new();

    if inputs.average_rating < policy.satisfaction_floor {
        strategic_priorities.push("Invest in paid staff training and service quality".to_string());
    }
    if inputs.booking_growth < policy.booking_growth_target {
        strategic_priorities.push("Increase marketing reach and customer acquisition".to_string());
    }
    if inputs.revenue_growth < policy.revenue_growth_target {
        strategic_priorities.push("Optimize pricing and service offerings".to_string());
    }
    if strategic_priorities.is_empty() {
        strategic_priorities
            .push("Maintain excellence and expand worker profit sharing".to_string());
    }

    StrategicPlan {
        decision: "worker_centric_growth_strategy".to_string(),
        strategic_priorities,
        focus_areas: ["wage_earner_development", "customer_satisfaction", "operational_efficiency"]
            .into_iter()
            .map(str::to_string)
            .collect(),
        reasoning: "Priorities derived from satisfaction, booking growth, and revenue growth"
            .to_string(),
    }
}

/// Reads `performance_metrics.{average_rating, booking_growth}` and
/// `financial_data.revenue_growth`.
pub(crate) fn from_context(
    context: &DecisionContext<'_>,
    policy: &StrategyPolicy,
) -> Result<StrategicPlan, DecisionError> {
    let performance = context.section("performance_metrics")?;
    let financial = context.section("financial_data")?;
    let inputs = StrategyInputs {
        average_rating: performance.number_or("average_rating", DEFAULT_RATING)?,
        booking_growth: performance.number("booking_growth")?,
        revenue_growth: financial.number("revenue_growth")?,
    };
    Ok(plan(&inputs, policy))
}
