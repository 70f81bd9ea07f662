use serde::Serialize;
use serde_json::{json, Value};

use super::context::DecisionContext;
use super::policy::ExecutivePolicy;
use super::{allocation, capacity, marketing, quality, strategy};
use super::{DecisionError, DecisionType, ExecutiveRole};

/// Confidence reported on decisions produced by a language model.
pub const MODEL_CONFIDENCE: f64 = 0.9;

/// Resolved decision request handed to a strategy.
#[derive(Debug, Clone, Copy)]
pub struct DecisionRequest<'a> {
    pub role: ExecutiveRole,
    pub decision_type: DecisionType,
    pub context: &'a Value,
}

/// Something that can turn a decision request into a JSON decision.
pub trait DecisionStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn decide(&self, request: &DecisionRequest<'_>) -> Result<Value, DecisionError>;
}

/// Deterministic calculations; always available and authoritative.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedStrategy {
    policy: ExecutivePolicy,
}

impl RuleBasedStrategy {
    pub fn new(policy: ExecutivePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ExecutivePolicy {
        &self.policy
    }
}

fn to_json<T: Serialize>(outcome: T) -> Result<Value, DecisionError> {
    Ok(serde_json::to_value(outcome)?)
}

impl DecisionStrategy for RuleBasedStrategy {
    fn name(&self) -> &'static str {
        "rule_based"
    }

    fn decide(&self, request: &DecisionRequest<'_>) -> Result<Value, DecisionError> {
        let context = DecisionContext::new(request.context)?;
        let policy = &self.policy;

        match request.decision_type {
            DecisionType::ResourceAllocation => {
                to_json(allocation::from_context(&context, &policy.allocation)?)
            }
            DecisionType::StrategicPlanning => {
                to_json(strategy::from_context(&context, &policy.strategy)?)
            }
            DecisionType::ContentStrategy => to_json(marketing::content_from_context(&context)?),
            DecisionType::PartnershipDevelopment => {
                to_json(marketing::partnership_from_context(&context, &policy.marketing)?)
            }
            DecisionType::PricingOptimization => {
                to_json(marketing::pricing_from_context(&context, &policy.marketing)?)
            }
            DecisionType::BookingOptimization => {
                to_json(capacity::capacity_from_context(&context, &policy.scheduling)?)
            }
            DecisionType::StaffScheduling => {
                to_json(capacity::schedule_from_context(&context, &policy.scheduling)?)
            }
            DecisionType::QualityAssurance => {
                to_json(quality::from_context(&context, &policy.quality)?)
            }
        }
    }
}

/// Failure talking to, or understanding, a language model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("language model unavailable: {0}")]
    Unavailable(String),
    #[error("language model reply is not a JSON object")]
    NotAnObject,
    #[error("language model reply is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
}

/// Text-completion client. Implementations live outside this crate.
pub trait LanguageModel: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}

/// Best-effort strategy that asks a language model for a structured decision.
pub struct ModelBackedStrategy<M> {
    model: M,
    company: String,
}

impl<M: LanguageModel> ModelBackedStrategy<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            company: "Party Favor Photo".to_string(),
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn prompt(&self, request: &DecisionRequest<'_>) -> String {
        let context = serde_json::to_string_pretty(request.context)
            .unwrap_or_else(|_| request.context.to_string());
        format!(
            "You are the AI {role} for {company}, a photo booth rental service.\n\
             Decisions must put wage earner compensation and working conditions first, \
             keep customer service at five stars, and keep the business sustainable.\n\n\
             Decision type: {decision_type}\n\
             Context:\n{context}\n\n\
             Reply with a single JSON object containing \"decision\", \"reasoning\", \
             \"wage_earner_impact\", \"implementation_steps\", and \"success_metrics\".",
            role = request.role,
            company = self.company,
            decision_type = request.decision_type,
        )
    }
}

/// Strip a fenced code block some models wrap around JSON.
fn unfence(reply: &str) -> &str {
    let trimmed = reply.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|body| body.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

impl<M: LanguageModel> DecisionStrategy for ModelBackedStrategy<M> {
    fn name(&self) -> &'static str {
        "model_backed"
    }

    fn decide(&self, request: &DecisionRequest<'_>) -> Result<Value, DecisionError> {
        let reply = self.model.generate(&self.prompt(request))?;
        let parsed: Value = serde_json::from_str(unfence(&reply)).map_err(ModelError::InvalidJson)?;

        let Value::Object(mut decision) = parsed else {
            return Err(ModelError::NotAnObject.into());
        };
        decision.insert("ai_powered".to_string(), json!(true));
        decision.insert("confidence".to_string(), json!(MODEL_CONFIDENCE));
        Ok(Value::Object(decision))
    }
}
