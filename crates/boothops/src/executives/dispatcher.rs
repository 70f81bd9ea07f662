use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{error, info, warn};

use super::advisor::{DecisionRequest, DecisionStrategy, RuleBasedStrategy};
use super::policy::ExecutivePolicy;
use super::{DecisionType, ExecutiveRole};

/// Entry point for every executive decision.
///
/// Dispatch never fails: unknown decision types produce a default payload and calculation
/// errors produce `{"error": ..., "fallback": true}`.
#[derive(Clone)]
pub struct DecisionDispatcher {
    rules: RuleBasedStrategy,
    model: Option<Arc<dyn DecisionStrategy>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutiveSummary {
    pub role: ExecutiveRole,
    pub decision_types: Vec<DecisionType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemStatus {
    pub system_status: &'static str,
    pub autonomous_mode: bool,
    pub model_decisions: bool,
    pub executives: Vec<ExecutiveSummary>,
}

impl DecisionDispatcher {
    pub fn new(policy: ExecutivePolicy) -> Self {
        Self {
            rules: RuleBasedStrategy::new(policy),
            model: None,
        }
    }

    /// Try `strategy` before the rule-based path on every dispatch.
    pub fn with_model_strategy(mut self, strategy: Arc<dyn DecisionStrategy>) -> Self {
        self.model = Some(strategy);
        self
    }

    pub fn policy(&self) -> &ExecutivePolicy {
        self.rules.policy()
    }

    /// Dispatch to whichever executive owns `decision_type`.
    pub fn dispatch(&self, decision_type: &str, context: &Value) -> Value {
        match decision_type.parse::<DecisionType>() {
            Ok(parsed) => self.run(parsed.role(), parsed, context),
            Err(_) => {
                info!(decision_type, "no handler for decision type");
                default_decision(decision_type, None)
            }
        }
    }

    /// Dispatch on behalf of `role`; types owned by another role get the default payload.
    pub fn dispatch_as(&self, role: ExecutiveRole, decision_type: &str, context: &Value) -> Value {
        match decision_type.parse::<DecisionType>() {
            Ok(parsed) if parsed.role() == role => self.run(role, parsed, context),
            _ => {
                info!(%role, decision_type, "decision type not handled by executive");
                default_decision(decision_type, Some(role))
            }
        }
    }

    pub fn status(&self) -> SystemStatus {
        SystemStatus {
            system_status: "operational",
            autonomous_mode: true,
            model_decisions: self.model.is_some(),
            executives: ExecutiveRole::ALL
                .into_iter()
                .map(|role| ExecutiveSummary {
                    role,
                    decision_types: role.decision_types(),
                })
                .collect(),
        }
    }

    fn run(&self, role: ExecutiveRole, decision_type: DecisionType, context: &Value) -> Value {
        let request = DecisionRequest {
            role,
            decision_type,
            context,
        };

        let mut model_failed = false;
        if let Some(model) = &self.model {
            // A panicking model client counts as a failed decision.
            let attempt = panic::catch_unwind(AssertUnwindSafe(|| model.decide(&request)));
            let failure = match attempt {
                Ok(Ok(decision)) => {
                    info!(%role, %decision_type, strategy = model.name(), "decision made");
                    return decision;
                }
                Ok(Err(err)) => err.to_string(),
                Err(payload) => format!("model panicked: {}", panic_message(&*payload)),
            };
            warn!(
                %role,
                %decision_type,
                strategy = model.name(),
                error = %failure,
                "model decision failed; using rule-based result"
            );
            model_failed = true;
        }

        match self.rules.decide(&request) {
            Ok(decision) => {
                info!(%role, %decision_type, strategy = self.rules.name(), "decision made");
                let mut extra = vec![("ai_powered", json!(false))];
                if model_failed {
                    extra.push(("ai_fallback", json!(true)));
                }
                tag(decision, extra)
            }
            Err(err) => {
                error!(%role, %decision_type, error = %err, "decision failed");
                json!({
                    "error": err.to_string(),
                    "fallback": true,
                })
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

fn tag(decision: Value, extra: Vec<(&str, Value)>) -> Value {
    match decision {
        Value::Object(mut fields) => {
            for (key, value) in extra {
                fields.insert(key.to_string(), value);
            }
            Value::Object(fields)
        }
        other => other,
    }
}

fn default_decision(decision_type: &str, role: Option<ExecutiveRole>) -> Value {
    let mut payload = Map::new();
    payload.insert("decision".to_string(), json!("default"));
    let reasoning = match role {
        Some(role) => format!("{role} has no specific logic for decision type: {decision_type}"),
        None => format!("No specific logic for decision type: {decision_type}"),
    };
    payload.insert("reasoning".to_string(), json!(reasoning));
    payload.insert("decision_type".to_string(), json!(decision_type));
    if let Some(role) = role {
        payload.insert("role".to_string(), json!(role));
    }
    Value::Object(payload)
}
