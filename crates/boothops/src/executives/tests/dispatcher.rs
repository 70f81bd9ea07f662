use std::sync::atomic::Ordering;

use serde_json::json;

use super::common::*;
use crate::executives::ExecutiveRole;

#[test]
fn profit_share_matches_worked_example() {
    let result = dispatcher().dispatch("resource_allocation", &profit_context());

    assert_eq!(result["decision"], "distribute_profit_share");
    assert_eq!(result["worker_pool_allocation"], 3600.0);
    assert_eq!(result["reinvestment"], 2400.0);
    assert_eq!(result["individual_allocations"][0]["allocation"], 2880.0);
    assert_eq!(result["individual_allocations"][1]["allocation"], 720.0);
    assert_eq!(result["ai_powered"], false);
    assert!(result.get("ai_fallback").is_none());
}

#[test]
fn string_revenue_becomes_fallback_payload() {
    let context = json!({ "revenue": "10000", "expenses": 4000 });

    let result = dispatcher().dispatch("resource_allocation", &context);

    assert_eq!(result["fallback"], true);
    assert!(result["error"]
        .as_str()
        .expect("error message")
        .contains("revenue"));
}

#[test]
fn non_list_worker_pool_becomes_fallback_payload() {
    let context = json!({ "revenue": 500, "wage_earner_pool": { "id": 1 } });

    let result = dispatcher().dispatch("resource_allocation", &context);

    assert_eq!(result["fallback"], true);
}

#[test]
fn unknown_decision_type_gets_default() {
    let result = dispatcher().dispatch("hostile_takeover", &json!({}));

    assert_eq!(result["decision"], "default");
    assert_eq!(result["decision_type"], "hostile_takeover");
    assert!(result["reasoning"]
        .as_str()
        .expect("reasoning")
        .contains("hostile_takeover"));
}

#[test]
fn decision_types_are_case_insensitive() {
    let result = dispatcher().dispatch("Quality_Assurance", &quality_context());
    assert_eq!(result["decision"], "quality_review");
    assert_eq!(result["improvement_areas"], json!(["late", "rude"]));
}

#[test]
fn executives_only_answer_their_own_decisions() {
    let dispatcher = dispatcher();

    let declined = dispatcher.dispatch_as(ExecutiveRole::Cmo, "resource_allocation", &profit_context());
    assert_eq!(declined["decision"], "default");
    assert_eq!(declined["role"], "CMO");

    let answered = dispatcher.dispatch_as(ExecutiveRole::Ceo, "resource_allocation", &profit_context());
    assert_eq!(answered["decision"], "distribute_profit_share");
}

#[test]
fn every_decision_type_handles_an_empty_context() {
    let dispatcher = dispatcher();
    for decision_type in crate::executives::DecisionType::ALL {
        let result = dispatcher.dispatch(decision_type.as_str(), &json!({}));
        assert!(result.get("error").is_none(), "{decision_type} failed: {result}");
        assert_ne!(result["decision"], "default");
    }
}

#[test]
fn null_context_is_treated_as_empty() {
    let result = dispatcher().dispatch("booking_optimization", &serde_json::Value::Null);
    assert_eq!(result["max_concurrent_bookings"], 0);
}

#[test]
fn model_decision_is_returned_when_valid() {
    let model = ScriptedModel::replying(r#"{"decision": "raise_crew_pay", "reasoning": "busy season"}"#);
    let calls = model.calls();
    let dispatcher = dispatcher_with_model(model);

    let result = dispatcher.dispatch("resource_allocation", &profit_context());

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(result["decision"], "raise_crew_pay");
    assert_eq!(result["ai_powered"], true);
    assert_eq!(result["confidence"], 0.9);
}

#[test]
fn non_json_model_reply_falls_back_to_rules() {
    let dispatcher = dispatcher_with_model(ScriptedModel::replying("Pay everyone more."));

    let result = dispatcher.dispatch("resource_allocation", &profit_context());

    assert_eq!(result["decision"], "distribute_profit_share");
    assert_eq!(result["ai_powered"], false);
    assert_eq!(result["ai_fallback"], true);
}

#[test]
fn offline_model_falls_back_to_rules() {
    let dispatcher = dispatcher_with_model(ScriptedModel::offline());

    let result = dispatcher.dispatch("staff_scheduling", &json!({ "bookings": [] }));

    assert_eq!(result["decision"], "first_fit_staff_schedule");
    assert_eq!(result["ai_fallback"], true);
}

#[test]
fn panicking_model_falls_back_to_rules() {
    let model = ScriptedModel::panicking();
    let calls = model.calls();
    let dispatcher = dispatcher_with_model(model);

    let result = dispatcher.dispatch("resource_allocation", &profit_context());

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(result["decision"], "distribute_profit_share");
    assert_eq!(result["ai_powered"], false);
    assert_eq!(result["ai_fallback"], true);
}

#[test]
fn float_event_counts_do_not_block_profit_share() {
    let context = json!({
        "revenue": 10000,
        "expenses": 4000,
        "wage_earner_pool": [
            { "id": 1, "performance_score": 8, "events_completed": 14.0 },
            { "id": 2, "performance_score": 2, "events_completed": -1 }
        ]
    });

    let result = dispatcher().dispatch("resource_allocation", &context);

    assert!(result.get("error").is_none(), "{result}");
    assert_eq!(result["individual_allocations"][0]["allocation"], 2880.0);
}

#[test]
fn model_is_not_consulted_for_unknown_types() {
    let model = ScriptedModel::replying("{}");
    let calls = model.calls();
    let dispatcher = dispatcher_with_model(model);

    let result = dispatcher.dispatch("unknown", &json!({}));

    assert_eq!(result["decision"], "default");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn status_lists_every_executive() {
    let status = dispatcher().status();

    assert_eq!(status.system_status, "operational");
    assert!(!status.model_decisions);
    assert_eq!(status.executives.len(), 3);
    let coo = &status.executives[2];
    assert_eq!(coo.role, ExecutiveRole::Coo);
    assert_eq!(coo.decision_types.len(), 3);
}
