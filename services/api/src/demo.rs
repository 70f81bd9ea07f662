use crate::infra::build_dispatcher;
use boothops::config::AppConfig;
use boothops::error::AppError;
use boothops::telemetry;
use boothops::executives::{DecisionDispatcher, DecisionType, ExecutiveRole};
use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct DecideArgs {
    /// Decision to make, e.g. resource_allocation or staff_scheduling
    #[arg(long)]
    pub(crate) decision_type: String,
    /// Ask a specific executive (CEO, CMO, COO); other roles' decisions get the default result
    #[arg(long)]
    pub(crate) role: Option<String>,
    /// JSON file holding the decision context. Defaults to an empty context.
    #[arg(long)]
    pub(crate) context: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for sample bookings (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Only run decisions owned by this executive.
    #[arg(long)]
    pub(crate) executive: Option<String>,
}

pub(crate) fn run_decide(args: DecideArgs) -> Result<(), AppError> {
    let DecideArgs {
        decision_type,
        role,
        context,
    } = args;

    let config = AppConfig::load()?;
    let dispatcher = cli_dispatcher(&config)?;

    let context: Value = match context {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => json!({}),
    };

    let decision = match role {
        Some(role) => {
            let role: ExecutiveRole = role.parse().map_err(|_| AppError::UnknownRole(role))?;
            dispatcher.dispatch_as(role, &decision_type, &context)
        }
        None => dispatcher.dispatch(&decision_type, &context),
    };

    print_decision(&decision);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { today, executive } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let roles = match executive {
        Some(role) => vec![role.parse::<ExecutiveRole>().map_err(|_| AppError::UnknownRole(role))?],
        None => ExecutiveRole::ALL.to_vec(),
    };

    let config = AppConfig::load()?;
    let dispatcher = cli_dispatcher(&config)?;
    let allocation = dispatcher.policy().allocation;

    println!("Photo booth executive decision demo");
    println!(
        "Profit split: {:.0}% worker pool | {:.0}% maintenance | {:.0}% of pool shared equally",
        allocation.worker_share_ratio * 100.0,
        allocation.maintenance_ratio * 100.0,
        allocation.base_share_fraction * 100.0
    );
    println!("Sample bookings start {}", next_saturday(today));

    for role in roles {
        println!("\n{} decisions", role);
        for decision_type in role.decision_types() {
            println!("- {}", decision_type);
            let decision = run_sample(&dispatcher, role, decision_type, today);
            print_decision(&decision);
        }
    }

    Ok(())
}

/// Install logging for a one-shot command, then build its dispatcher.
fn cli_dispatcher(config: &AppConfig) -> Result<DecisionDispatcher, AppError> {
    telemetry::init(&config.telemetry)?;
    Ok(build_dispatcher(config))
}

fn run_sample(
    dispatcher: &DecisionDispatcher,
    role: ExecutiveRole,
    decision_type: DecisionType,
    today: NaiveDate,
) -> Value {
    let context = sample_context(decision_type, today);
    dispatcher.dispatch_as(role, decision_type.as_str(), &context)
}

fn print_decision(decision: &Value) {
    match serde_json::to_string_pretty(decision) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("  Decision payload unavailable: {}", err),
    }
}

fn next_saturday(today: NaiveDate) -> NaiveDate {
    let saturday = chrono::Weekday::Sat.num_days_from_monday();
    let offset = (saturday + 7 - today.weekday().num_days_from_monday()) % 7;
    today + chrono::Duration::days(i64::from(offset))
}

fn sample_context(decision_type: DecisionType, today: NaiveDate) -> Value {
    match decision_type {
        DecisionType::ResourceAllocation => json!({
            "revenue": 18250.50,
            "expenses": 9125.25,
            "wage_earner_pool": [
                { "id": 1, "name": "Jordan", "performance_score": 9.5, "events_completed": 14 },
                { "id": 2, "name": "Riley", "performance_score": 7.0, "events_completed": 9 },
                { "id": 3, "name": "Sam", "events_completed": 3 }
            ]
        }),
        DecisionType::StrategicPlanning => json!({
            "performance_metrics": { "average_rating": 4.7, "booking_growth": 0.06 },
            "financial_data": { "revenue_growth": 0.18 }
        }),
        DecisionType::ContentStrategy => json!({
            "engagement_metrics": {
                "wedding_posts_engagement": 0.082,
                "behind_scenes_engagement": 0.041,
                "testimonial_engagement": 0.067,
                "average_engagement": 0.055
            }
        }),
        DecisionType::PartnershipDevelopment => json!({
            "partner_performance": {
                "Riverside Venue": { "referral_rate": 0.18 },
                "Harbor Weddings": { "referral_rate": 0.12 },
                "Ballroom Co": { "referral_rate": 0.04 }
            }
        }),
        DecisionType::PricingOptimization => json!({
            "demand_data": { "high_demand_periods": ["may", "june", "december"] }
        }),
        DecisionType::BookingOptimization => json!({
            "staff_availability": [
                { "id": 1, "name": "Jordan", "available": true },
                { "id": 2, "name": "Riley", "available": true },
                { "id": 3, "name": "Sam", "available": false }
            ],
            "equipment_status": [
                { "name": "Mirror booth", "status": "available" },
                { "name": "Open-air booth", "status": "available" },
                { "name": "360 booth", "status": "in_repair" }
            ]
        }),
        DecisionType::StaffScheduling => {
            let saturday = next_saturday(today);
            let sunday = saturday + chrono::Duration::days(1);
            json!({
                "bookings": [
                    { "id": "wedding-sat", "event_date": saturday, "duration_hours": 4 },
                    { "id": "birthday-sat", "event_date": saturday, "duration_hours": 2 },
                    { "id": "gala-sun", "event_date": sunday }
                ],
                "staff_members": [
                    { "id": 1, "name": "Jordan", "available": false, "skills": ["photography"] },
                    { "id": 2, "name": "Riley", "available": true, "skills": ["customer_service"] }
                ]
            })
        }
        DecisionType::QualityAssurance => json!({
            "customer_feedback": [
                { "rating": 5, "issues": [] },
                { "rating": 4, "issues": ["print_delay"] },
                { "rating": 3, "issues": ["print_delay", "late_setup"] }
            ],
            "service_metrics": { "average_rating": 4.6, "average_response_time": 6 }
        }),
    }
}
