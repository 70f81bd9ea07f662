use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::context::DecisionContext;
use super::domain::{FeedbackEntry, ServiceMetrics};
use super::policy::QualityPolicy;
use super::DecisionError;

pub const STATUS_EXCELLENT: &str = "excellent";
pub const STATUS_NEEDS_IMPROVEMENT: &str = "needs_improvement";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCount {
    pub issue: String,
    pub occurrences: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityOutcome {
    pub decision: String,
    pub average_rating: f64,
    pub improvement_areas: Vec<String>,
    pub issue_counts: Vec<IssueCount>,
    pub recommended_actions: Vec<String>,
    pub quality_status: String,
    pub reasoning: String,
}

pub fn assess(
    feedback: &[FeedbackEntry],
    metrics: &ServiceMetrics,
    policy: &QualityPolicy,
) -> QualityOutcome {
    let issue_counts = top_issues(feedback, policy);
    let improvement_areas: Vec<String> = issue_counts
        .iter()
        .map(|count| count.issue.clone())
        .collect();

    let average_rating = metrics.average_rating();
    let excellent = average_rating >= policy.excellence_threshold;

    let mut recommended_actions = Vec::new();
    if !excellent {
        recommended_actions.push("Implement additional paid staff training".to_string());
    }
    if metrics.average_response_time() > policy.response_time_limit_hours {
        recommended_actions.push("Improve response time protocols".to_string());
    }
    if !improvement_areas.is_empty() {
        recommended_actions.push(format!(
            "Address common issues: {}",
            improvement_areas.join(", ")
        ));
    }
    if excellent {
        recommended_actions.push("Recognize and reward excellent crew performance".to_string());
    }

    QualityOutcome {
        decision: "quality_review".to_string(),
        average_rating,
        improvement_areas,
        issue_counts,
        recommended_actions,
        quality_status: if excellent {
            STATUS_EXCELLENT
        } else {
            STATUS_NEEDS_IMPROVEMENT
        }
        .to_string(),
        reasoning: "Quality assessed from customer feedback and service metrics".to_string(),
    }
}

/// Issues from imperfect reviews, most frequent first, ties in first-seen order.
fn top_issues(feedback: &[FeedbackEntry], policy: &QualityPolicy) -> Vec<IssueCount> {
    let mut counts: Vec<IssueCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for entry in feedback
        .iter()
        .filter(|entry| entry.rating() < policy.perfect_rating)
    {
        for issue in entry.issues() {
            match positions.get(issue.as_str()) {
                Some(&position) => counts[position].occurrences += 1,
                None => {
                    positions.insert(issue.as_str(), counts.len());
                    counts.push(IssueCount {
                        issue: issue.clone(),
                        occurrences: 1,
                    });
                }
            }
        }
    }

    // sort_by is stable, so equal counts keep first-seen order.
    counts.sort_by(|left, right| right.occurrences.cmp(&left.occurrences));
    counts.truncate(policy.top_issue_count);
    counts
}

/// Reads `customer_feedback` and `service_metrics`.
pub(crate) fn from_context(
    context: &DecisionContext<'_>,
    policy: &QualityPolicy,
) -> Result<QualityOutcome, DecisionError> {
    let feedback: Vec<FeedbackEntry> = context.records("customer_feedback")?;
    let metrics: ServiceMetrics = context.record("service_metrics")?;
    Ok(assess(&feedback, &metrics, policy))
}
