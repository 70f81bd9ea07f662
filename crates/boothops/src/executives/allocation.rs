//! Profit sharing for the worker pool.
//!
//! Profit is split by [`AllocationPolicy`] into the worker pool, an optional maintenance
//! reserve, and reinvestment. The worker pool is then divided by performance score, after an
//! optional equal base share. Only outputs are rounded to cents; all intermediate math runs on
//! unrounded values so the per-worker figures stay within a cent each of the pool total.

use serde::{Deserialize, Serialize};

use super::context::DecisionContext;
use super::domain::{round_cents, RecordId, WorkerRecord};
use super::policy::AllocationPolicy;
use super::DecisionError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualAllocation {
    pub staff_id: Option<RecordId>,
    pub name: Option<String>,
    pub base_allocation: f64,
    pub performance_bonus: f64,
    pub allocation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationOutcome {
    pub decision: String,
    pub profit: f64,
    pub worker_pool_allocation: f64,
    pub reinvestment: f64,
    pub system_maintenance: f64,
    pub individual_allocations: Vec<IndividualAllocation>,
    pub reasoning: String,
}

impl AllocationOutcome {
    pub fn distributed_total(&self) -> f64 {
        self.individual_allocations
            .iter()
            .map(|entry| entry.allocation)
            .sum()
    }
}

pub fn allocate(
    revenue: f64,
    expenses: f64,
    worker_pool: &[WorkerRecord],
    policy: &AllocationPolicy,
) -> AllocationOutcome {
    let profit = revenue - expenses;

    // Also catches NaN.
    if !(profit > 0.0) {
        return AllocationOutcome {
            decision: "maintain_operations".to_string(),
            profit: if profit.is_nan() { 0.0 } else { round_cents(profit) },
            worker_pool_allocation: 0.0,
            reinvestment: 0.0,
            system_maintenance: 0.0,
            individual_allocations: Vec::new(),
            reasoning: "No profit available; base wages continue unchanged".to_string(),
        };
    }

    let pool_total = profit * policy.worker_share_ratio;
    let system_maintenance = profit * policy.maintenance_ratio;
    let reinvestment = profit - pool_total - system_maintenance;

    let individual_allocations = distribute(pool_total, worker_pool, policy.base_share_fraction);

    AllocationOutcome {
        decision: "distribute_profit_share".to_string(),
        profit: round_cents(profit),
        worker_pool_allocation: round_cents(pool_total),
        reinvestment: round_cents(reinvestment),
        system_maintenance: round_cents(system_maintenance),
        individual_allocations,
        reasoning: format!(
            "{:.0}% of profit to the worker pool weighted by performance, {:.0}% reinvested",
            policy.worker_share_ratio * 100.0,
            (1.0 - policy.worker_share_ratio - policy.maintenance_ratio) * 100.0
        ),
    }
}

fn distribute(
    pool_total: f64,
    worker_pool: &[WorkerRecord],
    base_share_fraction: f64,
) -> Vec<IndividualAllocation> {
    let total_weight: f64 = worker_pool.iter().map(WorkerRecord::weight).sum();
    if worker_pool.is_empty() || total_weight <= 0.0 {
        return Vec::new();
    }

    let base_share = pool_total * base_share_fraction / worker_pool.len() as f64;
    let performance_pool = pool_total * (1.0 - base_share_fraction);

    worker_pool
        .iter()
        .map(|worker| {
            let bonus = performance_pool * (worker.weight() / total_weight);
            IndividualAllocation {
                staff_id: worker.id.clone(),
                name: worker.name.clone(),
                base_allocation: round_cents(base_share),
                performance_bonus: round_cents(bonus),
                allocation: round_cents(base_share + bonus),
            }
        })
        .collect()
}

/// Reads `revenue`, `expenses`, and `wage_earner_pool` (or `worker_pool`).
pub(crate) fn from_context(
    context: &DecisionContext<'_>,
    policy: &AllocationPolicy,
) -> Result<AllocationOutcome, DecisionError> {
    let revenue = context.number("revenue")?;
    let expenses = context.number("expenses")?;
    let pool: Vec<WorkerRecord> = context.records_from(&["wage_earner_pool", "worker_pool"])?;
    Ok(allocate(revenue, expenses, &pool, policy))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Vec<WorkerRecord> {
        vec![WorkerRecord::new(1, "Avery", 8.0), WorkerRecord::new(2, "Blake", 2.0)]
    }

    #[test]
    fn splits_profit_and_weights_by_performance() {
        let outcome = allocate(10_000.0, 4_000.0, &pool(), &AllocationPolicy::default());

        assert_eq!(outcome.profit, 6000.0);
        assert_eq!(outcome.worker_pool_allocation, 3600.0);
        assert_eq!(outcome.reinvestment, 2400.0);
        let amounts: Vec<f64> = outcome
            .individual_allocations
            .iter()
            .map(|entry| entry.allocation)
            .collect();
        assert_eq!(amounts, vec![2880.0, 720.0]);
        assert_eq!(outcome.individual_allocations[0].staff_id, Some(RecordId::Numeric(1)));
        assert_eq!(outcome.distributed_total(), 3600.0);
    }

    #[test]
    fn zero_or_negative_profit_short_circuits() {
        for (revenue, expenses) in [(4_000.0, 4_000.0), (1_000.0, 2_500.0), (0.0, 0.0)] {
            let outcome = allocate(revenue, expenses, &pool(), &AllocationPolicy::default());
            assert_eq!(outcome.worker_pool_allocation, 0.0);
            assert_eq!(outcome.reinvestment, 0.0);
            assert!(outcome.individual_allocations.is_empty());
            assert!(outcome.reasoning.contains("No profit available"));
        }
    }

    #[test]
    fn empty_pool_yields_no_allocations() {
        let outcome = allocate(5_000.0, 1_000.0, &[], &AllocationPolicy::default());
        assert_eq!(outcome.worker_pool_allocation, 2400.0);
        assert!(outcome.individual_allocations.is_empty());
    }

    #[test]
    fn zero_total_performance_yields_no_allocations() {
        let pool = vec![WorkerRecord::new(1, "Avery", 0.0), WorkerRecord::new(2, "Blake", 0.0)];
        let outcome = allocate(5_000.0, 1_000.0, &pool, &AllocationPolicy::default());
        assert!(outcome.individual_allocations.is_empty());
    }

    #[test]
    fn missing_scores_use_the_baseline() {
        let pool = vec![
            WorkerRecord {
                id: Some(RecordId::Numeric(1)),
                ..WorkerRecord::default()
            },
            WorkerRecord::new(2, "Blake", 5.0),
        ];
        let outcome = allocate(2_000.0, 0.0, &pool, &AllocationPolicy::default());
        assert_eq!(outcome.individual_allocations[0].allocation, 600.0);
        assert_eq!(outcome.individual_allocations[1].allocation, 600.0);
    }

    #[test]
    fn rounding_error_stays_within_a_cent_per_worker() {
        let pool: Vec<WorkerRecord> = (0..7i64)
            .map(|index| WorkerRecord::new(index, "Crew", 1.0 + index as f64 * 1.3))
            .collect();
        let policy = AllocationPolicy {
            worker_share_ratio: 0.7,
            maintenance_ratio: 0.1,
            base_share_fraction: 0.6,
        };

        for (revenue, expenses) in [(10_000.0, 3_333.33), (1_234.57, 1_000.0), (99.99, 0.01)] {
            let outcome = allocate(revenue, expenses, &pool, &policy);
            let drift = (outcome.distributed_total() - outcome.worker_pool_allocation).abs();
            assert!(
                drift <= 0.01 * pool.len() as f64 + 1e-9,
                "drift {drift} too large for revenue {revenue}"
            );
        }
    }

    #[test]
    fn three_way_split_reserves_maintenance() {
        let policy = AllocationPolicy {
            worker_share_ratio: 0.7,
            maintenance_ratio: 0.1,
            base_share_fraction: 0.0,
        };
        let outcome = allocate(1_000.0, 0.0, &pool(), &policy);
        assert_eq!(outcome.worker_pool_allocation, 700.0);
        assert_eq!(outcome.system_maintenance, 100.0);
        assert_eq!(outcome.reinvestment, 200.0);
    }

    #[test]
    fn base_share_is_divided_equally() {
        let policy = AllocationPolicy {
            worker_share_ratio: 0.5,
            maintenance_ratio: 0.0,
            base_share_fraction: 0.5,
        };
        let outcome = allocate(2_000.0, 0.0, &pool(), &policy);
        let first = &outcome.individual_allocations[0];
        let second = &outcome.individual_allocations[1];
        assert_eq!(first.base_allocation, 250.0);
        assert_eq!(second.base_allocation, 250.0);
        assert_eq!(first.performance_bonus, 400.0);
        assert_eq!(second.performance_bonus, 100.0);
        assert_eq!(first.allocation + second.allocation, 1000.0);
    }
}
