use serde::{Deserialize, Serialize};

/// Thresholds and ratios for every rule-based decision, passed to the dispatcher at build time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecutivePolicy {
    pub allocation: AllocationPolicy,
    pub scheduling: SchedulingPolicy,
    pub quality: QualityPolicy,
    pub strategy: StrategyPolicy,
    pub marketing: MarketingPolicy,
}

/// How profit is split between the worker pool, system upkeep, and reinvestment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationPolicy {
    /// Fraction of profit routed to the worker pool.
    pub worker_share_ratio: f64,
    /// Fraction of profit reserved for system maintenance; zero keeps a two-way split.
    pub maintenance_ratio: f64,
    /// Fraction of the worker pool divided equally before the performance-weighted share.
    pub base_share_fraction: f64,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            worker_share_ratio: 0.6,
            maintenance_ratio: 0.0,
            base_share_fraction: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingPolicy {
    /// A staff member qualifies when they hold at least one of these skills.
    pub required_skills: Vec<String>,
    pub setup_breakdown_hours: f64,
    /// Equipment status counted as ready for a booking.
    pub available_equipment_status: String,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            required_skills: vec!["photography".to_string(), "customer_service".to_string()],
            setup_breakdown_hours: 2.0,
            available_equipment_status: "available".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityPolicy {
    pub excellence_threshold: f64,
    /// Ratings at or above this value are not mined for issues.
    pub perfect_rating: f64,
    pub response_time_limit_hours: f64,
    pub top_issue_count: usize,
}

impl Default for QualityPolicy {
    fn default() -> Self {
        Self {
            excellence_threshold: 4.8,
            perfect_rating: 5.0,
            response_time_limit_hours: 24.0,
            top_issue_count: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyPolicy {
    pub satisfaction_floor: f64,
    pub booking_growth_target: f64,
    pub revenue_growth_target: f64,
}

impl Default for StrategyPolicy {
    fn default() -> Self {
        Self {
            satisfaction_floor: 4.5,
            booking_growth_target: 0.10,
            revenue_growth_target: 0.15,
        }
    }
}

/// Package price list, demand surcharges, and partner referral cut-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketingPolicy {
    /// `(package, price)` pairs in display order.
    pub packages: Vec<(String, f64)>,
    pub premium_services: Vec<(String, f64)>,
    pub high_demand_multiplier: f64,
    pub referral_rate_threshold: f64,
}

impl Default for MarketingPolicy {
    fn default() -> Self {
        let packages = [("2_hour", 498.0), ("3_hour", 747.0), ("4_hour", 996.0), ("5_hour", 1245.0)];
        let premium_services = [
            ("vertical_layout", 50.0),
            ("custom_backdrop", 100.0),
            ("extended_hours", 200.0),
        ];
        Self {
            packages: packages
                .into_iter()
                .map(|(name, price)| (name.to_string(), price))
                .collect(),
            premium_services: premium_services
                .into_iter()
                .map(|(name, price)| (name.to_string(), price))
                .collect(),
            high_demand_multiplier: 1.15,
            referral_rate_threshold: 0.10,
        }
    }
}
