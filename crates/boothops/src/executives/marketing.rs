//! Marketing decisions: content mix, partner ranking, and package pricing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::context::DecisionContext;
use super::domain::round_cents;
use super::policy::MarketingPolicy;
use super::DecisionError;

const CONTENT_TYPES: [(&str, &str); 3] = [
    ("wedding_posts_engagement", "wedding_showcases"),
    ("behind_scenes_engagement", "behind_the_scenes"),
    ("testimonial_engagement", "customer_testimonials"),
];

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub wedding_posts_engagement: f64,
    pub behind_scenes_engagement: f64,
    pub testimonial_engagement: f64,
    pub average_engagement: f64,
}

impl EngagementMetrics {
    fn by_key(&self, key: &str) -> f64 {
        match key {
            "wedding_posts_engagement" => self.wedding_posts_engagement,
            "behind_scenes_engagement" => self.behind_scenes_engagement,
            "testimonial_engagement" => self.testimonial_engagement,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPlan {
    pub decision: String,
    pub recommended_content_types: Vec<String>,
    pub posting_schedule: BTreeMap<String, String>,
    pub hashtag_strategy: Vec<String>,
    pub reasoning: String,
}

pub fn content_strategy(engagement: &EngagementMetrics) -> ContentPlan {
    let mut recommended: Vec<String> = CONTENT_TYPES
        .iter()
        .filter(|(key, _)| engagement.by_key(key) > engagement.average_engagement)
        .map(|(_, content)| content.to_string())
        .collect();
    if recommended.is_empty() {
        recommended = CONTENT_TYPES
            .iter()
            .map(|(_, content)| content.to_string())
            .collect();
    }

    let posting_schedule = [
        ("monday", "behind_the_scenes"),
        ("wednesday", "wedding_showcase"),
        ("friday", "customer_testimonial"),
        ("sunday", "team_spotlight"),
    ]
    .into_iter()
    .map(|(day, theme)| (day.to_string(), theme.to_string()))
    .collect();

    ContentPlan {
        decision: "engagement_led_content_mix".to_string(),
        recommended_content_types: recommended,
        posting_schedule,
        hashtag_strategy: ["#DMVWeddings", "#PhotoBoothFun", "#PartyFavorPhoto"]
            .into_iter()
            .map(str::to_string)
            .collect(),
        reasoning: "Favor content types that beat average engagement on a fixed weekly cadence"
            .to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnershipPlan {
    pub decision: String,
    pub top_partners: Vec<String>,
    pub partnership_priorities: Vec<String>,
    pub outreach_targets: Vec<String>,
    pub reasoning: String,
}

/// Partners are `(name, referral_rate)` pairs; output keeps input order.
pub fn partnership_development(
    partners: &[(String, f64)],
    policy: &MarketingPolicy,
) -> PartnershipPlan {
    let top_partners = partners
        .iter()
        .filter(|(_, referral_rate)| *referral_rate > policy.referral_rate_threshold)
        .map(|(name, _)| name.clone())
        .collect();

    PartnershipPlan {
        decision: "referral_partner_focus".to_string(),
        top_partners,
        partnership_priorities: [
            "Strengthen relationships with top-performing partners",
            "Identify new wedding planners in high-demand areas",
            "Develop venue partnerships for preferred vendor status",
            "Create referral incentive programs",
        ]
        .into_iter()
        .map(str::to_string)
        .collect(),
        outreach_targets: ["wedding_planners", "event_venues", "corporate_event_planners"]
            .into_iter()
            .map(str::to_string)
            .collect(),
        reasoning: format!(
            "Partners referring more than {:.0}% of their leads get priority",
            policy.referral_rate_threshold * 100.0
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalAdjustment {
    pub adjustment: f64,
    pub adjusted_pricing: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPlan {
    pub decision: String,
    pub base_pricing: BTreeMap<String, f64>,
    pub premium_services: BTreeMap<String, f64>,
    pub seasonal_adjustments: BTreeMap<String, SeasonalAdjustment>,
    pub reasoning: String,
}

pub fn pricing_optimization(high_demand_periods: &[String], policy: &MarketingPolicy) -> PricingPlan {
    let base_pricing: BTreeMap<String, f64> = policy.packages.iter().cloned().collect();
    let adjusted_pricing: BTreeMap<String, f64> = base_pricing
        .iter()
        .map(|(package, price)| (package.clone(), round_cents(price * policy.high_demand_multiplier)))
        .collect();

    let seasonal_adjustments = high_demand_periods
        .iter()
        .map(|period| {
            (
                period.clone(),
                SeasonalAdjustment {
                    adjustment: policy.high_demand_multiplier,
                    adjusted_pricing: adjusted_pricing.clone(),
                },
            )
        })
        .collect();

    PricingPlan {
        decision: "demand_adjusted_pricing".to_string(),
        base_pricing,
        premium_services: policy.premium_services.iter().cloned().collect(),
        seasonal_adjustments,
        reasoning: "Package pricing with premium add-ons and surcharges for high-demand periods"
            .to_string(),
    }
}

/// Reads the engagement figures under `engagement_metrics`.
pub(crate) fn content_from_context(
    context: &DecisionContext<'_>,
) -> Result<ContentPlan, DecisionError> {
    let engagement = context.section("engagement_metrics")?;
    let metrics = EngagementMetrics {
        wedding_posts_engagement: engagement.number("wedding_posts_engagement")?,
        behind_scenes_engagement: engagement.number("behind_scenes_engagement")?,
        testimonial_engagement: engagement.number("testimonial_engagement")?,
        average_engagement: engagement.number("average_engagement")?,
    };
    Ok(content_strategy(&metrics))
}

/// Reads `partner_performance.<partner>.referral_rate`, partners in input order.
pub(crate) fn partnership_from_context(
    context: &DecisionContext<'_>,
    policy: &MarketingPolicy,
) -> Result<PartnershipPlan, DecisionError> {
    let performance = context.section("partner_performance")?;
    let mut partners = Vec::new();
    for (name, _) in performance.entries() {
        let metrics = performance.section(name)?;
        partners.push((name.clone(), metrics.number("referral_rate")?));
    }
    Ok(partnership_development(&partners, policy))
}

/// Reads `demand_data.high_demand_periods`.
pub(crate) fn pricing_from_context(
    context: &DecisionContext<'_>,
    policy: &MarketingPolicy,
) -> Result<PricingPlan, DecisionError> {
    let demand = context.section("demand_data")?;
    let periods = demand.strings("high_demand_periods")?;
    Ok(pricing_optimization(&periods, policy))
}
