use crate::model::{AnswerValue, FormData, FormStep, HealthPlan};
use itertools::Itertools;
use tracing::debug;

/// Answer key holding the user's preferred price bucket.
pub const PRICE_RANGE_KEY: &str = "priceRange";
/// Answer key holding the services the user is interested in.
pub const SERVICES_KEY: &str = "services";

/// Tunables for the general recommendation mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationPolicy {
    /// Upper bound on plans returned when the step has no curated list.
    pub max_results: usize,
    /// Price bucket assumed when the user did not pick one.
    pub default_price_range: String,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self {
            max_results: 3,
            default_price_range: "medio".to_string(),
        }
    }
}

/// Picks the plans shown when a flow completes.
#[derive(Debug, Clone, Default)]
pub struct RecommendationSelector {
    policy: RecommendationPolicy,
}

impl RecommendationSelector {
    pub fn new(policy: RecommendationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RecommendationPolicy {
        &self.policy
    }

    /// Selects recommendations for a flow that completed on `step`.
    ///
    /// A step with curated plan ids gets exactly those plans, in catalog order and
    /// without a cap. Otherwise plans qualify by matching price bucket, by a feature
    /// mentioning one of the selected services, or by being flagged as recommended;
    /// flagged plans come first, then cheaper ones, truncated to `max_results`.
    pub fn select(
        &self,
        step: &FormStep,
        plans: &[HealthPlan],
        form_data: &FormData,
    ) -> Vec<HealthPlan> {
        if !step.recommended_plan_ids.is_empty() {
            let curated: Vec<HealthPlan> = plans
                .iter()
                .filter(|plan| step.recommended_plan_ids.contains(&plan.id))
                .cloned()
                .collect();
            debug!(
                step = step.step_number,
                count = curated.len(),
                "using curated recommendations"
            );
            return curated;
        }

        let price_range = self.price_range(form_data);
        let services = services(form_data);

        let selected: Vec<HealthPlan> = plans
            .iter()
            .filter(|plan| {
                plan.target_price_range == price_range
                    || offers_any(plan, &services)
                    || plan.is_recommended
            })
            .sorted_by(|a, b| {
                b.is_recommended
                    .cmp(&a.is_recommended)
                    .then(a.monthly_price.cmp(&b.monthly_price))
            })
            .take(self.policy.max_results)
            .cloned()
            .collect();

        debug!(
            step = step.step_number,
            price_range = %price_range,
            services = services.len(),
            count = selected.len(),
            "selected general recommendations"
        );
        selected
    }

    fn price_range(&self, form_data: &FormData) -> String {
        match form_data.get(PRICE_RANGE_KEY) {
            Some(value) if !value.is_blank() => value.to_text(),
            _ => self.policy.default_price_range.clone(),
        }
    }
}

/// Selects recommendations with the default policy.
pub fn select_recommendations(
    step: &FormStep,
    plans: &[HealthPlan],
    form_data: &FormData,
) -> Vec<HealthPlan> {
    RecommendationSelector::default().select(step, plans, form_data)
}

fn services(form_data: &FormData) -> Vec<String> {
    let tokens = match form_data.get(SERVICES_KEY) {
        Some(AnswerValue::List(items)) => items.clone(),
        Some(value) if !value.is_blank() => vec![value.to_text()],
        _ => Vec::new(),
    };
    tokens
        .into_iter()
        .filter(|token| !token.trim().is_empty())
        .map(|token| token.to_lowercase())
        .collect()
}

fn offers_any(plan: &HealthPlan, services: &[String]) -> bool {
    !services.is_empty()
        && plan.features.iter().any(|feature| {
            let feature = feature.to_lowercase();
            services.iter().any(|service| feature.contains(service.as_str()))
        })
}
