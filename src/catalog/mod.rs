use crate::error::{CatalogError, LoadError};
use crate::model::{FormStep, HealthPlan};
use tracing::{info, warn};

mod source;

pub use source::{CatalogSource, InMemoryCatalogSource, JsonCatalogSource};

/// A read-only snapshot of the form steps and health plans for a session.
///
/// Steps are kept sorted by step number. The snapshot is never mutated once built,
/// so one catalog can back many sessions behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    steps: Vec<FormStep>,
    plans: Vec<HealthPlan>,
}

impl Catalog {
    /// Validates and indexes the fetched data.
    ///
    /// Step numbers must be positive and unique. Choice fields without options are
    /// reported but accepted; they only make the field unanswerable.
    pub fn new(mut steps: Vec<FormStep>, plans: Vec<HealthPlan>) -> Result<Self, CatalogError> {
        if let Some(step) = steps.iter().find(|s| s.step_number == 0) {
            return Err(CatalogError::InvalidStepNumber {
                title: step.title.clone(),
            });
        }

        steps.sort_by_key(|s| s.step_number);
        if let Some(pair) = steps
            .windows(2)
            .find(|pair| pair[0].step_number == pair[1].step_number)
        {
            return Err(CatalogError::DuplicateStep(pair[0].step_number));
        }

        for step in &steps {
            for field in &step.fields {
                if field.field_type.is_choice() && field.options.is_empty() {
                    warn!(
                        step = step.step_number,
                        field = %field.id,
                        "choice field has no options"
                    );
                }
            }
        }

        Ok(Self { steps, plans })
    }

    /// Fetches both lists from `source` once and builds the snapshot.
    pub async fn load(source: &dyn CatalogSource) -> Result<Self, LoadError> {
        let steps = source.list_form_steps().await?;
        let plans = source.list_health_plans().await?;
        let catalog = Self::new(steps, plans)?;
        info!(
            steps = catalog.steps.len(),
            plans = catalog.plans.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn steps(&self) -> &[FormStep] {
        &self.steps
    }

    pub fn plans(&self) -> &[HealthPlan] {
        &self.plans
    }

    pub fn step(&self, step_number: u32) -> Option<&FormStep> {
        self.steps
            .binary_search_by_key(&step_number, |s| s.step_number)
            .ok()
            .map(|idx| &self.steps[idx])
    }

    /// The step a new session starts on.
    pub fn first_step_number(&self) -> Option<u32> {
        self.steps.first().map(|s| s.step_number)
    }

    /// The lowest step number strictly greater than `step_number`.
    pub fn next_step_number(&self, step_number: u32) -> Option<u32> {
        let idx = self.steps.partition_point(|s| s.step_number <= step_number);
        self.steps.get(idx).map(|s| s.step_number)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
