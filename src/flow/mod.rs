//! The session state machine.
//!
//! A [`FlowController`] starts `InProgress` on the lowest step of its catalog. Each
//! [`submit_step`](FlowController::submit_step) merges the submitted answers, resolves
//! the current step's navigation rules and either moves to another step or completes
//! the flow with a list of recommended plans. Once complete, only
//! [`reset`](FlowController::reset) is accepted.

use crate::catalog::{Catalog, CatalogSource};
use crate::error::{FlowError, LoadError};
use crate::model::{FormData, FormStep};
use crate::navigation::{NavigationResolver, Resolution, Transition};
use crate::recommend::{RecommendationPolicy, RecommendationSelector};
use std::sync::Arc;
use tracing::{debug, info, warn};

mod state;

pub use state::{FlowExit, FlowState, Lead, Progress};

/// Drives one user's pass through the form.
pub struct FlowController {
    catalog: Arc<Catalog>,
    selector: RecommendationSelector,
    state: FlowState,
}

/// Configures a [`FlowController`] before the session starts.
pub struct FlowControllerBuilder {
    catalog: Arc<Catalog>,
    policy: RecommendationPolicy,
}

impl FlowControllerBuilder {
    pub fn new(catalog: impl Into<Arc<Catalog>>) -> Self {
        Self {
            catalog: catalog.into(),
            policy: RecommendationPolicy::default(),
        }
    }

    pub fn recommendation_policy(mut self, policy: RecommendationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn max_recommendations(mut self, max_results: usize) -> Self {
        self.policy.max_results = max_results;
        self
    }

    pub fn default_price_range(mut self, price_range: impl Into<String>) -> Self {
        self.policy.default_price_range = price_range.into();
        self
    }

    pub fn build(self) -> FlowController {
        let state = FlowState::initial(initial_step(&self.catalog));
        FlowController {
            catalog: self.catalog,
            selector: RecommendationSelector::new(self.policy),
            state,
        }
    }
}

impl FlowController {
    pub fn new(catalog: impl Into<Arc<Catalog>>) -> Self {
        FlowControllerBuilder::new(catalog).build()
    }

    pub fn builder(catalog: impl Into<Arc<Catalog>>) -> FlowControllerBuilder {
        FlowControllerBuilder::new(catalog)
    }

    /// Fetches the catalogs from `source` and starts a session on them.
    ///
    /// No controller exists until loading succeeds; on a fetch error the caller
    /// may retry.
    pub async fn load(source: &dyn CatalogSource) -> Result<Self, LoadError> {
        let catalog = Catalog::load(source).await?;
        Ok(Self::new(catalog))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// An owned copy of the state, for handing to a renderer.
    pub fn snapshot(&self) -> FlowState {
        self.state.clone()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete
    }

    /// The step the user is on.
    ///
    /// Fails with [`FlowError::StepNotFound`] when a rule jumped to a step the
    /// catalog does not have; the caller shows a fallback message.
    pub fn current_step(&self) -> Result<&FormStep, FlowError> {
        self.catalog
            .step(self.state.current_step)
            .ok_or(FlowError::StepNotFound(self.state.current_step))
    }

    /// Submits the answers for the current step and moves the flow along.
    ///
    /// The answers are merged into the session before the step is looked up, so they
    /// are kept even when the step turns out to be missing.
    pub fn submit_step(&mut self, values: FormData) -> Result<Resolution, FlowError> {
        self.ensure_in_progress("submit step")?;
        self.state.form_data.extend(values);

        let catalog = Arc::clone(&self.catalog);
        let current = self.state.current_step;
        let step = catalog.step(current).ok_or_else(|| {
            warn!(step = current, "current step is missing from the catalog");
            FlowError::StepNotFound(current)
        })?;

        let resolution = NavigationResolver::resolve(step, &self.state.form_data);
        if let Some(matched) = &resolution.matched {
            debug!(step = current, rule = %matched.rule_id, reason = %matched.reason, "rule matched");
        }

        match &resolution.transition {
            Transition::GotoStep(target) => self.advance(*target),
            Transition::Complete { message } => self.complete(
                step,
                FlowExit::Finished {
                    message: message.clone(),
                },
            ),
            Transition::GotoExternal { url, message } => self.complete(
                step,
                FlowExit::Redirect {
                    url: url.clone(),
                    message: message.clone(),
                },
            ),
            Transition::NoRuleMatched => match catalog.next_step_number(current) {
                Some(next) => self.advance(next),
                None => self.complete(step, FlowExit::Finished { message: None }),
            },
        }

        Ok(resolution)
    }

    /// Returns to the step left most recently. Answers are kept and rules are not
    /// re-evaluated.
    pub fn go_previous(&mut self) -> Result<(), FlowError> {
        self.ensure_in_progress("go to previous step")?;
        let previous = self
            .state
            .completed_steps
            .pop()
            .ok_or_else(|| FlowError::InvalidTransition {
                operation: "go to previous step",
                reason: "no step has been completed yet".to_string(),
            })?;
        debug!(from = self.state.current_step, to = previous, "went back");
        self.state.current_step = previous;
        Ok(())
    }

    /// Discards every answer and the history, and starts over on the first step.
    pub fn reset(&mut self) {
        self.state = FlowState::initial(initial_step(&self.catalog));
        debug!(step = self.state.current_step, "flow reset");
    }

    /// Ids of required fields of the current step left blank in `values`.
    pub fn missing_required(&self, values: &FormData) -> Result<Vec<String>, FlowError> {
        let step = self.current_step()?;
        Ok(step
            .fields
            .iter()
            .filter(|f| f.required && f.accepts_answer())
            .filter(|f| values.get(&f.id).is_none_or(|v| v.is_blank()))
            .map(|f| f.id.clone())
            .collect())
    }

    pub fn progress(&self) -> Progress {
        let total = self.catalog.len();
        if self.state.is_complete {
            return Progress {
                position: total,
                total,
                percent: 100,
            };
        }
        let position = (self.state.completed_steps.len() + 1).min(total);
        let percent = if total == 0 {
            0
        } else {
            (position * 100 / total) as u8
        };
        Progress {
            position,
            total,
            percent,
        }
    }

    /// The submission payload, once the flow is complete.
    pub fn lead(&self) -> Option<Lead> {
        let exit = self.state.exit.clone()?;
        Some(Lead {
            answers: self.state.form_data.clone(),
            visited_steps: self.state.completed_steps.clone(),
            recommended_plan_ids: self
                .state
                .recommendations
                .iter()
                .map(|p| p.id.clone())
                .collect(),
            exit,
        })
    }

    fn ensure_in_progress(&self, operation: &'static str) -> Result<(), FlowError> {
        if self.state.is_complete {
            return Err(FlowError::InvalidTransition {
                operation,
                reason: "the flow is already complete; reset it first".to_string(),
            });
        }
        Ok(())
    }

    fn advance(&mut self, target: u32) {
        debug!(from = self.state.current_step, to = target, "advancing");
        if self.catalog.step(target).is_none() {
            warn!(step = target, "advancing to a step missing from the catalog");
        }
        self.state.completed_steps.push(self.state.current_step);
        self.state.current_step = target;
    }

    // Recommendations always follow the step that triggered completion, even when
    // the user is being sent to an external URL.
    fn complete(&mut self, step: &FormStep, exit: FlowExit) {
        self.state.completed_steps.push(self.state.current_step);
        self.state.recommendations =
            self.selector
                .select(step, self.catalog.plans(), &self.state.form_data);
        self.state.is_complete = true;
        info!(
            step = step.step_number,
            recommendations = self.state.recommendations.len(),
            exit = ?exit,
            "flow complete"
        );
        self.state.exit = Some(exit);
    }
}

fn initial_step(catalog: &Catalog) -> u32 {
    catalog.first_step_number().unwrap_or(1)
}
