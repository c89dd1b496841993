use crate::evaluator::{ConditionEvaluator, FieldIndex};
use crate::model::{FormData, FormStep, NavigationRule, Target};
use crate::trace::TraceFormatter;
use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

/// What a step's navigation rules decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "target", rename_all = "snake_case")]
pub enum Transition {
    /// Jump to the given step number.
    GotoStep(u32),
    /// Finish the flow, optionally showing a message.
    Complete { message: Option<String> },
    /// Finish the flow and send the user elsewhere.
    GotoExternal { url: String, message: Option<String> },
    /// No rule applied; the caller falls back to the next step in order.
    NoRuleMatched,
}

/// The rule that decided a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMatch {
    pub rule_id: String,
    pub priority: i32,
    /// A human-readable explanation of why the rule matched.
    pub reason: String,
}

/// The outcome of resolving a step's rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub transition: Transition,
    /// `None` when no rule matched.
    pub matched: Option<RuleMatch>,
}

impl Resolution {
    fn unmatched() -> Self {
        Self {
            transition: Transition::NoRuleMatched,
            matched: None,
        }
    }
}

/// Decides where a step leads, given the session's answers.
pub struct NavigationResolver;

impl NavigationResolver {
    /// Evaluates `step`'s rules against `form_data`, which must already include the
    /// answers just submitted for this step.
    ///
    /// Rules run in descending priority; rules sharing a priority keep their authored
    /// order. The first rule whose condition holds and whose target is usable decides.
    /// A step target without a step number is skipped, so a lower-priority rule may
    /// still apply. Resolution is pure: the same inputs always yield the same result.
    pub fn resolve(step: &FormStep, form_data: &FormData) -> Resolution {
        if step.navigation_rules.is_empty() {
            return Resolution::unmatched();
        }

        let index = FieldIndex::new(&step.fields);
        let evaluator = ConditionEvaluator::new(&index, form_data);

        let resolution = Self::ordered(&step.navigation_rules)
            .into_iter()
            .filter(|rule| evaluator.evaluate(&rule.condition))
            .find_map(|rule| {
                let transition = Self::transition_for(&rule.target)?;
                Some(Resolution {
                    transition,
                    matched: Some(RuleMatch {
                        rule_id: rule.id.clone(),
                        priority: rule.priority,
                        reason: TraceFormatter::format_condition(
                            &rule.condition,
                            evaluator.resolve(&rule.condition.field),
                        ),
                    }),
                })
            })
            .unwrap_or_else(Resolution::unmatched);

        debug!(
            step = step.step_number,
            transition = ?resolution.transition,
            rule = resolution.matched.as_ref().map(|m| m.rule_id.as_str()),
            "resolved navigation"
        );
        resolution
    }

    /// Rules in evaluation order: descending priority, stable for ties.
    pub fn ordered(rules: &[NavigationRule]) -> Vec<&NavigationRule> {
        rules
            .iter()
            .sorted_by(|a, b| b.priority.cmp(&a.priority))
            .collect()
    }

    fn transition_for(target: &Target) -> Option<Transition> {
        match target {
            Target::Step { step_number } => step_number.map(Transition::GotoStep),
            Target::End { message } => Some(Transition::Complete {
                message: message.clone(),
            }),
            Target::ExternalUrl { url, message } => Some(Transition::GotoExternal {
                url: url.clone(),
                message: message.clone(),
            }),
        }
    }
}
