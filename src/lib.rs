//! # plan-simulator - Step Navigation and Plan Recommendation Engine
//!
//! **plan-simulator** drives a multi-step health-insurance lead form. A form is an
//! ordered set of steps; each step can carry prioritized navigation rules that look at
//! the user's answers and decide where the flow goes next: another step, the end of the
//! form, or an external page. When the flow ends, the engine recommends health plans.
//!
//! ## Core Workflow
//!
//! The engine does not render anything and persists nothing. It consumes two read-only
//! lists (form steps and health plans) and exposes a small state machine to the UI:
//!
//! 1.  **Load the catalog**: Implement [`catalog::CatalogSource`] for your backend (or use
//!     the in-memory / JSON-file sources) and build a [`catalog::Catalog`] from it.
//! 2.  **Start a session**: Create a [`flow::FlowController`] over the catalog.
//! 3.  **Drive it**: Call `submit_step` with each page's answers, `go_previous` to go
//!     back and `reset` to start over. Re-read `state()` after every call.
//! 4.  **Finish**: Once `state().is_complete`, show `state().recommendations` and hand
//!     `lead()` to whatever stores your leads.
//!
//! ## Quick Start
//!
//! ```rust
//! use plan_simulator::prelude::*;
//!
//! let steps = vec![
//!     FormStep::new(1, "Tipo de plano")
//!         .with_field(
//!             FormField::new("planType", FieldType::Radio, "Para quem é o plano?")
//!                 .with_options(["Individual", "Familiar"]),
//!         )
//!         .with_rule(NavigationRule::new(
//!             "family-skip",
//!             Condition::new("planType", Operator::Equals, "Familiar"),
//!             Target::step(3),
//!             1,
//!         )),
//!     FormStep::new(2, "Dados pessoais"),
//!     FormStep::new(3, "Dependentes"),
//! ];
//! let catalog = Catalog::new(steps, Vec::new()).expect("valid catalog");
//! let mut flow = FlowController::new(catalog);
//!
//! let mut answers = FormData::new();
//! answers.insert("planType".to_string(), AnswerValue::from("Familiar"));
//! let resolution = flow.submit_step(answers).expect("step exists");
//!
//! assert_eq!(resolution.transition, Transition::GotoStep(3));
//! assert_eq!(flow.state().current_step, 3);
//! ```

pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod flow;
pub mod model;
pub mod navigation;
pub mod prelude;
pub mod recommend;
pub mod trace;
