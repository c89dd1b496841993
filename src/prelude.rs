//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the
//! plan-simulator crate. Import it to get the model, the engine and its errors
//! without importing each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use plan_simulator::prelude::*;
//!
//! # async fn run_example() -> Result<()> {
//! let source = JsonCatalogSource::new("data/steps.json", "data/plans.json");
//! let mut flow = FlowController::load(&source).await?;
//!
//! let mut answers = FormData::new();
//! answers.insert("planType".to_string(), AnswerValue::from("Individual"));
//! flow.submit_step(answers)?;
//!
//! println!("Now on step {}", flow.state().current_step);
//! # Ok(())
//! # }
//! ```

// Engine
pub use crate::evaluator::{ConditionEvaluator, FieldIndex, evaluate};
pub use crate::flow::{FlowController, FlowControllerBuilder, FlowExit, FlowState, Lead, Progress};
pub use crate::navigation::{NavigationResolver, Resolution, RuleMatch, Transition};
pub use crate::recommend::{RecommendationPolicy, RecommendationSelector, select_recommendations};

// Catalog and data sources
pub use crate::catalog::{Catalog, CatalogSource, InMemoryCatalogSource, JsonCatalogSource};

// Data model
pub use crate::model::{
    AnswerValue, Condition, ConditionValue, FieldType, FormData, FormField, FormStep, HealthPlan,
    NavigationRule, Operator, Target,
};

// Error types
pub use crate::error::{CatalogError, DataFetchError, FlowError, LoadError};

// Trace formatting
pub use crate::trace::TraceFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
