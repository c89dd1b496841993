use crate::error::DataFetchError;
use crate::model::{FormStep, HealthPlan};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read-only access to the step and plan catalogs.
///
/// Both lists are fetched once when a session starts. Failures are recoverable:
/// callers retry by invoking the read again.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every form step, ordered by step number.
    async fn list_form_steps(&self) -> Result<Vec<FormStep>, DataFetchError>;

    /// Every health plan.
    async fn list_health_plans(&self) -> Result<Vec<HealthPlan>, DataFetchError>;
}

/// A source serving fixed lists, for tests and embedded catalogs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogSource {
    steps: Vec<FormStep>,
    plans: Vec<HealthPlan>,
}

impl InMemoryCatalogSource {
    pub fn new(steps: Vec<FormStep>, plans: Vec<HealthPlan>) -> Self {
        Self { steps, plans }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn list_form_steps(&self) -> Result<Vec<FormStep>, DataFetchError> {
        let mut steps = self.steps.clone();
        steps.sort_by_key(|s| s.step_number);
        Ok(steps)
    }

    async fn list_health_plans(&self) -> Result<Vec<HealthPlan>, DataFetchError> {
        Ok(self.plans.clone())
    }
}

/// A source reading the backend's JSON exports from disk.
///
/// Each file holds a JSON array in the API's camelCase shape.
#[derive(Debug, Clone)]
pub struct JsonCatalogSource {
    steps_path: PathBuf,
    plans_path: PathBuf,
}

impl JsonCatalogSource {
    pub fn new(steps_path: impl Into<PathBuf>, plans_path: impl Into<PathBuf>) -> Self {
        Self {
            steps_path: steps_path.into(),
            plans_path: plans_path.into(),
        }
    }

    fn read<T: DeserializeOwned>(path: &Path) -> Result<T, DataFetchError> {
        let origin = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| DataFetchError::Io {
            origin: origin.clone(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| DataFetchError::Parse {
            origin,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl CatalogSource for JsonCatalogSource {
    async fn list_form_steps(&self) -> Result<Vec<FormStep>, DataFetchError> {
        let mut steps: Vec<FormStep> = Self::read(&self.steps_path)?;
        steps.sort_by_key(|s| s.step_number);
        Ok(steps)
    }

    async fn list_health_plans(&self) -> Result<Vec<HealthPlan>, DataFetchError> {
        Self::read(&self.plans_path)
    }
}
