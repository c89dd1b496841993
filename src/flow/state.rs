use crate::model::{FormData, HealthPlan};
use serde::{Deserialize, Serialize};

/// How a completed flow ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowExit {
    /// The flow ran out of steps or hit an end rule.
    Finished { message: Option<String> },
    /// An external-URL rule fired; the caller redirects after showing the message.
    Redirect { url: String, message: Option<String> },
}

/// Session state, owned by exactly one [`FlowController`](super::FlowController).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowState {
    pub current_step: u32,
    /// Answers accumulated across every submission. Later submissions merge in.
    pub form_data: FormData,
    /// History of left steps, most recent last. Not necessarily ascending.
    pub completed_steps: Vec<u32>,
    pub recommendations: Vec<HealthPlan>,
    pub is_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<FlowExit>,
}

impl FlowState {
    pub(crate) fn initial(first_step: u32) -> Self {
        Self {
            current_step: first_step,
            form_data: FormData::new(),
            completed_steps: Vec::new(),
            recommendations: Vec::new(),
            is_complete: false,
            exit: None,
        }
    }
}

/// Where the user stands, for a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// One-based position of the current step along the visited path.
    pub position: usize,
    pub total: usize,
    pub percent: u8,
}

/// What the caller hands to its storage collaborator once the flow completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub answers: FormData,
    pub visited_steps: Vec<u32>,
    pub recommended_plan_ids: Vec<String>,
    pub exit: FlowExit,
}
