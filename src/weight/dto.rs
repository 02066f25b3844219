use serde::{Deserialize, Serialize};

use crate::weight::services::{HistoryEntry, ProgressSummary};

#[derive(Debug, Deserialize)]
pub struct RecordWeightRequest {
    pub weight: f64,
}

#[derive(Debug, Serialize)]
pub struct WeightHistoryResponse {
    pub entries: Vec<HistoryEntry>,
    pub progress: ProgressSummary,
}
