use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User record as persisted under the current-user key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: u32,      // years
    pub weight: f64,   // kg
    pub height: u32,   // cm
    pub bmi: f64,      // derived from weight and height
    pub weight_goal: f64,
}

impl Profile {
    /// Fresh record straight after registration; biometrics arrive with onboarding.
    pub fn pending_onboarding(id: Uuid, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            age: 0,
            weight: 0.0,
            height: 0,
            bmi: 0.0,
            weight_goal: 0.0,
        }
    }

    pub fn needs_onboarding(&self) -> bool {
        self.age == 0 || self.weight <= 0.0 || self.height == 0
    }
}
