use serde::Deserialize;

/// Questionnaire answers as typed, before parsing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingForm {
    pub age: Option<String>,
    pub weight: Option<String>,
    pub height: Option<String>,
    pub weight_goal: Option<String>,
}
