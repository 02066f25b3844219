//! Field validators shared by the onboarding wizard and the profile form.
//!
//! Every validator takes the raw text the user typed (`None` when the
//! field was left out) and returns the message to show next to the
//! field, or `None` when the value is acceptable.

use std::ops::RangeInclusive;

use crate::error::{AppResult, ValidationErrors};
use crate::onboarding::dto::OnboardingForm;
use crate::profile::dto::{ProfileForm, ProfileUpdate};

pub const AGE_YEARS: RangeInclusive<i64> = 18..=100;
pub const WEIGHT_KG: RangeInclusive<f64> = 40.0..=300.0;
pub const HEIGHT_CM: RangeInclusive<i64> = 120..=250;

pub const FIELD_NAME: &str = "name";
pub const FIELD_AGE: &str = "age";
pub const FIELD_WEIGHT: &str = "weight";
pub const FIELD_HEIGHT: &str = "height";
pub const FIELD_WEIGHT_GOAL: &str = "weightGoal";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Parsed<T> {
    Missing,
    Invalid,
    Value(T),
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_real(raw: Option<&str>) -> Parsed<f64> {
    match present(raw) {
        None => Parsed::Missing,
        Some(s) => match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Parsed::Value(v),
            _ => Parsed::Invalid,
        },
    }
}

/// Leading integer part, so `"18.7"` reads as 18.
fn parse_int(raw: Option<&str>) -> Parsed<i64> {
    let Some(s) = present(raw) else {
        return Parsed::Missing;
    };
    let sign_len = usize::from(s.starts_with(['-', '+']));
    let digits = s[sign_len..].chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return Parsed::Invalid;
    }
    match s[..sign_len + digits].parse::<i64>() {
        Ok(v) => Parsed::Value(v),
        Err(_) => Parsed::Invalid,
    }
}

pub fn validate_age(raw: Option<&str>) -> Option<String> {
    match parse_int(raw) {
        Parsed::Missing => Some("Age is required".into()),
        Parsed::Invalid => Some("Age must be a number".into()),
        Parsed::Value(v) if !AGE_YEARS.contains(&v) => {
            Some("Age must be between 18 and 100 years".into())
        }
        Parsed::Value(_) => None,
    }
}

pub fn validate_weight(raw: Option<&str>) -> Option<String> {
    match parse_real(raw) {
        Parsed::Missing => Some("Weight is required".into()),
        Parsed::Invalid => Some("Weight must be a number".into()),
        Parsed::Value(v) if !WEIGHT_KG.contains(&v) => {
            Some("Weight must be between 40 and 300 kg".into())
        }
        Parsed::Value(_) => None,
    }
}

pub fn validate_height(raw: Option<&str>) -> Option<String> {
    match parse_int(raw) {
        Parsed::Missing => Some("Height is required".into()),
        Parsed::Invalid => Some("Height must be a number".into()),
        Parsed::Value(v) if !HEIGHT_CM.contains(&v) => {
            Some("Height must be between 120 and 250 cm".into())
        }
        Parsed::Value(_) => None,
    }
}

fn goal_in_range(raw: Option<&str>) -> Result<f64, String> {
    match parse_real(raw) {
        Parsed::Missing => Err("Goal weight is required".into()),
        Parsed::Invalid => Err("Goal weight must be a number".into()),
        Parsed::Value(v) if !WEIGHT_KG.contains(&v) => {
            Err("Goal weight must be between 40 and 300 kg".into())
        }
        Parsed::Value(v) => Ok(v),
    }
}

/// Goal weight must also be strictly below the current weight. The
/// comparison is skipped when the current weight itself is not a number.
pub fn validate_weight_goal(raw_goal: Option<&str>, raw_weight: Option<&str>) -> Option<String> {
    let goal = match goal_in_range(raw_goal) {
        Ok(goal) => goal,
        Err(message) => return Some(message),
    };
    match parse_real(raw_weight) {
        Parsed::Value(weight) if goal >= weight => {
            Some("Goal weight must be less than your current weight".into())
        }
        _ => None,
    }
}

/// Range check without the comparison against the current weight.
pub fn validate_weight_goal_range(raw_goal: Option<&str>) -> Option<String> {
    goal_in_range(raw_goal).err()
}

pub fn validate_name(raw: Option<&str>) -> Option<String> {
    present(raw).is_none().then(|| "Name is required".to_string())
}

fn record(errors: &mut ValidationErrors, field: &'static str, outcome: Option<String>) {
    if let Some(message) = outcome {
        errors.add(field, message);
    }
}

/// Wizard pages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Age,
    Measurements,
    Goal,
}

impl Step {
    pub fn number(self) -> u8 {
        match self {
            Step::Age => 1,
            Step::Measurements => 2,
            Step::Goal => 3,
        }
    }

    fn next(self) -> Option<Step> {
        match self {
            Step::Age => Some(Step::Measurements),
            Step::Measurements => Some(Step::Goal),
            Step::Goal => None,
        }
    }

    fn prev(self) -> Option<Step> {
        match self {
            Step::Age => None,
            Step::Measurements => Some(Step::Age),
            Step::Goal => Some(Step::Measurements),
        }
    }
}

pub fn validate_step(step: Step, form: &OnboardingForm) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    match step {
        Step::Age => record(&mut errors, FIELD_AGE, validate_age(form.age.as_deref())),
        Step::Measurements => {
            record(&mut errors, FIELD_WEIGHT, validate_weight(form.weight.as_deref()));
            record(&mut errors, FIELD_HEIGHT, validate_height(form.height.as_deref()));
        }
        Step::Goal => record(
            &mut errors,
            FIELD_WEIGHT_GOAL,
            validate_weight_goal(form.weight_goal.as_deref(), form.weight.as_deref()),
        ),
    }
    errors
}

fn int_value(raw: Option<&str>, field: &'static str) -> AppResult<u32> {
    match parse_int(raw) {
        Parsed::Value(v) if v >= 0 => u32::try_from(v).map_err(|_| invalid(field)),
        _ => Err(invalid(field)),
    }
}

fn real_value(raw: Option<&str>, field: &'static str) -> AppResult<f64> {
    match parse_real(raw) {
        Parsed::Value(v) => Ok(v),
        _ => Err(invalid(field)),
    }
}

fn invalid(field: &'static str) -> crate::error::AppError {
    let mut errors = ValidationErrors::new();
    errors.add(field, "Invalid value");
    crate::error::AppError::Validation(errors)
}

fn form_to_update(form: &OnboardingForm) -> AppResult<ProfileUpdate> {
    Ok(ProfileUpdate {
        age: Some(int_value(form.age.as_deref(), FIELD_AGE)?),
        weight: Some(real_value(form.weight.as_deref(), FIELD_WEIGHT)?),
        height: Some(int_value(form.height.as_deref(), FIELD_HEIGHT)?),
        weight_goal: Some(real_value(form.weight_goal.as_deref(), FIELD_WEIGHT_GOAL)?),
        ..Default::default()
    })
}

/// Validate a complete questionnaire at once, every step in order.
pub fn validate_onboarding(form: &OnboardingForm) -> AppResult<ProfileUpdate> {
    let mut errors = ValidationErrors::new();
    for step in [Step::Age, Step::Measurements, Step::Goal] {
        for (field, message) in validate_step(step, form).iter() {
            errors.add(field, message.to_string());
        }
    }
    errors.into_result()?;
    form_to_update(form)
}

/// Profile edit form. Unlike onboarding, the goal is only range-checked.
pub fn validate_profile_form(form: &ProfileForm) -> AppResult<ProfileUpdate> {
    let mut errors = ValidationErrors::new();
    record(&mut errors, FIELD_NAME, validate_name(form.name.as_deref()));
    record(&mut errors, FIELD_AGE, validate_age(form.age.as_deref()));
    record(&mut errors, FIELD_WEIGHT, validate_weight(form.weight.as_deref()));
    record(&mut errors, FIELD_HEIGHT, validate_height(form.height.as_deref()));
    record(
        &mut errors,
        FIELD_WEIGHT_GOAL,
        validate_weight_goal_range(form.weight_goal.as_deref()),
    );
    errors.into_result()?;

    Ok(ProfileUpdate {
        name: form.name.as_deref().map(|n| n.trim().to_string()),
        age: Some(int_value(form.age.as_deref(), FIELD_AGE)?),
        weight: Some(real_value(form.weight.as_deref(), FIELD_WEIGHT)?),
        height: Some(int_value(form.height.as_deref(), FIELD_HEIGHT)?),
        weight_goal: Some(real_value(form.weight_goal.as_deref(), FIELD_WEIGHT_GOAL)?),
        ..Default::default()
    })
}

/// Three-step questionnaire shown after registration.
#[derive(Debug, Clone)]
pub struct OnboardingWizard {
    step: Step,
    form: OnboardingForm,
    errors: ValidationErrors,
}

impl Default for OnboardingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingWizard {
    pub fn new() -> Self {
        Self {
            step: Step::Age,
            form: OnboardingForm::default(),
            errors: ValidationErrors::new(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn form(&self) -> &OnboardingForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut OnboardingForm {
        &mut self.form
    }

    /// Errors from the last `next` or `submit`.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Advance when the current step validates; returns whether it moved.
    pub fn next(&mut self) -> bool {
        self.errors = validate_step(self.step, &self.form);
        if !self.errors.is_empty() {
            return false;
        }
        match self.step.next() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    pub fn back(&mut self) {
        if let Some(step) = self.step.prev() {
            self.step = step;
        }
    }

    /// Re-validate the goal step and produce the profile update to commit.
    pub fn submit(&mut self) -> AppResult<ProfileUpdate> {
        self.errors = validate_step(Step::Goal, &self.form);
        self.errors.clone().into_result()?;
        form_to_update(&self.form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn form(age: &str, weight: &str, height: &str, goal: &str) -> OnboardingForm {
        OnboardingForm {
            age: Some(age.into()),
            weight: Some(weight.into()),
            height: Some(height.into()),
            weight_goal: Some(goal.into()),
        }
    }

    #[test]
    fn age_bounds() {
        assert!(validate_age(Some("17")).is_some());
        assert_eq!(validate_age(Some("18")), None);
        assert_eq!(validate_age(Some("100")), None);
        assert!(validate_age(Some("101")).is_some());
        assert_eq!(validate_age(None).as_deref(), Some("Age is required"));
        assert_eq!(validate_age(Some("  ")).as_deref(), Some("Age is required"));
        assert_eq!(validate_age(Some("abc")).as_deref(), Some("Age must be a number"));
        assert_eq!(validate_age(Some("18.7")), None);
    }

    #[test]
    fn weight_and_height_bounds() {
        assert_eq!(validate_weight(Some("40")), None);
        assert_eq!(validate_weight(Some("300")), None);
        assert!(validate_weight(Some("39.9")).is_some());
        assert!(validate_weight(Some("NaN")).is_some());
        assert_eq!(validate_height(Some("120")), None);
        assert!(validate_height(Some("119")).is_some());
        assert!(validate_height(Some("251")).is_some());
    }

    #[test]
    fn goal_must_be_below_current_weight() {
        assert_eq!(
            validate_weight_goal(Some("95"), Some("95")).as_deref(),
            Some("Goal weight must be less than your current weight")
        );
        assert_eq!(validate_weight_goal(Some("94.99"), Some("95")), None);
        assert!(validate_weight_goal(Some("39"), Some("95")).is_some());
        assert_eq!(
            validate_weight_goal(None, Some("95")).as_deref(),
            Some("Goal weight is required")
        );
    }

    #[test]
    fn goal_comparison_skipped_without_current_weight() {
        assert_eq!(validate_weight_goal(Some("80"), None), None);
    }

    #[test]
    fn wizard_blocks_until_step_passes() {
        let mut wizard = OnboardingWizard::new();
        wizard.form_mut().age = Some("17".into());
        assert!(!wizard.next());
        assert_eq!(wizard.step(), Step::Age);
        assert!(wizard.errors().get(FIELD_AGE).is_some());

        wizard.form_mut().age = Some("35".into());
        assert!(wizard.next());
        assert_eq!(wizard.step(), Step::Measurements);
        assert!(wizard.errors().is_empty());

        wizard.form_mut().weight = Some("95".into());
        assert!(!wizard.next());
        assert!(wizard.errors().get(FIELD_HEIGHT).is_some());
        assert!(wizard.errors().get(FIELD_WEIGHT).is_none());

        wizard.form_mut().height = Some("170".into());
        assert!(wizard.next());
        assert_eq!(wizard.step(), Step::Goal);
        assert_eq!(wizard.step().number(), 3);
    }

    #[test]
    fn wizard_back_does_not_validate() {
        let mut wizard = OnboardingWizard::new();
        wizard.form_mut().age = Some("40".into());
        assert!(wizard.next());
        wizard.back();
        assert_eq!(wizard.step(), Step::Age);
        wizard.back();
        assert_eq!(wizard.step(), Step::Age);
    }

    #[test]
    fn wizard_submit_revalidates_goal() {
        let mut wizard = OnboardingWizard::new();
        *wizard.form_mut() = form("35", "95", "170", "95");
        let err = wizard.submit().unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e.get(FIELD_WEIGHT_GOAL).is_some()));

        wizard.form_mut().weight_goal = Some("75".into());
        let update = wizard.submit().unwrap();
        assert_eq!(update.age, Some(35));
        assert_eq!(update.weight, Some(95.0));
        assert_eq!(update.height, Some(170));
        assert_eq!(update.weight_goal, Some(75.0));
    }

    #[test]
    fn full_questionnaire_collects_every_error() {
        let err = validate_onboarding(&form("10", "20", "300", "")).unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn profile_form_requires_name_but_not_goal_below_weight() {
        let mut profile_form = ProfileForm {
            name: Some("  ".into()),
            age: Some("35".into()),
            weight: Some("80".into()),
            height: Some("170".into()),
            weight_goal: Some("85".into()),
        };
        let err = validate_profile_form(&profile_form).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref e) if e.get(FIELD_NAME) == Some("Name is required") && e.len() == 1));

        profile_form.name = Some(" Ana ".into());
        let update = validate_profile_form(&profile_form).unwrap();
        assert_eq!(update.name.as_deref(), Some("Ana"));
        assert_eq!(update.weight_goal, Some(85.0));
    }
}
