use std::fmt;

use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::profile::dto::ProfileUpdate;
use crate::profile::repo_types::Profile;

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Body-mass index, `weight / height_m²`, rounded to one decimal.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> AppResult<f64> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "height must be positive, got {}",
            height_cm
        )));
    }
    if !weight_kg.is_finite() {
        return Err(AppError::InvalidInput("weight must be a finite number".into()));
    }
    let height_m = height_cm / 100.0;
    Ok(round1(weight_kg / (height_m * height_m)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obesity I")]
    ObesityI,
    #[serde(rename = "Obesity II")]
    ObesityII,
    #[serde(rename = "Obesity III")]
    ObesityIII,
}

impl BmiCategory {
    /// Thresholds are strict: a BMI of exactly 25 is still `Normal`.
    pub fn classify(bmi: f64) -> Self {
        if bmi > 40.0 {
            BmiCategory::ObesityIII
        } else if bmi > 35.0 {
            BmiCategory::ObesityII
        } else if bmi > 30.0 {
            BmiCategory::ObesityI
        } else if bmi > 25.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Normal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObesityI => "Obesity I",
            BmiCategory::ObesityII => "Obesity II",
            BmiCategory::ObesityIII => "Obesity III",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Merge `update` into `profile`.
///
/// BMI is recomputed only when the update carries both a weight and a
/// height; an update with just one of them leaves the stored BMI stale.
pub fn apply_update(profile: &Profile, update: &ProfileUpdate) -> Profile {
    let mut next = profile.clone();
    if let Some(name) = &update.name {
        next.name = name.clone();
    }
    if let Some(email) = &update.email {
        next.email = email.clone();
    }
    if let Some(age) = update.age {
        next.age = age;
    }
    if let Some(weight) = update.weight {
        next.weight = weight;
    }
    if let Some(height) = update.height {
        next.height = height;
    }
    if let Some(goal) = update.weight_goal {
        next.weight_goal = goal;
    }

    if let (Some(weight), Some(height)) = (update.weight, update.height) {
        if weight != 0.0 && height != 0 {
            if let Ok(bmi) = compute_bmi(weight, f64::from(height)) {
                next.bmi = bmi;
            }
        }
    }
    next
}
