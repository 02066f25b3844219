use serde::{Deserialize, Serialize};
use time::Date;

use crate::dates::iso_date;

/// One dated weight measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub weight: f64, // kg
}
