//! Categorical types derived from patient records
//!
//! `Gender` comes from the binary sex code and `AgeGroup` from binned age.
//! Both are closed enums so that grouping is total and order-preserving.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Gender of a patient, as offered by the dashboard selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    /// Sex code 0
    Female,
    /// Sex code 1
    Male,
}

impl Gender {
    /// Both genders in selector order
    pub const ALL: [Self; 2] = [Self::Female, Self::Male];

    /// Map the dataset's sex code onto a gender (`1` is male, anything else female)
    #[must_use]
    pub const fn from_sex_code(code: i64) -> Self {
        if code == 1 { Self::Male } else { Self::Female }
    }

    /// Label stored in the `Gender` column
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
        }
    }
}

impl From<i64> for Gender {
    fn from(code: i64) -> Self {
        Self::from_sex_code(code)
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "f" | "female" => Ok(Self::Female),
            "m" | "male" => Ok(Self::Male),
            _ => Err(Error::InvalidGender(s.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Age bucket used for aggregation and charting
///
/// Bins are half-open and contiguous over `[0, 150)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeGroup {
    /// `[0, 40)`
    #[serde(rename = "Below 40")]
    Below40,
    /// `[40, 50)`
    #[serde(rename = "40-50")]
    From40To50,
    /// `[50, 60)`
    #[serde(rename = "51-60")]
    From51To60,
    /// `[60, 70)`
    #[serde(rename = "61-70")]
    From61To70,
    /// `[70, 150)`
    #[serde(rename = "71+")]
    Over70,
}

impl AgeGroup {
    /// All groups in ascending age order
    pub const ALL: [Self; 5] = [
        Self::Below40,
        Self::From40To50,
        Self::From51To60,
        Self::From61To70,
        Self::Over70,
    ];

    /// Lower bound of the youngest bin
    pub const MIN_AGE: f64 = 0.0;

    /// Exclusive upper bound of the oldest bin
    pub const MAX_AGE: f64 = 150.0;

    /// Assign an age to its bin
    ///
    /// Returns `None` for ages outside `[0, 150)` and for NaN.
    #[must_use]
    pub fn from_age(age: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|group| {
            let (lower, upper) = group.bounds();
            age >= lower && age < upper
        })
    }

    /// Inclusive lower and exclusive upper bound of the bin
    #[must_use]
    pub const fn bounds(self) -> (f64, f64) {
        match self {
            Self::Below40 => (Self::MIN_AGE, 40.0),
            Self::From40To50 => (40.0, 50.0),
            Self::From51To60 => (50.0, 60.0),
            Self::From61To70 => (60.0, 70.0),
            Self::Over70 => (70.0, Self::MAX_AGE),
        }
    }

    /// Display label of the bin
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Below40 => "Below 40",
            Self::From40To50 => "40-50",
            Self::From51To60 => "51-60",
            Self::From61To70 => "61-70",
            Self::Over70 => "71+",
        }
    }

    /// Position of the bin in `ALL`
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for AgeGroup {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.label() == s.trim())
            .ok_or_else(|| Error::schema(format!("unknown age group label '{s}'")))
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
