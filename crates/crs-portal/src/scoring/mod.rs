//! Comprehensive Ranking System scoring.
//!
//! The engine is a pure function of the applicant profile: missing or unrecognised answers
//! contribute zero points instead of failing, so the same code path serves persisted
//! calculations and live previews of half-filled forms.

mod category;
mod profile;
mod rules;

pub use category::ScoreCategory;
pub use profile::{ApplicantProfile, EducationLevel};

use serde::{Deserialize, Serialize};

/// Upper bound applied to the reported total.
pub const MAX_SCORE: u32 = 1200;

/// Score the profile and return the category breakdown.
pub fn score(profile: &ApplicantProfile) -> ScoreBreakdown {
    let (_, breakdown) = rules::score_profile(profile);
    breakdown
}

/// Score the profile and keep the per-factor trail alongside the breakdown.
pub fn explain(profile: &ApplicantProfile) -> ScoreReport {
    let (components, breakdown) = rules::score_profile(profile);
    ScoreReport {
        breakdown,
        components,
    }
}

/// Points grouped the way the portal displays them.
///
/// Category fields hold unclamped sums; only `total` is capped at [`MAX_SCORE`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub core_factors: u32,
    pub spouse_factors: u32,
    pub additional_points: u32,
    pub total: u32,
}

impl ScoreBreakdown {
    pub fn from_parts(core_factors: u32, spouse_factors: u32, additional_points: u32) -> Self {
        let sum = i64::from(core_factors) + i64::from(spouse_factors) + i64::from(additional_points);
        let total = sum.clamp(0, i64::from(MAX_SCORE)) as u32;
        Self {
            core_factors,
            spouse_factors,
            additional_points,
            total,
        }
    }

    pub fn category(&self) -> ScoreCategory {
        ScoreCategory::for_score(self.total)
    }
}

/// Individual scoring factors, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrsFactor {
    Age,
    Education,
    Language,
    WorkExperience,
    SpouseEducation,
    SpouseLanguage,
    SpouseWorkExperience,
    JobOffer,
    ProvincialNomination,
    SiblingInCanada,
}

impl CrsFactor {
    pub const fn label(self) -> &'static str {
        match self {
            CrsFactor::Age => "Age",
            CrsFactor::Education => "Education",
            CrsFactor::Language => "Language",
            CrsFactor::WorkExperience => "Work experience",
            CrsFactor::SpouseEducation => "Spouse education",
            CrsFactor::SpouseLanguage => "Spouse language",
            CrsFactor::SpouseWorkExperience => "Spouse work experience",
            CrsFactor::JobOffer => "Job offer",
            CrsFactor::ProvincialNomination => "Provincial nomination",
            CrsFactor::SiblingInCanada => "Sibling in Canada",
        }
    }

    pub const fn group(self) -> FactorGroup {
        match self {
            CrsFactor::Age
            | CrsFactor::Education
            | CrsFactor::Language
            | CrsFactor::WorkExperience => FactorGroup::Core,
            CrsFactor::SpouseEducation
            | CrsFactor::SpouseLanguage
            | CrsFactor::SpouseWorkExperience => FactorGroup::Spouse,
            CrsFactor::JobOffer | CrsFactor::ProvincialNomination | CrsFactor::SiblingInCanada => {
                FactorGroup::Additional
            }
        }
    }
}

/// Breakdown bucket a factor rolls up into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorGroup {
    Core,
    Spouse,
    Additional,
}

/// Discrete contribution to a score, allowing the UI and CLI to show where points came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: CrsFactor,
    pub points: u32,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub breakdown: ScoreBreakdown,
    pub components: Vec<ScoreComponent>,
}

impl ScoreReport {
    pub fn group_points(&self, group: FactorGroup) -> u32 {
        self.components
            .iter()
            .filter(|component| component.factor.group() == group)
            .map(|component| component.points)
            .sum()
    }
}
