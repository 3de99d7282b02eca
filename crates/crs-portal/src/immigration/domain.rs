use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{ApplicantProfile, ScoreBreakdown};

/// Identifier wrapper for immigration files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileId(pub String);

/// Identity of the portal user owning a file, as asserted by the auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub String);

/// Immigration program the file is opened under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileCategory {
    #[serde(rename = "Express Entry")]
    ExpressEntry,
    #[serde(rename = "Study Permit")]
    StudyPermit,
    #[serde(rename = "Work Permit")]
    WorkPermit,
    #[serde(rename = "Family Sponsorship")]
    FamilySponsorship,
    #[serde(rename = "Visitor Visa")]
    VisitorVisa,
    Citizenship,
    Other,
}

impl FileCategory {
    pub const fn label(self) -> &'static str {
        match self {
            FileCategory::ExpressEntry => "Express Entry",
            FileCategory::StudyPermit => "Study Permit",
            FileCategory::WorkPermit => "Work Permit",
            FileCategory::FamilySponsorship => "Family Sponsorship",
            FileCategory::VisitorVisa => "Visitor Visa",
            FileCategory::Citizenship => "Citizenship",
            FileCategory::Other => "Other",
        }
    }
}

/// Processing status tracked on a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Pending Documentation")]
    PendingDocumentation,
    Submitted,
    #[serde(rename = "Under Review")]
    UnderReview,
    Approved,
    Rejected,
    Closed,
}

impl FileStatus {
    pub const fn label(self) -> &'static str {
        match self {
            FileStatus::New => "New",
            FileStatus::InProgress => "In Progress",
            FileStatus::PendingDocumentation => "Pending Documentation",
            FileStatus::Submitted => "Submitted",
            FileStatus::UnderReview => "Under Review",
            FileStatus::Approved => "Approved",
            FileStatus::Rejected => "Rejected",
            FileStatus::Closed => "Closed",
        }
    }
}

/// Last CRS calculation saved against a file, including the answers it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrsAssessment {
    pub score: u32,
    pub breakdown: ScoreBreakdown,
    pub profile: ApplicantProfile,
    pub calculated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImmigrationFile {
    pub id: FileId,
    pub owner: OwnerId,
    pub file_number: String,
    pub category: FileCategory,
    pub status: FileStatus,
    pub is_active: bool,
    pub crs: Option<CrsAssessment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ImmigrationFile {
    pub fn crs_score(&self) -> u32 {
        self.crs.as_ref().map(|assessment| assessment.score).unwrap_or(0)
    }

    pub fn summary_view(&self) -> ImmigrationFileView {
        ImmigrationFileView {
            id: self.id.clone(),
            file_number: self.file_number.clone(),
            category: self.category.label(),
            status: self.status.label(),
            crs_score: self.crs_score(),
            is_active: self.is_active,
        }
    }
}

/// Public representation of a file returned by the HTTP surface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImmigrationFileView {
    pub id: FileId,
    pub file_number: String,
    pub category: &'static str,
    pub status: &'static str,
    pub crs_score: u32,
    pub is_active: bool,
}

/// Response body for a fresh calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrsResult {
    pub score: u32,
    pub breakdown: ScoreBreakdown,
}

/// Response body describing the score currently saved on the active file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrsSnapshot {
    pub score: u32,
    pub breakdown: Option<ScoreBreakdown>,
    pub profile: Option<ApplicantProfile>,
    pub last_updated: DateTime<Utc>,
}
