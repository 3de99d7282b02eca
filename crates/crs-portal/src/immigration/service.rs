use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{
    CrsAssessment, CrsResult, CrsSnapshot, FileCategory, FileId, FileStatus, ImmigrationFile,
    OwnerId,
};
use super::repository::{ImmigrationFileRepository, RepositoryError};
use crate::scoring::{self, ApplicantProfile};

/// Service persisting CRS calculations against the caller's active immigration file.
pub struct CrsScoreService<R> {
    repository: Arc<R>,
}

static FILE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_file_number() -> (FileId, String) {
    let id = FILE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    (FileId(format!("file-{id:06}")), format!("IMM-{id:06}"))
}

impl<R> CrsScoreService<R>
where
    R: ImmigrationFileRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Open a new active file so scores have somewhere to be saved.
    pub fn open_file(
        &self,
        owner: OwnerId,
        category: FileCategory,
    ) -> Result<ImmigrationFile, CrsServiceError> {
        let (id, file_number) = next_file_number();
        let now = Utc::now();
        let file = ImmigrationFile {
            id,
            owner,
            file_number,
            category,
            status: FileStatus::New,
            is_active: true,
            crs: None,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(file)?;
        info!(
            owner = %stored.owner.0,
            file_number = %stored.file_number,
            category = stored.category.label(),
            "immigration file opened"
        );
        Ok(stored)
    }

    /// Score currently saved on the owner's active file.
    pub fn current(&self, owner: &OwnerId) -> Result<CrsSnapshot, CrsServiceError> {
        let file = self.active_file(owner)?;
        let (breakdown, profile) = match &file.crs {
            Some(assessment) => (Some(assessment.breakdown), Some(assessment.profile.clone())),
            None => (None, None),
        };

        Ok(CrsSnapshot {
            score: file.crs_score(),
            breakdown,
            profile,
            last_updated: file.updated_at,
        })
    }

    /// Calculate and save a first score for the active file.
    pub fn calculate(
        &self,
        owner: &OwnerId,
        profile: ApplicantProfile,
    ) -> Result<CrsResult, CrsServiceError> {
        self.save_assessment(owner, profile)
    }

    /// Recalculate after the applicant edits their answers.
    pub fn recalculate(
        &self,
        owner: &OwnerId,
        profile: ApplicantProfile,
    ) -> Result<CrsResult, CrsServiceError> {
        self.save_assessment(owner, profile)
    }

    /// Score without validation or persistence, for live form previews.
    pub fn preview(&self, profile: &ApplicantProfile) -> CrsResult {
        let breakdown = scoring::score(profile);
        CrsResult {
            score: breakdown.total,
            breakdown,
        }
    }

    fn save_assessment(
        &self,
        owner: &OwnerId,
        profile: ApplicantProfile,
    ) -> Result<CrsResult, CrsServiceError> {
        ensure_required_fields(&profile)?;

        let mut file = self.active_file(owner)?;
        let breakdown = scoring::score(&profile);
        let now = Utc::now();

        file.crs = Some(CrsAssessment {
            score: breakdown.total,
            breakdown,
            profile,
            calculated_at: now,
        });
        file.updated_at = now;
        let file_number = file.file_number.clone();

        self.repository.update(file)?;

        info!(
            owner = %owner.0,
            file_number = %file_number,
            score = breakdown.total,
            "crs score saved"
        );

        Ok(CrsResult {
            score: breakdown.total,
            breakdown,
        })
    }

    fn active_file(&self, owner: &OwnerId) -> Result<ImmigrationFile, CrsServiceError> {
        match self.repository.active_for_owner(owner)? {
            Some(file) => Ok(file),
            None => {
                debug!(owner = %owner.0, "no active immigration file");
                Err(CrsServiceError::NoActiveFile)
            }
        }
    }
}

// An age of zero counts as unanswered.
fn ensure_required_fields(profile: &ApplicantProfile) -> Result<(), CrsServiceError> {
    let age_missing = matches!(profile.age, None | Some(0));
    if age_missing || profile.education.is_none() || profile.work_experience.is_none() {
        return Err(CrsServiceError::MissingRequiredFields);
    }
    Ok(())
}

/// Error raised by the CRS service.
#[derive(Debug, thiserror::Error)]
pub enum CrsServiceError {
    #[error("age, education, and work experience are required")]
    MissingRequiredFields,
    #[error("no active immigration file found")]
    NoActiveFile,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
