//! Immigration file CRS persistence and HTTP surface.
//!
//! Authentication, document storage, and checklist management live outside this crate; the
//! router trusts the owner id asserted by the gateway and only deals with saving scores.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CrsAssessment, CrsResult, CrsSnapshot, FileCategory, FileId, FileStatus, ImmigrationFile,
    ImmigrationFileView, OwnerId,
};
pub use repository::{ImmigrationFileRepository, RepositoryError};
pub use router::{crs_router, OWNER_HEADER};
pub use service::{CrsScoreService, CrsServiceError};
