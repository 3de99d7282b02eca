//! Comprehensive Ranking System scoring for the immigration portal, plus the services that
//! persist scores against an applicant's immigration file.

pub mod config;
pub mod error;
pub mod immigration;
pub mod scoring;
pub mod telemetry;
