use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::immigration::domain::{FileId, ImmigrationFile, OwnerId};
use crate::immigration::repository::{ImmigrationFileRepository, RepositoryError};
use crate::immigration::{crs_router, CrsScoreService};
use crate::scoring::{ApplicantProfile, EducationLevel};

pub(super) fn owner(name: &str) -> OwnerId {
    OwnerId(format!("user-{name}"))
}

pub(super) fn profile() -> ApplicantProfile {
    ApplicantProfile {
        age: Some(25),
        education: Some(EducationLevel::Bachelor),
        work_experience: Some(3.0),
        english_listening: Some(7.0),
        english_reading: Some(7.0),
        english_writing: Some(7.0),
        english_speaking: Some(7.0),
        ..ApplicantProfile::default()
    }
}

pub(super) fn build_service() -> (CrsScoreService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = CrsScoreService::new(repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) files: Arc<Mutex<HashMap<FileId, ImmigrationFile>>>,
}

impl ImmigrationFileRepository for MemoryRepository {
    fn insert(&self, file: ImmigrationFile) -> Result<ImmigrationFile, RepositoryError> {
        let mut guard = self.files.lock().expect("repository mutex poisoned");
        if guard.contains_key(&file.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(file.id.clone(), file.clone());
        Ok(file)
    }

    fn update(&self, file: ImmigrationFile) -> Result<(), RepositoryError> {
        let mut guard = self.files.lock().expect("repository mutex poisoned");
        guard.insert(file.id.clone(), file);
        Ok(())
    }

    fn active_for_owner(&self, owner: &OwnerId) -> Result<Option<ImmigrationFile>, RepositoryError> {
        let guard = self.files.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|file| file.is_active && &file.owner == owner)
            .max_by_key(|file| file.created_at)
            .cloned())
    }
}

pub(super) struct ConflictRepository;

impl ImmigrationFileRepository for ConflictRepository {
    fn insert(&self, _file: ImmigrationFile) -> Result<ImmigrationFile, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _file: ImmigrationFile) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn active_for_owner(&self, _owner: &OwnerId) -> Result<Option<ImmigrationFile>, RepositoryError> {
        Ok(None)
    }
}

pub(super) struct UnavailableRepository;

impl ImmigrationFileRepository for UnavailableRepository {
    fn insert(&self, _file: ImmigrationFile) -> Result<ImmigrationFile, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _file: ImmigrationFile) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn active_for_owner(&self, _owner: &OwnerId) -> Result<Option<ImmigrationFile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: CrsScoreService<MemoryRepository>) -> axum::Router {
    crs_router(Arc::new(service))
}
