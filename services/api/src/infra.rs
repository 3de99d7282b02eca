use crs_portal::immigration::{ImmigrationFile, ImmigrationFileRepository, OwnerId, RepositoryError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local file store keyed by file id. Contents are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryFileRepository {
    files: Arc<Mutex<HashMap<String, ImmigrationFile>>>,
}

impl ImmigrationFileRepository for InMemoryFileRepository {
    fn insert(&self, file: ImmigrationFile) -> Result<ImmigrationFile, RepositoryError> {
        let mut guard = self.files.lock().expect("file store mutex poisoned");
        if guard.contains_key(&file.id.0) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(file.id.0.clone(), file.clone());
        Ok(file)
    }

    fn update(&self, file: ImmigrationFile) -> Result<(), RepositoryError> {
        let mut guard = self.files.lock().expect("file store mutex poisoned");
        match guard.get_mut(&file.id.0) {
            Some(slot) => {
                *slot = file;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn active_for_owner(&self, owner: &OwnerId) -> Result<Option<ImmigrationFile>, RepositoryError> {
        let guard = self.files.lock().expect("file store mutex poisoned");
        Ok(guard
            .values()
            .filter(|file| file.is_active && &file.owner == owner)
            .max_by_key(|file| (file.created_at, file.file_number.clone()))
            .cloned())
    }
}
