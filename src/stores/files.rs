use super::Store;
use crate::models::{FileRow, FileStatus};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Dependency key of the file list loader.
pub const FILES_DEPENDENCY: &str = "lf:files";

/// Delay before the file list is re-fetched after an upload; failed rows drop
/// out on that re-fetch.
pub const INVALIDATE_DELAY: Duration = Duration::from_millis(1500);

/// Marks loaded data stale so the UI fetches it again.
pub trait Invalidator: Send + Sync {
    fn invalidate(&self, dependency: &str);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilesState {
    pub files: Vec<FileRow>,
    pub selected_assistant_file_ids: Vec<String>,
    pub uploading: bool,
}

#[derive(Clone)]
pub struct FilesStore {
    store: Store<FilesState>,
    invalidator: Arc<dyn Invalidator>,
}

impl FilesStore {
    pub fn new(invalidator: Arc<dyn Invalidator>) -> Self {
        Self {
            store: Store::default(),
            invalidator,
        }
    }

    pub fn get(&self) -> FilesState {
        self.store.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<FilesState> {
        self.store.subscribe()
    }

    pub fn set_uploading(&self, uploading: bool) {
        self.store.update(|state| state.uploading = uploading);
    }

    pub fn set_files(&self, files: Vec<FileRow>) {
        self.store.update(|state| state.files = files);
    }

    pub fn add_selected_assistant_file_ids(&self, ids: Vec<String>) {
        self.store.update(|state| state.selected_assistant_file_ids.extend(ids));
    }

    pub fn set_selected_assistant_file_ids(&self, ids: Vec<String>) {
        self.store.update(|state| state.selected_assistant_file_ids = ids);
    }

    /// Adds one pending, selected row per file name. Returns the client ids.
    pub fn add_uploading_files<I, S>(&self, filenames: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: Vec<FileRow> = filenames
            .into_iter()
            .map(|filename| FileRow {
                id: Uuid::new_v4().to_string(),
                filename: filename.into(),
                created_at: None,
                status: FileStatus::Pending,
            })
            .collect();
        let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();

        self.store.update(|state| {
            state.files.extend(rows);
            state.selected_assistant_file_ids.extend(ids.iter().cloned());
        });
        ids
    }

    /// Swaps the pending rows for the server results and schedules one
    /// delayed re-fetch of the file list.
    pub fn update_with_upload_results(&self, results: Vec<FileRow>) {
        self.store.update(|state| {
            let files = std::mem::take(&mut state.files);
            let (pending, mut rows): (Vec<FileRow>, Vec<FileRow>) = files
                .into_iter()
                .partition(|row| row.status == FileStatus::Pending);

            let mut unclaimed: Vec<Option<&FileRow>> = results.iter().map(Some).collect();
            let mut confirmed_ids = Vec::with_capacity(pending.len());
            for row in &pending {
                // pending rows are matched to results by file name, first come first served
                let confirmed = unclaimed
                    .iter_mut()
                    .find(|slot| matches!(slot, Some(result) if result.filename == row.filename))
                    .and_then(Option::take)
                    .filter(|result| result.status != FileStatus::Failed)
                    .map(|result| result.id.clone());
                confirmed_ids.push((row.id.clone(), confirmed));
            }

            let selected = std::mem::take(&mut state.selected_assistant_file_ids);
            state.selected_assistant_file_ids = selected
                .into_iter()
                .filter_map(|id| {
                    match confirmed_ids.iter().find(|(pending_id, _)| *pending_id == id) {
                        Some((_, confirmed)) => confirmed.clone(),
                        None => Some(id),
                    }
                })
                .collect();

            for result in &results {
                let status = match result.status {
                    FileStatus::Failed => FileStatus::Failed,
                    _ => FileStatus::Complete,
                };
                rows.insert(
                    0,
                    FileRow {
                        status,
                        ..result.clone()
                    },
                );
            }
            state.files = rows;
        });

        self.schedule_invalidation();
    }

    fn schedule_invalidation(&self) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(err) => {
                tracing::warn!("No runtime to re-fetch {} on: {}", FILES_DEPENDENCY, err);
                return;
            }
        };
        let invalidator = self.invalidator.clone();
        handle.spawn(async move {
            tokio::time::sleep(INVALIDATE_DELAY).await;
            invalidator.invalidate(FILES_DEPENDENCY);
        });
    }
}
