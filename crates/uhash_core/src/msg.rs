use std::path::PathBuf;

use crate::JobId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked or dropped a file.
    FileChosen(PathBuf),
    /// User clicked the single action button; meaning depends on state.
    ActionClicked,
    CancelClicked,
    RetryClicked,
    CopyClicked,
    /// User dismissed the error dialog.
    ErrorAcknowledged,
    /// The worker thread for `job_id` could not be created.
    WorkerStartFailed { job_id: JobId },
    WorkerInitialized { job_id: JobId },
    WorkerProgress { job_id: JobId, percent: u32 },
    WorkerCanceled { job_id: JobId },
    WorkerCompleted { job_id: JobId, digest: String },
    WorkerFailed { job_id: JobId, message: String },
}

impl Msg {
    /// Job id carried by worker-originated messages.
    pub fn worker_job_id(&self) -> Option<JobId> {
        match self {
            Msg::WorkerStartFailed { job_id }
            | Msg::WorkerInitialized { job_id }
            | Msg::WorkerProgress { job_id, .. }
            | Msg::WorkerCanceled { job_id }
            | Msg::WorkerCompleted { job_id, .. }
            | Msg::WorkerFailed { job_id, .. } => Some(*job_id),
            _ => None,
        }
    }
}
