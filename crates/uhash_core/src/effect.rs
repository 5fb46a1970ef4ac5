use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartWorker { job_id: crate::JobId, path: PathBuf },
    RequestCancel { job_id: crate::JobId },
    CopyToClipboard { text: String },
    ShowErrorDialog { message: String },
    /// A controller invariant was violated; the process must not continue.
    Fatal { reason: String },
}
