use std::path::{Path, PathBuf};

use crate::view_model::{presentation, AppViewModel};

pub type JobId = u64;

/// Paths must be strictly shorter than this many bytes.
pub const MAX_PATH_LEN: usize = 512;

pub const NOT_CALCULATED_TEXT: &str = "Hash not calculated yet.";
pub const WORKER_START_FAILED_TEXT: &str =
    "Internal error: Failed to create hash calculation worker thread!";
pub const UNKNOWN_ERROR_TEXT: &str = "I just don't know what went wrong!";

/// Lifecycle of the single hash calculation the controller drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControllerState {
    #[default]
    Init = 0,
    /// Worker requested, not yet confirmed running.
    Working = 1,
    WorkingCancelable = 2,
    Canceled = 3,
    FinishedSuccess = 4,
    /// Failure not yet acknowledged by the user.
    FinishedError = 5,
    FinishedErrorAck = 6,
}

impl ControllerState {
    pub const ALL: [ControllerState; 7] = [
        ControllerState::Init,
        ControllerState::Working,
        ControllerState::WorkingCancelable,
        ControllerState::Canceled,
        ControllerState::FinishedSuccess,
        ControllerState::FinishedError,
        ControllerState::FinishedErrorAck,
    ];

    pub fn is_working(self) -> bool {
        matches!(
            self,
            ControllerState::Working | ControllerState::WorkingCancelable
        )
    }

    /// States from which a new job may be started.
    pub fn accepts_new_job(self) -> bool {
        !self.is_working()
    }

    /// States in which a retry re-runs the stored path.
    pub fn can_retry(self) -> bool {
        matches!(
            self,
            ControllerState::Canceled
                | ControllerState::FinishedError
                | ControllerState::FinishedErrorAck
        )
    }

    /// Nothing more will happen without user input.
    pub fn is_settled(self) -> bool {
        matches!(
            self,
            ControllerState::Canceled
                | ControllerState::FinishedSuccess
                | ControllerState::FinishedErrorAck
        )
    }
}

/// Whether `path` may be used as a hash target.
pub fn is_acceptable_path(path: &Path) -> bool {
    let len = path.as_os_str().len();
    len > 0 && len < MAX_PATH_LEN
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    controller: ControllerState,
    target_path: Option<PathBuf>,
    progress: u32,
    digest: Option<String>,
    error_text: Option<String>,
    active_job: Option<JobId>,
    next_job_id: JobId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            controller: ControllerState::Init,
            target_path: None,
            progress: 0,
            digest: None,
            error_text: None,
            active_job: None,
            next_job_id: 1,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controller(&self) -> ControllerState {
        self.controller
    }

    /// Job whose worker events are currently accepted.
    pub fn active_job(&self) -> Option<JobId> {
        self.active_job
    }

    pub fn target_path(&self) -> Option<&Path> {
        self.target_path.as_deref()
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    pub fn view(&self) -> AppViewModel {
        let result_text = match (self.controller, &self.digest) {
            (ControllerState::FinishedSuccess, Some(digest)) => digest.clone(),
            _ => NOT_CALCULATED_TEXT.to_string(),
        };
        AppViewModel {
            state: self.controller,
            presentation: presentation(self.controller),
            progress: self.progress,
            target_path: self
                .target_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            result_text,
            error_text: self.error_text.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns and clears the render flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_controller(&mut self, next: ControllerState) {
        if self.controller != next {
            self.controller = next;
            self.mark_dirty();
        }
    }

    /// Stores `path`, resets per-job data and enters `Working`.
    pub(crate) fn begin_job(&mut self, path: PathBuf) -> JobId {
        let job_id = self.next_job_id;
        self.next_job_id += 1;
        self.active_job = Some(job_id);
        self.target_path = Some(path);
        self.progress = 0;
        self.digest = None;
        self.error_text = None;
        self.set_controller(ControllerState::Working);
        self.mark_dirty();
        job_id
    }

    pub(crate) fn set_progress(&mut self, percent: u32) {
        if percent > self.progress {
            self.progress = percent;
            self.mark_dirty();
        }
    }

    pub(crate) fn finish_success(&mut self, digest: String) {
        self.digest = Some(digest);
        self.set_controller(ControllerState::FinishedSuccess);
    }

    /// Enters `FinishedError` and returns the text to show.
    pub(crate) fn finish_error(&mut self, message: &str) -> String {
        let text = if message.trim().is_empty() {
            UNKNOWN_ERROR_TEXT.to_string()
        } else {
            message.to_string()
        };
        self.error_text = Some(text.clone());
        self.set_controller(ControllerState::FinishedError);
        text
    }
}
