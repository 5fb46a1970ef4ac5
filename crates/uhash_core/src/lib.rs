//! uhash core: pure controller state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    is_acceptable_path, AppState, ControllerState, JobId, MAX_PATH_LEN, NOT_CALCULATED_TEXT,
    UNKNOWN_ERROR_TEXT, WORKER_START_FAILED_TEXT,
};
pub use update::update;
pub use view_model::{presentation, ActionIcon, AppViewModel, Presentation, TaskbarMode};
