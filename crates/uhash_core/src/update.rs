use std::path::PathBuf;

use crate::state::WORKER_START_FAILED_TEXT;
use crate::{is_acceptable_path, AppState, ControllerState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if let Some(job_id) = msg.worker_job_id() {
        if state.active_job() != Some(job_id) {
            // Leftover from a job that is no longer tracked.
            return (state, Vec::new());
        }
    }

    let current = state.controller();
    let effects = match msg {
        Msg::FileChosen(path) => {
            if current.accepts_new_job() && is_acceptable_path(&path) {
                start_job(&mut state, path)
            } else {
                Vec::new()
            }
        }
        Msg::ActionClicked => match action_for(current) {
            Some(routed) => return update(state, routed),
            None => Vec::new(),
        },
        Msg::CancelClicked => match (current, state.active_job()) {
            (ControllerState::WorkingCancelable, Some(job_id)) => {
                vec![Effect::RequestCancel { job_id }]
            }
            _ => Vec::new(),
        },
        Msg::RetryClicked => match state.target_path() {
            Some(path) if current.can_retry() => {
                let path = path.to_path_buf();
                start_job(&mut state, path)
            }
            _ => Vec::new(),
        },
        Msg::CopyClicked => match (current, state.digest()) {
            (ControllerState::FinishedSuccess, Some(digest)) => vec![Effect::CopyToClipboard {
                text: digest.to_string(),
            }],
            _ => Vec::new(),
        },
        Msg::ErrorAcknowledged => {
            if current == ControllerState::FinishedError {
                state.set_controller(ControllerState::FinishedErrorAck);
            }
            Vec::new()
        }
        Msg::WorkerStartFailed { .. } if current == ControllerState::Working => {
            let message = state.finish_error(WORKER_START_FAILED_TEXT);
            vec![Effect::ShowErrorDialog { message }]
        }
        Msg::WorkerInitialized { .. } if current == ControllerState::Working => {
            state.set_controller(ControllerState::WorkingCancelable);
            Vec::new()
        }
        Msg::WorkerProgress { percent, .. } if current.is_working() && percent <= 100 => {
            state.set_progress(percent);
            Vec::new()
        }
        Msg::WorkerCanceled { .. } if current == ControllerState::WorkingCancelable => {
            state.set_controller(ControllerState::Canceled);
            Vec::new()
        }
        Msg::WorkerCompleted { digest, .. } if current == ControllerState::WorkingCancelable => {
            state.finish_success(digest);
            Vec::new()
        }
        Msg::WorkerFailed { message, .. } if current.is_working() => {
            let message = state.finish_error(&message);
            vec![Effect::ShowErrorDialog { message }]
        }
        unexpected @ (Msg::WorkerStartFailed { .. }
        | Msg::WorkerInitialized { .. }
        | Msg::WorkerProgress { .. }
        | Msg::WorkerCanceled { .. }
        | Msg::WorkerCompleted { .. }
        | Msg::WorkerFailed { .. }) => vec![Effect::Fatal {
            reason: format!("unexpected worker message {unexpected:?} in state {current:?}"),
        }],
    };

    (state, effects)
}

/// What the action button means in each state.
fn action_for(state: ControllerState) -> Option<Msg> {
    match state {
        ControllerState::WorkingCancelable => Some(Msg::CancelClicked),
        ControllerState::Canceled
        | ControllerState::FinishedError
        | ControllerState::FinishedErrorAck => Some(Msg::RetryClicked),
        ControllerState::FinishedSuccess => Some(Msg::CopyClicked),
        ControllerState::Init | ControllerState::Working => None,
    }
}

fn start_job(state: &mut AppState, path: PathBuf) -> Vec<Effect> {
    let job_id = state.begin_job(path.clone());
    vec![Effect::StartWorker { job_id, path }]
}
