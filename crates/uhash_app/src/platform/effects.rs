use uhash_core::{Effect, Msg};
use uhash_engine::{Envelope, HashSettings, Job, MailboxSender, Worker, WorkerEvent, WorkerHandle};
use uhash_logging::{uhash_debug, uhash_info, uhash_warn};

use super::ui::ConsoleUi;

/// Spawns the worker for a job.
pub type Launch = fn(Job, &HashSettings, MailboxSender) -> WorkerHandle;

/// Executes controller effects. Owns the at most one live worker.
pub struct EffectRunner {
    settings: HashSettings,
    mailbox: MailboxSender,
    worker: Option<WorkerHandle>,
    launch: Launch,
}

impl EffectRunner {
    pub fn new(settings: HashSettings, mailbox: MailboxSender) -> Self {
        Self::with_launcher(settings, mailbox, Worker::start)
    }

    pub fn with_launcher(settings: HashSettings, mailbox: MailboxSender, launch: Launch) -> Self {
        Self {
            settings,
            mailbox,
            worker: None,
            launch,
        }
    }

    /// Runs one effect; returns a message to feed back into the controller
    /// when the effect completes synchronously.
    pub fn run(&mut self, effect: Effect, ui: &ConsoleUi) -> Option<Msg> {
        match effect {
            Effect::StartWorker { job_id, path } => {
                // The previous job already delivered its terminal event.
                self.join_worker();
                uhash_info!(
                    "StartWorker job_id={} algorithm={} path={:?}",
                    job_id,
                    self.settings.algorithm.label(),
                    path
                );
                let job = Job::new(job_id, path);
                let handle = (self.launch)(job, &self.settings, self.mailbox.clone());
                if handle.created() {
                    self.worker = Some(handle);
                    None
                } else {
                    Some(Msg::WorkerStartFailed { job_id })
                }
            }
            Effect::RequestCancel { job_id } => {
                match &self.worker {
                    Some(worker) if worker.job_id() == job_id => {
                        uhash_info!("Requesting cancel of job {}", job_id);
                        worker.request_cancel();
                    }
                    _ => uhash_warn!("Cancel requested for job {} which is not running", job_id),
                }
                None
            }
            Effect::CopyToClipboard { text } => {
                ui.copy_to_clipboard(&text);
                None
            }
            Effect::ShowErrorDialog { message } => {
                ui.show_error(&message);
                Some(Msg::ErrorAcknowledged)
            }
            Effect::Fatal { reason } => super::fatal(&reason),
        }
    }

    /// Asks a running worker to stop early. Used on shutdown.
    pub fn cancel_running(&self) {
        if let Some(worker) = self.worker.as_ref().filter(|worker| !worker.is_finished()) {
            uhash_debug!("Canceling job {} for shutdown", worker.job_id());
            worker.request_cancel();
        }
    }

    pub fn join_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.join();
        }
    }
}

pub fn map_worker_event(envelope: Envelope) -> Msg {
    let job_id = envelope.job_id;
    match envelope.event {
        WorkerEvent::Initialized => Msg::WorkerInitialized { job_id },
        WorkerEvent::ProgressChanged { percent } => Msg::WorkerProgress { job_id, percent },
        WorkerEvent::Canceled => Msg::WorkerCanceled { job_id },
        WorkerEvent::Complete { digest_hex } => Msg::WorkerCompleted {
            job_id,
            digest: digest_hex.to_string(),
        },
        WorkerEvent::Failed { error_text } => Msg::WorkerFailed {
            job_id,
            message: error_text.to_string(),
        },
    }
}
