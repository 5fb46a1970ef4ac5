use std::cell::Cell;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use uhash_logging::{uhash_debug, uhash_error, uhash_info, uhash_warn};

use crate::mailbox::MailboxSender;
use crate::{
    DigestHex, DigestSource, Envelope, ErrorText, HashError, HashSettings, Job, JobId,
    StreamingHasher, WorkerEvent,
};

const WORKER_STACK_SIZE: usize = 512 * 1024;

struct CancelRequest;

/// Controller-side handle of one worker thread.
pub struct WorkerHandle {
    job_id: JobId,
    created: bool,
    cancel_tx: Option<mpsc::Sender<CancelRequest>>,
    join: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Handle of a job whose thread never came up.
    pub fn failed(job_id: JobId) -> Self {
        Self {
            job_id,
            created: false,
            cancel_tx: None,
            join: None,
        }
    }

    /// `false` when the thread could not be spawned; no event will ever
    /// arrive for this job.
    pub fn created(&self) -> bool {
        self.created
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Queues a cancellation request. Never blocks and is never acknowledged;
    /// the worker sees it at its next checkpoint.
    pub fn request_cancel(&self) {
        let Some(cancel_tx) = &self.cancel_tx else {
            return;
        };
        if cancel_tx.send(CancelRequest).is_err() {
            uhash_debug!("Worker for job {} already exited; cancel ignored", self.job_id);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Waits for the worker thread to exit.
    pub fn join(mut self) {
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                uhash_error!("Worker thread for job {} panicked", self.job_id);
            }
        }
    }
}

pub struct Worker;

impl Worker {
    /// Spawns a worker hashing `job` with the configured algorithm.
    pub fn start(job: Job, settings: &HashSettings, mailbox: MailboxSender) -> WorkerHandle {
        Self::start_with(job, StreamingHasher::from_settings(settings), mailbox)
    }

    /// Spawns a worker around an already configured hasher.
    ///
    /// The cancellation queue exists before the thread does, so requests made
    /// right after this returns are honored at the worker's first checkpoint.
    pub fn start_with<S>(job: Job, hasher: StreamingHasher<S>, mailbox: MailboxSender) -> WorkerHandle
    where
        S: DigestSource + 'static,
    {
        let job_id = job.id;
        let (cancel_tx, cancel_rx) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name(format!("uhash-worker-{job_id}"))
            .stack_size(WORKER_STACK_SIZE)
            .spawn(move || run_job(job, hasher, cancel_rx, mailbox));

        match spawned {
            Ok(join) => {
                uhash_debug!("Started hash calculation worker for job {}", job_id);
                WorkerHandle {
                    job_id,
                    created: true,
                    cancel_tx: Some(cancel_tx),
                    join: Some(join),
                }
            }
            Err(err) => {
                uhash_error!("Failed to create hash calculation worker thread: {}", err);
                WorkerHandle::failed(job_id)
            }
        }
    }
}

fn run_job<S: DigestSource>(
    job: Job,
    mut hasher: StreamingHasher<S>,
    cancel_rx: mpsc::Receiver<CancelRequest>,
    mailbox: MailboxSender,
) {
    uhash_logging::set_job_tag(job.id);
    uhash_info!(
        "Hashing {:?} with {} in {} byte chunks",
        job.path,
        hasher.algorithm_name(),
        hasher.chunk_size()
    );

    let mailbox_closed = Cell::new(false);
    let send = |event: WorkerEvent| {
        if mailbox_closed.get() {
            return;
        }
        if mailbox.send(Envelope { job_id: job.id, event }).is_err() {
            uhash_warn!("Controller mailbox closed; dropping {:?}", event);
            mailbox_closed.set(true);
        }
    };

    send(WorkerEvent::Initialized);

    let mut cancel_requested = false;
    let result = hasher.hash(
        &job.path,
        || {
            while cancel_rx.try_recv().is_ok() {
                cancel_requested = true;
            }
            cancel_requested || mailbox_closed.get()
        },
        |percent| send(WorkerEvent::ProgressChanged { percent }),
    );

    let event = terminal_event(result);
    match &event {
        WorkerEvent::Complete { digest_hex } => uhash_info!("Calculated hash {}", digest_hex),
        WorkerEvent::Canceled => uhash_info!("Calculation canceled"),
        WorkerEvent::Failed { error_text } => uhash_warn!("Calculation failed: {}", error_text),
        _ => {}
    }
    send(event);
    uhash_logging::clear_job_tag();
}

/// Maps a hash result to the single terminal event of its job.
pub fn terminal_event(result: Result<DigestHex, HashError>) -> WorkerEvent {
    match result {
        Ok(digest_hex) => WorkerEvent::Complete { digest_hex },
        Err(HashError::Canceled) => WorkerEvent::Canceled,
        Err(err) => WorkerEvent::Failed {
            error_text: ErrorText::truncated(&err.to_string()),
        },
    }
}
