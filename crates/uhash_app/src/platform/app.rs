use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use uhash_core::{is_acceptable_path, update, AppState, ControllerState, Effect, Msg};
use uhash_engine::mailbox::{self, MailboxReceiver};
use uhash_logging::{uhash_debug, uhash_info, uhash_warn};

use super::effects::{map_worker_event, EffectRunner};
use super::settings::Settings;
use super::ui::{self, ConsoleUi};

/// Everything the controller thread reacts to.
#[derive(Debug)]
pub enum AppEvent {
    User(Msg),
    /// The worker stored an event in the mailbox.
    MailboxReady,
    InputClosed,
    Quit,
}

pub fn run_app(file: Option<PathBuf>, settings: &Settings) -> anyhow::Result<ExitCode> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();

    let wake_tx = event_tx.clone();
    let (mailbox_tx, mailbox_rx) = mailbox::channel(move || {
        let _ = wake_tx.send(AppEvent::MailboxReady);
    });

    let runner = EffectRunner::new(settings.hash_settings(), mailbox_tx);
    let mut handler = AppEventHandler::new(runner, mailbox_rx);
    handler.render_initial();

    match file.filter(|path| {
        let ok = is_acceptable_path(path);
        if !ok {
            uhash_warn!("Ignoring unusable command line path {:?}", path);
        }
        ok
    }) {
        Some(path) => {
            uhash_info!("Hashing {:?} from the command line", path);
            handler.one_shot = true;
            handler.dispatch_msg(Msg::FileChosen(path));
        }
        None => ui::input::spawn_reader(event_tx)?,
    }

    if !handler.is_done() {
        for event in event_rx.iter() {
            handler.handle_event(event);
            if handler.is_done() {
                break;
            }
        }
    }

    Ok(handler.shutdown().into())
}

/// How the session ended, as reported through the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::FAILURE,
        }
    }
}

struct AppEventHandler {
    state: AppState,
    runner: EffectRunner,
    mailbox: MailboxReceiver,
    ui: ConsoleUi,
    pending: VecDeque<Msg>,
    one_shot: bool,
    quit: bool,
    #[cfg(test)]
    rendered: Vec<ControllerState>,
}

impl AppEventHandler {
    fn new(runner: EffectRunner, mailbox: MailboxReceiver) -> Self {
        Self {
            state: AppState::new(),
            runner,
            mailbox,
            ui: ConsoleUi::new(),
            pending: VecDeque::new(),
            one_shot: false,
            quit: false,
            #[cfg(test)]
            rendered: Vec::new(),
        }
    }

    fn render_initial(&mut self) {
        self.render();
    }

    fn render(&mut self) {
        let view = self.state.view();
        #[cfg(test)]
        self.rendered.push(view.state);
        self.ui.render(&view);
    }

    fn render_if_dirty(&mut self) {
        if self.state.consume_dirty() {
            self.render();
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::User(msg) => self.dispatch_msg(msg),
            AppEvent::MailboxReady => self.drain_mailbox(),
            AppEvent::InputClosed | AppEvent::Quit => {
                uhash_debug!("Leaving event loop on {:?}", event);
                self.quit = true;
            }
        }
    }

    fn drain_mailbox(&mut self) {
        // Receiving frees the slot, so a blocked worker may refill it at once.
        while let Some(envelope) = self.mailbox.receive() {
            self.dispatch_msg(map_worker_event(envelope));
        }
    }

    /// Applies `msg` and every message its effects feed back, then renders.
    fn dispatch_msg(&mut self, msg: Msg) {
        self.pending.push_back(msg);
        while let Some(msg) = self.pending.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in effects {
                if matches!(effect, Effect::ShowErrorDialog { .. }) {
                    // The failed state stays on screen while the dialog is up.
                    self.render_if_dirty();
                }
                if let Some(follow_up) = self.runner.run(effect, &self.ui) {
                    self.pending.push_back(follow_up);
                }
            }
        }

        self.render_if_dirty();
    }

    fn is_done(&self) -> bool {
        self.quit || (self.one_shot && self.state.controller().is_settled())
    }

    fn shutdown(self) -> Outcome {
        let Self {
            state,
            mut runner,
            mailbox,
            one_shot,
            ..
        } = self;

        runner.cancel_running();
        // Unblocks a worker waiting to deliver into the mailbox.
        drop(mailbox);
        runner.join_worker();

        let failed = one_shot && state.controller() != ControllerState::FinishedSuccess;
        uhash_info!("Exiting in state {:?}", state.controller());
        if failed {
            Outcome::Failure
        } else {
            Outcome::Success
        }
    }
}
