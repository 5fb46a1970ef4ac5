use indicatif::{ProgressBar, ProgressStyle};
use uhash_core::{ActionIcon, AppViewModel, ControllerState, TaskbarMode};
use uhash_logging::uhash_warn;

const BAR_TEMPLATE: &str = "{msg}\n[{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}%";

/// Console rendering of the view model, plus the clipboard and error-dialog
/// stand-ins.
#[derive(Default)]
pub struct ConsoleUi {
    bar: Option<ProgressBar>,
    shown_state: Option<ControllerState>,
}

impl ConsoleUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, view: &AppViewModel) {
        let presentation = view.presentation;

        if presentation.progress_visible {
            let bar = self.bar.get_or_insert_with(|| new_bar(&view.target_path));
            bar.set_position(u64::from(view.progress));
        } else if let Some(bar) = self.bar.take() {
            bar.set_position(u64::from(view.progress));
            match presentation.taskbar {
                TaskbarMode::Error => bar.abandon(),
                TaskbarMode::None | TaskbarMode::Normal => bar.finish_and_clear(),
            }
        }

        if self.shown_state != Some(view.state) {
            self.shown_state = Some(view.state);
            let line = status_line(view);
            match &self.bar {
                Some(bar) => bar.println(line),
                None => println!("{line}"),
            }
        }
    }

    /// Stand-in for the system clipboard.
    pub fn copy_to_clipboard(&self, text: &str) {
        println!("{text}");
    }

    /// Stand-in for the modal error box; returns once "dismissed".
    pub fn show_error(&self, message: &str) {
        uhash_warn!("Showing error: {}", message);
        eprintln!("Error: {message}");
    }
}

fn new_bar(target: &str) -> ProgressBar {
    let bar = ProgressBar::new(100);
    match ProgressStyle::default_bar().template(BAR_TEMPLATE) {
        Ok(style) => bar.set_style(style.progress_chars("#>-")),
        Err(err) => uhash_warn!("Invalid progress bar template: {}", err),
    }
    bar.set_message(format!("Hashing: {target}"));
    bar
}

fn action_label(icon: ActionIcon) -> &'static str {
    match icon {
        ActionIcon::Copy => "copy",
        ActionIcon::Cancel => "cancel",
        ActionIcon::Retry => "retry",
    }
}

/// One-line summary printed whenever the controller state changes.
pub fn status_line(view: &AppViewModel) -> String {
    let headline = match view.state {
        ControllerState::Init => "Enter a file path to hash.".to_string(),
        ControllerState::Working => format!("Starting: {}", view.target_path),
        ControllerState::WorkingCancelable => format!("Working: {}", view.target_path),
        ControllerState::Canceled => format!("Canceled: {}", view.target_path),
        ControllerState::FinishedSuccess => {
            format!("{}  {}", view.result_text, view.target_path)
        }
        ControllerState::FinishedError | ControllerState::FinishedErrorAck => format!(
            "Failed: {}",
            view.error_text.as_deref().unwrap_or(&view.result_text)
        ),
    };

    if view.presentation.action_enabled {
        format!(
            "{headline}  (:action = {})",
            action_label(view.presentation.action_icon)
        )
    } else {
        headline
    }
}
