use crate::ControllerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionIcon {
    Copy,
    Cancel,
    Retry,
}

/// Taskbar progress indicator mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarMode {
    None,
    Normal,
    Error,
}

/// How the controls look in one controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub action_enabled: bool,
    pub action_icon: ActionIcon,
    pub progress_visible: bool,
    pub file_input_enabled: bool,
    pub result_visible: bool,
    pub taskbar: TaskbarMode,
}

const fn row(
    action_enabled: bool,
    action_icon: ActionIcon,
    working: bool,
    taskbar: TaskbarMode,
) -> Presentation {
    Presentation {
        action_enabled,
        action_icon,
        progress_visible: working,
        file_input_enabled: !working,
        result_visible: !working,
        taskbar,
    }
}

/// Indexed by `ControllerState as usize`.
const PRESENTATIONS: [Presentation; 7] = [
    row(false, ActionIcon::Copy, false, TaskbarMode::None),
    row(false, ActionIcon::Cancel, true, TaskbarMode::Normal),
    row(true, ActionIcon::Cancel, true, TaskbarMode::Normal),
    row(true, ActionIcon::Retry, false, TaskbarMode::None),
    row(true, ActionIcon::Copy, false, TaskbarMode::None),
    row(true, ActionIcon::Retry, false, TaskbarMode::Error),
    row(true, ActionIcon::Retry, false, TaskbarMode::None),
];

pub fn presentation(state: ControllerState) -> Presentation {
    PRESENTATIONS[state as usize]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub state: ControllerState,
    pub presentation: Presentation,
    pub progress: u32,
    pub target_path: String,
    /// Digest once finished successfully, placeholder text otherwise.
    pub result_text: String,
    pub error_text: Option<String>,
    pub dirty: bool,
}
