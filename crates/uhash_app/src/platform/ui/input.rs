//! Stdin stands in for the file picker, drag-and-drop and the buttons.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use uhash_core::Msg;
use uhash_logging::{uhash_debug, uhash_warn};

use crate::platform::app::AppEvent;

/// Several dropped paths arrive on one line separated by this.
const DROP_SEPARATOR: char = '|';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Msg(Msg),
    /// A picked or dropped file; `ignored` are further dropped files.
    Choose { path: PathBuf, ignored: Vec<String> },
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let command = match line {
        ":quit" | ":q" => Command::Quit,
        ":action" => Command::Msg(Msg::ActionClicked),
        ":cancel" => Command::Msg(Msg::CancelClicked),
        ":retry" => Command::Msg(Msg::RetryClicked),
        ":copy" => Command::Msg(Msg::CopyClicked),
        _ => {
            let mut paths = line
                .split(DROP_SEPARATOR)
                .map(str::trim)
                .filter(|part| !part.is_empty());
            let path = PathBuf::from(paths.next()?);
            Command::Choose {
                path,
                ignored: paths.map(ToOwned::to_owned).collect(),
            }
        }
    };
    Some(command)
}

/// Reads stdin on a background thread until EOF or `:quit`.
pub fn spawn_reader(events: mpsc::Sender<AppEvent>) -> anyhow::Result<()> {
    thread::Builder::new()
        .name("uhash-input".to_string())
        .spawn(move || read_lines(io::stdin().lock(), &events))
        .context("Failed to start the input reader thread")?;
    Ok(())
}

fn read_lines(input: impl BufRead, events: &mpsc::Sender<AppEvent>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                uhash_warn!("Failed to read input: {}", err);
                break;
            }
        };
        let event = match parse_command(&line) {
            None => continue,
            Some(Command::Quit) => AppEvent::Quit,
            Some(Command::Msg(msg)) => AppEvent::User(msg),
            Some(Command::Choose { path, ignored }) => {
                if !ignored.is_empty() {
                    uhash_warn!(
                        "Only one file can be hashed at a time; ignoring {} more: {:?}",
                        ignored.len(),
                        ignored
                    );
                }
                AppEvent::User(Msg::FileChosen(path))
            }
        };
        let quit = matches!(event, AppEvent::Quit);
        if events.send(event).is_err() || quit {
            return;
        }
    }
    uhash_debug!("Input closed");
    let _ = events.send(AppEvent::InputClosed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_map_to_messages() {
        assert_eq!(parse_command(":quit"), Some(Command::Quit));
        assert_eq!(
            parse_command("  :action "),
            Some(Command::Msg(Msg::ActionClicked))
        );
        assert_eq!(parse_command(":cancel"), Some(Command::Msg(Msg::CancelClicked)));
        assert_eq!(parse_command(":retry"), Some(Command::Msg(Msg::RetryClicked)));
        assert_eq!(parse_command(":copy"), Some(Command::Msg(Msg::CopyClicked)));
        assert_eq!(parse_command("   "), None);
    }

    #[test]
    fn dropped_files_keep_only_the_first() {
        assert_eq!(
            parse_command("/a.bin | /b.bin|/c.bin"),
            Some(Command::Choose {
                path: PathBuf::from("/a.bin"),
                ignored: vec!["/b.bin".to_string(), "/c.bin".to_string()],
            })
        );
        assert_eq!(parse_command("||"), None);
    }

    #[test]
    fn reader_forwards_lines_and_reports_eof() {
        let (tx, rx) = mpsc::channel();
        read_lines(io::Cursor::new("/tmp/x\n:action\n\n"), &tx);

        let events: Vec<_> = rx.try_iter().collect();
        assert!(matches!(
            events.as_slice(),
            [
                AppEvent::User(Msg::FileChosen(_)),
                AppEvent::User(Msg::ActionClicked),
                AppEvent::InputClosed
            ]
        ));
    }

    #[test]
    fn reader_stops_at_quit() {
        let (tx, rx) = mpsc::channel();
        read_lines(io::Cursor::new(":quit\n/tmp/never\n"), &tx);

        let events: Vec<_> = rx.try_iter().collect();
        assert!(matches!(events.as_slice(), [AppEvent::Quit]));
    }
}
