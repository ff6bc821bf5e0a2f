use anyhow::{bail, Result};
use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  open <path>        choose the PDF to upload (no path clears the selection)
  upload             upload and index the chosen file
  question <text>    type a question
  ask [text]         ask the current question, or the one given
  health             check that the backend is up
  status             show the current screen
  help               show this text
  quit               leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(Option<PathBuf>),
    Upload,
    Question(String),
    Ask(Option<String>),
    Health,
    Status,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
///
/// Question text is kept as typed, surrounding spaces included; trimming is
/// the controller's job.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim_end_matches(['\r', '\n']).trim_start();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, Some(rest)),
        None => (line, None),
    };

    let command = match word.to_lowercase().as_str() {
        "open" => Command::Open(
            rest.map(str::trim)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        ),
        "upload" => Command::Upload,
        "question" => Command::Question(rest.unwrap_or_default().to_string()),
        "ask" => Command::Ask(rest.map(str::to_string)),
        "health" => Command::Health,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("Unknown command {other:?}. Type \"help\" for the list."),
    };

    Ok(Some(command))
}
