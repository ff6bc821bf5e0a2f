use std::fmt;

use crate::file_picker::FileSummary;

/// Interactive controls of the client surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    FilePicker,
    Upload,
    QuestionInput,
    Ask,
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Control::FilePicker => "file picker",
            Control::Upload => "upload button",
            Control::QuestionInput => "question input",
            Control::Ask => "ask button",
        };
        f.write_str(name)
    }
}

/// Enablement of every control, derived from `ready` and `busy` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub file_picker: bool,
    pub upload: bool,
    pub question_input: bool,
    pub ask: bool,
}

impl Controls {
    pub fn is_enabled(&self, control: Control) -> bool {
        match control {
            Control::FilePicker => self.file_picker,
            Control::Upload => self.upload,
            Control::QuestionInput => self.question_input,
            Control::Ask => self.ask,
        }
    }
}

/// One snapshot of everything the user can see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Set once an upload succeeds; never cleared for the rest of the session.
    pub ready: bool,
    pub busy: bool,
    pub selected_file: Option<FileSummary>,
    pub question: String,
    pub upload_status: String,
    pub ask_status: String,
    pub answer: String,
    pub error: String,
}

impl UiState {
    pub fn controls(&self) -> Controls {
        Controls {
            file_picker: !self.busy,
            upload: !self.busy,
            question_input: self.ready && !self.busy,
            ask: self.ready && !self.busy,
        }
    }

    pub fn clear_messages(&mut self) {
        self.upload_status.clear();
        self.ask_status.clear();
        self.answer.clear();
        self.error.clear();
    }

    pub fn render_lines(&self) -> Vec<String> {
        let controls = self.controls();
        let file = match &self.selected_file {
            Some(file) => file.to_string(),
            None => "no file selected".to_string(),
        };

        let mut lines = vec![
            format!("{} {}", widget("file", controls.file_picker), file),
            format!(
                "{} {} {:?}",
                widget("upload", controls.upload),
                widget("question", controls.question_input),
                self.question
            ),
            widget("ask", controls.ask),
        ];

        for (label, text) in [
            ("upload status", &self.upload_status),
            ("ask status", &self.ask_status),
            ("answer", &self.answer),
            ("error", &self.error),
        ] {
            if !text.is_empty() {
                lines.push(format!("{label}: {text}"));
            }
        }

        lines
    }
}

fn widget(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{label}]")
    } else {
        format!("[{label} (disabled)]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_and_question_follow_readiness_when_idle() {
        let mut state = UiState::default();
        let controls = state.controls();
        assert!(controls.file_picker && controls.upload);
        assert!(!controls.question_input && !controls.ask);

        state.ready = true;
        let controls = state.controls();
        assert!(controls.question_input && controls.ask);
    }

    #[test]
    fn busy_disables_everything() {
        for ready in [false, true] {
            let state = UiState { ready, busy: true, ..UiState::default() };
            let controls = state.controls();
            for control in [Control::FilePicker, Control::Upload, Control::QuestionInput, Control::Ask] {
                assert!(!controls.is_enabled(control), "{control} enabled while busy");
            }
        }
    }

    #[test]
    fn clear_messages_keeps_inputs_and_flags() {
        let mut state = UiState {
            ready: true,
            question: "What is the total?".into(),
            upload_status: "PDF ready.".into(),
            ask_status: "Retrieving answer...".into(),
            answer: "42".into(),
            error: "boom".into(),
            ..UiState::default()
        };
        state.clear_messages();

        assert!(state.ready);
        assert_eq!(state.question, "What is the total?");
        assert!(state.upload_status.is_empty());
        assert!(state.ask_status.is_empty());
        assert!(state.answer.is_empty());
        assert!(state.error.is_empty());
    }

    #[test]
    fn render_marks_disabled_controls_and_skips_empty_regions() {
        let state = UiState {
            error: "Please enter a question.".into(),
            ..UiState::default()
        };
        let lines = state.render_lines();

        assert_eq!(lines[0], "[file] no file selected");
        assert!(lines[1].contains("[question (disabled)]"));
        assert_eq!(lines[2], "[ask (disabled)]");
        assert_eq!(lines.last().unwrap(), "error: Please enter a question.");
        assert_eq!(lines.len(), 4);
    }
}
