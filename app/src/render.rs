use pdf_qa_client::UiState;
use tokio::sync::watch;

pub fn render(state: &UiState) -> String {
    let mut out = String::from("----\n");
    for line in state.render_lines() {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Prints every published snapshot until the controller goes away.
pub async fn run(mut updates: watch::Receiver<UiState>) {
    while updates.changed().await.is_ok() {
        let frame = render(&updates.borrow_and_update());
        print!("{frame}");
    }
    log::debug!("Renderer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_lists_widgets_then_messages() {
        let state = UiState {
            ready: true,
            busy: true,
            ask_status: "Retrieving answer...".into(),
            ..UiState::default()
        };
        let frame = render(&state);

        assert!(frame.starts_with("----\n"));
        assert!(frame.contains("[ask (disabled)]"));
        assert!(frame.contains("[upload (disabled)]"));
        assert!(frame.ends_with("ask status: Retrieving answer...\n"));
    }
}
