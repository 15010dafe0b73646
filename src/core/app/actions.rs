use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::App;
use crate::core::completion::CompletionRequest;
use crate::core::worker::{CompletionParams, WorkerMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    SubmitMessage { message: String },
    CompletionReceived { request_id: u64, reply: String },
    CompletionFailed { request_id: u64, error: String },
    ScrollUp { lines: u16 },
    ScrollDown { lines: u16 },
    ScrollToBottom,
    Quit,
}

impl AppAction {
    pub fn from_worker(message: WorkerMessage, request_id: u64) -> Self {
        match message {
            WorkerMessage::Reply(reply) => AppAction::CompletionReceived { request_id, reply },
            WorkerMessage::Failed(error) => AppAction::CompletionFailed { request_id, error },
        }
    }
}

pub enum AppCommand {
    RequestCompletion(CompletionParams),
}

pub fn apply_actions(app: &mut App, actions: impl IntoIterator<Item = AppAction>) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for action in actions {
        if let Some(cmd) = apply_action(app, action) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SubmitMessage { message } => submit_message(app, message),
        AppAction::CompletionReceived { request_id, reply } => {
            if !app.session.is_current_request(request_id) {
                debug!(request_id, "ignoring stale reply");
                return None;
            }
            finish_with_reply(app, reply);
            None
        }
        AppAction::CompletionFailed { request_id, error } => {
            if !app.session.is_current_request(request_id) {
                debug!(request_id, "ignoring stale failure");
                return None;
            }
            finish_with_error(app, error);
            None
        }
        AppAction::ScrollUp { lines } => {
            app.ui.scroll_up(lines);
            None
        }
        AppAction::ScrollDown { lines } => {
            app.ui.scroll_down(lines);
            None
        }
        AppAction::ScrollToBottom => {
            app.ui.scroll.scroll_to_bottom();
            None
        }
        AppAction::Quit => {
            app.ui.exit_requested = true;
            None
        }
    }
}

fn submit_message(app: &mut App, message: String) -> Option<AppCommand> {
    if app.ui.is_pending() || message.trim().is_empty() {
        return None;
    }

    let now = Instant::now();
    app.ui.begin_pending(now);
    app.ui.clear_input();
    app.push_user(message, now);
    app.ui.scroll.scroll_to_bottom();

    let request_id = app.session.begin_request();
    let request = CompletionRequest {
        model: app.session.model.clone(),
        messages: app.transcript.api_messages(),
    };
    info!(
        request_id,
        model = %request.model,
        turns = request.messages.len(),
        "submitting message"
    );

    Some(AppCommand::RequestCompletion(CompletionParams {
        backend: Arc::clone(&app.session.backend),
        request,
        request_id,
    }))
}

fn finish_with_reply(app: &mut App, reply: String) {
    let now = Instant::now();
    app.push_assistant(reply, now);
    app.session.finish_request();
    app.ui.end_pending();
    app.ui.scroll.scroll_to_bottom();
}

fn finish_with_error(app: &mut App, error: String) {
    warn!(error = %error, "request failed");
    let now = Instant::now();
    app.push_app_error(error, now);
    app.session.finish_request();
    app.ui.end_pending();
    app.ui.scroll.scroll_to_bottom();
}
