//! Main chat event loop.
//!
//! A reader task forwards crossterm events over a channel; the loop owns the
//! app state, applies input and worker replies as actions, and redraws at most
//! sixty times a second.

mod keybindings;
mod lifecycle;
mod setup;

use self::keybindings::{classify_key, KeyLoopAction};
use self::lifecycle::{install_panic_hook, restore_terminal, setup_terminal, SharedTerminal};
pub use self::setup::{bootstrap_app, ChatLaunch};

use crate::core::app::{apply_actions, App, AppAction, AppCommand};
use crate::core::config::Config;
use crate::core::worker::{CompletionWorker, WorkerMessage};
use crate::ui::chrome::ChromeEvent;
use crate::ui::renderer::ui;
use ratatui::crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};
use tui_textarea::Input;

pub type AppHandle = Arc<Mutex<App>>;

const MAX_FPS: u64 = 60;
const WHEEL_LINES: u16 = 3;

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
    RequestRedraw,
}

async fn try_draw_frame(
    app: &AppHandle,
    terminal: &SharedTerminal,
    request_redraw: &mut bool,
    last_draw: &mut Instant,
    frame_duration: Duration,
) -> io::Result<()> {
    if !*request_redraw {
        return Ok(());
    }

    let now = Instant::now();
    if now.duration_since(*last_draw) < frame_duration {
        return Ok(());
    }

    let mut app_guard = app.lock().await;
    let mut terminal_guard = terminal.lock().await;
    terminal_guard.draw(|f| ui(f, &mut app_guard, now))?;
    *last_draw = now;
    *request_redraw = false;
    Ok(())
}

#[derive(Debug, Default)]
struct EventProcessingOutcome {
    events_processed: bool,
    request_redraw: bool,
    actions: Vec<AppAction>,
}

/// Apply one key press to the app. Returns the action it produced, if any.
fn route_keyboard_event(app: &mut App, key: KeyEvent) -> Option<AppAction> {
    let multiline_input = app.ui.textarea().lines().len() > 1;
    match classify_key(&key, multiline_input) {
        KeyLoopAction::Quit => Some(AppAction::Quit),
        KeyLoopAction::Submit => {
            if app.is_pending() {
                return None;
            }
            Some(AppAction::SubmitMessage {
                message: app.ui.input_text(),
            })
        }
        KeyLoopAction::InsertNewline => {
            app.ui.apply_textarea_edit(|ta| ta.insert_newline());
            None
        }
        KeyLoopAction::ScrollUp(lines) => Some(AppAction::ScrollUp { lines }),
        KeyLoopAction::ScrollDown(lines) => Some(AppAction::ScrollDown { lines }),
        KeyLoopAction::PageUp => Some(AppAction::ScrollUp {
            lines: app.ui.page_lines(),
        }),
        KeyLoopAction::PageDown => Some(AppAction::ScrollDown {
            lines: app.ui.page_lines(),
        }),
        KeyLoopAction::ScrollToBottom => Some(AppAction::ScrollToBottom),
        KeyLoopAction::ToggleMaximize => {
            app.ui.chrome.toggle_maximize();
            None
        }
        KeyLoopAction::Edit => {
            app.ui.apply_textarea_edit(|ta| {
                ta.input(Input::from(key));
            });
            None
        }
    }
}

fn route_mouse_event(app: &mut App, mouse: MouseEvent) -> Option<AppAction> {
    let over_body = app
        .ui
        .chrome
        .layout()
        .body
        .is_some_and(|body| body.contains((mouse.column, mouse.row).into()));

    match mouse.kind {
        MouseEventKind::ScrollUp if over_body => Some(AppAction::ScrollUp {
            lines: WHEEL_LINES,
        }),
        MouseEventKind::ScrollDown if over_body => Some(AppAction::ScrollDown {
            lines: WHEEL_LINES,
        }),
        _ => match app.ui.chrome.handle_mouse(mouse) {
            ChromeEvent::Close => Some(AppAction::Quit),
            ChromeEvent::Redraw | ChromeEvent::None => None,
        },
    }
}

fn handle_paste_event(app: &mut App, text: &str) {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    app.ui.apply_textarea_edit(|ta| {
        ta.insert_str(&text);
    });
}

fn handle_resize_event(app: &mut App, width: u16, height: u16) {
    app.ui.chrome.set_screen(Rect::new(0, 0, width, height));
}

async fn process_ui_events(
    app: &AppHandle,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
) -> EventProcessingOutcome {
    let mut outcome = EventProcessingOutcome::default();
    let mut app_guard = app.lock().await;

    while let Ok(ev) = event_rx.try_recv() {
        outcome.events_processed = true;
        match ev {
            UiEvent::RequestRedraw => {}
            UiEvent::Crossterm(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                outcome
                    .actions
                    .extend(route_keyboard_event(&mut app_guard, key));
            }
            UiEvent::Crossterm(Event::Mouse(mouse)) => {
                outcome
                    .actions
                    .extend(route_mouse_event(&mut app_guard, mouse));
            }
            UiEvent::Crossterm(Event::Paste(text)) => {
                handle_paste_event(&mut app_guard, &text);
            }
            UiEvent::Crossterm(Event::Resize(width, height)) => {
                handle_resize_event(&mut app_guard, width, height);
            }
            UiEvent::Crossterm(_) => {}
        }
    }

    if outcome.events_processed {
        outcome.request_redraw = true;
    }
    outcome
}

fn process_worker_updates(
    rx: &mut mpsc::UnboundedReceiver<(WorkerMessage, u64)>,
) -> Vec<AppAction> {
    let mut actions = Vec::new();
    while let Ok((message, request_id)) = rx.try_recv() {
        debug!(request_id, "worker reply received");
        actions.push(AppAction::from_worker(message, request_id));
    }
    actions
}

fn run_commands(worker: &CompletionWorker, commands: Vec<AppCommand>) {
    for cmd in commands {
        match cmd {
            AppCommand::RequestCompletion(params) => {
                worker.spawn_request(params);
            }
        }
    }
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => continue,
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

pub async fn run_chat(config: Config, launch: ChatLaunch) -> Result<(), Box<dyn Error>> {
    let (width, height) = ratatui::crossterm::terminal::size()?;
    let app = bootstrap_app(&config, launch, Rect::new(0, 0, width, height))?;

    install_panic_hook();
    let terminal = setup_terminal()?;
    info!(width, height, "chat window opened");

    let result = event_loop(&app, &terminal).await;

    restore_terminal(&terminal).await?;
    info!("chat window closed");
    result
}

async fn event_loop(app: &AppHandle, terminal: &SharedTerminal) -> Result<(), Box<dyn Error>> {
    let (worker, mut worker_rx) = CompletionWorker::new();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx.clone());

    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut request_redraw = true;

    let result = loop {
        if app.lock().await.ui.exit_requested {
            break Ok(());
        }

        if let Err(err) = try_draw_frame(
            app,
            terminal,
            &mut request_redraw,
            &mut last_draw,
            frame_duration,
        )
        .await
        {
            break Err(err.into());
        }

        let outcome = process_ui_events(app, &mut event_rx).await;
        let mut actions = outcome.actions;
        let worker_actions = process_worker_updates(&mut worker_rx);
        let received_any = !worker_actions.is_empty();
        actions.extend(worker_actions);

        let animating = {
            let mut app_guard = app.lock().await;
            if !actions.is_empty() {
                let commands = apply_actions(&mut app_guard, actions);
                run_commands(&worker, commands);
            }
            app_guard.ui.is_animating(Instant::now())
        };

        if outcome.request_redraw || received_any || animating {
            request_redraw = true;
        }

        let idle = !outcome.events_processed && !received_any;
        if idle {
            tokio::time::sleep(frame_duration).await;
        }
    };

    event_reader_handle.abort();
    drop(event_tx);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::worker::test_support::ScriptedBackend;
    use crate::utils::test_utils::{create_test_app, create_test_app_with_backend};
    use ratatui::crossterm::event::{KeyCode, KeyModifiers, MouseButton};

    fn press(code: KeyCode) -> UiEvent {
        UiEvent::Crossterm(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_into(tx: &mpsc::UnboundedSender<UiEvent>, text: &str) {
        for ch in text.chars() {
            tx.send(press(KeyCode::Char(ch))).expect("send");
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> UiEvent {
        UiEvent::Crossterm(Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))
    }

    #[tokio::test]
    async fn typing_and_enter_produce_a_submit() {
        let app: AppHandle = Arc::new(Mutex::new(create_test_app()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        type_into(&tx, "Hi");
        tx.send(press(KeyCode::Enter)).expect("send");

        let outcome = process_ui_events(&app, &mut rx).await;
        assert!(outcome.request_redraw);
        assert_eq!(
            outcome.actions,
            vec![AppAction::SubmitMessage {
                message: "Hi".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn shift_enter_inserts_a_newline() {
        let app: AppHandle = Arc::new(Mutex::new(create_test_app()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        type_into(&tx, "a");
        tx.send(UiEvent::Crossterm(Event::Key(KeyEvent::new(
            KeyCode::Enter,
            KeyModifiers::SHIFT,
        ))))
        .expect("send");
        type_into(&tx, "b");

        let outcome = process_ui_events(&app, &mut rx).await;
        assert!(outcome.actions.is_empty());
        assert_eq!(app.lock().await.ui.input_text(), "a\nb");
    }

    #[tokio::test]
    async fn arrows_edit_multiline_input_instead_of_scrolling() {
        let app: AppHandle = Arc::new(Mutex::new(create_test_app()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        type_into(&tx, "one");
        tx.send(UiEvent::Crossterm(Event::Key(KeyEvent::new(
            KeyCode::Enter,
            KeyModifiers::SHIFT,
        ))))
        .expect("send");
        type_into(&tx, "two");
        tx.send(press(KeyCode::Up)).expect("send");
        type_into(&tx, "!");

        let outcome = process_ui_events(&app, &mut rx).await;
        assert!(outcome.actions.is_empty());
        assert_eq!(app.lock().await.ui.input_text(), "one!\ntwo");

        // A single-line input leaves the arrows to the history.
        let app: AppHandle = Arc::new(Mutex::new(create_test_app()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        type_into(&tx, "one");
        tx.send(press(KeyCode::Up)).expect("send");
        let outcome = process_ui_events(&app, &mut rx).await;
        assert_eq!(outcome.actions, vec![AppAction::ScrollUp { lines: 1 }]);
    }

    #[tokio::test]
    async fn enter_while_pending_does_nothing() {
        let app: AppHandle = Arc::new(Mutex::new(create_test_app()));
        {
            let mut guard = app.lock().await;
            apply_actions(
                &mut guard,
                vec![AppAction::SubmitMessage {
                    message: "first".to_string(),
                }],
            );
        }
        let (tx, mut rx) = mpsc::unbounded_channel();
        type_into(&tx, "second");
        tx.send(press(KeyCode::Enter)).expect("send");

        let outcome = process_ui_events(&app, &mut rx).await;
        assert!(outcome.actions.is_empty());
        assert_eq!(app.lock().await.ui.input_text(), "");
    }

    #[tokio::test]
    async fn escape_quits() {
        let app: AppHandle = Arc::new(Mutex::new(create_test_app()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(press(KeyCode::Esc)).expect("send");
        let outcome = process_ui_events(&app, &mut rx).await;
        assert_eq!(outcome.actions, vec![AppAction::Quit]);
    }

    #[tokio::test]
    async fn close_button_click_quits() {
        let app: AppHandle = Arc::new(Mutex::new(create_test_app()));
        let close = {
            let guard = app.lock().await;
            let layout = guard.ui.chrome.layout();
            let (_, rect) = *layout.buttons.last().expect("close button");
            (rect.x + 1, rect.y)
        };
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(mouse(MouseEventKind::Down(MouseButton::Left), close.0, close.1))
            .expect("send");
        tx.send(mouse(MouseEventKind::Up(MouseButton::Left), close.0, close.1))
            .expect("send");

        let outcome = process_ui_events(&app, &mut rx).await;
        assert_eq!(outcome.actions, vec![AppAction::Quit]);
    }

    #[tokio::test]
    async fn title_drag_moves_the_window() {
        let app: AppHandle = Arc::new(Mutex::new(create_test_app()));
        let start = app.lock().await.ui.chrome.geometry();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (x, y) = (start.x + 5, start.y);
        tx.send(mouse(MouseEventKind::Down(MouseButton::Left), x, y))
            .expect("send");
        // The grab starts while the pointer is still on the title bar.
        tx.send(mouse(MouseEventKind::Drag(MouseButton::Left), x + 3, y))
            .expect("send");
        tx.send(mouse(MouseEventKind::Drag(MouseButton::Left), x + 3, y + 2))
            .expect("send");
        tx.send(mouse(MouseEventKind::Up(MouseButton::Left), x + 3, y + 2))
            .expect("send");

        process_ui_events(&app, &mut rx).await;
        let moved = app.lock().await.ui.chrome.geometry();
        assert_eq!((moved.x, moved.y), (start.x + 3, start.y + 2));
    }

    #[tokio::test]
    async fn wheel_over_history_scrolls() {
        let app: AppHandle = Arc::new(Mutex::new(create_test_app()));
        let body = app.lock().await.ui.chrome.layout().body.expect("body");
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(mouse(MouseEventKind::ScrollUp, body.x + 2, body.y + 2))
            .expect("send");
        let outcome = process_ui_events(&app, &mut rx).await;
        assert_eq!(
            outcome.actions,
            vec![AppAction::ScrollUp {
                lines: WHEEL_LINES
            }]
        );
    }

    #[tokio::test]
    async fn resize_reclamps_the_window() {
        let app: AppHandle = Arc::new(Mutex::new(create_test_app()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(UiEvent::Crossterm(Event::Resize(50, 20))).expect("send");
        process_ui_events(&app, &mut rx).await;

        let guard = app.lock().await;
        let geometry = guard.ui.chrome.geometry();
        assert!(geometry.right() <= 50);
        assert!(geometry.bottom() <= 20);
    }

    #[tokio::test]
    async fn paste_normalizes_line_endings() {
        let app: AppHandle = Arc::new(Mutex::new(create_test_app()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(UiEvent::Crossterm(Event::Paste("one\r\ntwo".to_string())))
            .expect("send");
        process_ui_events(&app, &mut rx).await;
        assert_eq!(app.lock().await.ui.input_text(), "one\ntwo");
    }

    #[tokio::test]
    async fn worker_replies_flow_back_into_the_transcript() {
        let backend = Arc::new(ScriptedBackend::new(vec![Ok("pong".to_string())]));
        let mut app = create_test_app_with_backend(backend);
        let (worker, mut worker_rx) = CompletionWorker::new();

        let commands = apply_actions(
            &mut app,
            vec![AppAction::SubmitMessage {
                message: "ping".to_string(),
            }],
        );
        run_commands(&worker, commands);

        let (message, request_id) = worker_rx.recv().await.expect("reply");
        worker.send_for_test(message, request_id);
        let actions = process_worker_updates(&mut worker_rx);
        assert_eq!(actions.len(), 1);
        apply_actions(&mut app, actions);

        assert!(app.ui.is_input_enabled());
        assert_eq!(app.transcript.len(), 2);
        assert_eq!(app.transcript.last().map(|m| m.content.as_str()), Some("pong"));
    }
}
