use std::{error::Error, io, io::Write, panic, sync::Arc};

use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::Terminal;
use tokio::sync::Mutex;

pub type SharedTerminal<W = io::Stdout> = Arc<Mutex<Terminal<CrosstermBackend<W>>>>;

pub fn setup_terminal() -> Result<SharedTerminal, Box<dyn Error>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )
    .inspect_err(|_| {
        let _ = disable_raw_mode();
    })?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).inspect_err(|_| {
        let _ = disable_raw_mode();
    })?;

    Ok(Arc::new(Mutex::new(terminal)))
}

/// Write the escape sequences that undo `setup_terminal`.
fn leave_terminal_modes<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(
        writer,
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )
}

pub async fn restore_terminal<W>(terminal: &SharedTerminal<W>) -> Result<(), Box<dyn Error>>
where
    W: Write + Send + 'static,
{
    disable_raw_mode()?;
    let mut guard = terminal.lock().await;
    leave_terminal_modes(guard.backend_mut())?;
    guard.show_cursor()?;
    Ok(())
}

/// Chain a panic hook that puts the terminal back before the panic message
/// is printed.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = leave_terminal_modes(&mut io::stdout());
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaving_disables_mouse_and_paste() {
        let mut buf: Vec<u8> = Vec::new();
        leave_terminal_modes(&mut buf).expect("write");
        let written = String::from_utf8(buf).expect("utf8");
        // Bracketed paste off, then any-event mouse tracking off.
        assert!(written.contains("\x1b[?2004l"));
        assert!(written.contains("\x1b[?1003l"));
        assert!(written.contains("\x1b[?1049l"));
    }

    #[test]
    #[ignore = "switches the attached terminal into raw mode and the alternate screen"]
    fn setup_terminal_is_reversible() {
        if let Ok(terminal) = setup_terminal() {
            let runtime = tokio::runtime::Runtime::new().expect("runtime");
            runtime.block_on(async {
                let _ = restore_terminal(&terminal).await;
            });
        }
    }
}
