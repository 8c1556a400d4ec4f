//! Raw-mode setup with guaranteed restore.
//!
//! Restore runs at most once, from whichever comes first: the guard's drop
//! or the panic hook. The hook fires even when draw code panics mid-frame,
//! so the shell never stays stuck in the alternate screen.

use std::io::{self, Stdout};
use std::sync::{Arc, Once};

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear as TermClear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

pub struct TerminalGuard {
    restore: Arc<Once>,
}

impl TerminalGuard {
    fn install_panic_hook(restore: Arc<Once>) {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore.call_once(restore_terminal);
            default_hook(info);
        }));
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore.call_once(restore_terminal);
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = stdout.execute(LeaveAlternateScreen);
    let _ = stdout.execute(Show);
}

pub fn setup_terminal() -> io::Result<(Terminal<CrosstermBackend<Stdout>>, TerminalGuard)> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(TermClear(ClearType::All))?;
    stdout.execute(Hide)?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    let restore = Arc::new(Once::new());
    TerminalGuard::install_panic_hook(Arc::clone(&restore));

    Ok((terminal, TerminalGuard { restore }))
}
