use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use zcmdr::app::Workbench;
use zcmdr::kernel::services::adapters::{ensure_settings_file, load_settings, FileService};
use zcmdr::kernel::Store;
use zcmdr::tui::terminal_guard::{install_panic_restore, TerminalGuard, TerminationSignal};

mod logging;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> io::Result<()> {
    let (left, right) = parse_dirs()?;
    let _logging = logging::init();

    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "settings file unavailable, using defaults");
    }
    let settings = load_settings().unwrap_or_default();

    let store = Store::open_dirs(&left, &right, FileService::new())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let mut workbench = Workbench::from_settings(store, &settings);
    workbench.theme_mut().adapt_to_terminal_capabilities();
    tracing::info!(left = %left.display(), right = %right.display(), "startup");

    let guard = TerminalGuard::new()?;
    install_panic_restore(guard.restorer());
    let (signal_tx, signal_rx) = mpsc::channel::<TerminationSignal>();
    #[cfg(unix)]
    let _signal_thread =
        zcmdr::tui::terminal_guard::install_termination_signals(guard.restorer(), signal_tx)?;
    #[cfg(not(unix))]
    drop(signal_tx);

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let result = run(&mut terminal, &mut workbench, &signal_rx);

    drop(terminal);
    drop(guard);
    match result {
        Ok(Some(signal)) => std::process::exit(signal.exit_code()),
        Ok(None) => {
            tracing::info!("exit");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "terminal loop failed");
            Err(e)
        }
    }
}

/// `zcmdr [LEFT_DIR] [RIGHT_DIR]`; a missing directory defaults to the working directory.
fn parse_dirs() -> io::Result<(PathBuf, PathBuf)> {
    let mut args = std::env::args_os().skip(1);
    let cwd = std::env::current_dir()?;
    let left = args.next().map(PathBuf::from).unwrap_or_else(|| cwd.clone());
    let right = args.next().map(PathBuf::from).unwrap_or(cwd);

    let resolve = |path: PathBuf| -> io::Result<PathBuf> {
        let path = path.canonicalize()?;
        if !path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a directory: {}", path.display()),
            ));
        }
        Ok(path)
    };
    Ok((resolve(left)?, resolve(right)?))
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    workbench: &mut Workbench,
    signals: &Receiver<TerminationSignal>,
) -> io::Result<Option<TerminationSignal>> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| {
                let area = frame.area();
                workbench.render(frame, area);
            })?;
            dirty = false;
        }

        if let Ok(signal) = signals.try_recv() {
            tracing::info!(?signal, "shutting down");
            return Ok(Some(signal));
        }
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let result = workbench.handle_key_event(&key);
                if result.should_quit {
                    return Ok(None);
                }
                dirty = true;
            }
            Event::Resize(..) => dirty = true,
            _ => {}
        }
    }
}
