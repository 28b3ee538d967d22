mod app;
mod config;
mod error;
mod logging;

use crate::app::handlers::{handle_key, handle_paste};
use crate::app::state::Route;
use crate::app::util::SystemClipboard;
use crate::app::view::draw_ui;
use crate::app::AppState;
use crate::config::AdboardConfig;
use crate::error::AppError;
use crossterm::cursor::Show;
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind,
    KeyModifiers, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, trace, warn};

const USAGE: &str = "\
Usage: adboard [OPTIONS]

Options:
  --route <PATH>     Start page: / or /advertisements
  --config <PATH>    Config file (default: <config dir>/adboard/config.toml)
  -h, --help         Print this help

Environment:
  ADBOARD_LOG        Log filter, e.g. debug or adboard_tui=trace
  ADBOARD_LOG_DIR    Directory for adboard.log files
  ADBOARD_NO_LOG     Disable file logging when truthy
  ADBOARD_KEY_DEBUG  Trace every key event to the log";

fn env_truthy(key: &str) -> bool {
    std::env::var(key)
        .ok()
        .as_deref()
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[derive(Clone, Copy, Debug)]
struct KeyDebugLog {
    code: KeyCode,
    modifiers: KeyModifiers,
    kind: KeyEventKind,
}

impl KeyDebugLog {
    fn from_event(event: &crossterm::event::KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
            kind: event.kind,
        }
    }
}

impl fmt::Display for KeyDebugLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "code={:?} mods={:?} kind={:?}",
            self.code, self.modifiers, self.kind
        )
    }
}

/// Value of `--name <value>` or `--name=value`; the last occurrence wins.
fn parse_option_from_args(
    name: &str,
    args: impl IntoIterator<Item = impl AsRef<str>>,
) -> Option<String> {
    let mut args = args
        .into_iter()
        .map(|arg| arg.as_ref().to_string())
        .peekable();
    let prefix = format!("{name}=");
    let mut value: Option<String> = None;
    while let Some(arg) = args.next() {
        if let Some(inline) = arg.strip_prefix(&prefix) {
            value = Some(inline.to_string());
            continue;
        }
        if arg == name {
            if let Some(next) = args.peek() {
                if !next.starts_with("--") {
                    value = Some(next.to_string());
                    let _ = args.next();
                }
            }
        }
    }
    value.filter(|value| !value.trim().is_empty())
}

fn parse_config_path_from_args(args: impl IntoIterator<Item = impl AsRef<str>>) -> Option<PathBuf> {
    parse_option_from_args("--config", args).map(PathBuf::from)
}

/// Start page from `--route`. Unknown paths fall back to the dashboard.
fn parse_route_from_args(args: impl IntoIterator<Item = impl AsRef<str>>) -> Route {
    let Some(raw) = parse_option_from_args("--route", args) else {
        return Route::Dashboard;
    };
    match Route::from_path(&raw) {
        Some(route) => route,
        None => {
            warn!(route = %raw, "unknown route, falling back to /");
            Route::Dashboard
        }
    }
}

fn wants_help(args: &[String]) -> bool {
    args.iter().any(|arg| arg == "-h" || arg == "--help")
}

fn apply_redraw(needs_redraw: &mut bool, redraw: bool) {
    if redraw {
        *needs_redraw = true;
    }
}

struct TerminalRestoreGuard;

impl Drop for TerminalRestoreGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = stdout.execute(PopKeyboardEnhancementFlags);
        let _ = stdout.execute(DisableBracketedPaste);
        let _ = stdout.execute(LeaveAlternateScreen);
        let _ = stdout.execute(Show);
    }
}

fn run(config: &AdboardConfig, initial_route: Route) -> Result<(), AppError> {
    let mut stdout = std::io::stdout();
    let _restore_guard = TerminalRestoreGuard;
    stdout.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    // Lets terminals that support it report Shift+Enter distinctly from Enter.
    let _ = stdout.execute(PushKeyboardEnhancementFlags(
        KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
            | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS,
    ));
    let _ = stdout.execute(EnableBracketedPaste);
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = AppState::new(config);
    app.navigate(initial_route);
    let mut clipboard = SystemClipboard::default();
    let key_debug = env_truthy("ADBOARD_KEY_DEBUG");
    let mut needs_redraw = true;

    loop {
        if event::poll(config.tick())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if key_debug {
                        trace!(key = %KeyDebugLog::from_event(&key), "key event");
                    }
                    let redraw = handle_key(
                        &mut app,
                        key.code,
                        key.modifiers,
                        &mut clipboard,
                        Instant::now(),
                    );
                    apply_redraw(&mut needs_redraw, redraw);
                }
                Event::Paste(text) => {
                    apply_redraw(&mut needs_redraw, handle_paste(&mut app, &text));
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
        if app.tick(Instant::now()) {
            needs_redraw = true;
        }
        if needs_redraw {
            terminal.draw(|f| draw_ui(f, &app))?;
            needs_redraw = false;
        }
    }

    app.cancel_form();
    info!(
        records = app.store.len(),
        images = app.images.len(),
        "adboard exiting"
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    if wants_help(&args) {
        println!("{USAGE}");
        return Ok(());
    }

    let config_path = parse_config_path_from_args(&args);
    let config = AdboardConfig::load(config_path.as_deref()).map_err(AppError::from)?;
    let _log_guard = logging::init(&config)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?config_path,
        "adboard starting"
    );

    let initial_route = parse_route_from_args(&args);
    if let Err(error) = run(&config, initial_route) {
        tracing::error!(%error, "adboard stopped with an error");
        return Err(error.into());
    }
    Ok(())
}
