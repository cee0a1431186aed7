//! Picker - two select fields in one form
//!
//! Demonstrates the controlled select field pattern:
//! - State owns each field's value and open flag
//! - Fields return actions built from the callbacks in their props
//! - The store applies them in order (select, then dismiss)
//! - Overlays are drawn after every anchor so they sit on top
//!
//! Keys: Tab = next field, Enter/Space/Down = open, j/k = move,
//! Enter = choose, Esc = close, q = quit. Mouse clicks work too.
//!
//! # Usage
//!
//! ```sh
//! cargo run -p picker
//! cargo run -p picker -- --config picker.json --log picker.log
//! ```

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Flex, Layout},
    widgets::Paragraph,
    Terminal,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use tui_select::prelude::*;

/// Select field demo
#[derive(Parser, Debug)]
#[command(name = "picker")]
#[command(about = "A form with two select fields")]
struct Args {
    /// JSON file with theme, key bindings and field style
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Write debug logs to this file
    #[arg(long)]
    log: Option<PathBuf>,
}

// ============================================================================
// State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Country,
    Size,
}

#[derive(Default)]
struct AppState {
    country: Option<String>,
    country_open: bool,
    size: Option<u8>,
    size_open: bool,
    focus: Focus,
}

// ============================================================================
// Actions
// ============================================================================

#[derive(Clone, Debug)]
enum AppAction {
    CountryShow,
    CountryDismiss,
    CountrySet(String),
    SizeShow,
    SizeDismiss,
    SizeSet(u8),
    FocusNext,
    Quit,
}

impl Action for AppAction {
    fn name(&self) -> &'static str {
        match self {
            AppAction::CountryShow => "CountryShow",
            AppAction::CountryDismiss => "CountryDismiss",
            AppAction::CountrySet(_) => "CountrySet",
            AppAction::SizeShow => "SizeShow",
            AppAction::SizeDismiss => "SizeDismiss",
            AppAction::SizeSet(_) => "SizeSet",
            AppAction::FocusNext => "FocusNext",
            AppAction::Quit => "Quit",
        }
    }
}

// ============================================================================
// Reducer
// ============================================================================

fn reducer(state: &mut AppState, action: AppAction) -> bool {
    match action {
        AppAction::CountryShow => {
            state.focus = Focus::Country;
            state.country_open = true;
        }
        AppAction::CountryDismiss => state.country_open = false,
        AppAction::CountrySet(code) => state.country = Some(code),
        AppAction::SizeShow => {
            state.focus = Focus::Size;
            state.size_open = true;
        }
        AppAction::SizeDismiss => state.size_open = false,
        AppAction::SizeSet(size) => state.size = Some(size),
        AppAction::FocusNext => {
            state.focus = match state.focus {
                Focus::Country => Focus::Size,
                Focus::Size => Focus::Country,
            };
        }
        AppAction::Quit => return false,
    }
    true
}

// ============================================================================
// UI
// ============================================================================

struct PickerUi {
    country: SelectField<String>,
    size: SelectField<u8>,
    countries: Vec<ListItem<String>>,
    sizes: Vec<ListItem<u8>>,
    style: SelectFieldStyle,
    keys: SelectKeys,
}

impl PickerUi {
    fn new(config: &SelectFieldConfig) -> Self {
        let countries = [
            ("Argentina", "ar"),
            ("Canada", "ca"),
            ("Chile", "cl"),
            ("Japan", "jp"),
            ("Kenya", "ke"),
            ("Norway", "no"),
            ("Portugal", "pt"),
            ("Ukraine", "ua"),
        ]
        .into_iter()
        .map(|(label, code)| ListItem::new(label, code.to_string()))
        .collect();

        let sizes = vec![
            ListItem::new("Small", 1).with_custom(Line::from(vec![
                Span::raw("Small "),
                Span::styled("(S)", Style::default().fg(Color::DarkGray)),
            ])),
            ListItem::new("Medium", 2).with_custom(Line::from(vec![
                Span::raw("Medium "),
                Span::styled("(M)", Style::default().fg(Color::DarkGray)),
            ])),
            ListItem::new("Large", 3).with_custom(Line::from(vec![
                Span::raw("Large "),
                Span::styled("(L)", Style::default().fg(Color::DarkGray)),
            ])),
        ];

        Self {
            country: SelectField::new(),
            size: SelectField::new(),
            countries,
            sizes,
            style: config.field_style(),
            keys: config.keys.clone(),
        }
    }

    fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let area = frame.area();

        let [_, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        frame.render_widget(Paragraph::new(help_line(&self.keys)), help_area);

        let [_, form, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(36),
            Constraint::Fill(1),
        ])
        .flex(Flex::Center)
        .areas(area);
        let [_, country_area, _, size_area, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(form);

        let country = country_props(&self.countries, state, &self.style, &self.keys);
        let size = size_props(&self.sizes, state, &self.style, &self.keys);

        self.country.render_anchor(frame, country_area, &country);
        self.size.render_anchor(frame, size_area, &size);

        // Overlays last
        self.country.render_overlay(frame, &country);
        self.size.render_overlay(frame, &size);
    }

    fn map_event(&mut self, event: &EventKind, state: &AppState) -> Vec<AppAction> {
        let country = country_props(&self.countries, state, &self.style, &self.keys);
        let size = size_props(&self.sizes, state, &self.style, &self.keys);

        // An open overlay takes every event
        if state.country_open {
            return self.country.handle_event(event, country).into_iter().collect();
        }
        if state.size_open {
            return self.size.handle_event(event, size).into_iter().collect();
        }

        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Char('q') => return vec![AppAction::Quit],
                KeyCode::Tab | KeyCode::BackTab => return vec![AppAction::FocusNext],
                _ => {}
            }
        }

        let mut actions: Vec<AppAction> = self.country.handle_event(event, country).into_iter().collect();
        actions.extend(self.size.handle_event(event, size));
        actions
    }
}

/// Help bar built from the active key map, so remapped keys show up
fn help_line(keys: &SelectKeys) -> Line<'static> {
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::DarkGray);

    let hints: [(String, &str); 6] = [
        ("Tab".to_string(), "next field"),
        (bound_keys(&keys.open), "open"),
        (format!("{}/{}", bound_keys(&keys.next), bound_keys(&keys.prev)), "move"),
        (bound_keys(&keys.confirm), "choose"),
        (bound_keys(&keys.dismiss), "close"),
        ("q".to_string(), "quit"),
    ];

    let spans = hints.into_iter().flat_map(|(key, what)| {
        [
            Span::styled(format!(" {}", key), key_style),
            Span::styled(format!(" {} ", what), text_style),
        ]
    });
    Line::from(spans.collect::<Vec<_>>()).alignment(Alignment::Center)
}

/// First two bindings of a command, as shown to the user
fn bound_keys(keys: &[String]) -> String {
    keys.iter()
        .take(2)
        .map(|k| format_key_for_display(k))
        .collect::<Vec<_>>()
        .join(",")
}

fn country_props<'a>(
    list: &'a [ListItem<String>],
    state: &'a AppState,
    style: &'a SelectFieldStyle,
    keys: &'a SelectKeys,
) -> SelectFieldProps<'a, String, AppAction> {
    SelectFieldProps {
        list,
        value: state.country.as_ref(),
        visible: state.country_open,
        is_focused: state.focus == Focus::Country,
        label: Some("Country"),
        placeholder: Some("Pick a country"),
        style,
        keys,
        on_show: || AppAction::CountryShow,
        on_select: Some(AppAction::CountrySet),
        on_dismiss: Some(|| AppAction::CountryDismiss),
    }
}

fn size_props<'a>(
    list: &'a [ListItem<u8>],
    state: &'a AppState,
    style: &'a SelectFieldStyle,
    keys: &'a SelectKeys,
) -> SelectFieldProps<'a, u8, AppAction> {
    SelectFieldProps {
        list,
        value: state.size.as_ref(),
        visible: state.size_open,
        is_focused: state.focus == Focus::Size,
        label: Some("Size"),
        placeholder: Some("Pick a size"),
        style,
        keys,
        on_show: || AppAction::SizeShow,
        on_select: Some(AppAction::SizeSet),
        on_dismiss: Some(|| AppAction::SizeDismiss),
    }
}

// ============================================================================
// Main
// ============================================================================

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log {
        init_logging(path)?;
    }

    // Load config before entering TUI mode
    let config = match &args.config {
        Some(path) => match SelectFieldConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => SelectFieldConfig::default(),
    };

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &config).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: &SelectFieldConfig,
) -> io::Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppAction>();
    let mut store =
        Store::new(AppState::default(), reducer).with_middleware(LoggingMiddleware::new());
    let mut ui = PickerUi::new(config);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(
        event_tx,
        Duration::from_millis(10),
        Duration::from_millis(16),
        cancel_token.clone(),
    );

    let mut should_render = true;

    loop {
        if should_render {
            terminal.draw(|frame| ui.render(frame, store.state()))?;
            should_render = false;
        }

        tokio::select! {
            Some(raw_event) = event_rx.recv() => {
                let event = process_raw_event(raw_event);
                // Cursor and scroll moves change only component state
                should_render = true;
                for action in ui.map_event(&event, store.state()) {
                    let _ = action_tx.send(action);
                }
            }

            Some(action) = action_rx.recv() => {
                if matches!(action, AppAction::Quit) {
                    break;
                }
                should_render |= store.dispatch(action);
            }
        }
    }

    cancel_token.cancel();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_line_uses_default_keys() {
        let help = help_line(&SelectKeys::default()).to_string();
        assert!(help.contains("Enter,Space open"));
        assert!(help.contains("↓,j/↑,k move"));
        assert!(help.contains("Esc,Tab close"));
    }

    #[test]
    fn test_help_line_follows_remapped_keys() {
        let config =
            SelectFieldConfig::from_json(r#"{"keys":{"dismiss":["ctrl+c"],"open":["o"]}}"#).unwrap();
        let help = help_line(&config.keys).to_string();
        assert!(help.contains("^C close"));
        assert!(help.contains("o open"));
        assert!(!help.contains("Esc"));
    }
}
