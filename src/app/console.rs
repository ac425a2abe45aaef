//! Interactive scanning console
//!
//! The terminal runs in raw mode so every keystroke reaches the segmenter with
//! its own timestamp. `Tab` opens a command line; while it is open keystrokes
//! are text entry and the segmenter ignores them.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};

use super::desk::ScanDesk;
use super::display;
use crate::core::logging;
use crate::core::styles::StyleRole;
use crate::core::validation::validate_selection_date;
use crate::core::time::SessionClock;
use crate::manifest::{load_manifest, LoaderOptions, ManifestSource};
use crate::scan::KeyEvent;

/// Poll interval while nothing is pending
const IDLE_POLL: Duration = Duration::from_millis(250);

/// A command typed on the console command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Select { date: String, flight: String },
    Flights { date: Option<String> },
    Bags,
    Status,
    Reload,
    Clear,
    Help,
    Quit,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err("Empty command. Type 'help' for the list of commands.".to_string());
        };
        let rest: Vec<&str> = words.collect();

        match (verb.to_ascii_lowercase().as_str(), rest.as_slice()) {
            ("select" | "s", [date, flight @ ..]) if !flight.is_empty() => Ok(Self::Select {
                date: date.to_string(),
                flight: flight.join(" "),
            }),
            ("select" | "s", _) => Err("Usage: select <date> <flight>".to_string()),
            ("flights" | "f", []) => Ok(Self::Flights { date: None }),
            ("flights" | "f", [date]) => Ok(Self::Flights {
                date: Some(date.to_string()),
            }),
            ("bags" | "b", []) => Ok(Self::Bags),
            ("status", []) => Ok(Self::Status),
            ("reload", []) => Ok(Self::Reload),
            ("clear", []) => Ok(Self::Clear),
            ("help" | "?", []) => Ok(Self::Help),
            ("quit" | "exit" | "q", []) => Ok(Self::Quit),
            (verb, _) => Err(format!(
                "Unknown command or arguments: '{}'. Type 'help' for the list of commands.",
                verb
            )),
        }
    }
}

/// Map a terminal key press to a segmenter event
///
/// Releases and repeats are dropped. Characters typed with Control or Alt are
/// shortcuts, not text.
pub fn to_key_event(key: &event::KeyEvent, at_ms: u64, text_entry: bool) -> Option<KeyEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let event = match key.code {
        KeyCode::Enter => KeyEvent::terminator(at_ms),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            KeyEvent::char(c, at_ms)
        }
        _ => KeyEvent::other(at_ms),
    };
    Some(if text_entry {
        event.in_text_entry()
    } else {
        event
    })
}

/// Restores cooked mode when dropped
struct RawModeGuard {
    quieted_logging: bool,
}

impl RawModeGuard {
    fn enable(quiet_logging: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let quieted_logging = quiet_logging && logging::push_log_level("error").is_ok();
        Ok(Self { quieted_logging })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            eprintln!("Could not restore terminal mode: {}", e);
        }
        if self.quieted_logging {
            logging::pop_log_level();
        }
    }
}

enum Input {
    Key(event::KeyEvent),
    Tick,
}

async fn next_input(timeout: Duration) -> io::Result<Input> {
    tokio::task::spawn_blocking(move || {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                return Ok(Input::Key(key));
            }
        }
        Ok(Input::Tick)
    })
    .await
    .map_err(io::Error::other)?
}

pub struct Console {
    desk: ScanDesk,
    source: ManifestSource,
    options: LoaderOptions,
    clock: SessionClock,
    color: bool,
    command_line: Option<String>,
    running: bool,
}

impl Console {
    pub fn new(desk: ScanDesk, source: ManifestSource, options: LoaderOptions, color: bool) -> Self {
        Self {
            desk,
            source,
            options,
            clock: SessionClock::system(),
            color,
            command_line: None,
            running: true,
        }
    }

    pub fn desk_mut(&mut self) -> &mut ScanDesk {
        &mut self.desk
    }

    /// Run until the operator quits
    ///
    /// Logging to the terminal is reduced to errors while raw mode is active
    /// unless `log_to_file` is set.
    pub async fn run(&mut self, log_to_file: bool) -> io::Result<()> {
        let _guard = RawModeGuard::enable(!log_to_file)?;

        self.emit(&display::status_line(self.desk.status(), self.color))?;
        self.emit(&display::counter_line(&self.desk.summary(), self.color))?;
        self.emit("Ready to scan. Tab opens the command line, Esc quits.")?;

        while self.running {
            let now = self.clock.now_ms();
            let timeout = match self.desk.deadline() {
                Some(deadline) => Duration::from_millis(deadline.saturating_sub(now) + 1),
                None => IDLE_POLL,
            };

            match next_input(timeout).await? {
                Input::Key(key) => self.handle_key(&key).await?,
                Input::Tick => {}
            }
            self.desk.expire(self.clock.now_ms());
        }

        self.emit("Bye.")?;
        Ok(())
    }

    async fn handle_key(&mut self, key: &event::KeyEvent) -> io::Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return Ok(());
        }

        let at_ms = self.clock.now_ms();
        let text_entry = self.command_line.is_some();
        if let Some(event) = to_key_event(key, at_ms, text_entry) {
            let handling = self.desk.handle_key(&event);
            if let Some(outcome) = handling.outcome {
                self.emit(&display::outcome_line(&outcome, self.color))?;
                self.emit(&display::counter_line(&self.desk.summary(), self.color))?;
            }
            if handling.suppress_default {
                return Ok(());
            }
        }

        if self.command_line.is_none() {
            match key.code {
                KeyCode::Tab => {
                    self.command_line = Some(String::new());
                    self.draw_prompt()?;
                }
                KeyCode::Esc => self.running = false,
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab | KeyCode::Esc => {
                self.command_line = None;
                self.clear_prompt()?;
            }
            KeyCode::Backspace => {
                if let Some(line) = self.command_line.as_mut() {
                    line.pop();
                }
                self.draw_prompt()?;
            }
            KeyCode::Char(c) => {
                if let Some(line) = self.command_line.as_mut() {
                    line.push(c);
                }
                self.draw_prompt()?;
            }
            KeyCode::Enter => {
                let line = self.command_line.take().unwrap_or_default();
                self.clear_prompt()?;
                self.run_command(&line).await?;
            }
            _ => {}
        }
        Ok(())
    }

    async fn run_command(&mut self, line: &str) -> io::Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }
        let command = match ConsoleCommand::parse(line) {
            Ok(command) => command,
            Err(message) => return self.emit(&message),
        };
        log::debug!("Console command: {:?}", command);

        match command {
            ConsoleCommand::Select { date, flight } => {
                let selected = self
                    .desk
                    .select(&date, &flight)
                    .map(display::selection_line);
                match selected {
                    Ok(line) => {
                        self.emit(&StyleRole::Ok.paint(&line, self.color))?;
                        self.emit(&display::counter_line(&self.desk.summary(), self.color))?;
                    }
                    Err(e) => self.emit(&StyleRole::Warn.paint(&e.to_string(), self.color))?,
                }
            }
            ConsoleCommand::Flights { date } => {
                let date = date.map(|d| validate_selection_date(&d).unwrap_or(d));
                let lines = {
                    let flights = self.desk.flights(date.as_deref());
                    let mut lines = vec![display::flights_heading(
                        date.as_deref(),
                        flights.len(),
                        self.color,
                    )];
                    if !flights.is_empty() {
                        lines.extend(display::table_lines(&display::flights_table(
                            &flights, self.color,
                        )));
                    }
                    lines
                };
                self.emit_all(&lines)?;
            }
            ConsoleCommand::Bags => {
                let lines = match self.desk.selector().scan_state() {
                    Some(state) => display::bag_lines(state, self.color),
                    None => vec!["No flight selected.".to_string()],
                };
                self.emit_all(&lines)?;
            }
            ConsoleCommand::Status => {
                self.emit(&display::status_line(self.desk.status(), self.color))?;
                self.emit(&display::counter_line(&self.desk.summary(), self.color))?;
            }
            ConsoleCommand::Reload => {
                self.emit("Reloading manifest...")?;
                let load = load_manifest(&self.source, &self.options).await;
                self.desk.reload(load);
                self.emit(&display::status_line(self.desk.status(), self.color))?;
            }
            ConsoleCommand::Clear => {
                self.desk.clear_selection();
                self.emit("Selection cleared.")?;
            }
            ConsoleCommand::Help => {
                let lines: Vec<String> =
                    display::CONSOLE_HELP.iter().map(|l| l.to_string()).collect();
                self.emit_all(&lines)?;
            }
            ConsoleCommand::Quit => self.running = false,
        }
        Ok(())
    }

    fn emit(&self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        queue!(stdout, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        write!(stdout, "{}\r\n", line)?;
        stdout.flush()
    }

    fn emit_all(&self, lines: &[String]) -> io::Result<()> {
        lines.iter().try_for_each(|line| self.emit(line))
    }

    fn draw_prompt(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        let line = self.command_line.as_deref().unwrap_or_default();
        queue!(stdout, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        write!(stdout, "> {}", line)?;
        stdout.flush()
    }

    fn clear_prompt(&self) -> io::Result<()> {
        execute!(io::stdout(), MoveToColumn(0), Clear(ClearType::CurrentLine))
    }
}
