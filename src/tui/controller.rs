//! Dashboard controller for terminal lifecycle and the event loop.
//!
//! The controller owns the terminal (raw mode, alternate screen, restore
//! on drop); `run_dashboard` runs the interactive loop, multiplexing the
//! fixed-period simulation tick with keyboard input so a tick always
//! completes (generate, score, append, render) before the next fires.

use std::io::{self, Stdout};

use crossterm::{
    cursor,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::MissedTickBehavior;

use super::renderer::render_frame;
use super::state::DashState;
use crate::driver::{SimulationDriver, TICK_PERIOD};
use crate::errors::SimError;

/// Owns the terminal for the dashboard.
///
/// Manages initialization, rendering, and cleanup; the terminal is
/// restored even on panic via the Drop impl.
pub struct TuiController {
    /// Terminal instance (present once init() succeeds)
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
    /// Whether the terminal has been initialized
    initialized: bool,
}

impl TuiController {
    /// Create a controller without touching the terminal.
    pub fn new() -> Self {
        Self { terminal: None, initialized: false }
    }

    /// Enter raw mode and the alternate screen, hiding the cursor.
    pub fn init(&mut self) -> Result<(), SimError> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

        let backend = CrosstermBackend::new(stdout);
        self.terminal = Some(Terminal::new(backend)?);
        self.initialized = true;

        Ok(())
    }

    /// Restore the terminal to its original state.
    pub fn cleanup(&mut self) -> Result<(), SimError> {
        if !self.initialized {
            return Ok(());
        }

        if let Some(ref mut terminal) = self.terminal {
            execute!(
                terminal.backend_mut(),
                LeaveAlternateScreen,
                cursor::Show
            )?;
        }

        disable_raw_mode()?;

        self.initialized = false;
        self.terminal = None;
        Ok(())
    }

    /// Draw one frame of the dashboard.
    pub fn render(&mut self, state: &DashState) -> Result<(), SimError> {
        if let Some(ref mut terminal) = self.terminal {
            terminal.draw(|frame| {
                render_frame(frame, state);
            })?;
        }
        Ok(())
    }
}

impl Default for TuiController {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TuiController {
    /// Restore the terminal even if cleanup() was never called.
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Outcome of one key press.
enum KeyAction {
    /// Keep running the loop
    Continue,
    /// Leave the dashboard
    Quit,
}

/// Run the interactive dashboard until the operator quits.
///
/// The 500 ms tick interval drives the simulation; key presses edit the
/// driver's configuration (taking effect on the next tick), move the
/// control selection, toggle start/stop, or reset.
pub async fn run_dashboard(
    driver: &mut SimulationDriver,
) -> Result<(), SimError> {
    let mut controller = TuiController::new();
    controller.init()?;

    let mut state = DashState::new(driver.config().clone());
    state.refresh_from(driver);
    controller.render(&state)?;

    let mut ticker = tokio::time::interval(TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut events = EventStream::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if driver.tick() {
                    state.refresh_from(driver);
                    controller.render(&state)?;
                }
            }
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key)))
                        if key.kind == KeyEventKind::Press =>
                    {
                        if let KeyAction::Quit = handle_key(&key, driver, &mut state) {
                            break;
                        }
                        state.refresh_from(driver);
                        controller.render(&state)?;
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        controller.render(&state)?;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(error)) => {
                        controller.cleanup()?;
                        return Err(SimError::terminal(error.to_string()));
                    }
                    None => break,
                }
            }
            // Raw mode swallows the signal on most terminals; this covers
            // the rest.
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    controller.cleanup()?;
    Ok(())
}

/// Apply one key press to the driver and dashboard state.
fn handle_key(
    key: &KeyEvent,
    driver: &mut SimulationDriver,
    state: &mut DashState,
) -> KeyAction {
    if key.code == KeyCode::Char('c')
        && key.modifiers.contains(KeyModifiers::CONTROL)
    {
        return KeyAction::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Char(' ') => {
            if driver.is_running() {
                driver.stop();
            } else {
                driver.start();
            }
        }
        KeyCode::Char('r') => driver.reset(),
        KeyCode::Up => state.select_prev(),
        KeyCode::Down => state.select_next(),
        KeyCode::Left => state.selected.adjust(driver.config_mut(), false),
        KeyCode::Right => state.selected.adjust(driver.config_mut(), true),
        _ => {}
    }

    KeyAction::Continue
}
