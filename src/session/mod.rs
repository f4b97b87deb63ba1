//! Session lifecycle: provider selection, tracking, stop or restart.
//!
//! ```text
//! Selecting ──1/2──▶ Tracking ──4──▶ Restarting ──▶ Selecting
//!     │                 │
//!     └──3──▶ Stopped ◀─3─┘
//! ```
//!
//! A tracking phase runs the sampling loop and the [`InputListener`] as two
//! scoped threads coordinated only through [`CancelFlags`]. Both are joined
//! before the phase returns, so a listener never outlives its session.

mod flags;
mod input;
mod menu;

pub use flags::{CancelFlags, SessionEnd};
pub use input::{Command, ConsoleInput, INPUT_POLL_INTERVAL, InputListener, Poll};
pub use menu::{MenuChoice, print_banner};

use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::collector::MemoryQuery;
use crate::provider::{ConsoleProvider, FileLoggingProvider, MemoryDataProvider};

use flags::StopOnPanic;

/// Fixed sampling cadence.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Granularity of the cancellable sleep between ticks.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Controller state.
pub enum SessionState {
    /// Showing the menu and waiting for a provider choice.
    Selecting,
    /// Sampling with the chosen provider.
    Tracking(Box<dyn MemoryDataProvider>),
    /// Tracking ended by a restart request.
    Restarting,
    /// Terminal: the application exits.
    Stopped,
}

/// Drives the selector → tracking → stop/restart cycle.
pub struct SessionController<Q: MemoryQuery + Clone + 'static> {
    query: Q,
    input: ConsoleInput,
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    flags: Arc<CancelFlags>,
    tick: Duration,
}

impl<Q: MemoryQuery + Clone + 'static> SessionController<Q> {
    /// Creates a controller.
    ///
    /// # Arguments
    /// * `query` - Platform memory query, cloned into every new provider
    /// * `input` - Console token stream shared by menu and listeners
    /// * `out` - Console output; menu errors go to stderr
    /// * `flags` - Cancellation flags; the caller may keep a handle (e.g. for Ctrl-C)
    pub fn new(
        query: Q,
        input: ConsoleInput,
        out: Box<dyn Write + Send>,
        flags: Arc<CancelFlags>,
    ) -> Self {
        Self {
            query,
            input,
            out,
            err: Box::new(io::stderr()),
            flags,
            tick: TICK_INTERVAL,
        }
    }

    #[cfg(test)]
    fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    #[cfg(test)]
    fn with_error_output(mut self, err: Box<dyn Write + Send>) -> Self {
        self.err = err;
        self
    }

    pub fn flags(&self) -> &Arc<CancelFlags> {
        &self.flags
    }

    /// Runs sessions until stop is requested.
    ///
    /// Only console write failures in the menu are returned as errors.
    pub fn run(&mut self) -> io::Result<()> {
        let mut state = SessionState::Selecting;
        let mut session = 0u64;

        loop {
            state = match state {
                SessionState::Selecting => {
                    session += 1;
                    debug!("Session #{}: selecting provider", session);
                    self.select()?
                }
                SessionState::Tracking(provider) => self.track(provider),
                SessionState::Restarting => SessionState::Selecting,
                SessionState::Stopped => {
                    info!("Stopped after {} session(s)", session);
                    return Ok(());
                }
            };
        }
    }

    /// Shows the menu until a valid choice is made.
    fn select(&mut self) -> io::Result<SessionState> {
        loop {
            menu::print_menu(self.out.as_mut())?;

            let Some(token) = self.input.next_token(&self.flags) else {
                self.flags.request_stop();
                return Ok(SessionState::Stopped);
            };

            match MenuChoice::parse(&token) {
                Some(MenuChoice::Console) => {
                    info!("Starting console session");
                    let provider = ConsoleProvider::new(self.query.clone());
                    return Ok(SessionState::Tracking(Box::new(provider)));
                }
                Some(MenuChoice::FileLog) => {
                    menu::print_file_prompt(self.out.as_mut())?;
                    let Some(path) = self.input.next_token(&self.flags) else {
                        self.flags.request_stop();
                        return Ok(SessionState::Stopped);
                    };
                    info!("Starting file logging session to {}", path);
                    let provider = FileLoggingProvider::new(self.query.clone(), path);
                    return Ok(SessionState::Tracking(Box::new(provider)));
                }
                Some(MenuChoice::Exit) => {
                    self.flags.request_stop();
                    return Ok(SessionState::Stopped);
                }
                None => {
                    debug!("Invalid menu choice {:?}", token);
                    menu::print_invalid_choice(self.err.as_mut())?;
                }
            }
        }
    }

    /// Runs one tracking phase and joins both tasks before returning.
    fn track(&mut self, mut provider: Box<dyn MemoryDataProvider>) -> SessionState {
        self.flags.reset_restart();

        let flags: &CancelFlags = &self.flags;
        let input = &mut self.input;
        let out = self.out.as_mut();
        let tick = self.tick;

        let ticks = thread::scope(|s| {
            let sampler = s.spawn(move || run_sampling_loop(provider.as_mut(), out, flags, tick));
            let listener = s.spawn(move || InputListener::new(input, flags).run());

            let ticks = sampler.join().unwrap_or_else(|_| {
                error!("Sampling task panicked");
                0
            });
            if listener.join().is_err() {
                error!("Input listener panicked");
            }
            ticks
        });

        match self.flags.end_reason() {
            Some(SessionEnd::Restart) => {
                info!("Returning to menu after {} ticks", ticks);
                SessionState::Restarting
            }
            _ => {
                info!("Stopping after {} ticks", ticks);
                SessionState::Stopped
            }
        }
    }
}

/// Samples and renders once per `tick` until either flag is set.
///
/// A failed update skips that tick's render; the loop carries on with the
/// next tick. Returns the number of ticks run.
pub fn run_sampling_loop(
    provider: &mut dyn MemoryDataProvider,
    out: &mut dyn Write,
    flags: &CancelFlags,
    tick: Duration,
) -> u64 {
    let _guard = StopOnPanic(flags);
    let mut ticks = 0u64;

    while flags.should_continue() {
        ticks += 1;
        match provider.update_data() {
            Ok(()) => {
                if let Err(e) = provider.display_data(out) {
                    warn!("Tick {}: render failed: {}", ticks, e);
                }
            }
            Err(e) => warn!("Tick {}: {}; skipping render", ticks, e),
        }
        sleep_unless_cancelled(tick, flags);
    }

    debug!("Sampling loop finished after {} ticks", ticks);
    ticks
}

/// Sleeps for `interval`, waking early once either flag is set.
fn sleep_unless_cancelled(interval: Duration, flags: &CancelFlags) {
    let mut remaining = interval;
    while remaining > Duration::ZERO && flags.should_continue() {
        let sleep_time = remaining.min(SLEEP_SLICE);
        thread::sleep(sleep_time);
        remaining = remaining.saturating_sub(sleep_time);
    }
}
