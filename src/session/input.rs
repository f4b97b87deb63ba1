//! Console input and the per-session input listener.
//!
//! A single reader thread owns the console for the whole process and
//! forwards whitespace-separated tokens over a channel. The menu and each
//! tracking phase's [`InputListener`] consume from that channel, so two
//! listeners can never race on the console itself.

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::flags::{CancelFlags, StopOnPanic};

/// How long a consumer waits for a token before rechecking the flags.
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Result of waiting for a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poll {
    /// A token arrived.
    Token(String),
    /// Nothing arrived within the timeout.
    Idle,
    /// The input source reached end of file.
    Closed,
}

/// Token stream read from the console by a background thread.
pub struct ConsoleInput {
    rx: Receiver<String>,
}

impl ConsoleInput {
    /// Spawns the reader thread over `reader`.
    pub fn spawn<R: BufRead + Send + 'static>(reader: R) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("console-input".to_string())
            .spawn(move || read_tokens(reader, tx))?;
        Ok(Self { rx })
    }

    /// Creates an input fed directly through the returned sender.
    pub fn channel() -> (Sender<String>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }

    /// Waits up to `timeout` for the next token.
    pub fn poll(&mut self, timeout: Duration) -> Poll {
        match self.rx.recv_timeout(timeout) {
            Ok(token) => Poll::Token(token),
            Err(RecvTimeoutError::Timeout) => Poll::Idle,
            Err(RecvTimeoutError::Disconnected) => Poll::Closed,
        }
    }

    /// Blocks for the next token, giving up when stop is requested or input
    /// is closed.
    pub fn next_token(&mut self, flags: &CancelFlags) -> Option<String> {
        while !flags.stop_requested() {
            match self.poll(INPUT_POLL_INTERVAL) {
                Poll::Token(token) => return Some(token),
                Poll::Idle => continue,
                Poll::Closed => return None,
            }
        }
        None
    }
}

fn read_tokens<R: BufRead>(reader: R, tx: Sender<String>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Console read failed: {}", e);
                return;
            }
        };
        for token in line.split_whitespace() {
            if tx.send(token.to_string()).is_err() {
                return;
            }
        }
    }
    debug!("Console input closed");
}

/// Commands recognised while tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `3`: exit the application.
    Exit,
    /// `4`: return to the menu.
    Restart,
}

impl Command {
    /// Reads the command from the first character of `token`; the rest is
    /// ignored, so `34` exits.
    pub fn parse(token: &str) -> Option<Self> {
        match token.chars().next()? {
            '3' => Some(Command::Exit),
            '4' => Some(Command::Restart),
            _ => None,
        }
    }
}

/// Translates console commands into cancellation requests for one tracking
/// phase.
///
/// Returns as soon as either flag is set, which lets the controller join it
/// before the next phase resets the restart flag.
pub struct InputListener<'a> {
    input: &'a mut ConsoleInput,
    flags: &'a CancelFlags,
}

impl<'a> InputListener<'a> {
    pub fn new(input: &'a mut ConsoleInput, flags: &'a CancelFlags) -> Self {
        Self { input, flags }
    }

    pub fn run(mut self) {
        let _guard = StopOnPanic(self.flags);

        while self.flags.should_continue() {
            match self.input.poll(INPUT_POLL_INTERVAL) {
                Poll::Token(token) => match Command::parse(&token) {
                    Some(Command::Exit) => {
                        info!("Exit requested");
                        self.flags.request_stop();
                    }
                    Some(Command::Restart) => {
                        info!("Return to menu requested");
                        self.flags.request_restart();
                    }
                    None => debug!("Ignoring input {:?}", token),
                },
                Poll::Idle => {}
                Poll::Closed => {
                    // No further command can arrive.
                    info!("Input closed, stopping");
                    self.flags.request_stop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_spawn_splits_tokens() {
        let mut input = ConsoleInput::spawn(Cursor::new("1\n  foo  3\n\n4\n")).unwrap();
        let flags = CancelFlags::new();

        let mut tokens = Vec::new();
        while let Some(token) = input.next_token(&flags) {
            tokens.push(token);
        }
        assert_eq!(tokens, vec!["1", "foo", "3", "4"]);
    }

    #[test]
    fn test_poll_idle_then_closed() {
        let (tx, mut input) = ConsoleInput::channel();
        assert_eq!(input.poll(Duration::from_millis(10)), Poll::Idle);

        tx.send("x".to_string()).unwrap();
        assert_eq!(input.poll(Duration::from_millis(10)), Poll::Token("x".to_string()));

        drop(tx);
        assert_eq!(input.poll(Duration::from_millis(10)), Poll::Closed);
    }

    #[test]
    fn test_next_token_gives_up_on_stop() {
        let (_tx, mut input) = ConsoleInput::channel();
        let flags = CancelFlags::new();
        flags.request_stop();
        assert_eq!(input.next_token(&flags), None);
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("3"), Some(Command::Exit));
        assert_eq!(Command::parse("4"), Some(Command::Restart));
        assert_eq!(Command::parse("1"), None);
        assert_eq!(Command::parse("34"), Some(Command::Exit));
        assert_eq!(Command::parse("4x"), Some(Command::Restart));
        assert_eq!(Command::parse("x3"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_listener_exit_command() {
        let (tx, mut input) = ConsoleInput::channel();
        let flags = CancelFlags::new();
        tx.send("hello".to_string()).unwrap();
        tx.send("3".to_string()).unwrap();

        InputListener::new(&mut input, &flags).run();
        assert!(flags.stop_requested());
        assert!(!flags.restart_requested());
    }

    #[test]
    fn test_listener_restart_leaves_rest_for_menu() {
        let (tx, mut input) = ConsoleInput::channel();
        let flags = CancelFlags::new();
        tx.send("4".to_string()).unwrap();
        tx.send("2".to_string()).unwrap();

        InputListener::new(&mut input, &flags).run();
        assert!(flags.restart_requested());
        assert!(!flags.stop_requested());
        assert_eq!(input.poll(Duration::from_millis(10)), Poll::Token("2".to_string()));
    }

    #[test]
    fn test_listener_returns_when_flag_set_elsewhere() {
        let (_tx, mut input) = ConsoleInput::channel();
        let flags = CancelFlags::new();

        std::thread::scope(|s| {
            let listener = s.spawn(|| InputListener::new(&mut input, &flags).run());
            std::thread::sleep(Duration::from_millis(50));
            flags.request_restart();
            listener.join().unwrap();
        });
        assert!(!flags.stop_requested());
    }

    #[test]
    fn test_listener_stops_on_closed_input() {
        let (tx, mut input) = ConsoleInput::channel();
        drop(tx);
        let flags = CancelFlags::new();

        InputListener::new(&mut input, &flags).run();
        assert!(flags.stop_requested());
    }
}
