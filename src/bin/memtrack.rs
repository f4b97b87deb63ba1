//! memtrack - interactive host memory tracker.
//!
//! Usage:
//!   memtrack              # interactive menu
//!   memtrack -v           # log session transitions to stderr
//!   memtrack --proc-path ./snapshot/proc
//!
//! While tracking, type 3 + Enter to exit or 4 + Enter to return to the menu.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::io::{self, BufReader};
use std::sync::Arc;

use clap::Parser;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, ResetColor, SetForegroundColor};
use tracing::level_filters::LevelFilter;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use memtrack::collector::platform_query;
use memtrack::session::{CancelFlags, ConsoleInput, SessionController, print_banner};

/// Interactive host memory tracker.
#[derive(Parser)]
#[command(name = "memtrack", about = "Host memory tracker", version)]
struct Args {
    /// Path to /proc filesystem (Linux only, for testing against snapshots).
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber on stderr so logs never mix into the
/// redrawn console on stdout.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);
    info!("memtrack {} starting", env!("CARGO_PKG_VERSION"));

    let flags = Arc::new(CancelFlags::new());
    let f = Arc::clone(&flags);
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received interrupt");
        f.request_stop();
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    let input = match ConsoleInput::spawn(BufReader::new(io::stdin())) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: cannot start console reader: {}", e);
            std::process::exit(1);
        }
    };

    let mut stdout = io::stdout();
    if let Err(e) = stdout.execute(SetForegroundColor(Color::Green)) {
        warn!("Failed to set console colour: {}", e);
    }
    if let Err(e) = print_banner(&mut stdout) {
        warn!("Failed to print banner: {}", e);
    }

    let query = platform_query(&args.proc_path);
    let mut controller = SessionController::new(query, input, Box::new(io::stdout()), flags);
    let result = controller.run();

    if let Err(e) = stdout.execute(ResetColor) {
        warn!("Failed to reset console colour: {}", e);
    }

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
