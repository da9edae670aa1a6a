//! tosh - the shell of a small teaching kernel, hosted in a terminal
//!
//! Every shell is a task with its own window. Windows are stacked on the
//! host terminal; keystrokes go to the focused one.
//!
//! # Quick Start
//!
//! ```text
//! tosh                   # Boot and open the first shell
//! tosh -s nord           # Use the Nord color scheme
//! tosh -l debug          # Verbose log in ~/.tosh/tosh.log
//! ```
//!
//! # Shell commands
//!
//! | Command | Action |
//! |---------|--------|
//! | help | List commands |
//! | clear | Clear the window |
//! | shell | Start another shell |
//! | pong | Start the pong demo |
//! | echo \<text\> | Print text |
//! | ps [-d] | List processes |
//! | about | About tosh |
//!
//! # Keybindings
//!
//! | Key | Action |
//! |-----|--------|
//! | Ctrl+O | Focus next window |
//! | Ctrl+W | Close focused window |
//! | Ctrl+Q | Quit |

mod config;
mod core;
mod kernel;
mod ui;
mod wm;

use std::env;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::{tosh_dir, ColorScheme, Config};
use crate::core::session::SHELL_TASK_NAME;
use crate::core::sys::TaskEntry;
use crate::kernel::{lock, Scheduler};
use crate::ui::{KeyAction, KeyMapper, Renderer};
use crate::wm::WindowManager;

/// Name and priority of the process that runs the host loop
const BOOT_PROCESS_NAME: &str = "Boot process";
const BOOT_PRIORITY: u8 = 1;

/// Input poll interval; also bounds how stale a frame can get
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Command line options
#[derive(Debug, Default)]
struct Options {
    /// Config file instead of ~/.tosh/config.toml
    config_path: Option<PathBuf>,
    /// Color scheme override
    scheme: Option<String>,
    /// Log filter override
    log: Option<String>,
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("tosh {}", VERSION);
}

fn print_help() {
    eprintln!("tosh {} - teaching kernel shell", VERSION);
    eprintln!();
    eprintln!("Usage: tosh [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <PATH>   Config file (default: ~/.tosh/config.toml)");
    eprintln!("  -s, --scheme <NAME>   Color scheme");
    eprintln!("  -l, --log <FILTER>    Log filter, e.g. debug or tosh=trace");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Keybindings:");
    eprintln!("  Ctrl+O                Focus next window");
    eprintln!("  Ctrl+W                Close focused window");
    eprintln!("  Ctrl+Q                Quit");
    eprintln!("  q                     Quit pong (in the pong window)");
    eprintln!();
    eprintln!("Color schemes: {}", ColorScheme::list().join(", "));
    eprintln!();
    eprintln!("Log file: ~/.tosh/tosh.log");
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();
    let mut options = Options::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-c" | "--config" => {
                i += 1;
                let path = args.get(i).ok_or("Missing config path")?;
                options.config_path = Some(PathBuf::from(path));
            }
            "-s" | "--scheme" => {
                i += 1;
                let scheme = args.get(i).ok_or("Missing scheme name")?;
                options.scheme = Some(scheme.clone());
            }
            "-l" | "--log" => {
                i += 1;
                let filter = args.get(i).ok_or("Missing log filter")?;
                options.log = Some(filter.clone());
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
        i += 1;
    }

    Ok(options)
}

/// Log to ~/.tosh/tosh.log. Filter precedence: --log, RUST_LOG, config.
fn init_logging(cli_filter: Option<&str>, config_level: &str) {
    let log_path = tosh_dir()
        .map(|dir| dir.join("tosh.log"))
        .unwrap_or_else(|| PathBuf::from("tosh.log"));

    let filter = cli_filter
        .and_then(|f| EnvFilter::try_new(f).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .or_else(|| EnvFilter::try_new(config_level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_thread_names(true)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let options = match parse_args() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    let mut config = match &options.config_path {
        Some(path) => Config::load_or_default(path),
        None => Config::load(),
    };
    if let Some(scheme) = &options.scheme {
        config.color_scheme = scheme.clone();
    }

    init_logging(options.log.as_deref(), &config.log_level);
    info!("tosh {} starting...", VERSION);

    let (cols, rows) = terminal::size()?;
    info!("Terminal size: {}x{}", cols, rows);

    let mut wm = WindowManager::new(cols, rows);
    wm.cascade = config.window.cascade;
    let wm = Arc::new(Mutex::new(wm));

    let mut renderer = Renderer::with_color_scheme(config.get_color_scheme());
    let shell_priority = config.shell.priority;
    let scheduler = Scheduler::new(Arc::clone(&wm), config);

    scheduler.register(BOOT_PROCESS_NAME, BOOT_PRIORITY)?;
    scheduler.spawn(TaskEntry::Shell, shell_priority, SHELL_TASK_NAME)?;

    renderer.init()?;
    let result = run_event_loop(&wm, &mut renderer);
    if let Err(e) = &result {
        error!("Event loop failed: {}", e);
    }

    let _ = renderer.cleanup();
    info!("tosh exiting");
    result
}

/// Route keys to windows and redraw on change until quit or every window is gone
fn run_event_loop(wm: &Arc<Mutex<WindowManager>>, renderer: &mut Renderer) -> anyhow::Result<()> {
    // The first shell opens its window on its own thread
    let mut opened = false;

    loop {
        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match KeyMapper::map(&key) {
                    KeyAction::Input(unit) => {
                        lock(wm).send_input(unit);
                    }
                    KeyAction::FocusNext => lock(wm).focus_next(),
                    KeyAction::CloseWindow => {
                        lock(wm).close_focused();
                    }
                    KeyAction::Quit => {
                        info!("Quit requested");
                        return Ok(());
                    }
                    KeyAction::None => {}
                },
                Event::Resize(cols, rows) => {
                    lock(wm).resize(cols, rows);
                    renderer.invalidate();
                }
                _ => {}
            }
        }

        let wm = lock(wm);
        if wm.is_empty() {
            if opened {
                info!("All windows closed");
                return Ok(());
            }
        } else {
            opened = true;
        }
        renderer.render_if_changed(&wm)?;
    }
}
