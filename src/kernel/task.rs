//! Task creation
//!
//! Every task runs on its own thread with a [`TaskContext`], which is the
//! task's view of the kernel: it can start further tasks and read the
//! process table, and it knows its own pid.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use tracing::{error, info, warn};

use super::console::WindowConsole;
use super::lock;
use super::pong::{self, PONG_HEIGHT, PONG_WIDTH};
use super::process::ProcessTable;
use crate::config::Config;
use crate::core::session::Session;
use crate::core::sys::{
    Pid, ProcessDirectory, ProcessRecord, ProcessState, SysError, TaskEntry, TaskSpawner,
};
use crate::wm::WindowManager;

struct Shared {
    table: Mutex<ProcessTable>,
    wm: Arc<Mutex<WindowManager>>,
    config: Config,
}

/// Owns the process table and starts tasks. Cheap to clone.
#[derive(Clone)]
pub struct Scheduler {
    shared: Arc<Shared>,
}

impl Scheduler {
    pub fn new(wm: Arc<Mutex<WindowManager>>, config: Config) -> Self {
        Self {
            shared: Arc::new(Shared {
                table: Mutex::new(ProcessTable::new()),
                wm,
                config,
            }),
        }
    }

    /// Enter a process that runs on an existing thread (the boot process).
    pub fn register(&self, name: &str, priority: u8) -> Result<Pid, SysError> {
        let pid = lock(&self.shared.table).allocate(name, priority)?;
        info!("Registered {} as pid {}", name, pid);
        Ok(pid)
    }

    /// Start `entry` on a new thread.
    pub fn spawn(&self, entry: TaskEntry, priority: u8, name: &str) -> Result<Pid, SysError> {
        let pid = lock(&self.shared.table).allocate(name, priority)?;
        let context = TaskContext {
            scheduler: self.clone(),
            pid,
        };
        let task_name = name.to_string();

        let started = thread::Builder::new()
            .name(format!("{}-{}", name, pid))
            .spawn(move || context.run(entry, &task_name));

        match started {
            Ok(_) => {
                info!("Started {:?} task {} as pid {} (priority {})", entry, name, pid, priority);
                Ok(pid)
            }
            Err(e) => {
                error!("Failed to start {}: {}", name, e);
                lock(&self.shared.table).release(pid);
                Err(SysError::SpawnFailed(e.to_string()))
            }
        }
    }

    pub fn set_state(&self, pid: Pid, state: ProcessState) {
        if let Err(e) = lock(&self.shared.table).set_state(pid, state) {
            warn!("Cannot set state of pid {}: {}", pid, e);
        }
    }

    pub fn records(&self) -> Vec<ProcessRecord> {
        lock(&self.shared.table).records()
    }

    pub fn window_manager(&self) -> &Arc<Mutex<WindowManager>> {
        &self.shared.wm
    }

    pub fn config(&self) -> &Config {
        &self.shared.config
    }
}

/// The kernel as seen from inside one task
#[derive(Clone)]
pub struct TaskContext {
    scheduler: Scheduler,
    pid: Pid,
}

impl TaskContext {
    fn run(self, entry: TaskEntry, name: &str) {
        match entry {
            TaskEntry::Shell => self.run_shell(name),
            TaskEntry::Pong => self.run_pong(name),
        }
        // Slots are never reclaimed
        self.scheduler.set_state(self.pid, ProcessState::Zombie);
        info!("Task {} (pid {}) exited", name, self.pid);
    }

    fn run_shell(&self, name: &str) {
        let config = self.scheduler.config();
        let w = &config.window;
        let console = WindowConsole::open(&self.scheduler, self.pid, (w.x, w.y, w.width, w.height), name);
        let mut session = Session::new(console, self.clone(), config.shell_options());
        session.run();
    }

    fn run_pong(&self, name: &str) {
        let config = self.scheduler.config();
        let w = &config.window;
        let mut console = WindowConsole::open(&self.scheduler, self.pid, (w.x, w.y, PONG_WIDTH, PONG_HEIGHT), name);
        let (cols, rows) = console.size().unwrap_or((PONG_WIDTH - 2, PONG_HEIGHT - 2));
        pong::run(&mut console, cols, rows, Duration::from_millis(config.pong.frame_ms));
    }
}

impl TaskSpawner for TaskContext {
    fn create_task(&self, entry: TaskEntry, priority: u8, name: &str) -> Result<Pid, SysError> {
        self.scheduler.spawn(entry, priority, name)
    }
}

impl ProcessDirectory for TaskContext {
    fn records(&self) -> Vec<ProcessRecord> {
        self.scheduler.records()
    }

    fn current(&self) -> Option<Pid> {
        Some(self.pid)
    }
}
