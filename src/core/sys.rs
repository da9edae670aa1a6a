//! System interfaces consumed by the shell.
//!
//! The shell never touches the display, keyboard, scheduler or process table
//! directly. Everything it needs from the kernel goes through the traits in
//! this module, so the whole interpreter can be driven by a scripted console
//! and a synthetic process directory in tests.

use thiserror::Error;

/// Process identifier (index into the process table)
pub type Pid = usize;

/// Errors reported by kernel services
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SysError {
    #[error("process table full")]
    TableFull,

    #[error("display surface closed")]
    SurfaceClosed,

    #[error("no such process: {0}")]
    NoSuchProcess(Pid),

    #[error("cannot start task: {0}")]
    SpawnFailed(String),
}

/// How an input read behaves when no unit is queued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Suspend the caller until a unit arrives
    Blocking,
    /// Return `Ok(None)` immediately when nothing is queued
    NonBlocking,
}

/// A display surface paired with its input queue.
pub trait Console {
    /// Print text at the cursor. Never fails; output to a dead surface is dropped.
    fn print(&mut self, text: &str);

    /// Clear the surface and home the cursor.
    fn clear(&mut self);

    /// Fetch one input unit.
    ///
    /// Returns `Err(SysError::SurfaceClosed)` once the surface has been destroyed.
    fn read_unit(&mut self, mode: ReadMode) -> Result<Option<u8>, SysError>;
}

/// Entry points the shell can launch as new tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEntry {
    /// A fresh interpreter on a new surface
    Shell,
    /// The pong demo
    Pong,
}

/// Creates scheduled tasks.
pub trait TaskSpawner {
    fn create_task(&self, entry: TaskEntry, priority: u8, name: &str) -> Result<Pid, SysError>;
}

/// Lifecycle state of a process record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessState {
    #[default]
    Ready,
    Zombie,
    #[allow(dead_code)] // Message passing is not hosted; kept so ps can label it
    SendBlocked,
    ReplyBlocked,
    #[allow(dead_code)]
    ReceiveBlocked,
    #[allow(dead_code)]
    MessageBlocked,
    #[allow(dead_code)]
    IntrBlocked,
}

impl ProcessState {
    /// Canonical label shown by `ps -d`
    pub fn label(&self) -> &'static str {
        match self {
            ProcessState::Ready => "READY",
            ProcessState::Zombie => "ZOMBIE",
            ProcessState::SendBlocked => "SEND_BLOCKED",
            ProcessState::ReplyBlocked => "REPLY_BLOCKED",
            ProcessState::ReceiveBlocked => "RECEIVE_BLOCKED",
            ProcessState::MessageBlocked => "MESSAGE_BLOCKED",
            ProcessState::IntrBlocked => "INTR_BLOCKED",
        }
    }
}

/// One slot of the process table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub used: bool,
    pub name: String,
    pub state: ProcessState,
    pub priority: u8,
}

/// Read-only view over the process table.
pub trait ProcessDirectory {
    /// Every slot of the table in index order, used or not.
    fn records(&self) -> Vec<ProcessRecord>;

    /// The process currently running (the caller, from the shell's point of view).
    fn current(&self) -> Option<Pid>;

    /// Whether `record` is the currently running process.
    fn is_current(&self, record: &ProcessRecord) -> bool {
        self.current() == Some(record.pid)
    }
}

/// Everything the dispatcher needs from the kernel.
pub trait Kernel: TaskSpawner + ProcessDirectory {}

impl<T: TaskSpawner + ProcessDirectory> Kernel for T {}
