//! Test doubles for the system interfaces.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::sys::{
    Console, Pid, ProcessDirectory, ProcessRecord, ProcessState, ReadMode, SysError, TaskEntry,
    TaskSpawner,
};

/// Console fed from a fixed input script; closes when the script runs out.
pub struct ScriptedConsole {
    input: VecDeque<u8>,
    idle_reads: usize,
    pub output: String,
    pub clears: usize,
}

impl ScriptedConsole {
    pub fn new(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
            idle_reads: 0,
            output: String::new(),
            clears: 0,
        }
    }

    /// Report "nothing queued" this many times to non-blocking reads first.
    pub fn with_idle_reads(mut self, n: usize) -> Self {
        self.idle_reads = n;
        self
    }

    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn print(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.output.clear();
    }

    fn read_unit(&mut self, mode: ReadMode) -> Result<Option<u8>, SysError> {
        if mode == ReadMode::NonBlocking && self.idle_reads > 0 {
            self.idle_reads -= 1;
            return Ok(None);
        }
        self.input.pop_front().map(Some).ok_or(SysError::SurfaceClosed)
    }
}

/// Kernel double that records spawn requests and serves a fixed process table.
#[derive(Default)]
pub struct RecordingKernel {
    pub spawned: RefCell<Vec<(TaskEntry, u8, String)>>,
    pub records: Vec<ProcessRecord>,
    pub current: Option<Pid>,
    pub table_full: bool,
}

impl RecordingKernel {
    /// A table with a boot process and one shell, the shell running.
    pub fn with_shell() -> Self {
        let record = |pid: Pid, name: &str, priority: u8| ProcessRecord {
            pid,
            used: true,
            name: name.to_string(),
            state: ProcessState::Ready,
            priority,
        };
        Self {
            records: vec![
                record(0, "Boot process", 1),
                record(1, "shell_process", 5),
                ProcessRecord {
                    pid: 2,
                    ..Default::default()
                },
            ],
            current: Some(1),
            ..Default::default()
        }
    }
}

impl TaskSpawner for RecordingKernel {
    fn create_task(&self, entry: TaskEntry, priority: u8, name: &str) -> Result<Pid, SysError> {
        if self.table_full {
            return Err(SysError::TableFull);
        }
        let mut spawned = self.spawned.borrow_mut();
        spawned.push((entry, priority, name.to_string()));
        Ok(self.records.len() + spawned.len())
    }
}

impl ProcessDirectory for RecordingKernel {
    fn records(&self) -> Vec<ProcessRecord> {
        self.records.clone()
    }

    fn current(&self) -> Option<Pid> {
        self.current
    }
}
