//! Fixed-size process table

use tracing::debug;

use crate::core::sys::{Pid, ProcessRecord, ProcessState, SysError};

/// Number of process slots
pub const MAX_PROCS: usize = 20;

/// The process table. Slots are handed out lowest index first and never
/// reclaimed; a finished task stays behind as a zombie.
#[derive(Debug)]
pub struct ProcessTable {
    slots: Vec<ProcessRecord>,
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTable {
    pub fn new() -> Self {
        let slots = (0..MAX_PROCS)
            .map(|pid| ProcessRecord { pid, ..ProcessRecord::default() })
            .collect();
        Self { slots }
    }

    /// Claim the first unused slot.
    pub fn allocate(&mut self, name: &str, priority: u8) -> Result<Pid, SysError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| !s.used)
            .ok_or(SysError::TableFull)?;

        slot.used = true;
        slot.name = name.to_string();
        slot.state = ProcessState::Ready;
        slot.priority = priority;
        debug!("Allocated pid {} for {}", slot.pid, name);
        Ok(slot.pid)
    }

    /// Give a slot back. Only used when a task could not be started.
    pub fn release(&mut self, pid: Pid) {
        if let Some(slot) = self.slots.get_mut(pid) {
            *slot = ProcessRecord { pid, ..ProcessRecord::default() };
        }
    }

    pub fn set_state(&mut self, pid: Pid, state: ProcessState) -> Result<(), SysError> {
        match self.slots.get_mut(pid) {
            Some(slot) if slot.used => {
                slot.state = state;
                Ok(())
            }
            _ => Err(SysError::NoSuchProcess(pid)),
        }
    }

    /// Snapshot of every slot
    pub fn records(&self) -> Vec<ProcessRecord> {
        self.slots.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_in_index_order() {
        let mut table = ProcessTable::new();
        assert_eq!(table.allocate("Boot process", 1), Ok(0));
        assert_eq!(table.allocate("shell_process", 5), Ok(1));

        let shell = &table.slots[1];
        assert_eq!(shell.name, "shell_process");
        assert_eq!(shell.priority, 5);
        assert_eq!(shell.state, ProcessState::Ready);
        assert_eq!(table.records().iter().filter(|r| r.used).count(), 2);
        assert_eq!(table.records().len(), MAX_PROCS);
    }

    #[test]
    fn test_table_full() {
        let mut table = ProcessTable::new();
        for _ in 0..MAX_PROCS {
            table.allocate("shell_process", 5).unwrap();
        }
        assert_eq!(table.allocate("pong", 5), Err(SysError::TableFull));
    }

    #[test]
    fn test_zombies_keep_their_slot() {
        let mut table = ProcessTable::new();
        let pid = table.allocate("pong", 5).unwrap();
        table.set_state(pid, ProcessState::Zombie).unwrap();
        assert_eq!(table.allocate("shell_process", 5), Ok(pid + 1));
        assert!(table.slots[pid].used);
        assert_eq!(table.slots[pid].state, ProcessState::Zombie);
    }

    #[test]
    fn test_release_and_unknown_pid() {
        let mut table = ProcessTable::new();
        let pid = table.allocate("pong", 5).unwrap();
        table.release(pid);
        assert!(!table.slots[pid].used);
        assert_eq!(table.slots[pid].name, "");
        assert_eq!(
            table.set_state(pid, ProcessState::Ready),
            Err(SysError::NoSuchProcess(pid))
        );
        assert_eq!(
            table.set_state(99, ProcessState::Ready),
            Err(SysError::NoSuchProcess(99))
        );
    }
}
