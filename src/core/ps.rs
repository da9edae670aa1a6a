//! Process listing for `ps` and `ps -d`.

use std::fmt::{self, Write};

use super::sys::{ProcessDirectory, ProcessRecord};

const RULE: &str = "------------------------------------------------";

/// One name per used slot.
pub fn write_compact<W: Write>(out: &mut W, dir: &dyn ProcessDirectory) -> fmt::Result {
    writeln!(out, "    Name")?;
    writeln!(out, "{}", RULE)?;
    for record in dir.records().iter().filter(|r| r.used) {
        writeln!(out, "    {}", record.name)?;
    }
    Ok(())
}

/// State, active marker, priority and name per used slot.
pub fn write_detailed<W: Write>(out: &mut W, dir: &dyn ProcessDirectory) -> fmt::Result {
    writeln!(out, "State           Active Prio Name")?;
    writeln!(out, "{}", RULE)?;
    for record in dir.records().iter().filter(|r| r.used) {
        write_detailed_record(out, record, dir.is_current(record))?;
    }
    Ok(())
}

/// A single detailed row.
pub fn write_detailed_record<W: Write>(
    out: &mut W,
    record: &ProcessRecord,
    current: bool,
) -> fmt::Result {
    if !record.used {
        return writeln!(out, "process slot unused!");
    }
    let marker = if current { " *      " } else { "        " };
    writeln!(
        out,
        "{:<15}{}  {:>2} {}",
        record.state.label(),
        marker,
        record.priority,
        record.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sys::{Pid, ProcessState};

    struct Snapshot {
        records: Vec<ProcessRecord>,
        current: Option<Pid>,
    }

    impl ProcessDirectory for Snapshot {
        fn records(&self) -> Vec<ProcessRecord> {
            self.records.clone()
        }

        fn current(&self) -> Option<Pid> {
            self.current
        }
    }

    fn record(pid: Pid, used: bool, name: &str, state: ProcessState, priority: u8) -> ProcessRecord {
        ProcessRecord {
            pid,
            used,
            name: name.to_string(),
            state,
            priority,
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            records: vec![
                record(0, true, "Boot process", ProcessState::Ready, 1),
                record(1, false, "stale", ProcessState::Zombie, 3),
                record(2, true, "shell_process", ProcessState::Ready, 5),
                record(3, true, "pong", ProcessState::ReplyBlocked, 12),
                record(4, false, "", ProcessState::Ready, 0),
            ],
            current: Some(2),
        }
    }

    #[test]
    fn test_compact_skips_unused() {
        let mut out = String::new();
        write_compact(&mut out, &snapshot()).unwrap();
        let expected = format!(
            "    Name\n{}\n    Boot process\n    shell_process\n    pong\n",
            RULE
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_detailed_layout() {
        let mut out = String::new();
        write_detailed(&mut out, &snapshot()).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "State           Active Prio Name");
        assert_eq!(lines[1], RULE);
        assert_eq!(lines[2], "READY                     1 Boot process");
        assert_eq!(lines[3], "READY           *         5 shell_process");
        assert_eq!(lines[4], "REPLY_BLOCKED            12 pong");
        assert_eq!(lines.len(), 5);
        assert!(!out.contains("stale"));
    }

    #[test]
    fn test_marker_only_on_current() {
        let mut out = String::new();
        write_detailed(&mut out, &snapshot()).unwrap();
        let marked: Vec<&str> = out.lines().filter(|l| l.get(15..17) == Some(" *")).collect();
        assert_eq!(marked, vec!["READY           *         5 shell_process"]);
    }

    #[test]
    fn test_no_current_means_no_marker() {
        let mut dir = snapshot();
        dir.current = None;
        let mut out = String::new();
        write_detailed(&mut out, &dir).unwrap();
        assert!(!out.contains('*'));
    }

    #[test]
    fn test_unused_record_message() {
        let mut out = String::new();
        write_detailed_record(&mut out, &record(7, false, "x", ProcessState::Ready, 1), false).unwrap();
        assert_eq!(out, "process slot unused!\n");
    }

    #[test]
    fn test_state_labels_fit_column() {
        for state in [
            ProcessState::Ready,
            ProcessState::Zombie,
            ProcessState::SendBlocked,
            ProcessState::ReplyBlocked,
            ProcessState::ReceiveBlocked,
            ProcessState::MessageBlocked,
            ProcessState::IntrBlocked,
        ] {
            assert!(state.label().len() <= 15);
        }
    }
}
