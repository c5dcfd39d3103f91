//! Append-only narration log.
//!
//! Entries are stored oldest-first; displays read them newest-first.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    Plain,
    /// Run boundaries and completed passes.
    Pass,
    /// Swaps and shifts.
    Swap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
    pub kind: LogKind,
    /// Insertion position since the sequence was committed (0 = oldest).
    pub order: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Narrator {
    entries: Vec<LogEntry>,
}

impl Narrator {
    pub fn log(&mut self, message: impl Into<String>, kind: LogKind) {
        let order = self.entries.len();
        self.entries.push(LogEntry {
            message: message.into(),
            kind,
            order,
        });
    }

    /// Oldest-first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries with `order >= from`, oldest-first.
    pub fn since(&self, from: usize) -> &[LogEntry] {
        self.entries.get(from..).unwrap_or(&[])
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_follow_insertion() {
        let mut log = Narrator::default();
        log.log("a", LogKind::Plain);
        log.log("b", LogKind::Swap);
        log.log("c", LogKind::Pass);

        let orders: Vec<usize> = log.entries().iter().map(|e| e.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);

        let newest: Vec<&str> = log.newest_first().map(|e| e.message.as_str()).collect();
        assert_eq!(newest, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_since_reads_from_cursor() {
        let mut log = Narrator::default();
        log.log("a", LogKind::Plain);
        log.log("b", LogKind::Plain);

        assert_eq!(log.since(1).len(), 1);
        assert_eq!(log.since(1)[0].message, "b");
        assert!(log.since(5).is_empty());
        assert_eq!(log.since(0).len(), 2);
    }
}
