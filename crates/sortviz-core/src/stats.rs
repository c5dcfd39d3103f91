//! Run counters and progress.

/// Counters for one run. Reset at run start; never decrease during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub comparisons: u64,
    pub swaps: u64,
    pub current_pass: usize,
    pub progress_percent: u8,
}

impl RunStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record_comparison(&mut self) {
        self.comparisons += 1;
    }

    pub fn record_swap(&mut self) {
        self.swaps += 1;
    }

    pub fn set_pass(&mut self, pass: usize) {
        self.current_pass = pass;
    }

    /// Records `completed` finished outer passes out of `total`.
    pub fn set_progress(&mut self, completed: usize, total: usize) {
        self.progress_percent = progress(completed, total);
    }

    pub fn pass_label(&self) -> String {
        format!("Pass: {}", self.current_pass)
    }

    pub fn progress_label(&self) -> String {
        format!("Progress: {}%", self.progress_percent)
    }
}

/// `round(100 * completed / total)`, halves rounding up, capped at 100.
pub fn progress(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = (completed.saturating_mul(100) + total / 2) / total;
    percent.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_rounds_to_nearest() {
        assert_eq!(progress(1, 3), 33);
        assert_eq!(progress(2, 3), 67);
        assert_eq!(progress(1, 8), 13);
        assert_eq!(progress(3, 4), 75);
        assert_eq!(progress(4, 4), 100);
    }

    #[test]
    fn test_progress_edge_cases() {
        assert_eq!(progress(0, 0), 0);
        assert_eq!(progress(0, 5), 0);
        assert_eq!(progress(7, 5), 100);
    }

    #[test]
    fn test_labels() {
        let mut stats = RunStats::default();
        stats.set_pass(2);
        stats.set_progress(1, 2);
        assert_eq!(stats.pass_label(), "Pass: 2");
        assert_eq!(stats.progress_label(), "Progress: 50%");

        stats.record_comparison();
        stats.record_swap();
        stats.reset();
        assert_eq!(stats, RunStats::default());
    }
}
