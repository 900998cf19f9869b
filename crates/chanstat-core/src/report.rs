use std::fmt;

/// Terminal status reported to the orchestration platform when a run ends.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FinishStatus {
    Success,
    Failed,
    PartiallyCompleted,
}

impl FinishStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinishStatus::Success => "SUCCESS",
            FinishStatus::Failed => "FAILED",
            FinishStatus::PartiallyCompleted => "PARTIALLY_COMPLETED",
        }
    }
}

impl fmt::Display for FinishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Success/failure bookkeeping for one run.
///
/// Each channel increments exactly one of the two outcome counters, so
/// `succeeded + failed == total` holds once every channel was attempted.
#[derive(Copy, Clone, Debug)]
pub struct RunCounters {
    total: usize,
    succeeded: usize,
    failed: usize,
}

impl RunCounters {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            succeeded: 0,
            failed: 0,
        }
    }

    pub fn record_success(&mut self) {
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Select the terminal status. Checked in order: all-success wins the
    /// vacuous zero-channel case.
    pub fn finish_status(&self) -> FinishStatus {
        if self.succeeded == self.total {
            FinishStatus::Success
        } else if self.failed == self.total {
            FinishStatus::Failed
        } else {
            FinishStatus::PartiallyCompleted
        }
    }

    /// Human-readable finish message matching the selected status.
    pub fn finish_message(&self) -> String {
        match self.finish_status() {
            FinishStatus::Success => format!(
                "Todos os {} canais foram processados com sucesso.",
                self.total
            ),
            FinishStatus::Failed => format!(
                "Todos os {} canais foram processados com erro.",
                self.total
            ),
            FinishStatus::PartiallyCompleted => format!(
                "Dos {} canais pesquisados, número de falha: {} e número de sucesso: {}.",
                self.total, self.failed, self.succeeded
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_success_is_success() {
        let mut counters = RunCounters::new(3);
        counters.record_success();
        counters.record_success();
        counters.record_success();

        assert_eq!(counters.finish_status(), FinishStatus::Success);
        assert_eq!(
            counters.finish_message(),
            "Todos os 3 canais foram processados com sucesso."
        );
    }

    #[test]
    fn test_all_failed_is_failed() {
        let mut counters = RunCounters::new(2);
        counters.record_failure();
        counters.record_failure();

        assert_eq!(counters.finish_status(), FinishStatus::Failed);
        assert_eq!(
            counters.finish_message(),
            "Todos os 2 canais foram processados com erro."
        );
    }

    #[test]
    fn test_mixed_is_partially_completed() {
        let mut counters = RunCounters::new(3);
        counters.record_success();
        counters.record_success();
        counters.record_failure();

        assert_eq!(counters.finish_status(), FinishStatus::PartiallyCompleted);
        assert_eq!(
            counters.finish_message(),
            "Dos 3 canais pesquisados, número de falha: 1 e número de sucesso: 2."
        );
    }

    #[test]
    fn test_zero_channels_resolves_to_success() {
        // Vacuous case: both branches hold, the success check runs first
        let counters = RunCounters::new(0);
        assert_eq!(counters.finish_status(), FinishStatus::Success);
    }

    #[test]
    fn test_counters_account_for_every_channel() {
        let mut counters = RunCounters::new(5);
        counters.record_success();
        counters.record_failure();
        counters.record_failure();
        counters.record_success();
        counters.record_success();

        assert_eq!(counters.succeeded() + counters.failed(), counters.total());
    }

    #[test]
    fn test_single_success_message() {
        let mut counters = RunCounters::new(1);
        counters.record_success();

        assert_eq!(
            counters.finish_message(),
            "Todos os 1 canais foram processados com sucesso."
        );
    }

    #[test]
    fn test_wire_strings() {
        assert_eq!(FinishStatus::Success.as_str(), "SUCCESS");
        assert_eq!(FinishStatus::Failed.as_str(), "FAILED");
        assert_eq!(
            FinishStatus::PartiallyCompleted.as_str(),
            "PARTIALLY_COMPLETED"
        );
    }
}
