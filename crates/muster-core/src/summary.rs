/// Outcome counts of one dispatch round.
///
/// Per-peer results are reported through the log side-channel only; the
/// summary exists so callers can apply an exit-code policy. Invariant:
/// `selected == succeeded + failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundSummary {
    pub selected: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RoundSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_round_has_no_failures() {
        assert!(!RoundSummary::default().has_failures());
    }

    #[test]
    fn failures_are_detected() {
        let summary = RoundSummary {
            selected: 3,
            succeeded: 2,
            failed: 1,
        };
        assert!(summary.has_failures());
        assert_eq!(summary.selected, summary.succeeded + summary.failed);
    }
}
