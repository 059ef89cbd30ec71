use serde::{Deserialize, Serialize};

use crate::judge::Judgment;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    Fail,
    Error,
}

/// `Error` when no check ran, `Pass` when every check passed.
pub fn classify_outcome(judgment: &Judgment) -> Outcome {
    if judgment.checks.is_empty() {
        Outcome::Error
    } else if judgment.checks.iter().all(|check| check.passed) {
        Outcome::Pass
    } else {
        Outcome::Fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::CheckOutcome;

    fn judgment(passes: &[bool]) -> Judgment {
        Judgment {
            checks: passes
                .iter()
                .map(|&passed| CheckOutcome {
                    kind: "board".to_string(),
                    label: "board(3)".to_string(),
                    passed,
                    expected: "turns=1".to_string(),
                    actual: "turns=1".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn pass_when_every_check_passes() {
        assert_eq!(classify_outcome(&judgment(&[true, true])), Outcome::Pass);
    }

    #[test]
    fn fail_when_any_check_fails() {
        assert_eq!(classify_outcome(&judgment(&[true, false])), Outcome::Fail);
    }

    #[test]
    fn error_when_nothing_ran() {
        assert_eq!(classify_outcome(&judgment(&[])), Outcome::Error);
    }
}
