//! Suppression of noisy stopped-task events.

use std::collections::BTreeSet;

/// Outcome of checking a stopped task against the suppression lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuppressionVerdict {
    /// Format and deliver the event.
    Proceed,
    /// Drop the event. The string says which rule matched.
    Skip(String),
}

impl SuppressionVerdict {
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip(_))
    }
}

/// Stop codes and stopped-reason fragments that should not be notified.
///
/// The two checks are independent; an empty list disables its check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionPolicy {
    stop_codes: BTreeSet<String>,
    reason_fragments: Vec<String>,
}

impl SuppressionPolicy {
    /// Create a policy from stop codes (exact match) and reason fragments (substring match).
    pub fn new<C, R>(stop_codes: C, reason_fragments: R) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            stop_codes: stop_codes.into_iter().map(Into::<String>::into).collect(),
            // An empty fragment would match every reason
            reason_fragments: reason_fragments
                .into_iter()
                .map(Into::<String>::into)
                .filter(|f| !f.is_empty())
                .collect(),
        }
    }

    /// Whether neither check is configured.
    pub fn is_empty(&self) -> bool {
        self.stop_codes.is_empty() && self.reason_fragments.is_empty()
    }

    pub fn stop_codes(&self) -> impl Iterator<Item = &str> {
        self.stop_codes.iter().map(String::as_str)
    }

    pub fn reason_fragments(&self) -> impl Iterator<Item = &str> {
        self.reason_fragments.iter().map(String::as_str)
    }

    /// Check a stopped task's `stopCode` and `stoppedReason`.
    pub fn evaluate(&self, stop_code: Option<&str>, stopped_reason: Option<&str>) -> SuppressionVerdict {
        if let Some(code) = stop_code {
            if self.stop_codes.contains(code) {
                return SuppressionVerdict::Skip(format!("stop code {}", code));
            }
        }

        if let Some(reason) = stopped_reason {
            if let Some(fragment) = self
                .reason_fragments
                .iter()
                .find(|fragment| reason.contains(fragment.as_str()))
            {
                return SuppressionVerdict::Skip(format!("stopped reason matches \"{}\"", fragment));
            }
        }

        SuppressionVerdict::Proceed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> SuppressionPolicy {
        SuppressionPolicy::new(["TaskFailedToStart"], ["Scaling"])
    }

    #[test]
    fn test_stop_code_exact_match() {
        assert!(policy().evaluate(Some("TaskFailedToStart"), None).is_skip());
        assert_eq!(
            policy().evaluate(Some("TaskFailedToStartX"), None),
            SuppressionVerdict::Proceed
        );
    }

    #[test]
    fn test_stopped_reason_substring_match() {
        let verdict = policy().evaluate(Some("EssentialContainerExited"), Some("Task failed Scaling activity"));
        assert_eq!(
            verdict,
            SuppressionVerdict::Skip("stopped reason matches \"Scaling\"".to_string())
        );
    }

    #[test]
    fn test_no_match_proceeds() {
        let verdict = policy().evaluate(Some("UserInitiated"), Some("Stopped by user"));
        assert_eq!(verdict, SuppressionVerdict::Proceed);
    }

    #[test]
    fn test_missing_fields_proceed() {
        assert_eq!(policy().evaluate(None, None), SuppressionVerdict::Proceed);
    }

    #[test]
    fn test_empty_policy_never_skips() {
        let policy = SuppressionPolicy::default();
        assert!(policy.is_empty());
        assert_eq!(
            policy.evaluate(Some("TaskFailedToStart"), Some("anything")),
            SuppressionVerdict::Proceed
        );
    }

    #[test]
    fn test_stop_codes_are_deduplicated() {
        let policy = SuppressionPolicy::new(["TaskFailedToStart", "SpotInterruption", "TaskFailedToStart"], ["Scaling"]);
        assert_eq!(
            policy.stop_codes().collect::<Vec<_>>(),
            vec!["SpotInterruption", "TaskFailedToStart"]
        );
    }

    #[test]
    fn test_empty_fragments_are_ignored() {
        let policy = SuppressionPolicy::new(Vec::<String>::new(), ["", "Scaling"]);
        assert_eq!(policy.reason_fragments().count(), 1);
        assert_eq!(policy.evaluate(None, Some("Stopped by user")), SuppressionVerdict::Proceed);
    }

    #[test]
    fn test_checks_are_independent() {
        let codes_only = SuppressionPolicy::new(["TaskFailedToStart"], Vec::<String>::new());
        assert!(!codes_only.evaluate(None, Some("Scaling activity")).is_skip());

        let reasons_only = SuppressionPolicy::new(Vec::<String>::new(), ["Scaling"]);
        assert!(!reasons_only.evaluate(Some("TaskFailedToStart"), None).is_skip());
    }
}
