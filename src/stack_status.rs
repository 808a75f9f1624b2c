use std::fmt;
use termcolor::{Color, ColorSpec};

/// The kind of change CloudFormation is applying to a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mutation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Update => f.write_str("update"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StackStatus {
    CreateInProgress,
    CreateComplete,
    CreateFailed,
    DeleteComplete,
    DeleteFailed,
    DeleteInProgress,
    ReviewInProgress,
    RollbackComplete,
    RollbackFailed,
    RollbackInProgress,
    UpdateComplete,
    UpdateCompleteCleanupInProgress,
    UpdateFailed,
    UpdateInProgress,
    UpdateRollbackComplete,
    UpdateRollbackCompleteCleanupInProgress,
    UpdateRollbackFailed,
    UpdateRollbackInProgress,
    ImportInProgress,
    ImportComplete,
    ImportRollbackInProgress,
    ImportRollbackFailed,
    ImportRollbackComplete,
    /// A value the service reported that this tool does not know about yet.
    Other(String),
}

impl From<&str> for StackStatus {
    fn from(value: &str) -> Self {
        use StackStatus::*;
        match value {
            "CREATE_IN_PROGRESS" => CreateInProgress,
            "CREATE_COMPLETE" => CreateComplete,
            "CREATE_FAILED" => CreateFailed,
            "DELETE_COMPLETE" => DeleteComplete,
            "DELETE_FAILED" => DeleteFailed,
            "DELETE_IN_PROGRESS" => DeleteInProgress,
            "REVIEW_IN_PROGRESS" => ReviewInProgress,
            "ROLLBACK_COMPLETE" => RollbackComplete,
            "ROLLBACK_FAILED" => RollbackFailed,
            "ROLLBACK_IN_PROGRESS" => RollbackInProgress,
            "UPDATE_COMPLETE" => UpdateComplete,
            "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS" => UpdateCompleteCleanupInProgress,
            "UPDATE_FAILED" => UpdateFailed,
            "UPDATE_IN_PROGRESS" => UpdateInProgress,
            "UPDATE_ROLLBACK_COMPLETE" => UpdateRollbackComplete,
            "UPDATE_ROLLBACK_COMPLETE_CLEANUP_IN_PROGRESS" => {
                UpdateRollbackCompleteCleanupInProgress
            }
            "UPDATE_ROLLBACK_FAILED" => UpdateRollbackFailed,
            "UPDATE_ROLLBACK_IN_PROGRESS" => UpdateRollbackInProgress,
            "IMPORT_IN_PROGRESS" => ImportInProgress,
            "IMPORT_COMPLETE" => ImportComplete,
            "IMPORT_ROLLBACK_IN_PROGRESS" => ImportRollbackInProgress,
            "IMPORT_ROLLBACK_FAILED" => ImportRollbackFailed,
            "IMPORT_ROLLBACK_COMPLETE" => ImportRollbackComplete,
            other => Other(other.to_string()),
        }
    }
}

impl fmt::Display for StackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StackStatus {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            Self::CreateInProgress => "CREATE_IN_PROGRESS",
            Self::CreateComplete => "CREATE_COMPLETE",
            Self::CreateFailed => "CREATE_FAILED",
            Self::DeleteComplete => "DELETE_COMPLETE",
            Self::DeleteFailed => "DELETE_FAILED",
            Self::DeleteInProgress => "DELETE_IN_PROGRESS",
            Self::ReviewInProgress => "REVIEW_IN_PROGRESS",
            Self::RollbackComplete => "ROLLBACK_COMPLETE",
            Self::RollbackFailed => "ROLLBACK_FAILED",
            Self::RollbackInProgress => "ROLLBACK_IN_PROGRESS",
            Self::UpdateComplete => "UPDATE_COMPLETE",
            Self::UpdateCompleteCleanupInProgress => "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS",
            Self::UpdateFailed => "UPDATE_FAILED",
            Self::UpdateInProgress => "UPDATE_IN_PROGRESS",
            Self::UpdateRollbackComplete => "UPDATE_ROLLBACK_COMPLETE",
            Self::UpdateRollbackCompleteCleanupInProgress => {
                "UPDATE_ROLLBACK_COMPLETE_CLEANUP_IN_PROGRESS"
            }
            Self::UpdateRollbackFailed => "UPDATE_ROLLBACK_FAILED",
            Self::UpdateRollbackInProgress => "UPDATE_ROLLBACK_IN_PROGRESS",
            Self::ImportInProgress => "IMPORT_IN_PROGRESS",
            Self::ImportComplete => "IMPORT_COMPLETE",
            Self::ImportRollbackInProgress => "IMPORT_ROLLBACK_IN_PROGRESS",
            Self::ImportRollbackFailed => "IMPORT_ROLLBACK_FAILED",
            Self::ImportRollbackComplete => "IMPORT_ROLLBACK_COMPLETE",
            Self::Other(s) => s.as_str(),
        }
    }

    /// The mutation the waiter has to sit out, if any.
    ///
    /// Only the three primary in-progress states count here. Cleanup, rollback,
    /// review and import phases are not treated as blocking a new deploy.
    pub(crate) fn in_flight_mutation(&self) -> Option<Mutation> {
        match self {
            Self::CreateInProgress => Some(Mutation::Create),
            Self::UpdateInProgress => Some(Mutation::Update),
            Self::DeleteInProgress => Some(Mutation::Delete),
            _ => None,
        }
    }

    pub(crate) fn is_in_progress(&self) -> bool {
        match self {
            Self::Other(s) => s.ends_with("_IN_PROGRESS"),
            _ => matches!(
                self,
                Self::CreateInProgress
                    | Self::DeleteInProgress
                    | Self::ReviewInProgress
                    | Self::RollbackInProgress
                    | Self::UpdateInProgress
                    | Self::UpdateCompleteCleanupInProgress
                    | Self::UpdateRollbackCompleteCleanupInProgress
                    | Self::UpdateRollbackInProgress
                    | Self::ImportInProgress
                    | Self::ImportRollbackInProgress
            ),
        }
    }

    pub(crate) fn color_spec(&self) -> Option<ColorSpec> {
        let mut spec = ColorSpec::new();
        if self.is_in_progress() {
            spec.set_fg(Some(Color::Blue));
        } else if self.is_complete() {
            spec.set_fg(Some(Color::Green));
        } else if self.is_failed() {
            spec.set_fg(Some(Color::Red));
        } else {
            return None;
        }
        Some(spec)
    }

    pub(crate) fn is_complete(&self) -> bool {
        matches!(
            self,
            Self::CreateComplete
                | Self::DeleteComplete
                | Self::RollbackComplete
                | Self::UpdateComplete
                | Self::UpdateRollbackComplete
                | Self::ImportComplete
                | Self::ImportRollbackComplete
        )
    }

    pub(crate) fn is_failed(&self) -> bool {
        matches!(
            self,
            Self::CreateFailed
                | Self::DeleteFailed
                | Self::RollbackFailed
                | Self::UpdateFailed
                | Self::UpdateRollbackFailed
                | Self::ImportRollbackFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_primary_in_progress_states_block() {
        assert_eq!(
            StackStatus::from("CREATE_IN_PROGRESS").in_flight_mutation(),
            Some(Mutation::Create)
        );
        assert_eq!(
            StackStatus::from("UPDATE_IN_PROGRESS").in_flight_mutation(),
            Some(Mutation::Update)
        );
        assert_eq!(
            StackStatus::from("DELETE_IN_PROGRESS").in_flight_mutation(),
            Some(Mutation::Delete)
        );

        for status in &[
            "CREATE_COMPLETE",
            "ROLLBACK_COMPLETE",
            "ROLLBACK_IN_PROGRESS",
            "UPDATE_ROLLBACK_IN_PROGRESS",
            "REVIEW_IN_PROGRESS",
            "DELETE_FAILED",
        ] {
            assert_eq!(StackStatus::from(*status).in_flight_mutation(), None, "{}", status);
        }
    }

    #[test]
    fn unknown_statuses_are_kept_verbatim() {
        let status = StackStatus::from("SOMETHING_NEW_IN_PROGRESS");
        assert_eq!(status, StackStatus::Other("SOMETHING_NEW_IN_PROGRESS".to_string()));
        assert_eq!(status.as_str(), "SOMETHING_NEW_IN_PROGRESS");
        assert!(status.is_in_progress());
        assert!(status.in_flight_mutation().is_none());
    }

    #[test]
    fn cleanup_phases_are_still_in_progress() {
        assert!(StackStatus::UpdateCompleteCleanupInProgress.is_in_progress());
        assert!(StackStatus::UpdateRollbackInProgress.is_in_progress());
        assert!(!StackStatus::UpdateRollbackComplete.is_in_progress());
    }

    #[test]
    fn colours_follow_outcome() {
        let blue = StackStatus::CreateInProgress.color_spec().unwrap();
        assert_eq!(blue.fg(), Some(&Color::Blue));
        let green = StackStatus::UpdateComplete.color_spec().unwrap();
        assert_eq!(green.fg(), Some(&Color::Green));
        let red = StackStatus::RollbackFailed.color_spec().unwrap();
        assert_eq!(red.fg(), Some(&Color::Red));
        assert!(StackStatus::Other("WEIRD".to_string()).color_spec().is_none());
    }
}
