mod aws_sdk;

use crate::error::Error;
use crate::poll::{self, PollSettings};
use crate::stack_status::{Mutation, StackStatus};

/// Read access to the current status of a stack.
#[async_trait::async_trait]
pub(crate) trait DescribeStackStatus: Sync {
    /// `Ok(None)` means the service does not know about the stack.
    async fn describe_stack_status(&self, stack_name: &str) -> Result<Option<StackStatus>, Error>;
}

/// Blocking waits for an in-flight mutation to settle, one per kind of mutation.
///
/// The default implementations poll `describe_stack_status`.
#[async_trait::async_trait]
pub(crate) trait StackWaiters: DescribeStackStatus {
    async fn wait_until_create_complete(
        &self,
        stack_name: &str,
        settings: &PollSettings,
    ) -> Result<StackStatus, Error> {
        poll::wait_until_settled(self, stack_name, Mutation::Create, settings).await
    }

    async fn wait_until_update_complete(
        &self,
        stack_name: &str,
        settings: &PollSettings,
    ) -> Result<StackStatus, Error> {
        poll::wait_until_settled(self, stack_name, Mutation::Update, settings).await
    }

    async fn wait_until_delete_complete(
        &self,
        stack_name: &str,
        settings: &PollSettings,
    ) -> Result<StackStatus, Error> {
        poll::wait_until_settled(self, stack_name, Mutation::Delete, settings).await
    }
}
