use crate::aws::StackWaiters;
use crate::error::Error;
use crate::poll::PollSettings;
use crate::stack_status::{Mutation, StackStatus};

/// What the pre-flight check found.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum WaitOutcome {
    /// Nothing was in flight (or the stack could not be inspected).
    Idle,
    /// A mutation was in flight and has reached this status.
    Settled(StackStatus),
    /// A mutation was in flight and was still running when the wait ran out.
    TimedOut,
}

/// Block until `stack_name` has no create, update or delete in flight.
///
/// Never fails: a status query that errors, for whatever reason, is treated the same as
/// a stack that does not exist, and nothing is waited for. This is a best-effort guard,
/// not protection against other deployers racing us.
#[tracing::instrument(skip(client, settings))]
pub(crate) async fn wait_for_idle<C>(
    client: &C,
    stack_name: &str,
    settings: &PollSettings,
) -> WaitOutcome
where
    C: StackWaiters + ?Sized,
{
    let status = match client.describe_stack_status(stack_name).await {
        Ok(Some(status)) => status,
        Ok(None) => {
            tracing::debug!("stack does not exist");
            return WaitOutcome::Idle;
        }
        Err(e) => {
            // an unreachable stack is not blocking anything
            tracing::debug!(err = %e, "could not describe stack, not waiting");
            return WaitOutcome::Idle;
        }
    };

    let mutation = match status.in_flight_mutation() {
        Some(mutation) => mutation,
        None => {
            tracing::debug!(%status, "stack is idle");
            return WaitOutcome::Idle;
        }
    };

    tracing::info!(%status, %mutation, "waiting for in-flight mutation to finish");
    let res = match mutation {
        Mutation::Create => client.wait_until_create_complete(stack_name, settings).await,
        Mutation::Update => client.wait_until_update_complete(stack_name, settings).await,
        Mutation::Delete => client.wait_until_delete_complete(stack_name, settings).await,
    };

    match res {
        Ok(status) => WaitOutcome::Settled(status),
        Err(Error::Timeout(status)) => {
            tracing::warn!(%status, max_wait = ?settings.max_wait, "gave up waiting for stack");
            WaitOutcome::TimedOut
        }
        // transient errors only escape the poll once the deadline has passed
        Err(e) if e.is_transient() => {
            tracing::warn!(err = %e, %status, max_wait = ?settings.max_wait, "gave up waiting for stack");
            WaitOutcome::TimedOut
        }
        Err(e) => {
            tracing::warn!(err = %e, "wait failed, carrying on");
            WaitOutcome::Idle
        }
    }
}
