use crate::aws::DescribeStackStatus;
use crate::error::Error;
use crate::stack_status::{Mutation, StackStatus};
use backoff::ExponentialBackoffBuilder;
use std::sync::Mutex;
use std::time::Duration;

pub(crate) const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(30 * 60);
pub(crate) const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_MAX_POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy)]
pub(crate) struct PollSettings {
    pub(crate) initial_interval: Duration,
    pub(crate) max_interval: Duration,
    pub(crate) max_wait: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            initial_interval: DEFAULT_POLL_INTERVAL,
            max_interval: DEFAULT_MAX_POLL_INTERVAL,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}

impl PollSettings {
    /// Defaults with any command line overrides applied.
    pub(crate) fn with_overrides(
        initial_interval: Option<Duration>,
        max_wait: Option<Duration>,
    ) -> Self {
        let defaults = Self::default();
        let initial_interval = initial_interval.unwrap_or(defaults.initial_interval);
        Self {
            initial_interval,
            max_interval: defaults.max_interval.max(initial_interval),
            max_wait: max_wait.unwrap_or(defaults.max_wait),
        }
    }
}

/// Poll the stack until it leaves every `*_IN_PROGRESS` state.
///
/// A stack that disappears during a delete counts as `DELETE_COMPLETE`. Throttling and
/// transport failures keep the poll going; anything else ends it. If the stack is still
/// in progress once `max_wait` has elapsed, `Error::Timeout` is returned.
#[tracing::instrument(skip(source, settings))]
pub(crate) async fn wait_until_settled<S>(
    source: &S,
    stack_name: &str,
    mutation: Mutation,
    settings: &PollSettings,
) -> Result<StackStatus, Error>
where
    S: DescribeStackStatus + ?Sized,
{
    let policy = ExponentialBackoffBuilder::new()
        .with_initial_interval(settings.initial_interval)
        .with_max_interval(settings.max_interval)
        .with_max_elapsed_time(Some(settings.max_wait))
        .build();

    let last_seen = Mutex::new(None);
    let last_seen = &last_seen;

    let status = backoff::future::retry(policy, move || async move {
        match source.describe_stack_status(stack_name).await {
            Ok(Some(status)) => {
                note_transition(last_seen, &status);
                if status.is_in_progress() {
                    // any errors that deserve another poll are `backoff::Error::transient`
                    Err(backoff::Error::transient(Error::Timeout(status)))
                } else {
                    Ok(status)
                }
            }
            Ok(None) if mutation == Mutation::Delete => {
                tracing::debug!("stack no longer exists");
                Ok(StackStatus::DeleteComplete)
            }
            Ok(None) => Err(backoff::Error::permanent(Error::StackVanished(
                stack_name.to_string(),
            ))),
            Err(e) if e.is_transient() => {
                tracing::trace!(err = %e, "transient error, retrying");
                Err(backoff::Error::transient(e))
            }
            Err(e) => Err(backoff::Error::permanent(e)),
        }
    })
    .await;

    let status = match status {
        Ok(status) => status,
        // the deadline can land on a throttled poll; the stack was still busy
        Err(e) if e.is_transient() => match current(last_seen) {
            Some(status) if status.is_in_progress() => return Err(Error::Timeout(status)),
            _ => return Err(e),
        },
        Err(e) => return Err(e),
    };

    tracing::info!(%status, "stack settled");
    Ok(status)
}

fn current(last_seen: &Mutex<Option<StackStatus>>) -> Option<StackStatus> {
    match last_seen.lock() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

fn note_transition(last_seen: &Mutex<Option<StackStatus>>, status: &StackStatus) {
    let mut last_seen = match last_seen.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if last_seen.as_ref() != Some(status) {
        tracing::info!(%status, "stack status changed");
        *last_seen = Some(status.clone());
    } else {
        tracing::trace!(%status, "still waiting");
    }
}
