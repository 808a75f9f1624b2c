use super::{DescribeStackStatus, StackWaiters};
use crate::error::Error;
use crate::stack_status::StackStatus;

use aws_sdk_cloudformation::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_cloudformation::operation::describe_stacks::DescribeStacksError;
use aws_sdk_cloudformation::Client;

#[async_trait::async_trait]
impl DescribeStackStatus for Client {
    async fn describe_stack_status(&self, stack_name: &str) -> Result<Option<StackStatus>, Error> {
        let response = match Client::describe_stacks(self)
            .stack_name(stack_name)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return classify_sdk_error(e),
        };

        Ok(response
            .stacks()
            .iter()
            .find_map(|stack| stack.stack_status())
            .map(|status| StackStatus::from(status.as_str())))
    }
}

impl StackWaiters for Client {}

fn classify_sdk_error<R>(
    e: SdkError<DescribeStacksError, R>,
) -> Result<Option<StackStatus>, Error> {
    match e {
        SdkError::TimeoutError(_) => Err(Error::Transport("request timed out".to_string())),
        SdkError::DispatchFailure(_) => Err(Error::Transport("dispatch failure".to_string())),
        SdkError::ResponseError(_) => {
            Err(Error::Transport("unreadable response".to_string()))
        }
        SdkError::ServiceError(err) => {
            let err = err.err();
            classify_service_error(err.code(), err.message())
        }
        _ => Err(Error::Service {
            code: "Unknown".to_string(),
            message: "request could not be constructed".to_string(),
        }),
    }
}

// DescribeStacks reports a missing stack as a validation error rather than an empty list.
fn classify_service_error(
    code: Option<&str>,
    message: Option<&str>,
) -> Result<Option<StackStatus>, Error> {
    let message = message.unwrap_or_default();
    match code {
        Some("ValidationError") if message.contains("does not exist") => Ok(None),
        Some("Throttling") => Err(Error::Throttled),
        Some("ExpiredToken") => Err(Error::CredentialsExpired),
        code => Err(Error::Service {
            code: code.unwrap_or("Unknown").to_string(),
            message: message.to_string(),
        }),
    }
}
