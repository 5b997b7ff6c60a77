//! Dialog command definitions.
//!
//! Blocking browser prompts (`confirm`, `alert`) modelled as Shell requests.

use crux_core::{capability::Operation, command, Command};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

// Operations that the Shell needs to perform for dialogs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DialogOperation {
    Confirm { message: String },
    Alert { message: String },
}

// The output from dialog operations (shell tells us what the user did)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DialogOutput {
    Confirmed(bool),
    Dismissed,
}

impl DialogOutput {
    /// Whether the user accepted a confirmation prompt
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(true))
    }
}

impl Operation for DialogOperation {
    type Output = DialogOutput;
}

/// Command-based dialog API
pub struct Dialog<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Dialog<Effect, Event>
where
    Effect: Send + From<crux_core::Request<DialogOperation>> + 'static,
    Event: Send + 'static,
{
    /// Ask the user a yes/no question
    pub fn confirm(message: impl Into<String>) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(DialogOperation::Confirm {
            message: message.into(),
        })
    }

    /// Show a message; resolves once it was dismissed
    pub fn alert(message: impl Into<String>) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(DialogOperation::Alert {
            message: message.into(),
        })
    }
}

/// Request builder for dialog operations
#[must_use]
pub struct RequestBuilder<Effect, Event> {
    operation: DialogOperation,
    _effect: PhantomData<Effect>,
    _event: PhantomData<fn() -> Event>,
}

impl<Effect, Event> RequestBuilder<Effect, Event>
where
    Effect: Send + From<crux_core::Request<DialogOperation>> + 'static,
    Event: Send + 'static,
{
    fn new(operation: DialogOperation) -> Self {
        Self {
            operation,
            _effect: PhantomData,
            _event: PhantomData,
        }
    }

    /// Build the request into a Command RequestBuilder
    pub fn build(
        self,
    ) -> command::RequestBuilder<Effect, Event, impl std::future::Future<Output = DialogOutput>>
    {
        command::RequestBuilder::new(move |ctx| async move {
            Command::request_from_shell(self.operation)
                .into_future(ctx)
                .await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_positive_confirmation_counts() {
        assert!(DialogOutput::Confirmed(true).is_confirmed());
        assert!(!DialogOutput::Confirmed(false).is_confirmed());
        assert!(!DialogOutput::Dismissed.is_confirmed());
    }
}
