use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use async_graphql::extensions::{Extension, ExtensionContext, ExtensionFactory, NextExecute};
use async_graphql::Response;

/// Error returned from a resolver, tagged with a type name that the show
/// and hide lists match against.
///
/// Domain errors are reported to the client unless their type is hidden.
/// Internal errors are replaced with the default message unless their
/// type is shown. Convert into `async_graphql::Error` with `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverError {
    type_name: Cow<'static, str>,
    message: String,
    internal: bool,
}

impl ResolverError {
    pub fn domain(type_name: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        ResolverError {
            type_name: type_name.into(),
            message: message.into(),
            internal: false,
        }
    }

    pub fn internal(type_name: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        ResolverError {
            type_name: type_name.into(),
            message: message.into(),
            internal: true,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_internal(&self) -> bool {
        self.internal
    }
}

impl fmt::Display for ResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ResolverError {}

/// Decides which resolver error messages reach the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorMessagePolicy {
    default_message: String,
    show: Vec<String>,
    hide: Vec<String>,
}

impl ErrorMessagePolicy {
    pub fn new(default_message: String, show: Vec<String>, hide: Vec<String>) -> Self {
        ErrorMessagePolicy {
            default_message,
            show,
            hide,
        }
    }

    fn listed(list: &[String], type_name: &str) -> bool {
        list.iter().any(|entry| entry == type_name)
    }

    /// Message to report for `error`.
    pub fn message_for<'a>(&'a self, error: &'a ResolverError) -> &'a str {
        let visible = if error.is_internal() {
            Self::listed(&self.show, error.type_name())
        } else {
            !Self::listed(&self.hide, error.type_name())
        };

        if visible {
            error.message()
        } else {
            &self.default_message
        }
    }
}

/// Extension rewriting resolver error messages according to an
/// [`ErrorMessagePolicy`].
pub struct ErrorMasking {
    policy: Arc<ErrorMessagePolicy>,
}

impl ErrorMasking {
    pub fn new(policy: ErrorMessagePolicy) -> Self {
        ErrorMasking {
            policy: Arc::new(policy),
        }
    }
}

impl ExtensionFactory for ErrorMasking {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(ErrorMaskingExtension {
            policy: self.policy.clone(),
        })
    }
}

struct ErrorMaskingExtension {
    policy: Arc<ErrorMessagePolicy>,
}

#[async_trait::async_trait]
impl Extension for ErrorMaskingExtension {
    async fn execute(
        &self,
        ctx: &ExtensionContext<'_>,
        operation_name: Option<&str>,
        next: NextExecute<'_>,
    ) -> Response {
        let mut response = next.run(ctx, operation_name).await;

        for error in response.errors.iter_mut() {
            let replacement = error.source::<ResolverError>().and_then(|source| {
                let message = self.policy.message_for(source);
                (message != source.message()).then(|| {
                    tracing::warn!(
                        error_type = source.type_name(),
                        error = source.message(),
                        "Hiding resolver error message from client"
                    );
                    message.to_string()
                })
            });
            if let Some(message) = replacement {
                error.message = message;
            }
        }

        response
    }
}
