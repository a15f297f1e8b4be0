use std::fmt::Debug;

use reqwest::Client;

use crate::domain::NewSubscription;
use crate::utils::error_chain_fmt;

/// Client for the third-party form-handling endpoint (the form's `action`).
///
/// Holds one `reqwest::Client`, so connections are pooled across submissions;
/// clone the `FormClient` rather than building a new one per request.
#[derive(Clone)]
pub struct FormClient {
    http_client: Client,
    endpoint: String,
}

#[derive(thiserror::Error)]
pub enum SubmitError {
    /// The service answered, but not with 2xx
    #[error("Form endpoint rejected the submission")]
    Rejected(#[source] reqwest::Error),
    /// The request never completed (DNS, refused connection, reset, ...)
    #[error("Could not reach the form endpoint")]
    Transport(#[source] reqwest::Error),
}

impl Debug for SubmitError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(e: reqwest::Error) -> Self {
        match e.is_status() {
            true => Self::Rejected(e),
            false => Self::Transport(e),
        }
    }
}

impl FormClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            http_client: Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str { &self.endpoint }

    /// Exactly one `POST` per call. No timeout and no retry: a hung request
    /// stays pending until the transport gives up.
    #[tracing::instrument(
        name = "POSTing subscription to form endpoint",
        skip(self, subscription),
        fields(source = %subscription.source),
        err(Debug)
    )]
    pub async fn submit(
        &self,
        subscription: &NewSubscription,
    ) -> Result<(), SubmitError> {
        // `.json` sets `Content-Type: application/json`
        self.http_client
            .post(&self.endpoint)
            .json(subscription)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
