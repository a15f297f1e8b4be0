use serde::Serialize;

use super::SubscriberEmail;
use super::SubscriptionSource;

/// One signup attempt, built at submit time and consumed by exactly one
/// request. Serialises to the body the form endpoint expects:
/// `{"email": "...", "source": "hero"}`.
#[derive(Debug, Serialize)]
pub struct NewSubscription {
    pub email: SubscriberEmail,
    pub source: SubscriptionSource,
}
