mod new_subscription;
mod notification;
mod subscriber_email;
mod subscription_source;
// allow external `use` statements to skip `new_subscription` etc
pub use new_subscription::NewSubscription;
pub use notification::Notification;
pub use notification::NotificationKind;
pub use notification::NotificationPhase;
pub use subscriber_email::is_valid_email;
pub use subscriber_email::trim_email_input;
pub use subscriber_email::SubscriberEmail;
pub use subscription_source::SubscriptionSource;
