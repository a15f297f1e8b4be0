//! Interactive core of the waitlist landing page: the signup forms, the toast
//! notifications reporting their outcome, and the subscriber counter.
//!
//! Page markup is not modelled beyond what the forms touch (`page`); toasts
//! are drawn by whatever `NotificationSurface` the caller provides.

pub mod configuration;
pub mod domain;
pub mod form_client;
pub mod notifications;
pub mod page;
pub mod startup;
pub mod storage;
pub mod subscriptions;
pub mod telemetry;
pub mod utils;
