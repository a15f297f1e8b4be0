use std::sync::Arc;

use crate::configuration::Settings;
use crate::domain::SubscriptionSource;
use crate::notifications::NotificationManager;
use crate::notifications::NotificationSurface;
use crate::subscriptions::SubmissionOutcome;
use crate::subscriptions::SubscriptionController;

/// Everything a page needs, wired from `Settings`. Not to be confused with the
/// `SubscriptionController` it wraps!
pub struct Application {
    controller: SubscriptionController,
}

impl Application {
    /// `surface` is where toasts go: the terminal for the binary, memory in
    /// tests.
    pub fn build(
        cfg: &Settings,
        surface: Arc<dyn NotificationSurface>,
    ) -> Self {
        let notifications = NotificationManager::new(surface, cfg.notifications.clone());
        let controller =
            SubscriptionController::new(cfg.form.client(), notifications, cfg.counter.counter());
        Self { controller }
    }

    pub fn controller(&self) -> &SubscriptionController { &self.controller }

    /// Type `email` into the `source` form, submit it, then wait for every toast
    /// (including the delayed follow-up) to go away. Consumes `self`, so this
    /// should be the final call.
    pub async fn run_until_settled(
        self,
        source: SubscriptionSource,
        email: &str,
    ) -> SubmissionOutcome {
        tracing::info!(counter = %self.controller.counter_text(), "waitlist counter");
        self.controller.input(source, email);
        self.controller.blur(source);

        let outcome = self.controller.submit(source).await;

        if outcome == SubmissionOutcome::Accepted {
            // the follow-up toast isn't up yet; don't mistake the gap for the end
            tokio::time::sleep(self.controller.notifications().timings().followup_delay()).await;
        }
        self.controller.notifications().wait_until_clear().await;
        outcome
    }
}
