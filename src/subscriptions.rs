use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::domain::NewSubscription;
use crate::domain::NotificationKind;
use crate::domain::SubscriberEmail;
use crate::domain::trim_email_input;
use crate::domain::SubscriptionSource;
use crate::form_client::FormClient;
use crate::form_client::SubmitError;
use crate::notifications::NotificationManager;
use crate::page::FieldFeedback;
use crate::page::FormState;
use crate::page::SubmitControl;
use crate::page::BORDER_FOCUS;
use crate::storage::SubscriberCounter;
use crate::telemetry::track_event;
use crate::utils::lock;

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const SUCCESS_MESSAGE: &str =
    "🎉 Welcome to SIRAS! You're now on our exclusive waitlist. We'll notify you when we launch!";
pub const ERROR_MESSAGE: &str = "Sorry, there was an error. Please try again.";
pub const FOLLOWUP_MESSAGE: &str =
    "💡 Pro tip: Follow us on GitHub for the latest updates and early access to new features!";

pub const SUBMIT_LABEL: &str = "Join Waitlist";
pub const SUBMITTING_LABEL: &str = r#"<i class="fas fa-spinner fa-spin"></i> Submitting..."#;

/// How a submit action ended, as far as the user is concerned. Rejections and
/// transport failures look the same from the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Nothing was sent
    InvalidEmail,
    /// The form's control was already disabled by an earlier submit that is
    /// still waiting on the form service; nothing was sent
    InFlight,
    Accepted,
    Failed,
}

impl SubmissionOutcome {
    pub fn from_result(result: &Result<(), SubmitError>) -> Self {
        match result {
            Ok(()) => Self::Accepted,
            Err(_) => Self::Failed,
        }
    }
}

struct PageState {
    hero: FormState,
    footer: FormState,
    /// Shown in both counter nodes (hero and footer)
    counter: String,
}

impl PageState {
    fn form_mut(
        &mut self,
        source: SubscriptionSource,
    ) -> &mut FormState {
        match source {
            SubscriptionSource::Hero => &mut self.hero,
            SubscriptionSource::Footer => &mut self.footer,
        }
    }

    fn form(
        &self,
        source: SubscriptionSource,
    ) -> &FormState {
        match source {
            SubscriptionSource::Hero => &self.hero,
            SubscriptionSource::Footer => &self.footer,
        }
    }
}

/// Puts a submit control back the way it was when dropped, so the button
/// comes back on every way out of `submit` (including the future being
/// dropped mid-request).
struct RestoreSubmitControl<'a> {
    page: &'a Mutex<PageState>,
    source: SubscriptionSource,
    original: SubmitControl,
}

impl Drop for RestoreSubmitControl<'_> {
    fn drop(&mut self) { lock(self.page).form_mut(self.source).submit = self.original.clone(); }
}

/// Drives the hero and footer signup forms: validation, the POST to the form
/// service, the counter, and the toasts reporting each outcome.
///
/// All page state is owned by the instance.
pub struct SubscriptionController {
    form_client: FormClient,
    notifications: NotificationManager,
    counter: SubscriberCounter,
    page: Mutex<PageState>,
}

impl SubscriptionController {
    /// Also fills in the counter, as on page load.
    pub fn new(
        form_client: FormClient,
        notifications: NotificationManager,
        counter: SubscriberCounter,
    ) -> Self {
        let controller = Self {
            form_client,
            notifications,
            counter,
            page: Mutex::new(PageState {
                hero: FormState::new(SUBMIT_LABEL),
                footer: FormState::new(SUBMIT_LABEL),
                counter: String::new(),
            }),
        };
        controller.refresh_counter();
        controller
    }

    pub fn notifications(&self) -> &NotificationManager { &self.notifications }

    /// Snapshot of one form
    pub fn form(
        &self,
        source: SubscriptionSource,
    ) -> FormState {
        lock(&self.page).form(source).clone()
    }

    pub fn counter_text(&self) -> String { lock(&self.page).counter.clone() }

    pub fn refresh_counter(&self) {
        let text = self.counter.display();
        lock(&self.page).counter = text;
    }

    /// A keystroke: new field value, border recomputed.
    pub fn input(
        &self,
        source: SubscriptionSource,
        value: impl Into<String>,
    ) {
        let mut page = lock(&self.page);
        let input = &mut page.form_mut(source).input;
        input.value = value.into();
        input.border_color = FieldFeedback::for_input(&input.value)
            .border_color()
            .to_string();
    }

    pub fn focus(
        &self,
        source: SubscriptionSource,
    ) {
        lock(&self.page).form_mut(source).input.border_color = BORDER_FOCUS.to_string();
    }

    /// The Ctrl/Cmd+K shortcut: focus the hero email field.
    pub fn focus_shortcut(&self) { self.focus(SubscriptionSource::Hero) }

    pub fn blur(
        &self,
        source: SubscriptionSource,
    ) {
        let mut page = lock(&self.page);
        let input = &mut page.form_mut(source).input;
        input.border_color = FieldFeedback::for_input(&input.value)
            .border_color()
            .to_string();
    }

    /// The form's submit action.
    ///
    /// A disabled control does nothing. Invalid input is reported without
    /// touching the network. Otherwise the submit control is disabled for
    /// exactly one request and restored afterwards, whatever happened.
    #[tracing::instrument(
        name = "Submitting waitlist form",
        skip(self),
        fields(subscriber_email = tracing::field::Empty)
    )]
    pub async fn submit(
        &self,
        source: SubscriptionSource,
    ) -> SubmissionOutcome {
        if lock(&self.page).form(source).submit.disabled {
            tracing::debug!("submit control is disabled, ignoring");
            return SubmissionOutcome::InFlight;
        }

        track_event(
            "formspree_subscription_attempted",
            &BTreeMap::from([("source", source.to_string())]),
        );

        let raw = trim_email_input(&lock(&self.page).form(source).input.value).to_string();
        tracing::Span::current().record("subscriber_email", tracing::field::display(&raw));

        let email = match SubscriberEmail::parse(raw) {
            Ok(email) => email,
            Err(e) => {
                tracing::info!("{e}");
                self.notifications
                    .notify(INVALID_EMAIL_MESSAGE, NotificationKind::Error);
                return SubmissionOutcome::InvalidEmail;
            }
        };

        // checked again under the same lock that disables the control, in case
        // another submit got there while this one was validating
        let Some(_restore) = self.begin_submitting(source) else {
            return SubmissionOutcome::InFlight;
        };

        let subscription = NewSubscription { email, source };
        let result = self.form_client.submit(&subscription).await;
        let outcome = SubmissionOutcome::from_result(&result);

        match result {
            Ok(()) => self.accepted(subscription),
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "waitlist signup failed"
                );
                self.notifications
                    .notify(ERROR_MESSAGE, NotificationKind::Error);
            }
        }

        outcome
    }

    /// Disable the control and swap in the spinner; undone when the returned
    /// guard is dropped. `None` if the control is already disabled, so the
    /// guard never records the spinner as the state to go back to.
    fn begin_submitting(
        &self,
        source: SubscriptionSource,
    ) -> Option<RestoreSubmitControl<'_>> {
        let mut page = lock(&self.page);
        let submit = &mut page.form_mut(source).submit;
        if submit.disabled {
            return None;
        }
        let original = submit.clone();
        submit.disabled = true;
        submit.label = SUBMITTING_LABEL.to_string();
        Some(RestoreSubmitControl {
            page: &self.page,
            source,
            original,
        })
    }

    fn accepted(
        &self,
        subscription: NewSubscription,
    ) {
        lock(&self.page).form_mut(subscription.source).input.value.clear();
        self.notifications
            .notify(SUCCESS_MESSAGE, NotificationKind::Success);
        // the stored list is not appended to here; the counter only moves if
        // something else writes to storage
        self.refresh_counter();

        track_event(
            "formspree_signup_success",
            &BTreeMap::from([
                ("source", subscription.source.to_string()),
                ("email", subscription.email.as_ref().to_string()),
            ]),
        );

        let notifications = self.notifications.clone();
        let delay = notifications.timings().followup_delay();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            notifications.notify(FOLLOWUP_MESSAGE, NotificationKind::Info);
        });
    }
}
