use std::time::Duration;

use waitlist::domain::NotificationKind;
use waitlist::domain::SubscriptionSource;
use waitlist::subscriptions::SubmissionOutcome;
use waitlist::subscriptions::ERROR_MESSAGE;
use waitlist::subscriptions::FOLLOWUP_MESSAGE;
use waitlist::subscriptions::INVALID_EMAIL_MESSAGE;
use waitlist::subscriptions::SUBMITTING_LABEL;
use waitlist::subscriptions::SUBMIT_LABEL;
use waitlist::subscriptions::SUCCESS_MESSAGE;
use wiremock::matchers::any;
use wiremock::matchers::body_json;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::ResponseTemplate;

use crate::helpers::spawn_app;
use crate::helpers::spawn_app_with;
use crate::helpers::FORM_PATH;

async fn sleep_ms(ms: u64) { tokio::time::sleep(Duration::from_millis(ms)).await }

#[tokio::test]
async fn invalid_email_sends_nothing() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.form_server)
        .await;

    for (email, msg) in [
        ("", "empty"),
        ("   ", "whitespace"),
        ("not-an-email", "no at"),
        ("user@example", "no dot in domain"),
    ] {
        let outcome = app.submit(SubscriptionSource::Hero, email).await;
        assert_eq!(outcome, SubmissionOutcome::InvalidEmail, "{msg}");
        assert_eq!(
            app.shown(),
            vec![(NotificationKind::Error, INVALID_EMAIL_MESSAGE.to_string())],
            "{msg}"
        );
    }

    // the control was never touched
    let form = app.app.controller().form(SubscriptionSource::Hero);
    assert!(!form.submit.disabled);
    assert_eq!(form.submit.label, SUBMIT_LABEL);
}

#[tokio::test]
async fn accepted_signup() {
    let app = spawn_app().await;
    Mock::given(path(FORM_PATH))
        .and(method("POST"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({
            "email": "user@example.com",
            "source": "hero",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.form_server)
        .await;

    // whitespace around the address is trimmed before anything else
    let outcome = app
        .submit(SubscriptionSource::Hero, "  user@example.com ")
        .await;
    assert_eq!(outcome, SubmissionOutcome::Accepted);

    let form = app.app.controller().form(SubscriptionSource::Hero);
    assert_eq!(form.input.value, "");
    assert_eq!(
        app.shown(),
        vec![(NotificationKind::Success, SUCCESS_MESSAGE.to_string())]
    );

    // the informational toast replaces the success one after the follow-up delay
    sleep_ms(250).await;
    assert_eq!(
        app.shown(),
        vec![(NotificationKind::Info, FOLLOWUP_MESSAGE.to_string())]
    );
}

#[tokio::test]
async fn footer_form_is_tagged() {
    let app = spawn_app().await;
    Mock::given(path(FORM_PATH))
        .and(body_json(serde_json::json!({
            "email": "someone@example.org",
            "source": "footer",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.form_server)
        .await;

    let outcome = app
        .submit(SubscriptionSource::Footer, "someone@example.org")
        .await;
    assert_eq!(outcome, SubmissionOutcome::Accepted);

    // the other form is left alone
    let hero = app.app.controller().form(SubscriptionSource::Hero);
    assert!(!hero.submit.disabled);
}

#[tokio::test]
async fn counter_is_refreshed_after_signup() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.form_server)
        .await;
    assert_eq!(app.app.controller().counter_text(), "247+");

    // something else wrote to storage since the page loaded
    app.seed_subscribers(300);
    assert_eq!(app.app.controller().counter_text(), "247+");

    app.submit(SubscriptionSource::Hero, "user@example.com")
        .await;
    assert_eq!(app.app.controller().counter_text(), "300+");
}

#[tokio::test]
async fn counter_does_not_count_the_new_signup() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.form_server)
        .await;
    app.seed_subscribers(300);
    app.app.controller().refresh_counter();

    app.submit(SubscriptionSource::Hero, "user@example.com")
        .await;
    assert_eq!(app.app.controller().counter_text(), "300+");
    assert!(!app
        .storage
        .get_item(&app.storage_key)
        .unwrap()
        .unwrap()
        .contains("user@example.com"));
}

#[tokio::test]
async fn rejected_signup() {
    let app = spawn_app().await;
    Mock::given(path(FORM_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.form_server)
        .await;

    let outcome = app
        .submit(SubscriptionSource::Hero, "user@example.com")
        .await;
    assert_eq!(outcome, SubmissionOutcome::Failed);
    assert_eq!(
        app.shown(),
        vec![(NotificationKind::Error, ERROR_MESSAGE.to_string())]
    );

    let form = app.app.controller().form(SubscriptionSource::Hero);
    assert!(!form.submit.disabled);
    assert_eq!(form.submit.label, SUBMIT_LABEL);
    // the user may want to fix a typo and try again
    assert_eq!(form.input.value, "user@example.com");

    // no follow-up toast on failure
    sleep_ms(250).await;
    assert!(app
        .surface
        .history()
        .iter()
        .all(|n| n.kind == NotificationKind::Error));
}

#[tokio::test]
async fn unreachable_endpoint_reads_like_a_rejection() {
    // nothing listens on the discard port
    let app = spawn_app_with(|cfg| {
        cfg.form.endpoint = "http://127.0.0.1:9/f/waitlist".to_string();
    })
    .await;

    let outcome = app
        .submit(SubscriptionSource::Footer, "user@example.com")
        .await;
    assert_eq!(outcome, SubmissionOutcome::Failed);
    assert_eq!(
        app.shown(),
        vec![(NotificationKind::Error, ERROR_MESSAGE.to_string())]
    );

    let form = app.app.controller().form(SubscriptionSource::Footer);
    assert!(!form.submit.disabled);
    assert_eq!(form.submit.label, SUBMIT_LABEL);
}

#[tokio::test]
async fn control_is_disabled_while_in_flight() {
    let app = spawn_app().await;
    Mock::given(path(FORM_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&app.form_server)
        .await;

    let controller = app.app.controller();
    let before = controller.form(SubscriptionSource::Hero).submit;

    let (outcome, during) = tokio::join!(
        app.submit(SubscriptionSource::Hero, "user@example.com"),
        async {
            sleep_ms(100).await;
            controller.form(SubscriptionSource::Hero).submit
        }
    );

    assert_eq!(outcome, SubmissionOutcome::Accepted);
    assert!(during.disabled);
    assert_eq!(during.label, SUBMITTING_LABEL);
    assert_eq!(controller.form(SubscriptionSource::Hero).submit, before);
}

#[tokio::test]
async fn control_is_restored_when_submit_is_dropped() {
    let app = spawn_app().await;
    Mock::given(path(FORM_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&app.form_server)
        .await;

    let controller = app.app.controller();
    let before = controller.form(SubscriptionSource::Footer).submit;

    let timed_out = tokio::time::timeout(
        Duration::from_millis(100),
        app.submit(SubscriptionSource::Footer, "user@example.com"),
    )
    .await;
    assert!(timed_out.is_err());
    assert_eq!(controller.form(SubscriptionSource::Footer).submit, before);
}

#[tokio::test]
async fn submit_while_in_flight_is_ignored() {
    let app = spawn_app().await;
    Mock::given(path(FORM_PATH))
        .and(body_json(serde_json::json!({
            "email": "first@example.com",
            "source": "hero",
        })))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&app.form_server)
        .await;

    let controller = app.app.controller();
    let before = controller.form(SubscriptionSource::Hero).submit;

    let (first, second) = tokio::join!(
        app.submit(SubscriptionSource::Hero, "first@example.com"),
        async {
            sleep_ms(50).await;
            app.submit(SubscriptionSource::Hero, "second@example.com")
                .await
        }
    );

    assert_eq!(first, SubmissionOutcome::Accepted);
    assert_eq!(second, SubmissionOutcome::InFlight);
    // the ignored submit neither sent nor reported anything
    assert_eq!(
        app.shown(),
        vec![(NotificationKind::Success, SUCCESS_MESSAGE.to_string())]
    );
    assert_eq!(controller.form(SubscriptionSource::Hero).submit, before);
}

#[tokio::test]
async fn form_can_be_resubmitted_after_a_failure() {
    let app = spawn_app().await;
    Mock::given(path(FORM_PATH))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&app.form_server)
        .await;
    Mock::given(path(FORM_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.form_server)
        .await;

    let outcome = app
        .submit(SubscriptionSource::Hero, "user@example.com")
        .await;
    assert_eq!(outcome, SubmissionOutcome::Failed);

    let outcome = app
        .submit(SubscriptionSource::Hero, "user@example.com")
        .await;
    assert_eq!(outcome, SubmissionOutcome::Accepted);
}
