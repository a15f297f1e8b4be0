use std::sync::Arc;

use anyhow::Context;
use waitlist::configuration::get_configuration;
use waitlist::domain::SubscriptionSource;
use waitlist::notifications::TerminalSurface;
use waitlist::startup::Application;
use waitlist::subscriptions::SubmissionOutcome;
use waitlist::telemetry::get_subscriber;
use waitlist::telemetry::init_subscriber;

const USAGE: &str = "usage: waitlist <hero|footer> <email>";

/// Initialise telemetry, load config, and submit one email to the waitlist.
///
/// Toasts are printed on stdout; logs (bunyan JSON) go to stderr.
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("waitlist", "info", std::io::stderr);
    init_subscriber(subscriber)?;

    let mut args = std::env::args().skip(1);
    let (source, email) = match (args.next(), args.next(), args.next()) {
        (Some(source), Some(email), None) => (source, email),
        _ => anyhow::bail!(USAGE),
    };
    let source = SubscriptionSource::try_from(source)
        .map_err(anyhow::Error::msg)
        .context(USAGE)?;

    let cfg = get_configuration().context("could not load configuration")?;

    let app = Application::build(&cfg, Arc::new(TerminalSurface));
    let outcome = app.run_until_settled(source, &email).await;

    match outcome {
        SubmissionOutcome::Accepted => tracing::info!("signup accepted"),
        // already reported by toast
        SubmissionOutcome::InvalidEmail
        | SubmissionOutcome::InFlight
        | SubmissionOutcome::Failed => {
            tracing::warn!(?outcome, "signup not accepted")
        }
    }

    Ok(())
}
