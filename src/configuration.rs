use std::env;
use std::env::current_dir;
use std::fmt::Display;
use std::path::PathBuf;
use std::time::Duration;

use config::Config;
use config::ConfigError;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::form_client::FormClient;
use crate::storage::LocalStorage;
use crate::storage::SubscriberCounter;

/// Global configuration, loaded from `configuration/*.yaml`. See
/// `get_configuration`.
#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub form: FormSettings,
    pub counter: CounterSettings,
    pub notifications: NotificationSettings,
}

/// The third-party form-handling endpoint
#[derive(Deserialize, Clone, Debug)]
pub struct FormSettings {
    /// Full URL the form is POSTed to (the form's `action`)
    pub endpoint: String,
}

impl FormSettings {
    pub fn client(&self) -> FormClient { FormClient::new(self.endpoint.clone()) }
}

/// Where the cached subscriber list lives, and the floor of the displayed
/// count.
#[derive(Deserialize, Clone, Debug)]
pub struct CounterSettings {
    /// JSON file standing in for the browser's local storage
    pub storage_path: PathBuf,

    /// Key under which the list of emails is stored
    pub storage_key: String,

    /// The displayed count never goes below this
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub floor: usize,
}

impl CounterSettings {
    pub fn counter(&self) -> SubscriberCounter {
        SubscriberCounter::new(
            LocalStorage::new(self.storage_path.clone()),
            self.storage_key.clone(),
            self.floor,
        )
    }
}

/// Animation pacing and lifetimes, all in milliseconds.
#[derive(Deserialize, Clone, Debug)]
pub struct NotificationSettings {
    /// Delay between mounting a toast and starting its enter transition
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub enter_delay_milliseconds: u64,

    /// Duration of the enter/exit transition
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub transition_milliseconds: u64,

    /// How long a toast stays up before it dismisses itself
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub lifetime_milliseconds: u64,

    /// Delay before the informational toast that follows a successful signup
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub followup_delay_milliseconds: u64,
}

impl NotificationSettings {
    pub fn enter_delay(&self) -> Duration { Duration::from_millis(self.enter_delay_milliseconds) }

    pub fn transition(&self) -> Duration { Duration::from_millis(self.transition_milliseconds) }

    pub fn lifetime(&self) -> Duration { Duration::from_millis(self.lifetime_milliseconds) }

    pub fn followup_delay(&self) -> Duration {
        Duration::from_millis(self.followup_delay_milliseconds)
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enter_delay_milliseconds: 100,
            transition_milliseconds: 300,
            lifetime_milliseconds: 5000,
            followup_delay_milliseconds: 3000,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Display for Environment {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Environment::Local => "local",
                Environment::Production => "production",
            }
        )
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            e => Err(format!("Invalid environment: {e}")),
        }
    }
}

/// Load yaml configuration files at `<project_root>/configuration`.
///
/// `base.yaml` is always read, then the file named after `APP_ENVIRONMENT`
/// (`local` by default), then `APP_*` env vars.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let cfg_dir = current_dir()
        .map_err(|e| ConfigError::Message(format!("could not get current dir: {e}")))?
        .join("configuration");

    let env: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or("local".to_string())
        .try_into()
        .map_err(ConfigError::Message)?;

    tracing::debug!("loading config for {env} env");

    let settings = Config::builder()
        .add_source(config::File::from(cfg_dir.join("base.yaml")))
        .add_source(config::File::from(cfg_dir.join(format!("{env}.yaml"))))
        .add_source(
            // env vars are -always- parsed as String, hence `serde-aux` on the numeric
            // fields
            //
            // `APP_NOTIFICATIONS__LIFETIME_MILLISECONDS=8000` ->
            // `Settings.notifications.lifetime_milliseconds`
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
