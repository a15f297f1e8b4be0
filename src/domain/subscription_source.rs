use std::fmt::Display;

use serde::Serialize;

/// Which of the two signup forms an attempt came from. Carried through to the
/// form service and the logs, never interpreted locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionSource {
    Hero,
    Footer,
}

impl SubscriptionSource {
    pub fn all() -> [Self; 2] { [Self::Hero, Self::Footer] }
}

impl Display for SubscriptionSource {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SubscriptionSource::Hero => "hero",
                SubscriptionSource::Footer => "footer",
            }
        )
    }
}

impl TryFrom<String> for SubscriptionSource {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "hero" => Ok(Self::Hero),
            "footer" => Ok(Self::Footer),
            e => Err(format!("Invalid form: {e:?} (expected hero or footer)")),
        }
    }
}
