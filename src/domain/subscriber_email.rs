use serde::Serialize;

/// An email address that passed the (deliberately permissive) syntactic check
/// used by the signup forms: `local@domain.tld`, no whitespace, exactly one
/// `@`, and a `.` inside the domain with something on both sides of it.
///
/// Deliverability is not checked; the form service does that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    pub fn parse(email: String) -> Result<Self, String> {
        is_valid_email(&email)
            .then_some(Self(email.clone()))
            .ok_or(format!("Invalid email: {email:?}"))
    }
}

/// Equivalent to `^[^\s@]+@[^\s@]+\.[^\s@]+$`, with `\s` as browsers define it
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(is_regex_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // any dot that is neither the first nor the last char of the domain will do
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < domain.len() - 1)
}

/// Strip leading and trailing whitespace the way a browser's `String.trim`
/// does, i.e. by the same class the validity check uses
pub fn trim_email_input(value: &str) -> &str { value.trim_matches(is_regex_whitespace) }

/// The ECMAScript `\s` class. Unicode `White_Space` (what `char::is_whitespace`
/// uses) includes NEL but not the BOM; `\s` is the other way round.
fn is_regex_whitespace(c: char) -> bool {
    match c {
        '\u{0085}' => false,
        '\u{feff}' => true,
        c => c.is_whitespace(),
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str { &self.0 }
}
