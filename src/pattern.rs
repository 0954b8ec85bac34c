//! URL / e-mail classification of extracted letter runs.
use std::sync::LazyLock;

use regex::Regex;

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?|ftp|file)://[-a-zA-Z0-9+&@#/%?=~_|!:,.;]*[-a-zA-Z0-9+&@#/%=~_|]")
        .expect("URL pattern must compile – this is a bug")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:.*?<)?[-A-Za-z\d.+_=]+@[-A-Za-z\d._]+\.[-A-Za-z\d._]+>?$")
        .expect("e-mail pattern must compile – this is a bug")
});

#[inline]
pub fn is_url(text: &str) -> bool {
    URL.is_match(text)
}

#[inline]
pub fn is_email(text: &str) -> bool {
    EMAIL.is_match(text)
}
