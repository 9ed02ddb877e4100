//! The rendered welcome.

use url::Url;

/// An inline URL button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub url: Url,
}

/// Welcome text (HTML) and its inline keyboard, row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeMessage {
    pub text: String,
    pub keyboard: Vec<Vec<Button>>,
}
