//! Bearer-token providers
//!
//! Minting tokens (the OAuth2 consent flow) happens outside sheetdown; these
//! providers only pick up a token that already exists.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{RemoteError, Result};
use crate::TokenProvider;

/// Default location of the stored token
pub const DEFAULT_TOKEN_PATH: &str = "json/token.json";

/// An OAuth2 bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self(token.into())
    }

    /// Token for sources that need no authentication
    pub fn anonymous() -> Self {
        Self(String::new())
    }

    pub fn is_anonymous(&self) -> bool {
        self.0.is_empty()
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_anonymous() {
            f.write_str("AccessToken(anonymous)")
        } else {
            f.write_str("AccessToken(***)")
        }
    }
}

/// A token handed in directly (e.g. from `GOOGLE_ACCESS_TOKEN`)
#[derive(Debug, Clone)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new<S: Into<String>>(token: Option<S>) -> Self {
        Self(token.map(Into::into))
    }
}

impl TokenProvider for StaticToken {
    fn access_token(&self) -> Result<AccessToken> {
        match self.0.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(AccessToken::new(token)),
            _ => Err(RemoteError::MissingCredentials(
                "no access token was provided".to_string(),
            )),
        }
    }
}

/// A JSON token file: `{"access_token": "..."}`
///
/// The `token` key written by Google's authorized-user credentials is
/// accepted as well.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

#[derive(Deserialize)]
struct StoredToken {
    #[serde(alias = "token")]
    access_token: String,
}

impl TokenFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl Default for TokenFile {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_PATH)
    }
}

impl TokenProvider for TokenFile {
    fn access_token(&self) -> Result<AccessToken> {
        if !self.path.exists() {
            return Err(RemoteError::MissingCredentials(format!(
                "token file '{}' not found",
                self.path.display()
            )));
        }
        let text = fs::read_to_string(&self.path)?;
        let stored: StoredToken = serde_json::from_str(&text)?;
        StaticToken::new(Some(stored.access_token)).access_token()
    }
}

/// Tries each provider in order and returns the first token found
#[derive(Default)]
pub struct TokenChain {
    providers: Vec<Box<dyn TokenProvider>>,
}

impl TokenChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<P: TokenProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }
}

impl TokenProvider for TokenChain {
    fn access_token(&self) -> Result<AccessToken> {
        let mut reasons = Vec::new();
        for provider in &self.providers {
            match provider.access_token() {
                Ok(token) => return Ok(token),
                Err(e) => reasons.push(e.to_string()),
            }
        }
        Err(RemoteError::MissingCredentials(if reasons.is_empty() {
            "no token providers configured".to_string()
        } else {
            reasons.join("; ")
        }))
    }
}

/// For sources that need no credentials, such as a local CSV file
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl TokenProvider for Anonymous {
    fn access_token(&self) -> Result<AccessToken> {
        Ok(AccessToken::anonymous())
    }
}
