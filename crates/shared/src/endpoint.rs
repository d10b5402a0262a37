use std::{fmt, str::FromStr};

use url::Url;

use crate::error::FetchError;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Named remote resources the list screen can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endpoint {
    #[default]
    UsersFetch,
    CommentsFetch,
}

impl Endpoint {
    pub const ALL: [Endpoint; 2] = [Endpoint::UsersFetch, Endpoint::CommentsFetch];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::UsersFetch => "users",
            Endpoint::CommentsFetch => "comments",
        }
    }

    /// Resolves the endpoint against `base`, tolerating a trailing slash or a
    /// base that already carries a path prefix.
    pub fn url(self, base: &str) -> Result<Url, FetchError> {
        let trimmed = base.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(FetchError::InvalidUrl("base URL cannot be empty".into()));
        }
        let base = Url::parse(&format!("{trimmed}/"))
            .map_err(|err| FetchError::InvalidUrl(format!("{trimmed}: {err}")))?;
        if base.query().is_some() || base.fragment().is_some() {
            return Err(FetchError::InvalidUrl(format!(
                "{trimmed}: base URL must not carry a query or fragment"
            )));
        }
        if !matches!(base.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "{trimmed}: scheme must be http or https"
            )));
        }
        base.join(self.path())
            .map_err(|err| FetchError::InvalidUrl(format!("{trimmed}: {err}")))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown endpoint '{0}' (expected one of: users, comments)")]
pub struct UnknownEndpoint(pub String);

impl FromStr for Endpoint {
    type Err = UnknownEndpoint;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "users" | "users_fetch" | "usersfetch" => Ok(Endpoint::UsersFetch),
            "comments" | "comments_fetch" | "commentsfetch" => Ok(Endpoint::CommentsFetch),
            other => Err(UnknownEndpoint(other.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "tests/endpoint_tests.rs"]
mod tests;
