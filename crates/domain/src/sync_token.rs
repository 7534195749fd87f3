use derive_more::{AsRef, Display};
use uuid::Uuid;

const DEEP_LINK_PARAMETER: &str = "syncCode";
const GENERATED_LENGTH: usize = 8;
const MAX_LENGTH: usize = 64;

/// Shared code that partitions the records of the remote replica.
///
/// Tokens are case-insensitive and stored in upper case.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SyncToken(String);

impl SyncToken {
    pub fn new(token: &str) -> Result<Self, SyncTokenError> {
        let trimmed_token = token.trim();

        if trimmed_token.is_empty() {
            return Err(SyncTokenError::Empty);
        }

        let len = trimmed_token.chars().count();

        if len > MAX_LENGTH {
            return Err(SyncTokenError::TooLong(len));
        }

        if trimmed_token.chars().any(char::is_whitespace) {
            return Err(SyncTokenError::Whitespace);
        }

        Ok(SyncToken(trimmed_token.to_uppercase()))
    }

    /// Create a random token of eight base-36 digits.
    #[must_use]
    pub fn generate() -> Self {
        let mut value = Uuid::new_v4().as_u128();
        let mut token = String::with_capacity(GENERATED_LENGTH);
        for _ in 0..GENERATED_LENGTH {
            #[allow(clippy::cast_possible_truncation)]
            let digit = (value % 36) as u32;
            token.push(
                char::from_digit(digit, 36)
                    .unwrap_or('0')
                    .to_ascii_uppercase(),
            );
            value /= 36;
        }
        SyncToken(token)
    }

    /// Extract the token from the query of a share link.
    ///
    /// Returns `None` if the link has no non-empty `syncCode` parameter.
    #[must_use]
    pub fn from_deep_link(link: &str) -> Option<Self> {
        let (_, query) = link.split_once('?')?;
        let query = query.split('#').next().unwrap_or_default();
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == DEEP_LINK_PARAMETER)
            .and_then(|(_, value)| SyncToken::new(value).ok())
    }

    /// Build a link that binds this token when opened.
    #[must_use]
    pub fn share_link(&self, base: &str) -> String {
        let base = base.split(['?', '#']).next().unwrap_or_default();
        format!("{base}?{DEEP_LINK_PARAMETER}={}", self.0)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SyncTokenError {
    #[error("Sync code must not be empty")]
    Empty,
    #[error("Sync code must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
    #[error("Sync code must not contain whitespace")]
    Whitespace,
}
