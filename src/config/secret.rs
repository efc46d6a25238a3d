//! Connection-string secrecy
//!
//! The PostgreSQL connection string carries credentials. It is held in a
//! [`SecretString`], which redacts `Debug` output and zeroes the buffer on drop.

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

#[derive(Clone, Debug, Zeroize, Serialize, Deserialize)]
#[serde(transparent)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl SecretValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text after the last `@`, for logging a connection target without credentials
    ///
    /// ```rust
    /// use medtrack::config::secret_string;
    /// use secrecy::ExposeSecret;
    ///
    /// let url = secret_string("postgresql://medtrack:pw@db/medtrack".to_string());
    /// assert_eq!(url.expose_secret().redacted_target(), "postgresql://***@db/medtrack");
    /// ```
    pub fn redacted_target(&self) -> String {
        match self.0.rsplit_once('@') {
            Some((_, target)) => format!("postgresql://***@{target}"),
            None => "postgresql://***".to_string(),
        }
    }

    pub fn parse<F: std::str::FromStr>(&self) -> Result<F, F::Err> {
        self.0.parse()
    }
}

pub type SecretString = Secret<SecretValue>;

pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue(value))
}
