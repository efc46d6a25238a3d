//! Domain identifier types with validation
//!
//! Store-assigned identifiers are positive integers. Each record kind gets its
//! own newtype so a patient id can never be passed where a medication id is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier, rejecting zero and negative values
            pub fn new(id: i64) -> Result<Self, String> {
                if id < 1 {
                    return Err(format!("{} must be a positive integer, got {}", $label, id));
                }
                Ok(Self(id))
            }

            /// Returns the raw integer value
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let id = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| format!("{} must be an integer", $label))?;
                Self::new(id)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = String;

            fn try_from(id: i64) -> Result<Self, Self::Error> {
                Self::new(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Patient identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use medtrack::domain::ids::PatientId;
    /// use std::str::FromStr;
    ///
    /// let id = PatientId::from_str("42").unwrap();
    /// assert_eq!(id.get(), 42);
    /// assert!(PatientId::new(0).is_err());
    /// ```
    PatientId,
    "Patient Id"
);

define_id!(
    /// Medication identifier
    MedicationId,
    "Medication Id"
);

define_id!(
    /// Assignment identifier, assigned by the store on creation
    AssignmentId,
    "Assignment Id"
);
