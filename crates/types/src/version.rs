//! Release identifiers
//!
//! A [`Version`] is an opaque string such as `1.2.0`. It is substituted into
//! download URLs and used as a directory name component, so it is checked
//! once on construction and never compared beyond equality.

use ghostup_errors::VersionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Validated, opaque release identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version(String);

impl Version {
    /// Validate and wrap a version string
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, is `.` or `..`, or contains a
    /// path separator, whitespace or a control character.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        if input.is_empty() {
            return Err(VersionError::Empty);
        }
        if input == "." || input == ".." {
            return Err(VersionError::InvalidVersion {
                input: input.to_string(),
                reason: "relative path component".to_string(),
            });
        }
        if let Some(c) = input
            .chars()
            .find(|c| matches!(c, '/' | '\\') || c.is_whitespace() || c.is_control())
        {
            return Err(VersionError::InvalidVersion {
                input: input.to_string(),
                reason: format!("character {c:?} is not allowed"),
            });
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(value: Version) -> Self {
        value.0
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_dotted_release() {
        let v = Version::parse("1.2.0").unwrap();
        assert_eq!(v.as_str(), "1.2.0");
        assert_eq!(v.to_string(), "1.2.0");
    }

    #[test]
    fn rejects_empty_and_relative() {
        assert!(matches!(Version::parse(""), Err(VersionError::Empty)));
        assert!(Version::parse(".").is_err());
        assert!(Version::parse("..").is_err());
    }

    #[test]
    fn rejects_separators() {
        assert!(Version::parse("1.2/../../etc").is_err());
        assert!(Version::parse("1.2\\0").is_err());
        assert!(Version::parse("1.2 0").is_err());
    }

    #[test]
    fn deserializes_with_validation() {
        let ok: Version = serde_json::from_str(r#""0.14.1""#).unwrap();
        assert_eq!(ok.as_str(), "0.14.1");
        assert!(serde_json::from_str::<Version>(r#""a/b""#).is_err());
    }

    proptest! {
        #[test]
        fn any_separator_is_rejected(prefix in "[0-9.]{0,8}", suffix in "[0-9a-z.]{0,8}") {
            let input = format!("{prefix}/{suffix}");
            prop_assert!(Version::parse(&input).is_err());
        }

        #[test]
        fn release_like_strings_round_trip(input in "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}(-[a-z0-9]{1,6})?") {
            let v = Version::parse(&input).unwrap();
            prop_assert_eq!(v.as_str(), input.as_str());
        }
    }
}
