//! Redaction wrapper for secret values.
//!
//! API keys loaded from the env file and values read back from Secrets
//! Manager must never appear in logs, console output, or serialized
//! reports. Wrapping them in [`SensitiveString`] makes accidental exposure
//! a compile-time decision: the value is only reachable through
//! [`SensitiveString::expose`].

use std::fmt;

/// A string wrapper that prevents the value from being logged.
///
/// When used in format strings or logging, this type displays
/// `[REDACTED]` instead of the actual value. Use `expose()` to
/// access the underlying value when needed.
///
/// # Example
///
/// ```rust,ignore
/// use ecs_remedy::sensitive::SensitiveString;
///
/// let api_key = SensitiveString::new("sk-abc123");
///
/// // This logs "[REDACTED]" instead of the key
/// tracing::info!("key is {:?}", api_key);
///
/// // Deliberate access
/// let actual = api_key.expose();
/// ```
#[derive(Clone)]
pub struct SensitiveString {
    value: String,
}

impl SensitiveString {
    /// Create a new sensitive string.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Expose the underlying value.
    ///
    /// Use this when the actual secret is required, such as when passing
    /// it to the Secrets Manager API.
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Consume and return the underlying value.
    pub fn into_inner(self) -> String {
        self.value
    }

    /// Get the length of the value.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Check if the value is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

// Display shows the redacted value
impl fmt::Display for SensitiveString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

// Debug shows the redacted value
impl fmt::Debug for SensitiveString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SensitiveString([REDACTED])")
    }
}

// No Deref to String - force use of expose()

impl From<String> for SensitiveString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SensitiveString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq for SensitiveString {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for SensitiveString {}

// Serializes as [REDACTED] so reports can embed the type safely
impl serde::Serialize for SensitiveString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str("[REDACTED]")
    }
}

impl<'de> serde::Deserialize<'de> for SensitiveString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_redacts() {
        let s = SensitiveString::new("hunter2");
        assert_eq!(format!("{}", s), "[REDACTED]");
        assert_eq!(format!("{:?}", s), "SensitiveString([REDACTED])");
    }

    #[test]
    fn test_expose_returns_value() {
        let s = SensitiveString::new("hunter2");
        assert_eq!(s.expose(), "hunter2");
        assert_eq!(s.len(), 7);
        assert!(!s.is_empty());
    }

    #[test]
    fn test_serialize_redacts() {
        let s = SensitiveString::new("hunter2");
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "\"[REDACTED]\"");
    }

    #[test]
    fn test_deserialize_keeps_value() {
        let s: SensitiveString = serde_json::from_str("\"hunter2\"").unwrap();
        assert_eq!(s.expose(), "hunter2");
    }
}
