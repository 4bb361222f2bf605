use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A wrapper for operator-entered contact details that masks its value in Debug output and can be customized for Serialization.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct Masked<T>(pub T);

impl<T: fmt::Display> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: fmt::Display> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Stored records and form payloads need the real value; the wrapper
        // exists to prevent accidental leakage in log macros like
        // tracing::info!("{:?}", pass).
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn inner(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Masked<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: Default> Default for Masked<T> {
    fn default() -> Self {
        Self(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_is_masked() {
        let phone = Masked::new("9876543210".to_string());
        assert_eq!(format!("{:?}", phone), "********");
        assert_eq!(format!("{}", phone), "********");
    }

    #[test]
    fn test_serialization_passes_through() {
        let phone = Masked::new("9876543210".to_string());
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"9876543210\"");

        let back: Masked<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, phone);
    }
}
