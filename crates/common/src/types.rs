use serde::{Deserialize, Serialize};

/// Identifier of an inventory entity.
///
/// Entity ids are opaque strings chosen by upstream producers. They double
/// as the partition key of the inventory projection and as the suffix of the
/// entity's stream name (`inventory-<id>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Creates an entity id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the id is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_displays_raw_value() {
        let id = EntityId::new("123");
        assert_eq!(id.to_string(), "123");
        assert_eq!(id.as_str(), "123");
    }

    #[test]
    fn entity_id_serializes_as_plain_string() {
        let id = EntityId::from("inv-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"inv-42\"");
    }

    #[test]
    fn blank_ids_are_detected() {
        assert!(EntityId::new("").is_blank());
        assert!(EntityId::new("   ").is_blank());
        assert!(!EntityId::new("a").is_blank());
    }
}
