use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use std::fmt;

new_key_type! {
    /// Handle of a visual element owned by a [`Scene`](crate::core::scene::Scene).
    pub struct ElementId;
}

/// Stable identity of an atom, supplied by the external data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identity of a bond. The data source may use numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkId {
    Number(i64),
    Name(String),
}

impl From<i64> for LinkId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for LinkId {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl From<String> for LinkId {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Name(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_id_deserializes_from_number_or_string() {
        let numeric: LinkId = serde_json::from_str("7").unwrap();
        let named: LinkId = serde_json::from_str("\"c1-o2\"").unwrap();
        assert_eq!(numeric, LinkId::Number(7));
        assert_eq!(named, LinkId::Name("c1-o2".to_string()));
    }

    #[test]
    fn ids_display_their_raw_value() {
        assert_eq!(NodeId(42).to_string(), "42");
        assert_eq!(LinkId::from(3).to_string(), "3");
        assert_eq!(LinkId::from("a-b").to_string(), "a-b");
    }
}
