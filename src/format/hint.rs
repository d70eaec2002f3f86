use serde::{Deserialize, Serialize};

/// A caller-supplied assertion about a content blob's format.
///
/// Hints usually arrive from query parameters or CMS fields, which may carry
/// several values. Only the first value of a list is honored; the rest are
/// ignored. Existing callers rely on this, so it is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeHint {
    One(String),
    Many(Vec<String>),
}

impl TypeHint {
    /// The hint value that drives routing: the value itself, or the first
    /// element of a list.
    pub fn normalized(&self) -> Option<&str> {
        match self {
            TypeHint::One(value) => Some(value),
            TypeHint::Many(values) => values.first().map(String::as_str),
        }
    }

    /// Build a hint from repeated values, `None` when there are none.
    pub fn from_values(values: &[String]) -> Option<Self> {
        match values {
            [] => None,
            [single] => Some(TypeHint::One(single.clone())),
            many => Some(TypeHint::Many(many.to_vec())),
        }
    }
}

impl From<&str> for TypeHint {
    fn from(value: &str) -> Self {
        TypeHint::One(value.to_string())
    }
}

impl From<Vec<String>> for TypeHint {
    fn from(values: Vec<String>) -> Self {
        TypeHint::Many(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_wins() {
        let hint = TypeHint::from(vec!["markdown".to_string(), "html".to_string()]);
        assert_eq!(hint.normalized(), Some("markdown"));
    }

    #[test]
    fn test_empty_list_has_no_value() {
        assert_eq!(TypeHint::Many(vec![]).normalized(), None);
    }

    #[test]
    fn test_from_values() {
        assert_eq!(TypeHint::from_values(&[]), None);
        assert_eq!(
            TypeHint::from_values(&["html".to_string()]),
            Some(TypeHint::One("html".to_string()))
        );
    }

    #[test]
    fn test_deserialize_string_or_list() {
        let one: TypeHint = serde_json::from_str("\"markdown\"").unwrap();
        assert_eq!(one, TypeHint::One("markdown".to_string()));

        let many: TypeHint = serde_json::from_str("[\"markdown\", \"html\"]").unwrap();
        assert_eq!(many.normalized(), Some("markdown"));
    }
}
