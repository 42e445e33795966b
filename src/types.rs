//! Value types shared by the endpoint and database resolvers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A port as stored in node attributes: either a number or numeric text.
///
/// Attribute files commonly quote ports (`port: "3306"`), so both forms are
/// accepted and the original text is kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Number(u64),
    Text(String),
}

impl PortValue {
    /// The port as an integer, if it is a valid TCP port.
    ///
    /// Text must be ASCII digits only; signs and whitespace are rejected.
    pub fn to_port(&self) -> Option<u16> {
        match self {
            PortValue::Number(n) => u16::try_from(*n).ok(),
            PortValue::Text(text) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => {
                text.parse().ok()
            }
            PortValue::Text(_) => None,
        }
    }
}

impl fmt::Display for PortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortValue::Number(n) => write!(f, "{}", n),
            PortValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<u16> for PortValue {
    fn from(port: u16) -> Self {
        PortValue::Number(u64::from(port))
    }
}

impl From<&str> for PortValue {
    fn from(port: &str) -> Self {
        PortValue::Text(port.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_port_from_text_or_number() {
        let text: PortValue = serde_json::from_value(json!("8080")).unwrap();
        let number: PortValue = serde_json::from_value(json!(8080)).unwrap();

        assert_eq!(text, PortValue::Text("8080".to_string()));
        assert_eq!(text.to_port(), Some(8080));
        assert_eq!(number.to_port(), Some(8080));
        assert_eq!(text.to_string(), "8080");
    }

    #[test]
    fn test_port_out_of_range_or_garbage() {
        assert_eq!(PortValue::Number(70_000).to_port(), None);
        assert_eq!(PortValue::from("http").to_port(), None);
        assert_eq!(PortValue::from("").to_port(), None);
        assert_eq!(PortValue::from("99999").to_port(), None);
    }

    #[test]
    fn test_port_text_must_be_plain_digits() {
        assert_eq!(PortValue::from(" 8080 ").to_port(), None);
        assert_eq!(PortValue::from("+8080").to_port(), None);
        assert_eq!(PortValue::from("-1").to_port(), None);
        assert_eq!(PortValue::from("08080").to_port(), Some(8080));
    }

    #[test]
    fn test_port_rejects_other_json_types() {
        assert!(serde_json::from_value::<PortValue>(json!(true)).is_err());
        assert!(serde_json::from_value::<PortValue>(json!(-1)).is_err());
    }
}
