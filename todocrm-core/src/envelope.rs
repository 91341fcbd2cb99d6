//! Uniform operation result: `{ success, data?, error? }`

use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// Result wrapper returned by every data-access operation.
///
/// The failure class travels with the envelope but is not part of the wire
/// shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    kind: Option<ErrorKind>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            kind: None,
        }
    }

    pub fn fail(kind: ErrorKind, error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            kind: Some(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Failure class, when this envelope was built by an operation.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_shape() {
        let env = Envelope::ok(vec![1, 2]);
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({ "success": true, "data": [1, 2] })
        );
    }

    #[test]
    fn failure_shape() {
        let env: Envelope<()> = Envelope::fail(ErrorKind::NotFound, "Todo not found");
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({ "success": false, "error": "Todo not found" })
        );
        assert_eq!(env.error_kind(), Some(ErrorKind::NotFound));
    }

    #[test]
    fn parsed_envelope_has_no_kind() {
        let env: Envelope<u32> =
            serde_json::from_value(json!({ "success": false, "error": "nope" })).unwrap();
        assert!(!env.is_success());
        assert_eq!(env.error_kind(), None);
    }
}
