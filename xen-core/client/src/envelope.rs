//! 调用结果信封
//!
//! 每次远程调用都返回 `{Status, Value, ErrorDescription}` 结构，
//! 只有 `Status` 为字面量 `Success` 时才认为调用成功。

use serde_json::Value;

use crate::error::{Result, XenError};
use crate::payload::{describe, mismatch, Payload};

/// 成功状态字面量
pub const STATUS_SUCCESS: &str = "Success";

/// 调用结果信封
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// 状态（缺失时为空字符串）
    pub status: String,

    /// 返回值
    pub value: Value,

    /// 错误描述
    pub error_description: Vec<String>,
}

impl Envelope {
    /// 从通用应答中解析信封
    pub fn parse(method: &str, raw: Value) -> Result<Self> {
        let mut raw = match raw {
            Value::Object(raw) => raw,
            other => return Err(mismatch(method, "结果信封", describe(&other))),
        };

        let status = match raw.remove("Status") {
            Some(Value::String(status)) => status,
            _ => String::new(),
        };
        let value = raw.remove("Value").unwrap_or(Value::Null);
        let error_description = raw
            .remove("ErrorDescription")
            .map(parse_description)
            .unwrap_or_default();

        Ok(Self {
            status,
            value,
            error_description,
        })
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// 成功时取出返回值，失败时转换为 [`XenError::ApiError`]
    pub fn into_payload(self, method: &str) -> Result<Payload> {
        if self.is_success() {
            Ok(Payload::from(self.value))
        } else {
            Err(XenError::ApiError {
                method: method.to_string(),
                description: self.error_description,
            })
        }
    }
}

/// 错误描述按原样保留：字符串为单项，序列逐项展开
fn parse_description(value: Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(text) => vec![text],
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => text,
                other => other.to_string(),
            })
            .collect(),
        other => vec![other.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let envelope = Envelope::parse(
            "host.get_all",
            json!({ "Status": "Success", "Value": ["ref-1", "ref-2"] }),
        )
        .unwrap();

        assert!(envelope.is_success());
        assert_eq!(
            envelope.into_payload("host.get_all").unwrap(),
            Payload::List(vec![json!("ref-1"), json!("ref-2")])
        );
    }

    #[test]
    fn test_failure_envelope_with_string_description() {
        let envelope = Envelope::parse(
            "VIF.get_network",
            json!({ "Status": "Failure", "ErrorDescription": "HANDLE_INVALID" }),
        )
        .unwrap();

        let err = envelope.into_payload("VIF.get_network").unwrap_err();
        assert_eq!(err.error_code(), Some("HANDLE_INVALID"));
        assert!(err.to_string().contains("HANDLE_INVALID"));
    }

    #[test]
    fn test_failure_envelope_with_list_description() {
        let envelope = Envelope::parse(
            "VM.get_by_uuid",
            json!({ "Status": "Failure", "ErrorDescription": ["UUID_INVALID", "VM", "1234"] }),
        )
        .unwrap();

        match envelope.into_payload("VM.get_by_uuid") {
            Err(XenError::ApiError { method, description }) => {
                assert_eq!(method, "VM.get_by_uuid");
                assert_eq!(description, vec!["UUID_INVALID", "VM", "1234"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_status_is_failure() {
        let envelope = Envelope::parse("host.get_all", json!({ "Value": [] })).unwrap();
        assert!(!envelope.is_success());

        match envelope.into_payload("host.get_all") {
            Err(XenError::ApiError { description, .. }) => assert!(description.is_empty()),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_status_is_case_sensitive() {
        let envelope = Envelope::parse("host.get_all", json!({ "Status": "success", "Value": [] })).unwrap();
        assert!(envelope.into_payload("host.get_all").is_err());
    }

    #[test]
    fn test_non_object_response() {
        let err = Envelope::parse("host.get_all", json!(["ref-1"])).unwrap_err();
        assert!(matches!(err, XenError::ShapeMismatch { expected: "结果信封", .. }));
    }
}
