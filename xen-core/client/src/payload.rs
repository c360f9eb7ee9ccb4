//! 调用返回值形态
//!
//! 信封中的 `Value` 字段没有类型，这里先按结构归为有限的几种形态，
//! 再由各访问方法通过 [`FromPayload`] 转换成期望的 Rust 类型。
//! 形态不符时返回 [`XenError::ShapeMismatch`]，不会在运行时 panic。

use serde_json::{Map, Value};

use crate::api::NULL_REF;
use crate::client::XenClient;
use crate::error::{Result, XenError};

/// 对象记录（字段名 → 值）
pub type Record = Map<String, Value>;

/// 返回值形态
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 空值（null 或缺失）
    Empty,
    /// 字符串、数字或布尔值；引用也以字符串形式出现
    Scalar(Value),
    /// 序列，通常是引用列表
    List(Vec<Value>),
    /// 对象记录
    Record(Record),
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Payload::Empty,
            Value::Array(items) => Payload::List(items),
            Value::Object(record) => Payload::Record(record),
            scalar => Payload::Scalar(scalar),
        }
    }
}

impl Payload {
    /// 形态描述（用于错误信息）
    pub fn kind(&self) -> String {
        match self {
            Payload::Empty => "空值".to_string(),
            Payload::Scalar(value) => describe(value).to_string(),
            Payload::List(items) => format!("长度为 {} 的序列", items.len()),
            Payload::Record(_) => "记录".to_string(),
        }
    }

    /// 期望单个非空字符串引用（空串和 `OpaqueRef:NULL` 都不是有效引用）
    pub fn into_reference(self, method: &str) -> Result<String> {
        match self.into_optional_reference(method)? {
            Some(reference) => Ok(reference),
            None => Err(mismatch(method, "引用", format!("空引用 {}", NULL_REF))),
        }
    }

    /// 期望可空引用：`OpaqueRef:NULL` 表示未指向任何对象
    pub fn into_optional_reference(self, method: &str) -> Result<Option<String>> {
        match self {
            Payload::Scalar(Value::String(reference)) if reference == NULL_REF => Ok(None),
            Payload::Scalar(Value::String(reference)) if !reference.is_empty() => Ok(Some(reference)),
            other => Err(mismatch(method, "引用", other.kind())),
        }
    }

    /// 期望引用序列
    pub fn into_reference_list(self, method: &str) -> Result<Vec<String>> {
        match self {
            Payload::List(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(reference) if reference == NULL_REF => {
                        Err(mismatch(method, "引用序列", format!("含空引用 {} 的序列", NULL_REF)))
                    }
                    Value::String(reference) if !reference.is_empty() => Ok(reference),
                    other => Err(mismatch(method, "引用序列", format!("含 {} 的序列", describe(&other)))),
                })
                .collect(),
            other => Err(mismatch(method, "引用序列", other.kind())),
        }
    }

    /// 期望对象记录
    pub fn into_record(self, method: &str) -> Result<Record> {
        match self {
            Payload::Record(record) => Ok(record),
            other => Err(mismatch(method, "记录", other.kind())),
        }
    }
}

pub(crate) fn mismatch(method: &str, expected: &'static str, found: impl Into<String>) -> XenError {
    XenError::ShapeMismatch {
        method: method.to_string(),
        expected,
        found: found.into(),
    }
}

pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "空值",
        Value::Bool(_) => "布尔值",
        Value::Number(_) => "数字",
        Value::String(_) => "字符串",
        Value::Array(_) => "序列",
        Value::Object(_) => "记录",
    }
}

/// 从返回值形态转换为具体类型
///
/// `client` 用于把引用包装成绑定到同一客户端的句柄。
pub trait FromPayload<'a>: Sized {
    fn from_payload(payload: Payload, client: &'a XenClient, method: &str) -> Result<Self>;
}

/// 不关心返回值（如 destroy）
impl<'a> FromPayload<'a> for () {
    fn from_payload(_payload: Payload, _client: &'a XenClient, _method: &str) -> Result<Self> {
        Ok(())
    }
}

impl<'a> FromPayload<'a> for String {
    fn from_payload(payload: Payload, _client: &'a XenClient, method: &str) -> Result<Self> {
        match payload {
            Payload::Scalar(Value::String(value)) => Ok(value),
            other => Err(mismatch(method, "字符串", other.kind())),
        }
    }
}

impl<'a> FromPayload<'a> for bool {
    fn from_payload(payload: Payload, _client: &'a XenClient, method: &str) -> Result<Self> {
        match payload {
            Payload::Scalar(Value::Bool(value)) => Ok(value),
            other => Err(mismatch(method, "布尔值", other.kind())),
        }
    }
}

/// XenAPI 的 int64 在线路上常以字符串编码，两种形式都接受
impl<'a> FromPayload<'a> for i64 {
    fn from_payload(payload: Payload, _client: &'a XenClient, method: &str) -> Result<Self> {
        match payload {
            Payload::Scalar(Value::Number(number)) => number
                .as_i64()
                .ok_or_else(|| mismatch(method, "整数", number.to_string())),
            Payload::Scalar(Value::String(text)) => text
                .parse()
                .map_err(|_| mismatch(method, "整数", format!("字符串 {:?}", text))),
            other => Err(mismatch(method, "整数", other.kind())),
        }
    }
}

impl<'a> FromPayload<'a> for f64 {
    fn from_payload(payload: Payload, _client: &'a XenClient, method: &str) -> Result<Self> {
        match payload {
            Payload::Scalar(Value::Number(number)) => number
                .as_f64()
                .ok_or_else(|| mismatch(method, "浮点数", number.to_string())),
            Payload::Scalar(Value::String(text)) => text
                .parse()
                .map_err(|_| mismatch(method, "浮点数", format!("字符串 {:?}", text))),
            other => Err(mismatch(method, "浮点数", other.kind())),
        }
    }
}

impl<'a> FromPayload<'a> for Vec<String> {
    fn from_payload(payload: Payload, _client: &'a XenClient, method: &str) -> Result<Self> {
        match payload {
            Payload::List(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(value) => Ok(value),
                    other => Err(mismatch(method, "字符串序列", format!("含 {} 的序列", describe(&other)))),
                })
                .collect(),
            other => Err(mismatch(method, "字符串序列", other.kind())),
        }
    }
}

impl<'a> FromPayload<'a> for Record {
    fn from_payload(payload: Payload, _client: &'a XenClient, method: &str) -> Result<Self> {
        payload.into_record(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_classification() {
        assert_eq!(Payload::from(Value::Null), Payload::Empty);
        assert!(matches!(Payload::from(json!("OpaqueRef:1")), Payload::Scalar(_)));
        assert!(matches!(Payload::from(json!(42)), Payload::Scalar(_)));
        assert!(matches!(Payload::from(json!(["a", "b"])), Payload::List(ref items) if items.len() == 2));
        assert!(matches!(Payload::from(json!({ "uuid": "x" })), Payload::Record(_)));
    }

    #[test]
    fn test_into_reference() {
        let reference = Payload::from(json!("OpaqueRef:1")).into_reference("VM.get_by_uuid").unwrap();
        assert_eq!(reference, "OpaqueRef:1");
    }

    #[test]
    fn test_empty_reference_is_rejected() {
        let err = Payload::from(json!("")).into_reference("VM.get_by_uuid").unwrap_err();
        assert!(matches!(err, XenError::ShapeMismatch { expected: "引用", .. }));

        let err = Payload::Empty.into_reference("VM.get_by_uuid").unwrap_err();
        assert!(matches!(err, XenError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_null_reference_is_rejected() {
        let err = Payload::from(json!(NULL_REF)).into_reference("VM.get_resident_on").unwrap_err();
        assert!(matches!(err, XenError::ShapeMismatch { ref method, .. } if method == "VM.get_resident_on"));

        let err = Payload::from(json!(["OpaqueRef:1", NULL_REF]))
            .into_reference_list("host.get_all")
            .unwrap_err();
        assert!(matches!(err, XenError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_optional_reference() {
        assert_eq!(
            Payload::from(json!(NULL_REF)).into_optional_reference("VM.get_resident_on").unwrap(),
            None
        );
        assert_eq!(
            Payload::from(json!("OpaqueRef:host-1"))
                .into_optional_reference("VM.get_resident_on")
                .unwrap(),
            Some("OpaqueRef:host-1".to_string())
        );
        assert!(Payload::from(json!("")).into_optional_reference("VM.get_resident_on").is_err());
    }

    #[test]
    fn test_reference_list_rejects_scalar() {
        let err = Payload::from(json!("ref-1")).into_reference_list("host.get_all").unwrap_err();
        match err {
            XenError::ShapeMismatch { method, expected, .. } => {
                assert_eq!(method, "host.get_all");
                assert_eq!(expected, "引用序列");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_reference_list_rejects_non_string_items() {
        let err = Payload::from(json!(["ref-1", 7])).into_reference_list("host.get_all").unwrap_err();
        assert!(matches!(err, XenError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_into_record() {
        let record = Payload::from(json!({ "default_SR": "OpaqueRef:sr" }))
            .into_record("pool.get_record")
            .unwrap();
        assert_eq!(record["default_SR"], "OpaqueRef:sr");

        assert!(Payload::from(json!([])).into_record("pool.get_record").is_err());
    }
}
