//! XenAPI 客户端错误定义

use thiserror::Error;
use xen_transport::TransportError;

/// XenAPI 客户端错误类型
#[derive(Error, Debug)]
pub enum XenError {
    /// 底层 RPC 调用失败，原样上抛
    #[error("传输错误: {0}")]
    Transport(#[from] TransportError),

    #[error("认证错误: {0}")]
    AuthError(String),

    #[error("未建立会话，请先登录")]
    NoSession,

    /// 服务端返回失败状态，携带原始错误描述
    #[error("API 错误 [{method}]: {}", .description.join(", "))]
    ApiError {
        method: String,
        description: Vec<String>,
    },

    #[error("返回值类型不符 [{method}]: 期望 {expected}, 实际 {found}")]
    ShapeMismatch {
        method: String,
        expected: &'static str,
        found: String,
    },

    #[error("前置条件不满足: {0}")]
    PreconditionError(String),
}

impl XenError {
    /// API 错误码（错误描述的第一项，如 `HANDLE_INVALID`）
    pub fn error_code(&self) -> Option<&str> {
        match self {
            XenError::ApiError { description, .. } => description.first().map(String::as_str),
            _ => None,
        }
    }
}

/// XenAPI 客户端结果类型
pub type Result<T> = std::result::Result<T, XenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_only_for_api_errors() {
        let api = XenError::ApiError {
            method: "VM.get_by_uuid".to_string(),
            description: vec!["UUID_INVALID".to_string(), "VM".to_string()],
        };
        assert_eq!(api.error_code(), Some("UUID_INVALID"));
        assert_eq!(api.to_string(), "API 错误 [VM.get_by_uuid]: UUID_INVALID, VM");

        let mismatch = XenError::ShapeMismatch {
            method: "network.create".to_string(),
            expected: "网络记录",
            found: "记录".to_string(),
        };
        assert_eq!(mismatch.error_code(), None);
        assert!(mismatch.to_string().contains("network.create"));
    }

    #[test]
    fn test_transport_error_is_wrapped_verbatim() {
        let err: XenError = TransportError::ParseError("bad body".to_string()).into();
        assert!(matches!(err, XenError::Transport(TransportError::ParseError(ref m)) if m == "bad body"));
        assert_eq!(err.error_code(), None);
    }
}
