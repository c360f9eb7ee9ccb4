//! 会话状态

use std::fmt;

use crate::error::{Result, XenError};

/// 会话令牌（服务端签发的不透明引用）
#[derive(Clone, PartialEq, Eq)]
pub struct SessionRef(String);

impl SessionRef {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionRef {
    // 令牌等同于凭据，日志中只保留前缀
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(12).collect();
        write!(f, "SessionRef({}…)", prefix)
    }
}

/// 客户端会话
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    /// 尚未登录或已登出
    #[default]
    Absent,
    /// 已登录
    Present(SessionRef),
}

impl Session {
    /// 获取会话令牌，未登录时返回 [`XenError::NoSession`]
    pub fn token(&self) -> Result<&SessionRef> {
        match self {
            Session::Present(token) => Ok(token),
            Session::Absent => Err(XenError::NoSession),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Session::Present(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_session_has_no_token() {
        let session = Session::default();
        assert!(!session.is_present());
        assert!(matches!(session.token(), Err(XenError::NoSession)));
    }

    #[test]
    fn test_present_session_token() {
        let session = Session::Present(SessionRef::new("OpaqueRef:abc"));
        assert!(session.is_present());
        assert_eq!(session.token().unwrap().as_str(), "OpaqueRef:abc");
    }

    #[test]
    fn test_session_ref_debug_is_truncated() {
        let token = SessionRef::new("OpaqueRef:0123456789abcdef");
        let printed = format!("{:?}", token);
        assert!(printed.starts_with("SessionRef(OpaqueRef:01"));
        assert!(!printed.contains("abcdef"));
    }
}
