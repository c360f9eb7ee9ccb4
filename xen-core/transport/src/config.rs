//! 传输层配置

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::{Result, TransportError};

/// 连接协议
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// 明文 HTTP
    Http,
    /// HTTPS
    Https,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Http => write!(f, "http"),
            Scheme::Https => write!(f, "https"),
        }
    }
}

/// 传输层配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// 连接协议
    #[serde(default = "default_scheme")]
    pub scheme: Scheme,

    /// RPC 端点路径
    #[serde(default = "default_path")]
    pub path: String,

    /// 连接超时（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// 请求超时（秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// 是否验证 SSL 证书
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            path: default_path(),
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            verify_ssl: default_verify_ssl(),
        }
    }
}

impl TransportConfig {
    /// 明文 HTTP 配置
    ///
    /// 仅用于测试环境或受信任的管理网络。
    pub fn plain_http() -> Self {
        Self {
            scheme: Scheme::Http,
            ..Default::default()
        }
    }

    /// 设置协议
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// 设置是否验证证书
    pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = verify_ssl;
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// 根据主机地址推导 RPC 端点
    ///
    /// `host` 可以带端口（`10.0.0.1:8080`），但不能带协议前缀。
    pub fn endpoint(&self, host: &str) -> Result<Url> {
        let host = host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(TransportError::ConfigError("主机地址为空".to_string()));
        }
        if host.contains("://") {
            return Err(TransportError::ConfigError(format!(
                "主机地址不应包含协议前缀: {}",
                host
            )));
        }

        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };

        Url::parse(&format!("{}://{}{}", self.scheme, host, path))
            .map_err(|e| TransportError::ConfigError(format!("无效的主机地址 {}: {}", host, e)))
    }
}

// 默认值函数
fn default_scheme() -> Scheme {
    Scheme::Https
}

fn default_path() -> String {
    "/jsonrpc".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_verify_ssl() -> bool {
    true
}
