//! XenAPI 传输层
//!
//! 负责把一次远程调用（方法名 + 位置参数）送达 XenAPI 服务端，
//! 并把应答统一成 `{Status, Value, ErrorDescription}` 信封交给上层解释。
//!
//! - [`Transport`]: 调用抽象，上层只依赖这个 trait
//! - [`JsonRpcTransport`]: 基于 HTTP JSON-RPC 的默认实现
//! - [`TransportConfig`]: 协议、路径、超时、证书校验配置

pub mod config;
pub mod jsonrpc;
pub mod transport;

pub use config::{Scheme, TransportConfig};
pub use jsonrpc::JsonRpcTransport;
pub use transport::Transport;

use thiserror::Error;

/// 传输层错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("HTTP 错误: {0}")]
    HttpError(String),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, TransportError>;
