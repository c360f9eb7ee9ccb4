//! 调用抽象接口

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// RPC 传输 trait
///
/// 给定方法名和位置参数完成一次远程调用，返回通用结构化应答。
/// 应答应当是一个包含 `Status`、`Value`、`ErrorDescription` 字段的对象，
/// 由上层负责解释；网络或编解码失败以 [`crate::TransportError`] 返回。
#[async_trait]
pub trait Transport: Send + Sync {
    /// 执行一次远程调用
    async fn invoke(&self, method: &str, params: Vec<Value>) -> Result<Value>;

    /// 传输目标描述（用于日志）
    fn target(&self) -> String {
        String::from("<custom>")
    }
}
