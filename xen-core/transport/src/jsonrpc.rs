//! HTTP JSON-RPC 传输实现
//!
//! XenAPI 在 `/jsonrpc` 上接受 JSON-RPC 2.0 请求。服务端以 `result` 或
//! `error` 字段应答，这里把两者都还原成 XML-RPC 风格的结果信封：
//!
//! - `result` → `{"Status": "Success", "Value": result}`
//! - `error`  → `{"Status": "Failure", "ErrorDescription": [message, data...]}`

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};
use url::Url;

use crate::config::TransportConfig;
use crate::transport::Transport;
use crate::{Result, TransportError};

/// JSON-RPC 请求体
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Vec<Value>,
    id: u64,
}

/// HTTP JSON-RPC 传输
pub struct JsonRpcTransport {
    /// RPC 端点
    endpoint: Url,

    /// HTTP 客户端
    http_client: Client,

    /// 请求序号
    next_id: AtomicU64,
}

impl JsonRpcTransport {
    /// 创建指向 `host` 的传输
    pub fn new(host: &str, config: &TransportConfig) -> Result<Self> {
        let endpoint = config.endpoint(host)?;

        let http_client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| TransportError::HttpError(e.to_string()))?;

        Ok(Self {
            endpoint,
            http_client,
            next_id: AtomicU64::new(1),
        })
    }

    /// 获取 RPC 端点
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for JsonRpcTransport {
    async fn invoke(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };
        debug!("JSON-RPC 请求 #{}: {} -> {}", id, method, self.endpoint);

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| TransportError::HttpError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "无法读取错误响应".to_string());
            warn!("JSON-RPC 请求失败: {} - {}", status, error_text);
            return Err(TransportError::HttpError(format!("{}: {}", status, error_text)));
        }

        let reply: Value = response
            .json()
            .await
            .map_err(|e| TransportError::ParseError(e.to_string()))?;

        into_envelope(reply)
    }

    fn target(&self) -> String {
        self.endpoint.to_string()
    }
}

/// 把 JSON-RPC 应答还原成结果信封
pub(crate) fn into_envelope(reply: Value) -> Result<Value> {
    let mut reply = match reply {
        Value::Object(reply) => reply,
        other => {
            return Err(TransportError::ParseError(format!(
                "JSON-RPC 应答不是对象: {}",
                other
            )))
        }
    };

    match reply.remove("error") {
        Some(Value::Null) | None => {}
        Some(error) => return Ok(failure_envelope(error)),
    }

    match reply.remove("result") {
        Some(Value::Object(result)) if is_envelope(&result) => Ok(Value::Object(result)),
        Some(result) => Ok(json!({ "Status": "Success", "Value": result })),
        None => Err(TransportError::ParseError(
            "JSON-RPC 应答缺少 result/error 字段".to_string(),
        )),
    }
}

/// 服务端已经按信封格式应答：字符串 `Status`，带 `Value` 或 `ErrorDescription`，
/// 且没有其他字段。普通记录即使含 `Status` 字段也按值处理。
fn is_envelope(result: &Map<String, Value>) -> bool {
    matches!(result.get("Status"), Some(Value::String(_)))
        && (result.contains_key("Value") || result.contains_key("ErrorDescription"))
        && result
            .keys()
            .all(|key| matches!(key.as_str(), "Status" | "Value" | "ErrorDescription"))
}

fn failure_envelope(error: Value) -> Value {
    let mut description = Vec::new();

    match error {
        Value::Object(mut error) => {
            if let Some(message) = error.remove("message") {
                description.push(message);
            }
            match error.remove("data") {
                Some(Value::Array(data)) => description.extend(data),
                Some(Value::Null) | None => {}
                Some(data) => description.push(data),
            }
        }
        Value::Array(items) => description.extend(items),
        other => description.push(other),
    }

    json!({ "Status": "Failure", "ErrorDescription": description })
}
