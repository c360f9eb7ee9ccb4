//! 测试用的脚本化传输
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use xen_client::{Transport, TransportError, XenClient};

pub const SESSION: &str = "OpaqueRef:session-1";

/// 一次被记录的调用
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Vec<Value>,
}

#[derive(Default)]
struct FakeState {
    responses: HashMap<String, VecDeque<Result<Value, TransportError>>>,
    calls: Vec<RecordedCall>,
}

/// 按方法名预置应答的传输，记录所有调用
#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置原始应答
    pub fn respond(&self, method: &str, response: Result<Value, TransportError>) -> &Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .entry(method.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// 预置成功信封
    pub fn success(&self, method: &str, value: Value) -> &Self {
        self.respond(method, Ok(json!({ "Status": "Success", "Value": value })))
    }

    /// 预置失败信封
    pub fn failure(&self, method: &str, description: Value) -> &Self {
        self.respond(
            method,
            Ok(json!({ "Status": "Failure", "ErrorDescription": description })),
        )
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.state.lock().unwrap().calls.last().cloned()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn invoke(&self, method: &str, params: Vec<Value>) -> Result<Value, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall {
            method: method.to_string(),
            params,
        });

        state
            .responses
            .get_mut(method)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| {
                Err(TransportError::HttpError(format!(
                    "no scripted response for {}",
                    method
                )))
            })
    }

    fn target(&self) -> String {
        "fake://xen".to_string()
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// 创建已登录的客户端
pub async fn logged_in(fake: &FakeTransport) -> XenClient {
    init_tracing();
    fake.success("session.login_with_password", json!(SESSION));

    let mut client = XenClient::with_transport(fake.clone());
    client.login("root", "secret").await.unwrap();
    client
}
