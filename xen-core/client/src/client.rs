//! XenAPI 客户端核心实现

use serde_json::{json, Value};
use tracing::{debug, info, warn};
use xen_transport::{JsonRpcTransport, Transport, TransportConfig};

use crate::envelope::Envelope;
use crate::error::{Result, XenError};
use crate::payload::{describe, mismatch, FromPayload, Payload};
use crate::session::{Session, SessionRef};

const LOGIN_METHOD: &str = "session.login_with_password";
const LOGOUT_METHOD: &str = "session.logout";

/// XenAPI 客户端
///
/// 持有传输层和会话。登录、登出需要 `&mut self`，因此在任何资源句柄
/// 仍借用客户端时都无法替换会话。
pub struct XenClient {
    /// RPC 传输
    transport: Box<dyn Transport>,

    /// 当前会话
    session: Session,
}

impl XenClient {
    /// 创建指向 `host` 的客户端（尚未登录）
    pub fn new(host: &str, config: TransportConfig) -> Result<Self> {
        let transport = JsonRpcTransport::new(host, &config)?;
        Ok(Self::with_transport(transport))
    }

    /// 使用自定义传输创建客户端
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            session: Session::Absent,
        }
    }

    /// 创建客户端并登录
    pub async fn connect(
        host: &str,
        username: &str,
        password: &str,
        config: TransportConfig,
    ) -> Result<Self> {
        let mut client = Self::new(host, config)?;
        client.login(username, password).await?;
        Ok(client)
    }

    /// 认证登录
    ///
    /// 服务端可能以成功状态加空值的方式拒绝凭据，这种情况同样视为认证失败。
    /// 登录失败后客户端处于未登录状态。
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        info!("XenAPI 登录: {} @ {}", username, self.transport.target());
        self.session = Session::Absent;

        let raw = self
            .transport
            .invoke(LOGIN_METHOD, vec![json!(username), json!(password)])
            .await?;
        let envelope = Envelope::parse(LOGIN_METHOD, raw)?;

        if !envelope.is_success() {
            warn!("XenAPI 登录被拒绝: {:?}", envelope.error_description);
            return Err(XenError::AuthError(format!(
                "登录被拒绝: {}",
                envelope.error_description.join(", ")
            )));
        }

        let token = match envelope.value {
            Value::String(token) if !token.is_empty() => token,
            Value::Null | Value::String(_) => {
                warn!("XenAPI 登录未返回会话");
                return Err(XenError::AuthError("无效的凭据".to_string()));
            }
            other => return Err(mismatch(LOGIN_METHOD, "会话引用", describe(&other))),
        };

        self.session = Session::Present(SessionRef::new(token));
        info!("XenAPI 登录成功");
        Ok(())
    }

    /// 注销登出
    ///
    /// 本地会话先被清除，再通知服务端；未登录时不做任何调用。
    pub async fn logout(&mut self) -> Result<()> {
        let token = match std::mem::take(&mut self.session) {
            Session::Present(token) => token,
            Session::Absent => return Ok(()),
        };

        info!("XenAPI 登出");
        let raw = self
            .transport
            .invoke(LOGOUT_METHOD, vec![json!(token.as_str())])
            .await?;
        Envelope::parse(LOGOUT_METHOD, raw)?.into_payload(LOGOUT_METHOD)?;
        Ok(())
    }

    /// 当前会话
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_present()
    }

    /// 发起一次带会话的调用
    ///
    /// 会话令牌作为第一个位置参数插入。未登录时立即返回
    /// [`XenError::NoSession`]，不会产生任何传输调用。
    pub async fn call(&self, method: &str, args: Vec<Value>) -> Result<Payload> {
        let token = self.session.token()?;

        let mut params = Vec::with_capacity(args.len() + 1);
        params.push(json!(token.as_str()));
        params.extend(args);

        debug!("XenAPI 调用: {} ({} 个参数)", method, params.len() - 1);
        let raw = self.transport.invoke(method, params).await?;
        let envelope = Envelope::parse(method, raw)?;

        if !envelope.is_success() {
            warn!("XenAPI 调用失败: {} - {:?}", method, envelope.error_description);
        }
        envelope.into_payload(method)
    }

    /// 发起调用并把返回值转换为期望的类型
    pub async fn call_as<'a, T: FromPayload<'a>>(&'a self, method: &str, args: Vec<Value>) -> Result<T> {
        let payload = self.call(method, args).await?;
        T::from_payload(payload, self, method)
    }
}
