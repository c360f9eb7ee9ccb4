//! 资源池相关的组合查询

use serde_json::Value;
use tracing::{info, warn};

use super::{Ref, Sr, NULL_REF};
use crate::client::XenClient;
use crate::error::{Result, XenError};
use crate::payload::{describe, mismatch};

/// 资源池记录中的默认存储库字段
const DEFAULT_SR_FIELD: &str = "default_SR";

impl XenClient {
    /// 获取（唯一）资源池的默认存储库
    ///
    /// 取 `pool.get_all` 返回的第一个资源池，读取其记录的 `default_SR` 字段：
    /// - 没有资源池 → [`XenError::PreconditionError`]
    /// - 字段缺失或不是字符串 → [`XenError::ShapeMismatch`]
    /// - 字段为空字符串或 `OpaqueRef:NULL` → [`XenError::PreconditionError`]
    pub async fn default_sr(&self) -> Result<Ref<'_, Sr>> {
        info!("查询默认存储库");

        let pool = self
            .pool()
            .get_all()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| XenError::PreconditionError("服务端没有任何资源池".to_string()))?;

        let record = pool.record().await?;
        let default_sr = match record.get(DEFAULT_SR_FIELD) {
            Some(Value::String(reference)) => reference,
            Some(other) => return Err(mismatch("pool.get_record", "default_SR 引用", describe(other))),
            None => return Err(mismatch("pool.get_record", "default_SR 引用", "字段缺失")),
        };

        if default_sr.is_empty() || default_sr == NULL_REF {
            warn!("资源池 {} 未设置默认存储库", pool.reference());
            return Err(XenError::PreconditionError(format!(
                "资源池 {} 未设置默认存储库",
                pool.reference()
            )));
        }

        Ok(Ref::new(default_sr.clone(), self))
    }
}
