//! 网络管理 API

use tracing::info;

use super::{Network, Ref, ResourceApi};
use crate::error::Result;
use crate::models::NetworkRecord;
use crate::payload::mismatch;

impl<'a> ResourceApi<'a, Network> {
    /// 创建网络
    ///
    /// 记录中的 `other_config` 始终随请求发送，未设置时为空映射。
    pub async fn create(&self, record: &NetworkRecord) -> Result<Ref<'a, Network>> {
        info!("创建网络: {} (bridge: {})", record.name_label, record.bridge);

        let record = serde_json::to_value(record)
            .map_err(|e| mismatch("network.create", "网络记录", e.to_string()))?;
        self.client.call_as("network.create", vec![record]).await
    }
}
