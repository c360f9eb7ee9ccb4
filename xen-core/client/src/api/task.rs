//! 任务管理 API

use serde_json::json;
use tracing::info;

use super::{Ref, ResourceApi, Task};
use crate::error::Result;

impl<'a> ResourceApi<'a, Task> {
    /// 创建任务
    ///
    /// # Arguments
    /// * `label` - 任务名称
    /// * `description` - 任务描述
    pub async fn create(&self, label: &str, description: &str) -> Result<Ref<'a, Task>> {
        info!("创建任务: {}", label);
        self.client
            .call_as("task.create", vec![json!(label), json!(description)])
            .await
    }
}
