//! XenAPI 请求记录

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// 创建网络的记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkRecord {
    /// 网络名称
    pub name_label: String,

    /// 网络描述
    #[serde(default)]
    pub name_description: String,

    /// 网桥名称
    #[serde(default)]
    pub bridge: String,

    /// MTU（未设置时由服务端决定）
    #[serde(rename = "MTU", default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<i64>,

    /// 附加配置（未设置时为空映射，不能省略）
    #[serde(default)]
    pub other_config: HashMap<String, String>,
}

impl NetworkRecord {
    pub fn new(name_label: impl Into<String>) -> Self {
        Self {
            name_label: name_label.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.name_description = description.into();
        self
    }

    pub fn with_bridge(mut self, bridge: impl Into<String>) -> Self {
        self.bridge = bridge.into();
        self
    }

    pub fn with_mtu(mut self, mtu: i64) -> Self {
        self.mtu = Some(mtu);
        self
    }

    pub fn with_other_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.other_config.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_network_record_serialization() {
        let record = NetworkRecord::new("build-net")
            .with_description("Build network")
            .with_bridge("xenbr1");

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "name_label": "build-net",
                "name_description": "Build network",
                "bridge": "xenbr1",
                "other_config": {}
            })
        );
    }

    #[test]
    fn test_network_record_with_mtu_and_config() {
        let record = NetworkRecord::new("jumbo")
            .with_mtu(9000)
            .with_other_config("automatic", "false");

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["MTU"], 9000);
        assert_eq!(value["other_config"], json!({ "automatic": "false" }));
    }

    #[test]
    fn test_network_record_deserialize_defaults() {
        let record: NetworkRecord = serde_json::from_str(r#"{ "name_label": "lab" }"#).unwrap();
        assert_eq!(record, NetworkRecord::new("lab"));
        assert!(record.other_config.is_empty());
    }
}
