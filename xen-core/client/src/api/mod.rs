//! XenAPI 资源 API
//!
//! 所有资源类型共用同一套句柄 [`Ref`] 和列表访问 [`ResourceApi`]，
//! 类型之间通过标记类型（[`Host`]、[`Vm`]、[`Network`] ...）区分：
//! - `ResourceApi<'a, K>`: get_all / get_by_uuid / get_by_name_label / get_all_records
//! - `Ref<'a, K>`: uuid / record / name_label，以及 `fields` 中按表生成的字段访问
//! - 可销毁类型（VIF、task、network）提供 `destroy`

pub mod fields;
pub mod network;
pub mod pool;
pub mod task;

use std::fmt;
use std::marker::PhantomData;

use serde_json::{json, Value};
use tracing::info;

use crate::client::XenClient;
use crate::error::{Result, XenError};
use crate::payload::{describe, mismatch, FromPayload, Payload, Record};

/// 空引用字面量
pub const NULL_REF: &str = "OpaqueRef:NULL";

/// 资源类型
pub trait Kind: Send + Sync + 'static {
    /// XenAPI 类名（方法名前缀）
    const CLASS: &'static str;
}

/// 带 `name_label` 字段的资源类型
pub trait Named: Kind {}

/// 支持 `destroy` 的资源类型
pub trait Destroyable: Kind {}

macro_rules! resource_kinds {
    ($(
        $(#[$meta:meta])*
        $kind:ident => $class:literal, $accessor:ident $(, $marker:ident)* ;
    )+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub enum $kind {}

            impl Kind for $kind {
                const CLASS: &'static str = $class;
            }

            $( impl $marker for $kind {} )*
        )+

        impl XenClient {
            $(
                #[doc = concat!("获取 `", $class, "` 资源 API")]
                pub fn $accessor(&self) -> ResourceApi<'_, $kind> {
                    ResourceApi::new(self)
                }
            )+
        }
    };
}

resource_kinds! {
    /// 物理主机
    Host => "host", host, Named;
    /// 资源池
    Pool => "pool", pool, Named;
    /// 虚拟机
    Vm => "VM", vm, Named;
    /// 网络
    Network => "network", network, Named, Destroyable;
    /// 存储库
    Sr => "SR", sr, Named;
    /// 物理网卡
    Pif => "PIF", pif;
    /// 虚拟磁盘
    Vdi => "VDI", vdi, Named;
    /// 虚拟网卡
    Vif => "VIF", vif, Destroyable;
    /// 异步任务
    Task => "task", task, Named, Destroyable;
}

fn method_name<K: Kind>(name: &str) -> String {
    format!("{}.{}", K::CLASS, name)
}

// ============================================
// 资源句柄
// ============================================

/// 资源句柄
///
/// 服务端签发的不透明引用，绑定到签发它的客户端。句柄本身不持有状态，
/// 可自由克隆；远端对象被销毁后句柄随之失效。
pub struct Ref<'a, K: Kind> {
    reference: String,
    client: &'a XenClient,
    _kind: PhantomData<fn() -> K>,
}

impl<'a, K: Kind> Ref<'a, K> {
    pub(crate) fn new(reference: impl Into<String>, client: &'a XenClient) -> Self {
        Self {
            reference: reference.into(),
            client,
            _kind: PhantomData,
        }
    }

    /// 不透明引用字符串
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// 所属客户端
    pub fn client(&self) -> &'a XenClient {
        self.client
    }

    pub fn into_reference(self) -> String {
        self.reference
    }

    /// 以本句柄引用为第一个参数调用 `<class>.<name>`
    pub(crate) async fn invoke<T: FromPayload<'a>>(&self, name: &str, args: Vec<Value>) -> Result<T> {
        let mut params = Vec::with_capacity(args.len() + 1);
        params.push(json!(self.reference));
        params.extend(args);
        self.client.call_as(&method_name::<K>(name), params).await
    }

    /// 获取 UUID
    pub async fn uuid(&self) -> Result<String> {
        self.invoke("get_uuid", Vec::new()).await
    }

    /// 获取完整记录
    pub async fn record(&self) -> Result<Record> {
        self.invoke("get_record", Vec::new()).await
    }
}

impl<'a, K: Named> Ref<'a, K> {
    /// 获取名称
    pub async fn name_label(&self) -> Result<String> {
        self.invoke("get_name_label", Vec::new()).await
    }

    /// 获取描述
    pub async fn name_description(&self) -> Result<String> {
        self.invoke("get_name_description", Vec::new()).await
    }
}

impl<'a, K: Destroyable> Ref<'a, K> {
    /// 销毁远端对象，句柄随之消耗
    pub async fn destroy(self) -> Result<()> {
        info!("销毁 {}: {}", K::CLASS, self.reference);
        self.invoke("destroy", Vec::new()).await
    }
}

impl<K: Kind> Clone for Ref<'_, K> {
    fn clone(&self) -> Self {
        Self {
            reference: self.reference.clone(),
            client: self.client,
            _kind: PhantomData,
        }
    }
}

impl<K: Kind> fmt::Debug for Ref<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ref<{}>({})", K::CLASS, self.reference)
    }
}

impl<K: Kind> PartialEq for Ref<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        self.reference == other.reference && std::ptr::eq(self.client, other.client)
    }
}

impl<K: Kind> Eq for Ref<'_, K> {}

impl<'a, K: Kind> FromPayload<'a> for Ref<'a, K> {
    fn from_payload(payload: Payload, client: &'a XenClient, method: &str) -> Result<Self> {
        payload
            .into_reference(method)
            .map(|reference| Ref::new(reference, client))
    }
}

/// 可空引用字段（如停机虚拟机的 `resident_on`）
impl<'a, K: Kind> FromPayload<'a> for Option<Ref<'a, K>> {
    fn from_payload(payload: Payload, client: &'a XenClient, method: &str) -> Result<Self> {
        Ok(payload
            .into_optional_reference(method)?
            .map(|reference| Ref::new(reference, client)))
    }
}

impl<'a, K: Kind> FromPayload<'a> for Vec<Ref<'a, K>> {
    fn from_payload(payload: Payload, client: &'a XenClient, method: &str) -> Result<Self> {
        Ok(payload
            .into_reference_list(method)?
            .into_iter()
            .map(|reference| Ref::new(reference, client))
            .collect())
    }
}

// ============================================
// 资源列表访问
// ============================================

/// 某一资源类型的查询 API
pub struct ResourceApi<'a, K: Kind> {
    client: &'a XenClient,
    _kind: PhantomData<fn() -> K>,
}

impl<'a, K: Kind> ResourceApi<'a, K> {
    /// 创建新的资源 API 实例
    pub(crate) fn new(client: &'a XenClient) -> Self {
        Self {
            client,
            _kind: PhantomData,
        }
    }

    /// 查询全部对象（顺序与服务端一致）
    pub async fn get_all(&self) -> Result<Vec<Ref<'a, K>>> {
        info!("查询所有 {}", K::CLASS);
        self.client
            .call_as(&method_name::<K>("get_all"), Vec::new())
            .await
    }

    /// 按 UUID 查询
    pub async fn get_by_uuid(&self, uuid: &str) -> Result<Ref<'a, K>> {
        info!("按 UUID 查询 {}: {}", K::CLASS, uuid);
        self.client
            .call_as(&method_name::<K>("get_by_uuid"), vec![json!(uuid)])
            .await
    }

    /// 把服务端返回的引用包装成句柄，不做远程调用
    ///
    /// 空引用或 `OpaqueRef:NULL` 被拒绝。
    pub fn wrap(&self, reference: impl Into<String>) -> Result<Ref<'a, K>> {
        let reference = reference.into();
        if reference.is_empty() || reference == NULL_REF {
            return Err(XenError::PreconditionError(format!(
                "无效的 {} 引用: {:?}",
                K::CLASS,
                reference
            )));
        }
        Ok(Ref::new(reference, self.client))
    }

    /// 查询全部对象及其记录
    pub async fn get_all_records(&self) -> Result<Vec<(Ref<'a, K>, Record)>> {
        info!("查询所有 {} 记录", K::CLASS);
        let method = method_name::<K>("get_all_records");
        let records = self.client.call(&method, Vec::new()).await?.into_record(&method)?;

        records
            .into_iter()
            .map(|(reference, record)| match record {
                Value::Object(record) => Ok((Ref::new(reference, self.client), record)),
                other => Err(mismatch(&method, "记录", describe(&other))),
            })
            .collect()
    }
}

impl<'a, K: Named> ResourceApi<'a, K> {
    /// 按名称查询（名称不保证唯一）
    pub async fn get_by_name_label(&self, name_label: &str) -> Result<Vec<Ref<'a, K>>> {
        info!("按名称查询 {}: {}", K::CLASS, name_label);
        self.client
            .call_as(&method_name::<K>("get_by_name_label"), vec![json!(name_label)])
            .await
    }
}
