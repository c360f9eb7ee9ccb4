//! XenAPI 客户端
//!
//! 通过 RPC 与 XenAPI 管理接口交互：登录获取会话，之后每次调用自动带上会话，
//! 解释结果信封，并把返回的不透明引用包装成绑定到客户端的类型化句柄。
//!
//! # 功能
//!
//! - **会话管理** (`XenClient::login` / `logout`)
//! - **调用信封解释** (`XenClient::call`): 状态判定、错误描述、返回值形态
//! - **资源句柄** (`Ref<'a, K>`): 主机、资源池、虚拟机、网络、存储库、
//!   物理网卡、虚拟磁盘、虚拟网卡、任务
//! - **组合查询**: 资源池默认存储库
//!
//! # 示例
//!
//! ```ignore
//! use xen_client::{TransportConfig, XenClient};
//!
//! let client = XenClient::connect("xen-master", "root", "password", TransportConfig::default()).await?;
//!
//! for host in client.host().get_all().await? {
//!     println!("{}: {}", host.name_label().await?, host.address().await?);
//! }
//!
//! let vif = client.vif().get_by_uuid("5f0b...").await?;
//! let network = vif.network().await?;
//! println!("{} -> {}", vif.mac().await?, network.bridge().await?);
//!
//! let sr = client.default_sr().await?;
//! ```

pub mod api;
pub mod client;
pub mod envelope;
pub mod error;
pub mod models;
pub mod payload;
pub mod session;

pub use client::XenClient;
pub use error::{Result, XenError};

// 导出资源类型与句柄
pub use api::{
    Destroyable, Host, Kind, Named, Network, Pif, Pool, Ref, ResourceApi, Sr, Task, Vdi, Vif, Vm,
    NULL_REF,
};

pub use envelope::{Envelope, STATUS_SUCCESS};
pub use models::NetworkRecord;
pub use payload::{FromPayload, Payload, Record};
pub use session::{Session, SessionRef};

// 传输层
pub use xen_transport::{JsonRpcTransport, Scheme, Transport, TransportConfig, TransportError};
