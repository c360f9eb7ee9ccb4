//! 资源字段访问表
//!
//! 每一行声明 `访问方法 => "远端 getter": 返回形态`，展开为
//! `Ref<'a, 类型>` 上的一个异步方法，调用 `<class>.<getter>(ref)`。

use super::{Host, Network, Pif, Pool, Ref, Sr, Task, Vdi, Vif, Vm};
use crate::error::Result;

macro_rules! resource_fields {
    ($(
        $kind:ident<$lt:lifetime> {
            $(
                $(#[$meta:meta])*
                $name:ident => $getter:literal : $ty:ty
            ),* $(,)?
        }
    )+) => {
        $(
            impl<$lt> Ref<$lt, $kind> {
                $(
                    $(#[$meta])*
                    pub async fn $name(&self) -> Result<$ty> {
                        self.invoke($getter, Vec::new()).await
                    }
                )*
            }
        )+
    };
}

resource_fields! {
    Host<'a> {
        /// 管理地址
        address => "get_address": String,
        hostname => "get_hostname": String,
        /// 当前运行在该主机上的虚拟机
        resident_vms => "get_resident_VMs": Vec<Ref<'a, Vm>>,
        pifs => "get_PIFs": Vec<Ref<'a, Pif>>,
    }

    Pool<'a> {
        /// 池主节点
        master => "get_master": Ref<'a, Host>,
    }

    Vm<'a> {
        /// 电源状态（Halted / Running / Paused / Suspended）
        power_state => "get_power_state": String,
        is_a_template => "get_is_a_template": bool,
        /// 停机时为 `None`
        resident_on => "get_resident_on": Option<Ref<'a, Host>>,
        vifs => "get_VIFs": Vec<Ref<'a, Vif>>,
    }

    Network<'a> {
        bridge => "get_bridge": String,
        mtu => "get_MTU": i64,
        vifs => "get_VIFs": Vec<Ref<'a, Vif>>,
        pifs => "get_PIFs": Vec<Ref<'a, Pif>>,
    }

    Sr<'a> {
        /// 存储类型（lvm / nfs / ext ...）
        sr_type => "get_type": String,
        physical_size => "get_physical_size": i64,
        vdis => "get_VDIs": Vec<Ref<'a, Vdi>>,
    }

    Pif<'a> {
        device => "get_device": String,
        mac => "get_MAC": String,
        ip => "get_IP": String,
        network => "get_network": Ref<'a, Network>,
        host => "get_host": Ref<'a, Host>,
    }

    Vdi<'a> {
        virtual_size => "get_virtual_size": i64,
        sr => "get_SR": Ref<'a, Sr>,
    }

    Vif<'a> {
        /// 所连接的网络
        network => "get_network": Ref<'a, Network>,
        mac => "get_MAC": String,
        device => "get_device": String,
        vm => "get_VM": Ref<'a, Vm>,
        ipv4_addresses => "get_ipv4_addresses": Vec<String>,
    }

    Task<'a> {
        /// 任务状态（pending / success / failure / cancelling / cancelled）
        status => "get_status": String,
        /// 进度（0.0 ~ 1.0）
        progress => "get_progress": f64,
        result => "get_result": String,
        error_info => "get_error_info": Vec<String>,
    }
}
