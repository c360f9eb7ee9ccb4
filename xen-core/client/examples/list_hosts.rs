/// XenAPI 资源巡检
///
/// 功能:
/// 1. 登录 XenAPI
/// 2. 列出主机、虚拟机和默认存储库
///
/// 使用方法:
/// ```bash
/// XEN_HOST=192.168.1.20 XEN_USERNAME=root XEN_PASSWORD=secret \
///     cargo run -p xen-client --example list_hosts
/// ```
///
/// 自签名证书环境可设置 `XEN_INSECURE=1` 跳过证书校验。

use anyhow::Context;
use tracing::warn;
use xen_client::{TransportConfig, XenClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_target(false)
        .init();

    let target = std::env::var("XEN_HOST").context("未设置 XEN_HOST")?;
    let username = std::env::var("XEN_USERNAME").unwrap_or_else(|_| "root".to_string());
    let password = std::env::var("XEN_PASSWORD").context("未设置 XEN_PASSWORD")?;
    let insecure = std::env::var("XEN_INSECURE").is_ok();

    let config = TransportConfig::default().with_verify_ssl(!insecure);
    let mut client = XenClient::connect(&target, &username, &password, config).await?;

    println!("📋 主机:");
    for host in client.host().get_all().await? {
        println!(
            "   {} ({}) - {}",
            host.name_label().await?,
            host.address().await?,
            host.uuid().await?
        );
    }

    println!("\n🖥️  虚拟机:");
    for vm in client.vm().get_all().await? {
        if vm.is_a_template().await? {
            continue;
        }
        println!("   {} [{}]", vm.name_label().await?, vm.power_state().await?);
    }

    match client.default_sr().await {
        Ok(sr) => println!("\n💾 默认存储库: {} ({})", sr.name_label().await?, sr.sr_type().await?),
        Err(e) => warn!("⚠️  无法获取默认存储库: {}", e),
    }

    client.logout().await?;
    Ok(())
}
