//! 局域网地址解析
//!
//! 枚举本机网络接口，挑选一个手机可达的 IPv4 地址。
//! 虚拟化/容器网卡（VMware、VirtualBox、Docker 等）对局域网
//! 内的对端设备不可达，按接口名关键字过滤掉。

use get_if_addrs::{IfAddr, get_if_addrs};
use log::{debug, warn};
use std::net::Ipv4Addr;

/// 接口名中出现这些子串（不区分大小写）即视为虚拟网卡
const VIRTUAL_ADAPTER_MARKERS: [&str; 4] = ["virtual", "vmnet", "vbox", "docker"];

/// 判断接口名是否属于虚拟化/容器适配器
fn is_virtual_adapter(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    VIRTUAL_ADAPTER_MARKERS
        .iter()
        .any(|marker| name.contains(marker))
}

/// 从 (接口名, 地址) 候选列表中选出第一个非虚拟网卡的地址
fn pick_lan_ipv4(candidates: &[(String, Ipv4Addr)]) -> Option<Ipv4Addr> {
    candidates
        .iter()
        .find(|(name, _)| !is_virtual_adapter(name))
        .map(|(_, ip)| *ip)
}

/// 解析局域网 IPv4 地址
///
/// 只在启动时调用一次，网络变化后不会重新评估。
/// 没有可用接口时回退到 127.0.0.1，保证服务器仍能启动
/// （此时 URL 对局域网对端无效）。
pub fn resolve_lan_address() -> Ipv4Addr {
    let mut candidates = Vec::new();
    match get_if_addrs() {
        Ok(interfaces) => {
            for iface in interfaces {
                if let IfAddr::V4(v4) = &iface.addr {
                    if !v4.ip.is_loopback() {
                        candidates.push((iface.name.clone(), v4.ip));
                    }
                }
            }
        }
        Err(e) => warn!("Failed to enumerate network interfaces: {e}"),
    }

    debug!("LAN address candidates: {candidates:?}");

    pick_lan_ipv4(&candidates).unwrap_or_else(|| {
        warn!("No usable LAN interface found, falling back to loopback");
        Ipv4Addr::LOCALHOST
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 验证黑名单匹配不区分大小写、按子串生效
    #[test]
    fn test_virtual_adapter_filter() {
        assert!(is_virtual_adapter("VMware Virtual Ethernet Adapter"));
        assert!(is_virtual_adapter("vmnet8"));
        assert!(is_virtual_adapter("VirtualBox Host-Only Network"));
        assert!(is_virtual_adapter("vboxnet0"));
        assert!(is_virtual_adapter("docker0"));
        assert!(is_virtual_adapter("br-Docker"));

        assert!(!is_virtual_adapter("eth0"));
        assert!(!is_virtual_adapter("wlan0"));
        assert!(!is_virtual_adapter("enp3s0"));
        assert!(!is_virtual_adapter("Wi-Fi"));
    }

    /// 虚拟网卡排在前面时必须被跳过
    #[test]
    fn test_pick_skips_virtual_adapters() {
        let candidates = vec![
            ("docker0".to_string(), Ipv4Addr::new(172, 17, 0, 1)),
            ("vmnet1".to_string(), Ipv4Addr::new(192, 168, 56, 1)),
            ("wlan0".to_string(), Ipv4Addr::new(192, 168, 1, 23)),
        ];

        assert_eq!(
            pick_lan_ipv4(&candidates),
            Some(Ipv4Addr::new(192, 168, 1, 23))
        );
    }

    /// 多个真实网卡时取第一个
    #[test]
    fn test_pick_returns_first_real_adapter() {
        let candidates = vec![
            ("eth0".to_string(), Ipv4Addr::new(10, 0, 0, 5)),
            ("wlan0".to_string(), Ipv4Addr::new(192, 168, 1, 23)),
        ];

        assert_eq!(pick_lan_ipv4(&candidates), Some(Ipv4Addr::new(10, 0, 0, 5)));
    }

    /// 全是虚拟网卡（或为空）时不选任何地址
    #[test]
    fn test_pick_none_when_only_virtual() {
        let candidates = vec![
            ("docker0".to_string(), Ipv4Addr::new(172, 17, 0, 1)),
            ("vboxnet0".to_string(), Ipv4Addr::new(192, 168, 56, 1)),
        ];

        assert_eq!(pick_lan_ipv4(&candidates), None);
        assert_eq!(pick_lan_ipv4(&[]), None);
    }
}
