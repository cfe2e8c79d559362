//! Pocketsend Core Library
//!
//! 局域网文件中转的核心实现：一台设备（电脑）在局域网地址上暴露
//! HTTP 端点，手机通过浏览器上传文件到收件目录，或下载电脑预先
//! 放入发件槽的文件。
//!
//! # 模块
//!
//! - **net**: 局域网 IPv4 地址解析（过滤虚拟网卡）
//! - **storage**: 收件箱/发件箱目录布局与单槽暂存
//! - **transfer**: HTTP 中转服务器与上传/下载处理器
//!
//! # 使用示例
//!
//! ```ignore
//! use pocketsend_core::RelayServer;
//!
//! // 1. 以用户选定的根目录启动服务器
//! let server = RelayServer::new("/home/user/transfer");
//! let session = server.start().await?;
//! println!("{}", session.url); // http://192.168.1.23:40123
//!
//! // 2. 暂存一个文件供手机下载
//! server.storage().stage(Path::new("photo.jpg")).await?;
//!
//! // 3. 查看收件箱
//! let received = server.storage().inspect_inbox().await?;
//! ```

pub mod net;
pub mod storage;
pub mod transfer;

// Net re-exports
pub use net::resolve_lan_address;

// Storage re-exports
pub use storage::{INBOX_DIR, OUTBOX_DIR, StorageError, StorageLayout};

// Transfer re-exports
pub use transfer::{DOWNLOAD_PATH, RelayServer, RelaySession, UPLOAD_PATH};
