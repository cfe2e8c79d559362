//! 文件中转模块
//!
//! 包含:
//! - HTTP 中转服务器（临时端口 + 会话 URL）
//! - 上传处理器（multipart POST → 收件箱）
//! - 下载处理器（发件箱单槽 → GET，即取即删）

pub mod download;
pub mod server;
pub mod upload;

pub use server::{DOWNLOAD_PATH, RelayServer, RelaySession, UPLOAD_PATH};
