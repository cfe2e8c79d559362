//! HTTP 中转服务器
//!
//! 把上传/下载两个处理器接入路由表，在所有本机接口的临时端口上
//! 监听，并给出对端可达的基准 URL（`http://<局域网IP>:<端口>`）。
//! 展示层只需要这个 URL（渲染为二维码和文本）。

use log::{error, info};

use crate::net;
use crate::storage::StorageLayout;
use crate::transfer::{download, upload};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

/// 上传端点：手机 POST multipart 到这里
pub const UPLOAD_PATH: &str = "/android-send";

/// 下载端点：手机 GET 这里取走暂存文件
pub const DOWNLOAD_PATH: &str = "/windows-send";

/// 服务器会话
///
/// 启动时创建一次，进程退出前不变。URL 由绑定端口和解析出的
/// 局域网地址组成，分配后不再改变。
#[derive(Debug, Clone)]
pub struct RelaySession {
    /// 对端可达的基准 URL
    pub url: String,
    /// 解析出的局域网 IPv4 地址
    pub ip: Ipv4Addr,
    /// 系统分配的监听端口
    pub port: u16,
}

/// 文件中转服务器
pub struct RelayServer {
    storage: Arc<StorageLayout>,
}

impl RelayServer {
    /// 以用户选定的根目录创建服务器（尚未监听）
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage: Arc::new(StorageLayout::new(base_dir)),
        }
    }

    /// 处理器与展示层共享的存储布局
    pub fn storage(&self) -> Arc<StorageLayout> {
        Arc::clone(&self.storage)
    }

    /// 启动服务器
    ///
    /// 绑定 `0.0.0.0:0`（系统分配端口），在后台任务中持续服务；
    /// 绑定后解析局域网地址并组装会话 URL。
    /// 正常运行期间没有显式的停止路径，监听套接字随进程退出关闭。
    pub async fn start(&self) -> anyhow::Result<RelaySession> {
        // axum 默认限制请求体 2MB，对文件上传不够用
        let app = Router::new()
            .route(UPLOAD_PATH, post(upload::upload_handler))
            .route(DOWNLOAD_PATH, get(download::download_handler))
            .layer(DefaultBodyLimit::disable())
            .with_state(self.storage());

        let listener = TcpListener::bind("0.0.0.0:0").await?;
        let port = listener.local_addr()?.port();

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("Relay server error: {e}");
            }
        });

        let ip = net::resolve_lan_address();
        let url = format!("http://{ip}:{port}");

        info!("Relay server listening on {url}");

        Ok(RelaySession { url, ip, port })
    }
}
