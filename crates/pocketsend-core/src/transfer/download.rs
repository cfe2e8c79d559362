//! 下载处理器
//!
//! 响应 `GET /windows-send`：取出发件箱单槽中的文件，整块读入内存，
//! 从发件箱删除后再作为附件返回（即取即删，没有送达确认——删除发生
//! 在响应交给网络层之前，对端没收到也不会重试）。

use log::{error, info};

use crate::storage::StorageLayout;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
enum DownloadError {
    #[error("no file staged for download")]
    NoFile,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// 待返回的文件：文件名、解析出的 MIME 类型、完整内容
struct ServedFile {
    name: String,
    mime: String,
    bytes: Vec<u8>,
}

/// HTTP 适配层：把核心结果映射为状态码 + 响应头
pub(crate) async fn download_handler(State(storage): State<Arc<StorageLayout>>) -> Response {
    match take_staged_file(&storage).await {
        Ok(served) => {
            info!("Serving {} ({} bytes)", served.name, served.bytes.len());
            let headers = [
                ("Content-Type", served.mime),
                ("Content-Disposition", content_disposition(&served.name)),
            ];
            (headers, served.bytes).into_response()
        }
        // 没有暂存文件是正常状态，不记错误日志
        Err(DownloadError::NoFile) => (StatusCode::NOT_FOUND, "No file available").into_response(),
        Err(e) => {
            error!("Download failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Download failed").into_response()
        }
    }
}

/// 核心逻辑：消费发件箱单槽
///
/// 顺序固定为 读取 → 删除 → 返回；删除失败视为服务器故障。
async fn take_staged_file(storage: &StorageLayout) -> Result<ServedFile, DownloadError> {
    let path = storage.take_staged().await.ok_or(DownloadError::NoFile)?;

    let bytes = fs::read(&path).await?;
    let name = path
        .file_name()
        .unwrap_or_else(|| path.as_os_str())
        .to_string_lossy()
        .into_owned();
    let mime = mime_guess::from_path(&path)
        .first_or_octet_stream()
        .to_string();

    fs::remove_file(&path).await?;

    Ok(ServedFile { name, mime, bytes })
}

/// 组装 attachment 响应头，让手机浏览器按原文件名保存
fn content_disposition(name: &str) -> String {
    format!("attachment; filename=\"{name}\"")
}
