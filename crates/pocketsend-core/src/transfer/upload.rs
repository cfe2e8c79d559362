//! 上传处理器
//!
//! 接收 `POST /android-send` 的 multipart/form-data 请求，把每个带
//! 文件名的 part 落盘到收件箱。
//!
//! 状态分类（见错误处理约定）：
//! - content-type 缺失或不是 multipart → 400 "Invalid multipart request"
//! - 流解析或磁盘 I/O 失败 → 500 "Upload failed"（细节只进日志）
//! - 全部 part 处理完 → 200 "File received"

use log::{debug, error, info};

use crate::storage::StorageLayout;
use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// HTTP 适配层：把核心结果映射为状态码 + 固定消息体
pub(crate) async fn upload_handler(
    State(storage): State<Arc<StorageLayout>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    // 提取失败意味着请求不是 multipart/form-data（或缺 boundary），
    // 属于客户端错误，不记为服务器故障
    let multipart = match multipart {
        Ok(m) => m,
        Err(rejection) => {
            debug!("Rejected non-multipart upload: {rejection}");
            return (StatusCode::BAD_REQUEST, "Invalid multipart request").into_response();
        }
    };

    match receive_into_inbox(&storage, multipart).await {
        Ok(count) => {
            info!("Upload complete: {count} file(s) received");
            (StatusCode::OK, "File received").into_response()
        }
        Err(e) => {
            error!("Upload failed: {e:#}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Upload failed").into_response()
        }
    }
}

/// 核心逻辑：把 multipart 流中的文件 part 写入收件箱
///
/// 没有文件名的 part 视为普通表单字段，静默跳过。
/// 同名文件直接覆盖（last-write-wins）。返回落盘的文件数。
async fn receive_into_inbox(
    storage: &StorageLayout,
    mut multipart: Multipart,
) -> anyhow::Result<usize> {
    storage.ensure_inbox().await?;

    let mut received = 0usize;
    while let Some(mut field) = multipart.next_field().await? {
        let Some(name) = field.file_name().and_then(sanitize_filename) else {
            debug!("Skipping non-file field: {:?}", field.name());
            continue;
        };

        let path = storage.inbox_path(&name);
        let mut file = File::create(&path).await?;
        while let Some(chunk) = field.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        info!("Received file: {}", path.display());
        received += 1;
    }

    Ok(received)
}

/// 从 Content-Disposition 声明的文件名中取出安全的落盘名
///
/// 手机端可能带上路径（`photos/img.jpg`、`C:\a\b.txt`），只取最后
/// 一段路径分量，防止写出收件箱之外；空名和 `.`/`..` 视为无效。
fn sanitize_filename(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim();
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name.to_string())
}
