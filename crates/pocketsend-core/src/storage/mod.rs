//! 存储布局
//!
//! 在用户选定的根目录下管理两个固定子目录：
//!
//! - 收件箱 `from_android/`：手机上传的文件落在这里，首次上传时惰性创建
//! - 发件箱 `to_android/`：任一时刻最多一个"已暂存"文件，下载成功即消费
//!
//! 发件箱不依赖目录遍历顺序，而是用一个显式单槽（`Mutex<Option<PathBuf>>`）
//! 记录当前暂存的文件：`stage()` 写入槽位，下载处理器取走并清空。
//! 槽位锁同时串行化 stage 与下载对发件箱的变更。

use log::{debug, info};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;

/// 收件箱子目录名（手机 → 电脑）
pub const INBOX_DIR: &str = "from_android";

/// 发件箱子目录名（电脑 → 手机）
pub const OUTBOX_DIR: &str = "to_android";

/// 存储操作错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("source path has no usable file name: {0}")]
    BadFileName(PathBuf),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// 传输状态的目录布局
///
/// 根目录在进程生命周期内不变；所有处理器与展示层共享同一实例。
pub struct StorageLayout {
    inbox: PathBuf,
    outbox: PathBuf,
    /// 发件箱单槽：当前暂存文件的路径
    staged: Mutex<Option<PathBuf>>,
}

impl StorageLayout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            inbox: base.join(INBOX_DIR),
            outbox: base.join(OUTBOX_DIR),
            staged: Mutex::new(None),
        }
    }

    pub fn inbox(&self) -> &Path {
        &self.inbox
    }

    pub fn outbox(&self) -> &Path {
        &self.outbox
    }

    /// 确保收件箱目录存在（递归创建）
    pub async fn ensure_inbox(&self) -> io::Result<()> {
        fs::create_dir_all(&self.inbox).await
    }

    /// 收件箱内给定文件名的落盘路径
    pub fn inbox_path(&self, file_name: &str) -> PathBuf {
        self.inbox.join(file_name)
    }

    /// 暂存一个文件供对端下载
    ///
    /// 清空发件箱中所有既有条目后，把源文件以原名拷入发件箱并写入槽位。
    /// 单槽约定：发件箱任一时刻最多一个文件。
    pub async fn stage(&self, source: &Path) -> Result<PathBuf, StorageError> {
        let meta = fs::metadata(source).await?;
        if !meta.is_file() {
            return Err(StorageError::NotAFile(source.to_path_buf()));
        }
        let name = source
            .file_name()
            .ok_or_else(|| StorageError::BadFileName(source.to_path_buf()))?;

        // 槽位锁覆盖整个"清空 + 拷贝 + 写槽"过程，
        // 与下载处理器的消费互斥
        let mut staged = self.staged.lock().await;

        fs::create_dir_all(&self.outbox).await?;
        let mut entries = fs::read_dir(&self.outbox).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                fs::remove_dir_all(&path).await?;
            } else {
                fs::remove_file(&path).await?;
            }
            debug!("Cleared previous outbox entry: {}", path.display());
        }

        let target = self.outbox.join(name);
        fs::copy(source, &target).await?;
        *staged = Some(target.clone());

        info!("Staged for download: {}", target.display());
        Ok(target)
    }

    /// 取走当前暂存文件的路径（消费槽位）
    ///
    /// 槽位只代表本次会话内的暂存；进程重启后遗留在发件箱目录里的
    /// 文件不会被服务，下一次 `stage()` 时被清掉。
    pub async fn take_staged(&self) -> Option<PathBuf> {
        self.staged.lock().await.take()
    }

    /// 查看收件箱：返回列表序第一个条目的文件名
    ///
    /// 收件箱缺失或为空时返回 `None`。只读，不删除。
    /// 多文件时"第一个"取决于文件系统的遍历顺序，未排序。
    pub async fn inspect_inbox(&self) -> io::Result<Option<String>> {
        let mut entries = match fs::read_dir(&self.inbox).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        Ok(entries
            .next_entry()
            .await?
            .map(|entry| entry.file_name().to_string_lossy().into_owned()))
    }
}
