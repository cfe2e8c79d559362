//! Pocketsend CLI
//!
//! 展示层薄壳：启动中转服务器、打印传输 URL，再从标准输入读取
//! 命令驱动"暂存文件 / 查看收件箱"两个操作。不含任何传输逻辑。

use anyhow::{Context, Result, bail};
use clap::Parser;
use pocketsend_core::RelayServer;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pocketsend", version, about = "局域网文件互传 - 手机与电脑间的单文件中转")]
struct Cli {
    /// 传输根目录（收件箱/发件箱建立于此）
    dir: PathBuf,

    /// 详细日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 桥接 log crate（pocketsend-core 使用）到 tracing
    let _ = tracing_log::LogTracer::init();

    // 初始化日志
    let default_filter = if cli.verbose {
        "debug"
    } else {
        "warn,pocketsend_core=info"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .try_init();

    // 启动故障：没有可用的根目录就直接退出，不启动服务器
    if !cli.dir.is_dir() {
        bail!("传输目录不存在: {}", cli.dir.display());
    }

    tracing::info!("Pocketsend starting");

    let server = RelayServer::new(cli.dir.clone());
    let storage = server.storage();
    let session = server.start().await.context("启动传输服务器失败")?;

    println!("📡 传输地址: {}", session.url);
    println!("   收件目录: {}", storage.inbox().display());
    println!("   手机在同一 WiFi 下访问上述地址即可互传");
    println!("   命令: send <文件路径> | inbox | url | quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line.split_once(' ') {
            Some(("send", path)) => {
                match storage.stage(Path::new(path.trim())).await {
                    Ok(target) => println!("📤 已就绪: {}", target.display()),
                    Err(e) => eprintln!("❌ 暂存失败: {e}"),
                }
            }
            None if line == "inbox" => match storage.inspect_inbox().await {
                Ok(Some(name)) => println!("📥 已收到: {name}"),
                Ok(None) => println!("   尚未收到文件"),
                Err(e) => eprintln!("❌ 读取收件箱失败: {e}"),
            },
            None if line == "url" => println!("📡 {}", session.url),
            None if line == "quit" || line == "exit" => break,
            None if line.is_empty() => {}
            _ => println!("   命令: send <文件路径> | inbox | url | quit"),
        }
    }

    Ok(())
}
