//! 日志初始化：控制台始终输出；设置 LOG_FILE 时同时追加写入日志文件，两者使用相同的 fmt 完整格式。

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::FmtSpan,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// 初始化全局 tracing 订阅者。
/// 从环境变量 RUST_LOG 读取日志级别（如 info、debug、trace）；未设置则默认为 info。
/// `log_file_path` 为 Some 时自动创建父目录并追加写入；文件层关闭 ANSI 颜色。
/// 注意：需在调用本函数前加载 .env（如 dotenvy::dotenv()），否则 RUST_LOG 不会生效。
pub fn init_tracing(log_file_path: Option<&str>) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    let file_layer = match log_file_path {
        Some(path) => {
            let file = Arc::new(open_log_file(path)?);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_level(true)
                    .with_file(false)
                    .with_line_number(false),
            )
        }
        None => None,
    };

    Registry::default()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}

/// 以追加模式打开日志文件，必要时创建父目录。
pub fn open_log_file(path: &str) -> std::io::Result<std::fs::File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/nested/bot.log");
        let path_str = path.to_str().unwrap();

        open_log_file(path_str).unwrap();
        assert!(path.exists());

        // Re-opening appends instead of truncating.
        std::fs::write(&path, "first\n").unwrap();
        open_log_file(path_str).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\n");
    }
}
