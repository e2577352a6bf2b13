//! 日志初始化
//!
//! 日志写入标准错误，标准输出只留给进度信息。

use tracing::Level;
use tracing_subscriber::fmt::time::OffsetTime;

/// 按 `-v` 的次数选择日志级别，默认只输出警告。
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// 初始化全局 tracing 订阅者。
///
/// 优先使用本地时区的 RFC 3339 时间戳，无法确定本地时区偏移时退回默认时间格式。
pub fn init(verbosity: u8) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level_for(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false);

    match OffsetTime::local_rfc_3339() {
        Ok(timer) => builder.with_timer(timer).init(),
        Err(_) => builder.init(),
    }
}
