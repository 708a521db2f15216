/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 日志写到 stderr，stdout 只留给答案输出。`RUST_LOG` 优先于 `verbose`。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 测试或重复初始化时忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `max_concurrent`: 最大并发抓取数
/// - `link_count`: 待处理链接数
pub fn log_startup(max_concurrent: usize, link_count: usize) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📊 最大并发抓取数: {}", max_concurrent);
    info!("🔗 待处理链接: {} 个", link_count);
    info!("{}", "=".repeat(60));
}

/// 记录单个作业的步骤数
pub fn log_steps_resolved(task_hash: &str, step_count: usize) {
    if step_count == 0 {
        warn!("[作业 {}] ⚠️ 没有解析到任何步骤", task_hash);
    } else {
        info!("[作业 {}] ✓ 找到 {} 个步骤", task_hash, step_count);
    }
}

/// 记录作业处理完成信息
///
/// # 参数
/// - `task_hash`: 作业 hash
/// - `kept`: 成功生成的任务数
/// - `total`: 步骤总数
/// - `unresolved`: 未识别题型的任务数
pub fn log_assignment_complete(task_hash: &str, kept: usize, total: usize, unresolved: usize) {
    info!("\n{}", "─".repeat(60));
    info!("[作业 {}] ✅ 完成: 成功 {}/{}", task_hash, kept, total);
    if unresolved > 0 {
        warn!("[作业 {}] ⚠️ 未识别题型: {}", task_hash, unresolved);
    }
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
