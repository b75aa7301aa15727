//! 日志工具模块
//!
//! 提供日志初始化和运行过程中的格式化输出

use crate::config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`；否则默认 info，详细模式下本 crate 输出 debug。
/// 可重复调用（测试中多次初始化不会 panic）。
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "info,trivia_card_ocr=debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, backend_name: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 卡片识别模式");
    info!("🔌 OCR 后端: {}", backend_name);
    info!("📁 图片目录: {}", config.image_folder);
    info!("📊 最大并发数: {}", config.max_concurrent_pairs);
    info!(
        "📏 换行阈值: 问题 {} / 答案 {}",
        config.question_line_threshold, config.answer_line_threshold
    );
    info!("{}", "=".repeat(60));
}

/// 记录图片对加载信息
pub fn log_pairs_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 组待处理的卡片图片", total);
    info!("📋 最多同时处理 {} 组\n", max_concurrent);
}

/// 打印最终统计信息
///
/// # 参数
/// - `pairs`: 图片对数量
/// - `records`: 生成的题目数量
/// - `dropped`: 因缺少答案被丢弃的问题数量
/// - `files`: 写入的 CSV 文件数量
pub fn print_final_stats(pairs: usize, records: usize, dropped: usize, files: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("🖼️ 图片对: {}", pairs);
    info!("✅ 题目: {}", records);
    info!("✂️ 丢弃的问题: {}", dropped);
    info!("📄 CSV 文件: {}", files);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
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
