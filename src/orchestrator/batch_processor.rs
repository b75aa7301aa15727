//! 批量卡片处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：校验配置、创建 OCR 客户端
//! 2. **扫描**：找出所有图片对（`Vec<ImagePair>`）
//! 3. **并发控制**：使用 Semaphore 限制同时识别的图片对数量
//! 4. **保持顺序**：按图片对顺序收集结果，CSV 行序与文件配对顺序一致
//! 5. **分类与输出**：按行号轮询放入分类，最后统一写 CSV
//!
//! 任何一组失败都会中止整次运行，已识别的结果不会写出。

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{OcrBackend, VisionClient};
use crate::models::{CategoryBook, ImagePair};
use crate::services::{scan_image_pairs, CsvExporter};
use crate::utils::logging::{log_pairs_loaded, log_startup, print_final_stats};
use crate::workflow::{PairCtx, PairFlow, PairOutcome};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// 运行统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub pairs: usize,
    pub question_lines: usize,
    pub answer_lines: usize,
    pub records: usize,
    pub dropped_questions: usize,
    pub files: Vec<PathBuf>,
}

/// 应用主结构
pub struct App {
    config: Config,
    flow: PairFlow,
    exporter: CsvExporter,
}

impl App {
    /// 初始化应用（使用 Cloud Vision）
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;
        let client = VisionClient::new(&config)?;
        Self::with_backend(config, Arc::new(client))
    }

    /// 使用任意 OCR 后端初始化
    pub fn with_backend(config: Config, backend: Arc<dyn OcrBackend>) -> AppResult<Self> {
        config.validate_processing()?;
        log_startup(&config, backend.name());

        Ok(Self {
            flow: PairFlow::new(&config, backend),
            exporter: CsvExporter::new(&config),
            config,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<RunStats> {
        info!("\n📁 正在扫描卡片图片...");
        let pairs = scan_image_pairs(Path::new(&self.config.image_folder)).await?;

        if pairs.is_empty() {
            warn!("⚠️ 没有找到成对的卡片图片，只会生成空的 CSV 文件");
        } else {
            log_pairs_loaded(pairs.len(), self.config.max_concurrent_pairs);
        }

        let outcomes = self.process_all_pairs(&pairs).await?;

        let mut stats = RunStats {
            pairs: pairs.len(),
            ..Default::default()
        };
        let mut book = CategoryBook::new(&self.config.categories);

        for outcome in outcomes {
            stats.question_lines += outcome.question_lines;
            stats.answer_lines += outcome.answer_lines;
            stats.dropped_questions += outcome.dropped_questions;
            for (line_index, record) in outcome.records.into_iter().enumerate() {
                book.push(line_index, record);
            }
        }
        stats.records = book.total();

        info!("\n💾 正在写入 CSV 文件...");
        stats.files = self.exporter.write_all(&book)?;

        print_final_stats(
            stats.pairs,
            stats.records,
            stats.dropped_questions,
            stats.files.len(),
        );

        Ok(stats)
    }

    /// 并发处理所有图片对，结果按输入顺序返回
    ///
    /// 任何一组失败后不再派发新的图片对，已派发但未完成的任务会被中止
    async fn process_all_pairs(&self, pairs: &[ImagePair]) -> AppResult<Vec<PairOutcome>> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_pairs));
        let failed = Arc::new(AtomicBool::new(false));
        let progress = progress_bar(pairs.len());
        let mut handles = Vec::with_capacity(pairs.len());

        for (idx, pair) in pairs.iter().enumerate() {
            if failed.load(Ordering::SeqCst) {
                break;
            }
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| AppError::Other(format!("无法获取并发许可: {}", e)))?;
            // 等待许可期间可能已有任务失败
            if failed.load(Ordering::SeqCst) {
                warn!("⛔ 已有图片对失败，剩余 {} 组不再处理", pairs.len() - idx);
                break;
            }

            let flow = self.flow.clone();
            let pair = pair.clone();
            let ctx = PairCtx::new(idx + 1, &pair);
            let progress = progress.clone();
            let failed = failed.clone();

            let handle = tokio::spawn(async move {
                // 许可最后释放，保证派发循环拿到许可时能看到失败标记
                let _permit = permit;
                let result = flow.run(&pair, &ctx).await;
                if let Err(e) = &result {
                    failed.store(true, Ordering::SeqCst);
                    error!("{} ❌ 处理过程中发生错误: {}", ctx, e);
                }
                progress.inc(1);
                result
            });
            handles.push(handle);
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        let mut handles = handles.into_iter();

        while let Some(handle) = handles.next() {
            match join_outcome(handle).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    for rest in handles.by_ref() {
                        rest.abort();
                    }
                    progress.abandon_with_message("已中止");
                    return Err(e);
                }
            }
        }

        progress.finish_with_message("完成");
        Ok(outcomes)
    }
}

async fn join_outcome(handle: JoinHandle<AppResult<PairOutcome>>) -> AppResult<PairOutcome> {
    handle.await?
}

fn progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} 组 {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("#>-");
    bar.set_style(style);
    bar
}
