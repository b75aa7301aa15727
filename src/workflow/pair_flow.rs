//! 图片对处理流程 - 流程层
//!
//! 核心职责：定义"一组卡片"的完整处理流程
//!
//! 流程顺序：
//! 1. 问题面 → OCR → 行重建（问题阈值）
//! 2. 答案面 → OCR → 行重建（答案阈值）
//! 3. 按行号配对并清理

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::OcrBackend;
use crate::models::{ImagePair, QaRecord};
use crate::services::{extract_horizontal_text, pair_records, split_lines};
use crate::utils::logging::truncate_text;
use crate::workflow::pair_ctx::PairCtx;

/// 单组卡片的处理结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairOutcome {
    /// 下标即卡片上的行号，决定分类
    pub records: Vec<QaRecord>,
    pub question_lines: usize,
    pub answer_lines: usize,
    pub dropped_questions: usize,
}

/// 图片对处理流程
///
/// - 编排单组卡片的 OCR 和配对
/// - 不持有 CSV / 分类状态
/// - 只依赖 OCR 后端和业务能力（services）
#[derive(Clone)]
pub struct PairFlow {
    backend: Arc<dyn OcrBackend>,
    question_threshold: f64,
    answer_threshold: f64,
    verbose_logging: bool,
}

impl PairFlow {
    /// 创建新的处理流程
    pub fn new(config: &Config, backend: Arc<dyn OcrBackend>) -> Self {
        Self {
            backend,
            question_threshold: config.question_line_threshold,
            answer_threshold: config.answer_line_threshold,
            verbose_logging: config.verbose_logging,
        }
    }

    pub async fn run(&self, pair: &ImagePair, ctx: &PairCtx) -> AppResult<PairOutcome> {
        info!("{} 🔍 识别问题面...", ctx);
        let questions = self.read_lines(&pair.question, self.question_threshold).await?;

        info!("{} 🔍 识别答案面...", ctx);
        let answers = self.read_lines(&pair.answer, self.answer_threshold).await?;

        let paired = pair_records(&questions, &answers);
        if paired.dropped_questions > 0 {
            debug!(
                "{} 问题 {} 行，答案 {} 行，丢弃 {} 个问题",
                ctx,
                questions.len(),
                answers.len(),
                paired.dropped_questions
            );
        }

        if self.verbose_logging {
            for (i, record) in paired.records.iter().enumerate() {
                debug!("{} 第 {} 行: {}", ctx, i + 1, truncate_text(&record.to_string(), 120));
            }
        }

        info!("{} ✓ 得到 {} 道题", ctx, paired.records.len());

        Ok(PairOutcome {
            question_lines: questions.len(),
            answer_lines: answers.len(),
            dropped_questions: paired.dropped_questions,
            records: paired.records,
        })
    }

    /// 读取图片 → OCR → 行重建 → 拆行
    async fn read_lines(&self, image_path: &Path, threshold: f64) -> AppResult<Vec<String>> {
        let content = tokio::fs::read(image_path)
            .await
            .map_err(|e| AppError::file_read_failed(image_path.display().to_string(), e))?;

        let annotation = self.backend.detect_text(&content).await?;
        let text = extract_horizontal_text(&annotation, threshold);
        debug!(
            "{} ({}) 识别出 {} 个单词",
            image_path.display(),
            self.backend.name(),
            annotation.word_count()
        );

        Ok(split_lines(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::{Paragraph, TextAnnotation, Vertex, Word};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tempfile::tempdir;

    /// 按图片内容返回预设结果的后端
    struct ScriptedBackend {
        pages: HashMap<Vec<u8>, Vec<Vec<&'static str>>>,
    }

    fn line_words(row: usize, texts: &[&str]) -> Vec<Word> {
        let y = row as i32 * 100;
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let x = i as i32 * 50;
                Word::new(
                    t,
                    [
                        Vertex::new(x, y),
                        Vertex::new(x + 40, y),
                        Vertex::new(x + 40, y + 20),
                        Vertex::new(x, y + 20),
                    ],
                )
            })
            .collect()
    }

    #[async_trait]
    impl OcrBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn detect_text(&self, image: &[u8]) -> AppResult<TextAnnotation> {
            let rows = self.pages.get(image).ok_or_else(|| ApiError::EmptyResponse {
                endpoint: "scripted".to_string(),
            })?;
            let words = rows
                .iter()
                .enumerate()
                .flat_map(|(row, texts)| line_words(row, texts))
                .collect();
            Ok(TextAnnotation::from_paragraphs(vec![Paragraph { words }]))
        }
    }

    #[tokio::test]
    async fn test_pair_flow_pairs_lines() {
        let dir = tempdir().unwrap();
        let q = dir.path().join("01.jpg");
        let a = dir.path().join("02.jpg");
        std::fs::write(&q, b"q").unwrap();
        std::fs::write(&a, b"a").unwrap();

        let mut pages = HashMap::new();
        pages.insert(
            b"q".to_vec(),
            vec![vec!["Capitale", "de", "l'Italie", "?"], vec!["Auteur", "de", "Germinal", "?", "412"]],
        );
        pages.insert(b"a".to_vec(), vec![vec!["Rome"]]);
        let backend: Arc<dyn OcrBackend> = Arc::new(ScriptedBackend { pages });

        let flow = PairFlow::new(&Config::default(), backend);
        let pair = ImagePair::new(q, a);
        let outcome = flow.run(&pair, &PairCtx::new(1, &pair)).await.unwrap();

        assert_eq!(outcome.records, vec![QaRecord::new("Capitale de l'Italie ?", "Rome")]);
        assert_eq!(outcome.question_lines, 2);
        assert_eq!(outcome.answer_lines, 1);
        assert_eq!(outcome.dropped_questions, 1);
    }

    #[tokio::test]
    async fn test_unreadable_image_is_fatal() {
        let dir = tempdir().unwrap();
        let backend: Arc<dyn OcrBackend> = Arc::new(ScriptedBackend {
            pages: HashMap::new(),
        });
        let flow = PairFlow::new(&Config::default(), backend);
        let pair = ImagePair::new(dir.path().join("missing_q.jpg"), dir.path().join("missing_a.jpg"));

        let err = flow.run(&pair, &PairCtx::new(1, &pair)).await.unwrap_err();
        assert!(matches!(err, AppError::File(_)));
    }
}
