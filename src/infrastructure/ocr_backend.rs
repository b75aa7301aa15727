//! OCR 后端抽象 - 基础设施层
//!
//! 只暴露"图片字节 → 层级识别结果"的能力

use crate::error::AppResult;
use crate::models::TextAnnotation;
use async_trait::async_trait;

/// OCR 后端
///
/// 职责：
/// - 接收原始图片字节
/// - 返回 page/block/paragraph/word/symbol 层级结构（带边框）
/// - 不关心行重建、分类、CSV
#[async_trait]
pub trait OcrBackend: Send + Sync {
    /// 后端名称（用于日志）
    fn name(&self) -> &str;

    /// 识别图片中的文字
    async fn detect_text(&self, image: &[u8]) -> AppResult<TextAnnotation>;
}
