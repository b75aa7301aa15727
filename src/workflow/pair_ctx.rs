//! 图片对处理上下文
//!
//! 封装"我正在处理第几组卡片、对应哪两个文件"这一信息

use crate::models::ImagePair;
use std::fmt::Display;
use std::path::Path;

/// 图片对处理上下文
#[derive(Debug, Clone)]
pub struct PairCtx {
    /// 图片对序号（从1开始，仅用于日志显示）
    pub pair_index: usize,

    /// 问题面文件名
    pub question_file: String,

    /// 答案面文件名
    pub answer_file: String,
}

impl PairCtx {
    /// 创建新的上下文
    pub fn new(pair_index: usize, pair: &ImagePair) -> Self {
        Self {
            pair_index,
            question_file: file_name(&pair.question),
            answer_file: file_name(&pair.answer),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

impl Display for PairCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[卡片 #{} 问题#{} 答案#{}]",
            self.pair_index, self.question_file, self.answer_file
        )
    }
}
