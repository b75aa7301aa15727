use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 一道题：问题 + 答案（均已清理）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRecord {
    pub question: String,
    pub answer: String,
}

impl QaRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

impl std::fmt::Display for QaRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q: {} | A: {}", self.question, self.answer)
    }
}

/// 一组卡片图片：问题面 + 答案面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    pub question: PathBuf,
    pub answer: PathBuf,
}

impl ImagePair {
    pub fn new(question: impl Into<PathBuf>, answer: impl Into<PathBuf>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}
