//! 题目分类
//!
//! 分类不是根据内容判断的：卡片上第 i 行属于第 `i % 分类数` 个分类

use super::record::QaRecord;
use std::collections::HashMap;

/// 默认分类（卡片背面的六种颜色）
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Géographie",
    "Divertissement",
    "Histoire",
    "Arts_et_Littérature",
    "Science_et_Nature",
    "Sports_et_Loisirs",
];

/// 按行号轮询选择分类
///
/// `categories` 为空时返回 `None`
pub fn category_for_index<T>(categories: &[T], index: usize) -> Option<&T> {
    if categories.is_empty() {
        return None;
    }
    categories.get(index % categories.len())
}

/// 分类账本：按分类顺序累积所有图片对的题目
#[derive(Debug, Clone)]
pub struct CategoryBook {
    categories: Vec<String>,
    records: HashMap<String, Vec<QaRecord>>,
}

impl CategoryBook {
    pub fn new(categories: &[String]) -> Self {
        Self {
            categories: categories.to_vec(),
            records: HashMap::new(),
        }
    }

    /// 把第 `line_index` 行的题目放进对应分类
    pub fn push(&mut self, line_index: usize, record: QaRecord) {
        let Some(category) = category_for_index(&self.categories, line_index) else {
            return;
        };
        self.records
            .entry(category.clone())
            .or_default()
            .push(record);
    }

    /// 按分类顺序遍历，没有题目的分类给出空切片
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[QaRecord])> {
        self.categories.iter().map(|category| {
            let records = self
                .records
                .get(category)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            (category.as_str(), records)
        })
    }

    /// 题目总数
    pub fn total(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }
}
