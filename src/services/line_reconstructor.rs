//! 文本行重建 - 业务能力层
//!
//! OCR 返回的是带边框的单词，不是整行文本。这里按遍历顺序
//! （page → block → paragraph → word）把单词拼回行：
//!
//! 1. 用边框左边（顶点 0 → 顶点 3）计算角度，只保留 `[45°, 135°)` 的单词
//! 2. 当前单词顶部与上一个单词底部的垂直间距 **大于** 阈值时换行
//! 3. 每个段落开始时状态清零，段落结束时输出未完成的行
//!
//! 结果不做从上到下的视觉排序，完全依赖 OCR 的遍历顺序。

use crate::models::{Paragraph, TextAnnotation, Vertex, Word};

/// 默认换行阈值（问题面）
pub const DEFAULT_LINE_THRESHOLD: f64 = 40.0;

/// 可接受的角度范围 `[MIN, MAX)`
const MIN_ANGLE: f64 = 45.0;
const MAX_ANGLE: f64 = 135.0;

/// 单词左边的角度（度）
///
/// 返回 `None` 表示边框不足 4 个顶点
pub fn word_angle(word: &Word) -> Option<f64> {
    left_edge(word).map(|edge| edge.angle)
}

/// 单词边框的左边：左上、左下两个顶点及其角度
#[derive(Debug, Clone, Copy)]
struct LeftEdge {
    top: Vertex,
    bottom: Vertex,
    angle: f64,
}

fn left_edge(word: &Word) -> Option<LeftEdge> {
    let top = word.bounding_box.top_left()?;
    let bottom = word.bounding_box.bottom_left()?;
    Some(LeftEdge {
        top,
        bottom,
        angle: edge_angle(top, bottom),
    })
}

/// 只返回横排单词的左边
fn horizontal_edge(word: &Word) -> Option<LeftEdge> {
    left_edge(word).filter(|edge| (MIN_ANGLE..MAX_ANGLE).contains(&edge.angle))
}

fn edge_angle(from: Vertex, to: Vertex) -> f64 {
    let y_diff = f64::from(to.y) - f64::from(from.y);
    let x_diff = f64::from(to.x) - f64::from(from.x);

    if x_diff == 0.0 {
        90.0
    } else {
        (y_diff / x_diff).atan().to_degrees().abs()
    }
}

/// 是否按横排文字处理
pub fn is_horizontal(word: &Word) -> bool {
    horizontal_edge(word).is_some()
}

/// 重建所有行，按遍历顺序返回
pub fn reconstruct_lines(annotation: &TextAnnotation, threshold: f64) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in annotation
        .pages
        .iter()
        .flat_map(|page| &page.blocks)
        .flat_map(|block| &block.paragraphs)
    {
        reconstruct_paragraph(paragraph, threshold, &mut lines);
    }

    lines
}

/// 重建行并用换行符拼接
pub fn extract_horizontal_text(annotation: &TextAnnotation, threshold: f64) -> String {
    reconstruct_lines(annotation, threshold).join("\n")
}

fn reconstruct_paragraph(paragraph: &Paragraph, threshold: f64, lines: &mut Vec<String>) {
    let mut prev_bottom: Option<i32> = None;
    let mut current_line = String::new();

    let words = paragraph
        .words
        .iter()
        .filter_map(|word| horizontal_edge(word).map(|edge| (word, edge)));

    for (word, edge) in words {
        if let Some(prev_y) = prev_bottom {
            let gap = f64::from(edge.top.y) - f64::from(prev_y);
            if gap > threshold {
                flush_line(&mut current_line, lines);
            }
        }

        current_line.push(' ');
        current_line.push_str(&word.text());
        prev_bottom = Some(edge.bottom.y);
    }

    if !current_line.is_empty() {
        flush_line(&mut current_line, lines);
    }
}

fn flush_line(current_line: &mut String, lines: &mut Vec<String>) {
    lines.push(current_line.trim().to_string());
    current_line.clear();
}
