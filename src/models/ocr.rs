//! OCR 识别结果的层级结构
//!
//! page → block → paragraph → word → symbol，字段名与 Cloud Vision 的
//! `fullTextAnnotation` JSON 保持一致

use serde::{Deserialize, Serialize};

/// 边框顶点（值为 0 的坐标在 JSON 中会被省略）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

impl Vertex {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// 四边形边框，顶点顺序：左上、右上、右下、左下
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingPoly {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
}

impl BoundingPoly {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    /// 左上角（顶点 0）
    pub fn top_left(&self) -> Option<Vertex> {
        self.vertices.first().copied()
    }

    /// 左下角（顶点 3）
    pub fn bottom_left(&self) -> Option<Vertex> {
        self.vertices.get(3).copied()
    }
}

/// 单个字符
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    #[serde(default)]
    pub text: String,
}

/// 单词
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    #[serde(default)]
    pub bounding_box: BoundingPoly,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

impl Word {
    /// 用整段文本构造单词（每个字符一个 symbol）
    pub fn new(text: &str, vertices: [Vertex; 4]) -> Self {
        Self {
            bounding_box: BoundingPoly::new(vertices.to_vec()),
            symbols: text
                .chars()
                .map(|c| Symbol {
                    text: c.to_string(),
                })
                .collect(),
        }
    }

    /// 单词文本：按顺序拼接所有字符
    pub fn text(&self) -> String {
        self.symbols.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// 整张图片的识别结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    #[serde(default)]
    pub pages: Vec<Page>,
    /// OCR 服务给出的原始全文（仅用于调试日志）
    #[serde(default)]
    pub text: String,
}

impl TextAnnotation {
    /// 单页单块，每个元素是一个段落
    pub fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            pages: vec![Page {
                blocks: vec![Block { paragraphs }],
            }],
            text: String::new(),
        }
    }

    /// 单词总数
    pub fn word_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| &p.blocks)
            .flat_map(|b| &b.paragraphs)
            .map(|p| p.words.len())
            .sum()
    }
}
