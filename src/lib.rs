//! # Trivia Card OCR
//!
//! 把拍摄的问答卡片（问题面 + 答案面）识别成按分类整理的 CSV 题库
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP 客户端、凭证），只暴露能力
//! - `OcrBackend` - 图片字节 → 带边框的单词层级结构
//! - `VisionClient` - Google Cloud Vision 实现
//!
//! ### ② 业务能力层（Services）
//! - `line_reconstructor` - 按单词角度和垂直间距重建文本行
//! - `text_cleaner` / `record_assembler` - 拆行、去卡号、按行号配对
//! - `image_scanner` / `csv_exporter` - 读目录、写 CSV
//!
//! ### ③ 流程层（Workflow）
//! - `PairFlow` - 一组卡片：OCR 问题面 → OCR 答案面 → 配对
//!
//! ### ④ 编排层（Orchestration）
//! - `App` - 扫描、并发控制、分类、输出、统计
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{OcrBackend, VisionClient};
pub use models::{ImagePair, QaRecord, TextAnnotation};
pub use orchestrator::{App, RunStats};
pub use workflow::{PairCtx, PairFlow, PairOutcome};
