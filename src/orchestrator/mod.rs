//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<ImagePair>，分类，写 CSV)
//!     ↓
//! workflow::PairFlow (处理单组卡片)
//!     ↓
//! services (能力层：行重建 / 清理 / 配对 / 导出)
//!     ↓
//! infrastructure (基础设施：OcrBackend / VisionClient)
//! ```
//!
//! 只有编排层持有分类账本和并发控制，下层都是无状态的。

pub mod batch_processor;

pub use batch_processor::{App, RunStats};
