//! 程序配置
//!
//! 加载顺序：默认值 → TOML 配置文件（可选）→ 环境变量覆盖

use crate::error::{AppError, AppResult, ConfigError};
use crate::models::category::DEFAULT_CATEGORIES;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// 配置文件路径的环境变量名
pub const CONFIG_PATH_ENV: &str = "TRIVIA_OCR_CONFIG";
/// OCR 凭证的环境变量名
pub const API_KEY_ENV: &str = "GOOGLE_VISION_API_KEY";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 卡片图片所在目录
    pub image_folder: String,
    /// CSV 输出目录
    pub output_dir: String,
    /// CSV 文件名前缀
    pub file_prefix: String,
    /// 问题图片的换行阈值（像素）
    pub question_line_threshold: f64,
    /// 答案图片的换行阈值（像素）
    pub answer_line_threshold: f64,
    /// 同时处理的图片对数量
    pub max_concurrent_pairs: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 分类名称（按行号轮询分配）
    pub categories: Vec<String>,
    // --- OCR 配置 ---
    pub vision_api_key: String,
    pub vision_endpoint: String,
    pub request_timeout_secs: u64,
    // --- 输出链接 ---
    pub search_url_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_folder: "Trivial_Pursuit".to_string(),
            output_dir: ".".to_string(),
            file_prefix: "trivial_pursuit_".to_string(),
            question_line_threshold: 40.0,
            answer_line_threshold: 60.0,
            max_concurrent_pairs: 4,
            verbose_logging: false,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            vision_api_key: String::new(),
            vision_endpoint: "https://vision.googleapis.com/v1/images:annotate".to_string(),
            request_timeout_secs: 60,
            search_url_base: "https://www.google.com/search?q=".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：配置文件（如果存在）+ 环境变量
    pub fn load() -> AppResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());
        let base = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        base.with_overrides(|name| std::env::var(name).ok())
    }

    /// 从 TOML 文件加载
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| AppError::file_read_failed(path, e))?;
        Self::from_toml_str(&content, path)
    }

    fn from_toml_str(content: &str, path: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            AppError::Config(ConfigError::FileParseFailed {
                path: path.to_string(),
                source,
            })
        })
    }

    /// 应用覆盖值
    ///
    /// `lookup` 按变量名返回覆盖值，正常运行时即 `std::env::var`
    pub fn with_overrides<F>(mut self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("IMAGE_FOLDER") {
            self.image_folder = v;
        }
        if let Some(v) = lookup("OUTPUT_DIR") {
            self.output_dir = v;
        }
        if let Some(v) = lookup("OUTPUT_FILE_PREFIX") {
            self.file_prefix = v;
        }
        if let Some(v) = parse_var(&lookup, "QUESTION_LINE_THRESHOLD", "f64")? {
            self.question_line_threshold = v;
        }
        if let Some(v) = parse_var(&lookup, "ANSWER_LINE_THRESHOLD", "f64")? {
            self.answer_line_threshold = v;
        }
        if let Some(v) = parse_var(&lookup, "MAX_CONCURRENT_PAIRS", "usize")? {
            self.max_concurrent_pairs = v;
        }
        if let Some(v) = parse_var(&lookup, "VERBOSE_LOGGING", "bool")? {
            self.verbose_logging = v;
        }
        if let Some(v) = lookup(API_KEY_ENV) {
            self.vision_api_key = v;
        }
        if let Some(v) = lookup("VISION_ENDPOINT") {
            self.vision_endpoint = v;
        }
        if let Some(v) = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", "u64")? {
            self.request_timeout_secs = v;
        }
        if let Some(v) = lookup("SEARCH_URL_BASE") {
            self.search_url_base = v;
        }
        Ok(self)
    }

    /// 校验配置（需在创建 OCR 客户端之前调用）
    pub fn validate(&self) -> AppResult<()> {
        if self.vision_api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential {
                var_name: API_KEY_ENV.to_string(),
            }
            .into());
        }
        self.validate_processing()
    }

    /// 只校验与 OCR 后端无关的处理参数
    pub fn validate_processing(&self) -> AppResult<()> {
        if self.categories.is_empty() {
            return Err(AppError::invalid_config("categories", "至少需要一个分类"));
        }
        for (i, name) in self.categories.iter().enumerate() {
            if self.categories[..i].contains(name) {
                return Err(AppError::invalid_config("categories", format!("分类重复: {}", name)));
            }
        }
        if self.max_concurrent_pairs == 0 {
            return Err(AppError::invalid_config("max_concurrent_pairs", "必须大于 0"));
        }
        for (field, value) in [
            ("question_line_threshold", self.question_line_threshold),
            ("answer_line_threshold", self.answer_line_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::invalid_config(field, format!("必须是非负数，当前为 {}", value)));
            }
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, var_name: &str, expected_type: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
    }
}
