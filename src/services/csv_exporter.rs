//! CSV 导出 - 业务能力层
//!
//! 每个分类一个文件，两列：`question,answer`。答案列末尾附带一个搜索链接。

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{CategoryBook, QaRecord};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 链接文字
const LINK_LABEL: &str = "En savoir plus";

/// 用答案原文生成搜索链接（`/` 不编码）
pub fn search_url(search_url_base: &str, answer: &str) -> String {
    let encoded = urlencoding::encode(answer).replace("%2F", "/");
    format!("{}{}", search_url_base, encoded)
}

/// 答案 + HTML 链接
pub fn answer_with_link(search_url_base: &str, answer: &str) -> String {
    format!(
        "{} (<a href='{}'>{}</a>)",
        answer,
        search_url(search_url_base, answer),
        LINK_LABEL
    )
}

/// CSV 导出器
pub struct CsvExporter {
    output_dir: PathBuf,
    file_prefix: String,
    search_url_base: String,
}

impl CsvExporter {
    pub fn new(config: &Config) -> Self {
        Self {
            output_dir: PathBuf::from(&config.output_dir),
            file_prefix: config.file_prefix.clone(),
            search_url_base: config.search_url_base.clone(),
        }
    }

    /// 某个分类对应的文件路径
    pub fn path_for(&self, category: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}{}.csv", self.file_prefix, category))
    }

    /// 写入单个分类（覆盖已有文件）
    pub fn write_category(&self, category: &str, records: &[QaRecord]) -> AppResult<PathBuf> {
        let path = self.path_for(category);
        self.write_records(&path, records)?;
        debug!("写入 {} 条题目到 {}", records.len(), path.display());
        Ok(path)
    }

    /// 写入所有分类，空分类也会生成只有表头的文件
    pub fn write_all(&self, book: &CategoryBook) -> AppResult<Vec<PathBuf>> {
        let mut written = Vec::new();
        for (category, records) in book.iter() {
            let path = self.write_category(category, records)?;
            info!("✓ {}: {} 条题目 → {}", category, records.len(), path.display());
            written.push(path);
        }
        Ok(written)
    }

    fn write_records(&self, path: &Path, records: &[QaRecord]) -> AppResult<()> {
        let path_display = path.display().to_string();
        let write_err = |e: csv::Error| AppError::file_write_failed(&path_display, e);

        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_path(path)
            .map_err(write_err)?;

        writer.write_record(["question", "answer"]).map_err(write_err)?;
        for record in records {
            let answer = answer_with_link(&self.search_url_base, &record.answer);
            writer
                .write_record([record.question.as_str(), answer.as_str()])
                .map_err(write_err)?;
        }

        writer
            .flush()
            .map_err(|e| AppError::file_write_failed(&path_display, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const GOOGLE: &str = "https://www.google.com/search?q=";

    fn exporter_in(dir: &Path) -> CsvExporter {
        CsvExporter::new(&Config {
            output_dir: dir.to_string_lossy().to_string(),
            ..Config::default()
        })
    }

    #[test]
    fn test_search_url_encoding() {
        assert_eq!(search_url(GOOGLE, "Paris"), "https://www.google.com/search?q=Paris");
        assert_eq!(
            search_url(GOOGLE, "Victor Hugo"),
            "https://www.google.com/search?q=Victor%20Hugo"
        );
        assert_eq!(
            search_url(GOOGLE, "Émile Zola"),
            "https://www.google.com/search?q=%C3%89mile%20Zola"
        );
        assert_eq!(search_url(GOOGLE, "AC/DC"), "https://www.google.com/search?q=AC/DC");
        assert_eq!(search_url(GOOGLE, "R&B?"), "https://www.google.com/search?q=R%26B%3F");
    }

    #[test]
    fn test_answer_with_link() {
        assert_eq!(
            answer_with_link(GOOGLE, "Paris"),
            "Paris (<a href='https://www.google.com/search?q=Paris'>En savoir plus</a>)"
        );
    }

    #[test]
    fn test_file_name_uses_prefix_and_category() {
        let exporter = exporter_in(Path::new("out"));
        assert_eq!(
            exporter.path_for("Histoire"),
            Path::new("out").join("trivial_pursuit_Histoire.csv")
        );
    }

    #[test]
    fn test_write_category_round_trip() {
        let dir = tempdir().unwrap();
        let exporter = exporter_in(dir.path());
        let records = vec![
            QaRecord::new("Quelle est la capitale de l'Italie ?", "Rome"),
            QaRecord::new("Auteur de « Germinal », 1885 ?", "Émile Zola"),
        ];

        let path = exporter.write_category("Géographie", &records).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("question,answer\r\n"));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "Quelle est la capitale de l'Italie ?");
        assert_eq!(
            &rows[0][1],
            "Rome (<a href='https://www.google.com/search?q=Rome'>En savoir plus</a>)"
        );
        // 含逗号的字段会被引号包裹，读回后内容不变
        assert_eq!(&rows[1][0], "Auteur de « Germinal », 1885 ?");
    }

    #[test]
    fn test_write_overwrites_previous_run() {
        let dir = tempdir().unwrap();
        let exporter = exporter_in(dir.path());
        exporter
            .write_category("Histoire", &[QaRecord::new("Q1", "A1"), QaRecord::new("Q2", "A2")])
            .unwrap();
        let path = exporter.write_category("Histoire", &[]).unwrap();

        let raw = std::fs::read_to_string(path).unwrap();
        assert_eq!(raw, "question,answer\r\n");
    }

    #[test]
    fn test_write_all_creates_every_category() {
        let dir = tempdir().unwrap();
        let exporter = exporter_in(dir.path());
        let categories: Vec<String> = vec!["A".to_string(), "B".to_string()];
        let mut book = CategoryBook::new(&categories);
        book.push(0, QaRecord::new("Q", "R"));

        let written = exporter.write_all(&book).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_missing_output_dir_is_write_error() {
        let dir = tempdir().unwrap();
        let exporter = exporter_in(&dir.path().join("nope"));
        let err = exporter.write_category("A", &[]).unwrap_err();
        assert!(matches!(err, AppError::File(crate::error::FileError::WriteFailed { .. })));
    }
}
