//! 图片扫描
//!
//! 目录下的图片按文件名排序后两两配对：第 0 张是问题面，第 1 张是答案面，依此类推

use crate::error::{AppError, AppResult, FileError};
use crate::models::ImagePair;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// 支持的图片后缀（区分大小写）
pub const IMAGE_EXTENSIONS: [&str; 3] = [".jpeg", ".jpg", ".png"];

/// 是否是支持的图片文件名
pub fn is_image_file(file_name: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext))
}

/// 扫描目录并生成图片对
pub async fn scan_image_pairs(folder: &Path) -> AppResult<Vec<ImagePair>> {
    let folder_display = folder.display().to_string();

    if !fs::try_exists(folder).await.unwrap_or(false) {
        return Err(FileError::DirectoryNotFound {
            path: folder_display,
        }
        .into());
    }

    let mut entries = fs::read_dir(folder)
        .await
        .map_err(|e| AppError::file_read_failed(&folder_display, e))?;

    let mut file_names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(&folder_display, e))?
    {
        let name = entry.file_name().to_string_lossy().to_string();
        if is_image_file(&name) {
            file_names.push(name);
        } else {
            debug!("跳过非图片文件: {}", name);
        }
    }

    file_names.sort();

    if file_names.len() % 2 == 1 {
        if let Some(last) = file_names.last() {
            warn!("⚠️ 图片数量为奇数，最后一张 {} 没有配对，将被忽略", last);
        }
    }

    let pairs = file_names
        .chunks_exact(2)
        .map(|chunk| ImagePair::new(folder.join(&chunk[0]), folder.join(&chunk[1])))
        .collect();

    Ok(pairs)
}
