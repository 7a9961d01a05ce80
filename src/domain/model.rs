use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// 單一資料列：欄位名稱 -> 儲存格內容
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, String>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.data.get(column).map(String::as_str)
    }
}

/// 解析後的單字表，`records` 保持原始列順序 (列索引會用於輸出檔名)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl WordList {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

/// 檔名用的語言標籤，例如 `ja_JP`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// API 使用 BCP-47 形式 (`ja_JP` -> `ja-JP`)
    pub fn api_code(&self) -> String {
        self.0.replace('_', "-")
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 欄位與其語言的對應
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBinding {
    pub column: String,
    pub language: LanguageTag,
}

impl ColumnBinding {
    pub fn new(column: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            language: LanguageTag::new(language),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisJob {
    pub row_index: usize,
    pub text: String,
    pub language: LanguageTag,
    pub file_name: String,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total_jobs: usize,
    pub written: Vec<PathBuf>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}
