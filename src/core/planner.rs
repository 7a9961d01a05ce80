use crate::core::{ColumnBinding, SynthesisJob, WordList};
use crate::utils::error::{Result, TtsError};
use std::path::Path;

/// 每一列產生兩個合成工作 (來源語言、目標語言)
///
/// 檔名為 `<列索引>_<目標欄位值>_<語言標籤>.mp3`，兩個檔名都以目標欄位值
/// 命名，因此同一列的兩個檔案會排在一起。
pub fn plan_jobs(
    words: &WordList,
    source: &ColumnBinding,
    target: &ColumnBinding,
    output_dir: &Path,
) -> Result<Vec<SynthesisJob>> {
    for binding in [source, target] {
        if !words.headers.is_empty() && !words.has_column(&binding.column) {
            return Err(TtsError::MissingColumnError {
                column: binding.column.clone(),
            });
        }
    }

    let mut jobs = Vec::with_capacity(words.len() * 2);

    for (row_index, record) in words.records.iter().enumerate() {
        let label = sanitize(record.get(&target.column).unwrap_or_default());

        for binding in [source, target] {
            let text = record.get(&binding.column).unwrap_or_default().to_string();
            let file_name = format!("{}_{}_{}.mp3", row_index, label, binding.language);

            jobs.push(SynthesisJob {
                row_index,
                text,
                language: binding.language.clone(),
                destination: output_dir.join(&file_name),
                file_name,
            });
        }
    }

    Ok(jobs)
}

/// 避免目標值中的路徑分隔符號讓輸出跑出輸出目錄
fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect()
}
