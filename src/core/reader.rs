use crate::core::{Record, WordList};
use crate::utils::error::{Result, TtsError};
use std::collections::HashMap;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// 將 CSV 位元組解析成單字表
///
/// 第一列為標題列，之後每一列依位置對應到標題名稱。任何格式錯誤
/// (引號未閉合、欄位數與標題不同、非 UTF-8) 都會回傳錯誤且不回傳任何記錄。
pub fn read_from_bytes(data: &[u8]) -> Result<WordList> {
    // BOM 在檔案開頭時移除
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    check_quotes(data)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(data);

    let mut headers: Option<Vec<String>> = None;
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        match &headers {
            None => headers = Some(row.iter().map(str::to_string).collect()),
            Some(names) => {
                let data: HashMap<String, String> = names
                    .iter()
                    .cloned()
                    .zip(row.iter().map(str::to_string))
                    .collect();
                records.push(Record { data });
            }
        }
    }

    let headers = headers.unwrap_or_default();
    tracing::debug!(
        "Parsed {} records with columns: {}",
        records.len(),
        headers.join(", ")
    );

    Ok(WordList { headers, records })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    AfterQuoted,
}

/// 嚴格檢查引號位置
///
/// csv crate 對引號很寬鬆：未閉合的引號會吞掉後面的列，閉合引號後的字元
/// 會直接接到欄位內容。`"` 只能出現在欄位開頭，閉合的 `"` 之後只能接
/// `"` (跳脫)、`,`、`\r`、`\n` 或檔尾。
fn check_quotes(data: &[u8]) -> Result<()> {
    let mut state = QuoteState::FieldStart;
    let mut line = 1usize;

    for &byte in data {
        state = match (state, byte) {
            (QuoteState::Quoted, b'"') => QuoteState::AfterQuoted,
            (QuoteState::Quoted, b'\n') => {
                line += 1;
                QuoteState::Quoted
            }
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            // `""` 在引號欄位內是跳脫的引號
            (QuoteState::AfterQuoted, b'"') => QuoteState::Quoted,
            (_, b',' | b'\r') => QuoteState::FieldStart,
            (_, b'\n') => {
                line += 1;
                QuoteState::FieldStart
            }
            (QuoteState::AfterQuoted, _) => {
                return Err(TtsError::ParseError {
                    message: format!("line {}: extraneous or missing \" in quoted field", line),
                })
            }
            (QuoteState::FieldStart, b'"') => QuoteState::Quoted,
            (_, b'"') => {
                return Err(TtsError::ParseError {
                    message: format!("line {}: bare \" in non-quoted field", line),
                })
            }
            _ => QuoteState::Unquoted,
        };
    }

    if state == QuoteState::Quoted {
        return Err(TtsError::ParseError {
            message: format!("line {}: quoted field is never closed", line),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_every_row_with_all_columns() {
        let input = "日本語,英語,品詞\n犬,dog,noun\n走る,run,verb\n赤い,red,adjective\n";

        let list = read_from_bytes(input.as_bytes()).unwrap();

        assert_eq!(list.headers, vec!["日本語", "英語", "品詞"]);
        assert_eq!(list.len(), 3);
        for record in &list.records {
            for header in &list.headers {
                assert!(record.data.contains_key(header), "missing {}", header);
            }
        }
        assert_eq!(list.records[0].get("日本語"), Some("犬"));
        assert_eq!(list.records[1].get("英語"), Some("run"));
        assert_eq!(list.records[2].get("品詞"), Some("adjective"));
    }

    #[test]
    fn test_strips_utf8_bom_from_first_header() {
        let mut input = vec![0xEF, 0xBB, 0xBF];
        input.extend_from_slice("word,translation\n犬,dog\n".as_bytes());

        let list = read_from_bytes(&input).unwrap();

        assert_eq!(list.headers[0], "word");
        assert!(!list.headers[0].starts_with('\u{feff}'));
        assert_eq!(list.records[0].get("word"), Some("犬"));
    }

    #[test]
    fn test_quoted_fields_keep_commas_and_escaped_quotes() {
        let input = "word,translation\n\"はい、そうです\",\"yes, \"\"it is\"\"\"\n";

        let list = read_from_bytes(input.as_bytes()).unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list.records[0].get("word"), Some("はい、そうです"));
        assert_eq!(list.records[0].get("translation"), Some("yes, \"it is\""));
    }

    #[test]
    fn test_unterminated_quote_is_parse_error() {
        let input = "word,translation\n\"犬,dog\n猫,cat\n";

        let err = read_from_bytes(input.as_bytes()).unwrap_err();

        assert!(matches!(err, TtsError::ParseError { .. }));
    }

    #[test]
    fn test_unterminated_quotes_do_not_merge_rows() {
        let input = "word,translation\n犬,\"dog\n猫,\"cat\n";

        let err = read_from_bytes(input.as_bytes()).unwrap_err();

        assert!(matches!(err, TtsError::ParseError { .. }));
    }

    #[test]
    fn test_text_after_closing_quote_is_parse_error() {
        let input = "word,translation\n\"犬\"x,dog\n";

        let err = read_from_bytes(input.as_bytes()).unwrap_err();

        match err {
            TtsError::ParseError { message } => assert!(message.starts_with("line 2")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_bare_quote_inside_unquoted_field_is_parse_error() {
        let input = "word,translation\n犬,do\"g\"\n";

        assert!(matches!(
            read_from_bytes(input.as_bytes()),
            Err(TtsError::ParseError { .. })
        ));
    }

    #[test]
    fn test_quoted_field_may_span_lines() {
        let input = "word,translation\n\"犬\n(いぬ)\",dog\n";

        let list = read_from_bytes(input.as_bytes()).unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list.records[0].get("word"), Some("犬\n(いぬ)"));
    }

    #[test]
    fn test_row_with_wrong_arity_is_parse_error() {
        let input = "word,translation\n犬,dog\n猫\n";

        let err = read_from_bytes(input.as_bytes()).unwrap_err();

        assert!(matches!(err, TtsError::CsvError(_)));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let input = b"word,translation\n\xff\xfe,dog\n";

        assert!(read_from_bytes(input).is_err());
    }

    #[test]
    fn test_header_only_and_empty_input() {
        let list = read_from_bytes(b"word,translation\n").unwrap();
        assert_eq!(list.headers.len(), 2);
        assert!(list.is_empty());

        let list = read_from_bytes(b"").unwrap();
        assert!(list.headers.is_empty());
        assert!(list.is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let list = read_from_bytes(b"word,translation\r\ninu,dog\r\nneko,cat\r\n").unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.records[1].get("translation"), Some("cat"));
    }
}
