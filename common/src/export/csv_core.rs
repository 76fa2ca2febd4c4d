//! CSV 생성 (스프레드시트 호환을 위해 UTF-8 BOM 포함)

use super::{has_failed_rows, mandatory_label, MANDATORY_HEADERS, RESULT_HEADERS};
use crate::error::{Error, Result};
use crate::types::{format_number, PairResult};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV 출력 옵션
#[derive(Debug, Clone, Copy)]
pub struct CsvOptions {
    /// 엑셀에서 한글이 깨지지 않도록 BOM을 붙인다
    pub bom: bool,
    /// 필수조건/제외 사유 열 포함 (None이면 실패 행이 있을 때만)
    pub include_mandatory: Option<bool>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            bom: true,
            include_mandatory: None,
        }
    }
}

/// 결과를 CSV 바이트로 변환
pub fn to_csv_bytes(results: &[PairResult], options: &CsvOptions) -> Result<Vec<u8>> {
    let include_mandatory = options
        .include_mandatory
        .unwrap_or_else(|| has_failed_rows(results));

    let mut buffer = Vec::new();
    if options.bom {
        buffer.extend_from_slice(UTF8_BOM);
    }

    let mut writer = csv::Writer::from_writer(buffer);

    let mut headers: Vec<&str> = RESULT_HEADERS.to_vec();
    if include_mandatory {
        headers.extend(MANDATORY_HEADERS);
    }
    writer.write_record(&headers)?;

    for result in results {
        let mut record = vec![
            result.nickname_a.clone(),
            result.nickname_b.clone(),
            format_number(result.score),
            format_number(result.total),
            result.percent.to_string(),
            result.summary(),
            result.matched_summary(),
        ];
        if include_mandatory {
            record.push(mandatory_label(result).to_string());
            record.push(result.failure_reason.clone().unwrap_or_default());
        }
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::Export(format!("CSV 버퍼 반환 실패: {}", e)))
}
