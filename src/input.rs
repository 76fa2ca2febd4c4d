//! 입력 파일 로더
//!
//! 설문 응답을 `RawTable`로 읽는다.
//! - TSV: 구글 폼 응답을 복사해 붙여넣은 텍스트 (기본)
//! - CSV: 스프레드시트에서 내려받은 쉼표 구분 파일
//! - XLSX: 응답 시트 파일 (첫 번째 시트만 사용)
//!
//! 경로가 `-`이면 표준 입력에서 텍스트를 읽는다.

use crate::error::{MatchError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use lady_match_common::RawTable;
use std::io::Read;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Tsv,
    Csv,
    Xlsx,
}

impl InputFormat {
    /// 확장자로 형식 추정 (모르는 확장자는 TSV)
    pub fn detect(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("csv") => InputFormat::Csv,
            Some("xlsx") | Some("xlsm") | Some("xls") | Some("ods") => InputFormat::Xlsx,
            _ => InputFormat::Tsv,
        }
    }
}

impl std::str::FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" | "tab" | "txt" => Ok(InputFormat::Tsv),
            "csv" => Ok(InputFormat::Csv),
            "xlsx" | "excel" => Ok(InputFormat::Xlsx),
            _ => Err(format!("Unknown input format: {}. Use tsv, csv, or xlsx", s)),
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Tsv => write!(f, "tsv"),
            InputFormat::Csv => write!(f, "csv"),
            InputFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// 입력 파일을 읽어 원본 표로 만든다
///
/// # Arguments
/// * `path` - 입력 파일 경로 (`-`는 표준 입력)
/// * `format` - 형식 지정 (None이면 확장자로 판단)
pub fn load_table(path: &Path, format: Option<InputFormat>) -> Result<RawTable> {
    let stdin = is_stdin(path);
    if !stdin && !path.exists() {
        return Err(MatchError::FileNotFound(path.display().to_string()));
    }

    let format = format.unwrap_or_else(|| {
        if stdin {
            InputFormat::Tsv
        } else {
            InputFormat::detect(path)
        }
    });
    tracing::debug!(path = %path.display(), %format, "입력 읽기");

    match format {
        InputFormat::Xlsx if stdin => Err(MatchError::InputFormat(
            "표준 입력으로는 xlsx를 읽을 수 없습니다".into(),
        )),
        InputFormat::Xlsx => load_xlsx(path),
        InputFormat::Tsv | InputFormat::Csv => {
            let text = if stdin {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            } else {
                std::fs::read_to_string(path)?
            };
            let delimiter = if format == InputFormat::Csv { b',' } else { b'\t' };
            Ok(RawTable::from_delimited(&text, delimiter)?)
        }
    }
}

/// 스프레드시트 첫 번째 시트를 읽는다
pub fn load_xlsx(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| MatchError::XlsxRead(format!("파일을 열 수 없습니다: {}", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| MatchError::XlsxRead("시트가 없습니다".into()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| MatchError::XlsxRead(format!("시트 '{}' 읽기 실패: {}", sheet_name, e)))?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = rows_iter
        .next()
        .ok_or(lady_match_common::Error::EmptyTable)?
        .iter()
        .map(cell_to_string)
        .collect();

    let rows: Vec<Vec<String>> = rows_iter
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect();

    tracing::debug!(sheet = %sheet_name, rows = rows.len(), "시트 읽기 완료");
    Ok(RawTable::new(headers, rows))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        // 숫자 셀은 27.0 대신 27로
        Data::Float(value) if value.fract() == 0.0 => format!("{}", *value as i64),
        _ => cell.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_detect_format() {
        assert_eq!(InputFormat::detect(Path::new("a.csv")), InputFormat::Csv);
        assert_eq!(InputFormat::detect(Path::new("a.XLSX")), InputFormat::Xlsx);
        assert_eq!(InputFormat::detect(Path::new("a.tsv")), InputFormat::Tsv);
        assert_eq!(InputFormat::detect(Path::new("a")), InputFormat::Tsv);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSV".parse::<InputFormat>().unwrap(), InputFormat::Csv);
        assert!("pdf".parse::<InputFormat>().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_table(Path::new("/nonexistent/survey.tsv"), None).unwrap_err();
        assert!(matches!(err, MatchError::FileNotFound(_)));
    }

    #[test]
    fn test_load_csv_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("survey.csv");
        std::fs::write(&path, "닉네임,레이디 나이\n가람,25\n\n나래,28\n").unwrap();

        let table = load_table(&path, None).unwrap();
        assert_eq!(table.headers(), &["닉네임".to_string(), "레이디 나이".to_string()]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_load_xlsx_file() {
        use rust_xlsxwriter::Workbook;

        let dir = tempdir().unwrap();
        let path = dir.path().join("survey.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "닉네임").unwrap();
        sheet.write_string(0, 1, "레이디 나이").unwrap();
        sheet.write_string(1, 0, "가람").unwrap();
        sheet.write_number(1, 1, 25.0).unwrap();
        workbook.save(&path).unwrap();

        let table = load_table(&path, None).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0], vec!["가람".to_string(), "25".to_string()]);
    }
}
