//! 원본 표 모듈
//!
//! 붙여넣은 TSV 텍스트(구글 폼 응답 복사본)를 헤더 + 행의 직사각형 표로 읽는다.
//! 헤더는 중복·공백·줄바꿈이 섞여 있을 수 있으므로 위치 기반으로 보관한다.

use crate::error::{Error, Result};

/// 헤더 한 줄과 문자열 셀로 이루어진 원본 표
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// 헤더와 행으로 표를 만든다
    ///
    /// 헤더보다 짧은 행은 빈 셀로 채우고, 긴 행은 잘라낸다.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// 탭 구분 텍스트를 읽는다
    pub fn from_tsv(text: &str) -> Result<Self> {
        Self::from_delimited(text, b'\t')
    }

    /// 구분자를 지정해 텍스트를 읽는다
    ///
    /// 따옴표로 감싼 셀 안의 줄바꿈·구분자는 셀 내용으로 취급한다.
    pub fn from_delimited(text: &str, delimiter: u8) -> Result<Self> {
        let text = text.trim_start_matches('\u{feff}');
        if text.trim().is_empty() {
            return Err(Error::EmptyTable);
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = reader.records();
        let headers: Vec<String> = match records.next() {
            Some(record) => record?.iter().map(str::to_string).collect(),
            None => return Err(Error::EmptyTable),
        };

        let mut rows = Vec::new();
        for record in records {
            let record = record.map_err(|e| Error::Table(format!("행 읽기 실패: {}", e)))?;
            let row: Vec<String> = record.iter().map(str::to_string).collect();
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            rows.push(row);
        }

        Ok(Self::new(headers, rows))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 열 전체가 비어 있는지 확인
    pub fn column_is_blank(&self, column: usize) -> bool {
        self.rows
            .iter()
            .all(|row| row.get(column).map_or(true, |cell| cell.trim().is_empty()))
    }
}
