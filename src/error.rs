use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("파일을 찾을 수 없습니다: {0}")]
    FileNotFound(String),

    #[error("입력 형식을 알 수 없습니다: {0} (tsv/csv/xlsx)")]
    InputFormat(String),

    #[error("Excel 읽기 오류: {0}")]
    XlsxRead(String),

    #[error("Excel 생성 오류: {0}")]
    ExcelGeneration(String),

    #[error("JSON 파싱 오류: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] lady_match_common::Error),
}

pub type Result<T> = std::result::Result<T, MatchError>;
