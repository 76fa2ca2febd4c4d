use clap::{Parser, Subcommand};
use crate::input::InputFormat;
use lady_match_common::MandatoryPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lady-match")]
#[command(about = "설문 응답 궁합 매칭 도구", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 상세 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 설문 응답을 읽어 모든 쌍의 매칭 결과를 출력
    Analyze {
        /// 입력 파일 (TSV/CSV/XLSX, `-`는 표준 입력)
        #[arg(required = true)]
        input: PathBuf,

        /// 출력 형식 (table/csv/json/xlsx/all, 생략 시 설정값)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// 출력 파일/디렉터리 (csv/json은 생략 시 표준 출력)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 입력 형식 (생략 시 확장자로 판단)
        #[arg(long)]
        input_format: Option<InputFormat>,

        /// 속성 정의 JSON 파일
        #[arg(long)]
        spec: Option<PathBuf>,

        /// 필수조건 불충족 쌍을 결과에서 제외
        #[arg(long)]
        drop_failed: bool,

        /// 상위 N개만 표시 (표 출력)
        #[arg(long)]
        top: Option<usize>,
    },

    /// 입력 데이터의 헤더 매핑과 파싱 결과 확인
    Inspect {
        /// 입력 파일
        #[arg(required = true)]
        input: PathBuf,

        /// 입력 형식
        #[arg(long)]
        input_format: Option<InputFormat>,

        /// 속성 정의 JSON 파일
        #[arg(long)]
        spec: Option<PathBuf>,
    },

    /// 내장 속성 정의를 JSON으로 출력
    Spec {
        /// 출력 파일 (생략 시 표준 출력)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 설정 표시/편집
    Config {
        /// 기본 속성 정의 파일 설정
        #[arg(long)]
        set_spec: Option<PathBuf>,

        /// 기본 속성 정의 해제 (내장 정의 사용)
        #[arg(long)]
        clear_spec: bool,

        /// 필수조건 불충족 쌍 처리 (emit/drop)
        #[arg(long)]
        set_policy: Option<MandatoryPolicy>,

        /// 기본 출력 형식
        #[arg(long)]
        set_format: Option<OutputFormat>,

        /// 설정 표시
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
    Xlsx,
    All,
}

impl OutputFormat {
    /// 파일로 쓸 때의 확장자 (표 출력은 파일 없음)
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Csv => Some("csv"),
            OutputFormat::Json => Some("json"),
            OutputFormat::Xlsx => Some("xlsx"),
            OutputFormat::Table | OutputFormat::All => None,
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "xlsx" | "excel" => Ok(OutputFormat::Xlsx),
            "all" => Ok(OutputFormat::All),
            _ => Err(format!(
                "Unknown format: {}. Use table, csv, json, xlsx, or all",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Xlsx => write!(f, "xlsx"),
            OutputFormat::All => write!(f, "all"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "lady-match", "analyze", "survey.tsv", "-f", "csv", "--drop-failed", "--top", "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { format, drop_failed, top, .. } => {
                assert_eq!(format, Some(OutputFormat::Csv));
                assert!(drop_failed);
                assert_eq!(top, Some(5));
            }
            _ => panic!("analyze 명령이어야 함"),
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("excel".parse::<OutputFormat>().unwrap(), OutputFormat::Xlsx);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }
}
