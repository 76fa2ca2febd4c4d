//! 결과 파일 내보내기 (CSV/JSON/XLSX)
//!
//! 바이트 생성은 `lady_match_common::export`에 있고, 여기서는 경로 결정과 파일 쓰기만 한다.

use crate::cli::OutputFormat;
use crate::error::{MatchError, Result};
use lady_match_common::export::csv_core::{to_csv_bytes, CsvOptions};
use lady_match_common::export::excel_core::generate_excel_buffer;
use lady_match_common::PairResult;
use std::path::{Path, PathBuf};

pub const SHEET_NAME: &str = "매칭 결과";

/// 기본 파일 이름 (확장자 제외): `매칭결과_YYYYMMDD`
pub fn default_stem() -> String {
    format!("매칭결과_{}", chrono::Local::now().format("%Y%m%d"))
}

/// 출력 경로 결정
///
/// 디렉터리이거나 확장자가 없으면 그 아래에 기본 이름으로 만든다.
pub fn output_path_for_format(output: &Path, stem: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, extension))
    } else {
        output.to_path_buf()
    }
}

/// `all` 형식일 때 세 파일의 경로
fn output_paths_for_all(output: &Path, stem: &str) -> [(OutputFormat, PathBuf); 3] {
    let (dir, stem) = if output.is_dir() || output.extension().is_none() {
        (output.to_path_buf(), stem.to_string())
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(stem)
            .to_string();
        (parent, stem)
    };

    [
        (OutputFormat::Csv, dir.join(format!("{}.csv", stem))),
        (OutputFormat::Json, dir.join(format!("{}.json", stem))),
        (OutputFormat::Xlsx, dir.join(format!("{}.xlsx", stem))),
    ]
}

pub fn csv_bytes(results: &[PairResult]) -> Result<Vec<u8>> {
    Ok(to_csv_bytes(results, &CsvOptions::default())?)
}

pub fn json_bytes(results: &[PairResult]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(results)?)
}

pub fn xlsx_bytes(results: &[PairResult]) -> Result<Vec<u8>> {
    generate_excel_buffer(results, SHEET_NAME).map_err(MatchError::ExcelGeneration)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

fn bytes_for(results: &[PairResult], format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => csv_bytes(results),
        OutputFormat::Json => json_bytes(results),
        OutputFormat::Xlsx => xlsx_bytes(results),
        OutputFormat::Table | OutputFormat::All => Err(MatchError::Config(format!(
            "파일로 내보낼 수 없는 형식입니다: {}",
            format
        ))),
    }
}

/// 결과를 파일로 내보내고 작성한 경로를 돌려준다
///
/// # Arguments
/// * `results` - 정렬된 매칭 결과
/// * `format` - csv / json / xlsx / all
/// * `output` - 출력 파일 또는 디렉터리
pub fn export_results(
    results: &[PairResult],
    format: OutputFormat,
    output: &Path,
) -> Result<Vec<PathBuf>> {
    let stem = default_stem();
    let targets: Vec<(OutputFormat, PathBuf)> = match format {
        OutputFormat::All => output_paths_for_all(output, &stem).to_vec(),
        _ => {
            let extension = format
                .extension()
                .ok_or_else(|| MatchError::Config("표 형식은 파일로 내보낼 수 없습니다".into()))?;
            vec![(format, output_path_for_format(output, &stem, extension))]
        }
    };

    let mut written = Vec::new();
    for (format, path) in targets {
        let bytes = bytes_for(results, format)?;
        write_file(&path, &bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "파일 저장");
        written.push(path);
    }
    Ok(written)
}
