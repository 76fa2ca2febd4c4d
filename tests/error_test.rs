//! 에러 케이스 테스트
//!
//! 잘못된 입력·정의·설정에서의 에러 처리를 검증

use lady_match::error::MatchError;
use lady_match::input::{load_table, InputFormat};
use lady_match_common::{analyze, AttributeSpec, Error, MatchOptions, RawTable};
use std::path::Path;
use tempfile::tempdir;

/// 존재하지 않는 입력 파일
#[test]
fn test_load_nonexistent_file() {
    let result = load_table(Path::new("/nonexistent/path/survey.tsv"), None);
    assert!(matches!(result, Err(MatchError::FileNotFound(_))));
}

/// 빈 입력 파일
#[test]
fn test_load_empty_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("empty.tsv");
    std::fs::write(&path, "  \n").unwrap();

    let err = load_table(&path, None).unwrap_err();
    assert!(matches!(err, MatchError::Common(Error::EmptyTable)));
}

/// xlsx가 아닌 파일을 xlsx로 읽기
#[test]
fn test_load_invalid_xlsx() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, "닉네임\tA\n").unwrap();

    let err = load_table(&path, Some(InputFormat::Xlsx)).unwrap_err();
    assert!(matches!(err, MatchError::XlsxRead(_)));
}

/// 닉네임 열이 없으면 쌍 계산 전에 실패
#[test]
fn test_missing_nickname_column() {
    let table = RawTable::from_tsv("타임스탬프\t레이디 나이\n2024-01-01\t25\n").unwrap();
    let err = analyze(&AttributeSpec::builtin(), &table, &MatchOptions::default()).unwrap_err();

    match err {
        Error::MissingNickname { headers } => {
            assert_eq!(headers, vec!["타임스탬프", "레이디 나이"]);
        }
        other => panic!("MissingNickname이어야 함: {:?}", other),
    }
}

/// 잘못된 속성 정의 JSON
#[test]
fn test_invalid_spec_json() {
    let mut spec = AttributeSpec::builtin();
    spec.attributes[0].weight = 0.0;
    let json = spec.to_json().unwrap();
    assert!(matches!(AttributeSpec::from_json(&json), Err(Error::Spec(_))));

    let mut spec = AttributeSpec::builtin();
    spec.header_rules[0].column = "없는 열".into();
    let json = spec.to_json().unwrap();
    assert!(matches!(AttributeSpec::from_json(&json), Err(Error::Spec(_))));

    assert!(matches!(AttributeSpec::from_json("{ not json"), Err(Error::Json(_))));
}

/// 정의 파일 저장 후 다시 읽기
#[test]
fn test_spec_file_roundtrip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("spec.json");
    std::fs::write(&path, AttributeSpec::builtin().to_json().unwrap()).unwrap();

    let loaded = AttributeSpec::from_file(&path).unwrap();
    assert_eq!(loaded, AttributeSpec::builtin());
}

/// MatchError의 Display 구현 확인
#[test]
fn test_error_display() {
    let errors = vec![
        MatchError::Config("테스트 설정 오류".to_string()),
        MatchError::FileNotFound("survey.tsv".to_string()),
        MatchError::InputFormat("pdf".to_string()),
        MatchError::XlsxRead("시트 없음".to_string()),
        MatchError::ExcelGeneration("Excel 생성 오류".to_string()),
        MatchError::Common(Error::EmptyTable),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "에러 메시지가 비어 있음: {:?}", err);
    }

    // transparent 변환은 공통 에러 메시지를 그대로 보여준다
    let err: MatchError = Error::EmptyTable.into();
    assert_eq!(format!("{}", err), format!("{}", Error::EmptyTable));
}

/// IO 에러 변환
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: MatchError = io_err.into();
    assert!(matches!(err, MatchError::Io(_)));
}
