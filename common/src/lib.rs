//! Lady Match Common Library
//!
//! 설문 응답 표를 받아 모든 응답자 쌍의 필수조건 충족 여부와 궁합 점수를 계산하는 엔진.
//! 입출력·화면 표시는 CLI 쪽에서 담당하고, 이 크레이트는 순수한 일괄 변환만 한다.
//!
//! 원본 표 → 스키마 정규화 → (쌍마다) 필수조건 판정 → 채점 → 결과 행

pub mod constraint;
pub mod error;
pub mod export;
pub mod pairing;
pub mod parser;
pub mod schema;
pub mod scoring;
pub mod spec;
pub mod table;
pub mod types;

pub use constraint::{evaluate_pair, requires, DirectionOutcome, MandatoryCheck};
pub use error::{Error, Result};
pub use pairing::{analyze, match_profiles, sort_results, AnalysisOutcome, MandatoryPolicy, MatchOptions};
pub use parser::{Interval, NumericSet, Preference, TokenSet, TraitValue};
pub use schema::{normalize, NormalizationReport, NormalizedTable};
pub use scoring::{score_pair, ScoreCard};
pub use spec::{AttributeDef, AttributeSpec, ComparatorKind, HeaderRule};
pub use table::RawTable;
pub use types::{AttributeValue, PairResult, Profile};
