//! 매칭 점수 계산
//!
//! 모든 속성을 양방향으로 따로 채점한다.
//! - "A 나이": B의 선호를 A의 값이 만족
//! - "B 나이": A의 선호를 B의 값이 만족
//! 각 판정은 속성 가중치만큼 총점에 더해지고, 통과하면 점수에도 더해진다.
//! 거리는 쌍 단위로 한 번만 채점한다.

use crate::constraint::{preference_met, same_region};
use crate::spec::{AttributeSpec, ComparatorKind};
use crate::types::{percent_of, AttributeValue, Profile};

/// 동점 정렬에 쓰는 나이 속성 이름
pub const AGE_ATTRIBUTE: &str = "age";

/// 한 쌍의 채점 결과
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreCard {
    pub score: f64,
    pub total: f64,
    pub matched_labels: Vec<String>,
    /// 나이 판정이 양방향 모두 통과
    pub age_match: bool,
    /// 거리 판정 통과
    pub distance_match: bool,
}

impl ScoreCard {
    pub fn percent(&self) -> f64 {
        percent_of(self.score, self.total)
    }

    fn check(&mut self, weight: f64, passed: bool, label: String) -> bool {
        self.total += weight;
        if passed {
            self.score += weight;
            self.matched_labels.push(label);
        }
        passed
    }
}

/// A(사전순 앞)와 B의 점수 계산
pub fn score_pair(spec: &AttributeSpec, a: &Profile, b: &Profile) -> ScoreCard {
    let mut card = ScoreCard::default();
    let mut saw_age = false;
    let mut age_ok = true;
    let mut distance_ok = true;

    for (index, attr) in spec.attributes.iter().enumerate() {
        let (Some(a_value), Some(b_value)) = (a.value(index), b.value(index)) else {
            continue;
        };

        if attr.kind == ComparatorKind::RegionDistance {
            let passed = match (a_value, b_value) {
                (
                    AttributeValue::Region { region: a_region, short_range_only: a_short },
                    AttributeValue::Region { region: b_region, short_range_only: b_short },
                ) => {
                    let sensitive = *a_short || *b_short;
                    let passed = !sensitive || same_region(a_region, b_region);
                    let label = if sensitive {
                        format!("{} 일치({})", attr.label, spec.short_range_token)
                    } else {
                        format!("{} 무관", attr.label)
                    };
                    card.check(attr.weight, passed, label)
                }
                _ => card.check(attr.weight, false, String::new()),
            };
            distance_ok &= passed;
            continue;
        }

        let a_side = card.check(
            attr.weight,
            preference_met(attr, b_value, a_value),
            format!("A {}", attr.label),
        );
        let b_side = card.check(
            attr.weight,
            preference_met(attr, a_value, b_value),
            format!("B {}", attr.label),
        );

        if attr.name == AGE_ATTRIBUTE {
            saw_age = true;
            age_ok &= a_side && b_side;
        }
    }

    card.age_match = saw_age && age_ok;
    card.distance_match = distance_ok;

    tracing::trace!(
        a = %a.nickname,
        b = %b.nickname,
        score = card.score,
        total = card.total,
        "채점"
    );

    card
}
