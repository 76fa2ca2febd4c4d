//! 필수조건 판정
//!
//! A가 "꼭 맞아야" 목록에 적은 속성마다, B의 실제 값이 A의 선호를 만족하는지 본다.
//! 방향별로 따로 판정하고(A→B, B→A) 두 방향 모두 통과해야 쌍이 성립한다.
//! 각자의 목록은 자기가 받는 쪽에만 적용된다.

use crate::parser::fold_key;
use crate::spec::{AttributeDef, AttributeSpec};
use crate::types::{AttributeValue, Profile};

/// 한 방향의 판정 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectionOutcome {
    Pass,
    /// 처음 실패한 속성의 표시 이름
    Fail { attribute: String },
}

impl DirectionOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, DirectionOutcome::Pass)
    }
}

/// 양방향 판정 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MandatoryCheck {
    pub a_requires_b: DirectionOutcome,
    pub b_requires_a: DirectionOutcome,
}

impl MandatoryCheck {
    pub fn admissible(&self) -> bool {
        self.a_requires_b.passed() && self.b_requires_a.passed()
    }

    /// 실패 사유 (예: `"A 필수조건 불충족: 거리"`)
    pub fn failure_reason(&self, a: &str, b: &str) -> Option<String> {
        let mut reasons = Vec::new();
        if let DirectionOutcome::Fail { attribute } = &self.a_requires_b {
            reasons.push(format!("{} 필수조건 불충족: {}", a, attribute));
        }
        if let DirectionOutcome::Fail { attribute } = &self.b_requires_a {
            reasons.push(format!("{} 필수조건 불충족: {}", b, attribute));
        }
        if reasons.is_empty() {
            None
        } else {
            Some(reasons.join(" / "))
        }
    }
}

/// 두 거주 지역이 같은지 (공백·대소문자 무시, 빈 값은 불일치)
pub fn same_region(a: &str, b: &str) -> bool {
    let a = fold_key(a);
    !a.is_empty() && a == fold_key(b)
}

/// `wanter`의 선호를 `giver`의 값이 만족하는지 (지역 속성 제외)
///
/// 지역 속성은 방향이 아니라 쌍 단위로 판정하므로 여기서는 항상 true.
pub fn preference_met(attr: &AttributeDef, wanter: &AttributeValue, giver: &AttributeValue) -> bool {
    match (wanter, giver) {
        (AttributeValue::Numeric { wanted, .. }, AttributeValue::Numeric { own, .. }) => {
            // 선택 속성은 비어 있거나 해석 불가한 값을 와일드카드로 본다
            if attr.optional && (wanted.is_empty() || own.is_empty()) {
                return true;
            }
            wanted.intersects(own)
        }
        (AttributeValue::Tokens { wanted, .. }, AttributeValue::Tokens { own, .. }) => {
            wanted.overlaps(own, attr.optional)
        }
        (AttributeValue::Choice { wanted, .. }, AttributeValue::Choice { own, .. }) => {
            wanted.accepts(own, attr.optional)
        }
        (AttributeValue::Region { .. }, AttributeValue::Region { .. }) => true,
        _ => false,
    }
}

/// A가 B에게 요구하는 필수조건 판정
///
/// 알 수 없는 조건 이름은 건너뛰고, 첫 실패에서 즉시 중단한다.
pub fn requires(spec: &AttributeSpec, a: &Profile, b: &Profile) -> DirectionOutcome {
    for condition in &a.mandatory {
        let Some(index) = spec.find_mandatory(condition) else {
            tracing::trace!(nickname = %a.nickname, condition = %condition, "알 수 없는 필수조건 무시");
            continue;
        };
        let attr = &spec.attributes[index];
        let (Some(wanter), Some(giver)) = (a.value(index), b.value(index)) else {
            continue;
        };

        let passed = match (wanter, giver) {
            (
                AttributeValue::Region { region: own_region, short_range_only },
                AttributeValue::Region { region: other_region, .. },
            ) => !*short_range_only || same_region(own_region, other_region),
            _ => preference_met(attr, wanter, giver),
        };

        if !passed {
            return DirectionOutcome::Fail {
                attribute: attr.label.clone(),
            };
        }
    }
    DirectionOutcome::Pass
}

/// 양방향 필수조건 판정
pub fn evaluate_pair(spec: &AttributeSpec, a: &Profile, b: &Profile) -> MandatoryCheck {
    MandatoryCheck {
        a_requires_b: requires(spec, a, b),
        b_requires_a: requires(spec, b, a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::NumericSet;
    use crate::schema::normalize;
    use crate::table::RawTable;

    fn profiles(tsv: &str) -> Vec<Profile> {
        let spec = AttributeSpec::builtin();
        normalize(&spec, &RawTable::from_tsv(tsv).unwrap()).unwrap().profiles
    }

    const HEADER: &str = "닉네임\t꼭 맞아야 조건들\t레이디의 거주 지역\t희망하는 거리 조건\t성격(레이디)\t성격(상대방)\t레이디 나이\t선호하는 상대방 레이디 나이\n";

    #[test]
    fn test_distance_mandatory_fails_on_region_mismatch() {
        let spec = AttributeSpec::builtin();
        let p = profiles(&format!(
            "{}A\t거리\t서울\t단거리\t차분\t상관없음\t25\t20~30\nB\t\t부산\t장거리\t활발\t상관없음\t28\t20~30\n",
            HEADER
        ));
        let check = evaluate_pair(&spec, &p[0], &p[1]);
        assert_eq!(
            check.a_requires_b,
            DirectionOutcome::Fail { attribute: "거리".into() }
        );
        assert!(check.b_requires_a.passed());
        assert!(!check.admissible());
        assert_eq!(check.failure_reason("A", "B").unwrap(), "A 필수조건 불충족: 거리");
    }

    #[test]
    fn test_distance_mandatory_passes_without_short_range() {
        let spec = AttributeSpec::builtin();
        let p = profiles(&format!(
            "{}A\t거리\t서울\t단거리, 장거리\t차분\t상관없음\t25\t20~30\nB\t\t부산\t\t활발\t상관없음\t28\t20~30\n",
            HEADER
        ));
        assert!(evaluate_pair(&spec, &p[0], &p[1]).admissible());
    }

    #[test]
    fn test_per_direction_semantics() {
        let spec = AttributeSpec::builtin();
        // A는 활발한 사람을 원하지만 필수로 두지 않았고, B는 차분한 사람을 필수로 요구
        let p = profiles(&format!(
            "{}A\t\t서울\t\t차분\t활발\t25\t20~30\nB\t성격\t서울\t\t차분\t차분\t28\t20~30\n",
            HEADER
        ));
        let check = evaluate_pair(&spec, &p[0], &p[1]);
        assert!(check.a_requires_b.passed());
        assert!(check.b_requires_a.passed());
        assert!(check.admissible());
    }

    #[test]
    fn test_numeric_mandatory_short_circuits() {
        let spec = AttributeSpec::builtin();
        let p = profiles(&format!(
            "{}A\t나이, 성격\t서울\t\t차분\t활발\t25\t30~35\nB\t\t서울\t\t차분\t상관없음\t28\t20~30\n",
            HEADER
        ));
        let check = evaluate_pair(&spec, &p[0], &p[1]);
        assert_eq!(
            check.a_requires_b,
            DirectionOutcome::Fail { attribute: "나이".into() }
        );
    }

    #[test]
    fn test_unknown_condition_is_ignored() {
        let spec = AttributeSpec::builtin();
        let p = profiles(&format!(
            "{}A\t손톱 길이, 별자리\t서울\t\t차분\t활발\t25\t30~35\nB\t\t부산\t\t차분\t상관없음\t28\t20~30\n",
            HEADER
        ));
        assert!(evaluate_pair(&spec, &p[0], &p[1]).admissible());
    }

    #[test]
    fn test_numeric_preference_optional_blank() {
        let mut spec = AttributeSpec::builtin();
        let height = spec.attributes.iter().position(|a| a.name == "height").unwrap();
        let blank_wanted = AttributeValue::Numeric {
            own: NumericSet::default(),
            wanted: NumericSet::parse(""),
        };
        let tall = AttributeValue::Numeric {
            own: NumericSet::parse("170"),
            wanted: NumericSet::parse("160~175"),
        };

        assert!(!preference_met(&spec.attributes[height], &blank_wanted, &tall));

        spec.attributes[height].optional = true;
        let attr = &spec.attributes[height];
        assert!(preference_met(attr, &blank_wanted, &tall));
        // 상대 키를 모를 때도 선택 속성이면 통과
        assert!(preference_met(attr, &tall, &blank_wanted));
        // 둘 다 있으면 여전히 구간 비교
        let short = AttributeValue::Numeric {
            own: NumericSet::parse("150"),
            wanted: NumericSet::parse("160~175"),
        };
        assert!(!preference_met(attr, &tall, &short));
    }

    #[test]
    fn test_playfulness_spaced_wildcard_mandatory() {
        let spec = AttributeSpec::builtin();
        let header = "닉네임\t꼭 맞아야 조건들\t양금 레벨\t희망 양금 레벨\n";
        let p = profiles(&format!(
            "{}A\t앙큼 레벨\t2\t상관 없음\nB\t앙큼 레벨\t3\t2, 3\n",
            header
        ));
        let check = evaluate_pair(&spec, &p[0], &p[1]);
        assert!(check.a_requires_b.passed());
        assert!(check.b_requires_a.passed());
    }

    #[test]
    fn test_same_region() {
        assert!(same_region("서울 ", "서울"));
        assert!(same_region("Seoul", "seoul"));
        assert!(!same_region("", ""));
        assert!(!same_region("서울", "부산"));
    }
}
