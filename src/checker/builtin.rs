//! Built-in Korean spelling and spacing corrections.
//!
//! Entries run top to bottom over the same accumulating string, so an entry
//! only ever sees what earlier entries left behind. Keep the order as is.

use super::rules::CorrectionRule;
use lazy_static::lazy_static;

/// Raw `(pattern, replacement)` pairs, matched literally and case-sensitively.
pub const BUILTIN_CORRECTIONS: &[(&str, &str)] = &[
    // 되/돼
    ("됬", "됐"),
    ("되요", "돼요"),
    ("안되요", "안 돼요"),
    ("되서", "돼서"),
    ("않되", "안 되"),
    ("않하", "안 하"),
    // -ㄹ게
    ("할께", "할게"),
    ("할께요", "할게요"),
    ("갈께", "갈게"),
    ("줄께", "줄게"),
    // casual endings
    ("거에요", "거예요"),
    ("구요", "고요"),
    // frequent misspellings
    ("몇일", "며칠"),
    ("어떻해", "어떡해"),
    ("왠만", "웬만"),
    ("금새", "금세"),
    ("오랫만", "오랜만"),
    ("역활", "역할"),
    ("희안", "희한"),
    ("설겆이", "설거지"),
    ("일일히", "일일이"),
    ("깨끗히", "깨끗이"),
    // spacing
    ("할수있", "할 수 있"),
    ("할수없", "할 수 없"),
    ("볼수있", "볼 수 있"),
    ("것같", "것 같"),
];

lazy_static! {
    static ref BUILTIN_RULES: Vec<CorrectionRule> = BUILTIN_CORRECTIONS
        .iter()
        .map(|(from, to)| CorrectionRule::literal(from, to).expect("built-in correction pattern"))
        .collect();
}

/// The built-in table compiled into rules, in table order.
pub fn builtin_rules() -> &'static [CorrectionRule] {
    &BUILTIN_RULES
}
