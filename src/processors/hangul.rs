//! Hangul syllable decomposition.
//!
//! Precomposed syllables (U+AC00..U+D7A3) are split into conjoining jamo
//! (leading consonant, vowel, optional trailing consonant) so that rules can
//! match on individual jamo. `reassemble_hangul` is the inverse and is used as
//! a postprocessor on the resulting lemmas.

use super::{ProcessorSetting, TextProcessor};

const S_BASE: u32 = 0xAC00;
const L_BASE: u32 = 0x1100;
const V_BASE: u32 = 0x1161;
const T_BASE: u32 = 0x11A7;
const L_COUNT: u32 = 19;
const V_COUNT: u32 = 21;
const T_COUNT: u32 = 28;
const N_COUNT: u32 = V_COUNT * T_COUNT;
const S_COUNT: u32 = L_COUNT * N_COUNT;

const DIRECT_ONLY: &[ProcessorSetting] = &[ProcessorSetting::Direct];

fn syllable_index(c: char) -> Option<u32> {
    (c as u32).checked_sub(S_BASE).filter(|&s| s < S_COUNT)
}

fn leading_index(c: char) -> Option<u32> {
    (c as u32).checked_sub(L_BASE).filter(|&l| l < L_COUNT)
}

fn vowel_index(c: char) -> Option<u32> {
    (c as u32).checked_sub(V_BASE).filter(|&v| v < V_COUNT)
}

/// Index 1..T_COUNT; 0 means "no trailing consonant" and has no jamo.
fn trailing_index(c: char) -> Option<u32> {
    (c as u32).checked_sub(T_BASE).filter(|&t| t > 0 && t < T_COUNT)
}

/// Split every precomposed syllable into conjoining jamo.
pub fn disassemble_hangul(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    for c in text.chars() {
        let Some(s) = syllable_index(c) else {
            out.push(c);
            continue;
        };
        let jamo = [L_BASE + s / N_COUNT, V_BASE + (s % N_COUNT) / T_COUNT, T_BASE + s % T_COUNT];
        let len = if s % T_COUNT == 0 { 2 } else { 3 };
        out.extend(jamo[..len].iter().filter_map(|&cp| char::from_u32(cp)));
    }
    out
}

fn compose(prev: char, next: char) -> Option<char> {
    if let (Some(l), Some(v)) = (leading_index(prev), vowel_index(next)) {
        return char::from_u32(S_BASE + (l * V_COUNT + v) * T_COUNT);
    }
    match (syllable_index(prev), trailing_index(next)) {
        (Some(s), Some(t)) if s % T_COUNT == 0 => char::from_u32(S_BASE + s + t),
        _ => None,
    }
}

/// Compose conjoining jamo sequences back into syllables. Text that is not
/// a valid jamo sequence is passed through.
pub fn reassemble_hangul(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending: Option<char> = None;
    for c in text.chars() {
        if let Some(prev) = pending {
            if let Some(composed) = compose(prev, c) {
                pending = Some(composed);
                continue;
            }
            out.push(prev);
        }
        pending = Some(c);
    }
    out.extend(pending);
    out
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HangulDisassemble;

impl TextProcessor for HangulDisassemble {
    fn id(&self) -> &'static str {
        "disassembleHangul"
    }

    fn settings(&self) -> &'static [ProcessorSetting] {
        DIRECT_ONLY
    }

    fn process(&self, text: &str, setting: ProcessorSetting) -> String {
        match setting {
            ProcessorSetting::Direct => disassemble_hangul(text),
            ProcessorSetting::Off | ProcessorSetting::Inverse => text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HangulReassemble;

impl TextProcessor for HangulReassemble {
    fn id(&self) -> &'static str {
        "reassembleHangul"
    }

    fn settings(&self) -> &'static [ProcessorSetting] {
        DIRECT_ONLY
    }

    fn process(&self, text: &str, setting: ProcessorSetting) -> String {
        match setting {
            ProcessorSetting::Direct => reassemble_hangul(text),
            ProcessorSetting::Off | ProcessorSetting::Inverse => text.to_string(),
        }
    }
}
