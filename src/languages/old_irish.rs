use crate::{LanguageTransforms, Rule};

const GEMINATES: &[&str] = &["c", "p", "t", "g", "b", "d", "r", "l", "n", "m", "s"];

/// Part of `text` searched for `original`: everything but the first letter
/// when `not_beginning` is set.
fn searched(text: &str, not_beginning: bool) -> (&str, &str) {
    match text.chars().next() {
        Some(first) if not_beginning => text.split_at(first.len_utf8()),
        _ => ("", text),
    }
}

/// Replace every `original` with `alternate`. With `not_beginning`, an
/// occurrence at the very start of the word is left alone.
fn replace_orthography(text: &str, original: &str, alternate: &str, not_beginning: bool) -> Option<String> {
    let (kept, rest) = searched(text, not_beginning);
    rest.contains(original).then(|| format!("{kept}{}", rest.replace(original, alternate)))
}

fn alternate_orthography(not_beginning: bool, original: impl Into<String>, alternate: &'static str) -> Rule {
    let original = original.into();
    let matcher = original.clone();
    Rule::other(
        pred!(move |text: &str| searched(text, not_beginning).1.contains(matcher.as_str())),
        move |text: &str| replace_orthography(text, &original, alternate, not_beginning),
        &[],
        &[],
    )
}

fn prefixes(pairs: &[(&str, &str)]) -> Vec<Rule> {
    pairs.iter().map(|&(inflected, deinflected)| Rule::prefix(inflected, deinflected, &[], &[])).collect()
}

/// Old Irish has no condition hierarchy: every rule is unconstrained, so any
/// chain of mutations and spelling variants may stack.
pub(crate) fn transforms() -> LanguageTransforms {
    let transforms = vec![
        transform! {
            name: "nd for nn",
            description: "nd for nn",
            rules: [suffix!("nd", "nn", [], [])],
        },
        transform! {
            name: "cg for c",
            description: "cg for c",
            rules: [alternate_orthography(false, "cg", "c")],
        },
        transform! {
            name: "td for t",
            description: "td for t",
            rules: [alternate_orthography(false, "td", "t")],
        },
        transform! {
            name: "pb for p",
            description: "pb for p",
            rules: [alternate_orthography(false, "pb", "p")],
        },
        transform! {
            name: "ǽ/æ for é",
            description: "ǽ/æ for é",
            rules: [alternate_orthography(false, "ǽ", "é"), alternate_orthography(false, "æ", "é")],
        },
        transform! {
            name: "doubled vowel",
            description: "Doubled Vowel",
            rules: [],
            extend: [[("aa", "á"), ("ee", "é"), ("ii", "í"), ("oo", "ó"), ("uu", "ú")]
                .into_iter()
                .map(|(original, alternate)| alternate_orthography(true, original, alternate))
                .collect::<Vec<_>>()],
        },
        transform! {
            name: "doubled consonant",
            description: "Doubled Consonant",
            rules: [],
            extend: [GEMINATES
                .iter()
                .map(|&c| alternate_orthography(true, format!("{c}{c}"), c))
                .collect::<Vec<_>>()],
        },
        transform! {
            name: "lenited",
            description: "Non-Beginning Lenition",
            rules: [
                alternate_orthography(true, "ch", "c"),
                alternate_orthography(true, "ph", "p"),
                alternate_orthography(true, "th", "t"),
            ],
        },
        transform! {
            name: "lenited (Middle Irish)",
            description: "Non-Beginning Lenition (Middle Irish)",
            rules: [
                alternate_orthography(true, "gh", "g"),
                alternate_orthography(true, "bh", "b"),
                alternate_orthography(true, "dh", "d"),
            ],
        },
        transform! {
            name: "[IM] nasalized",
            description: "Nasalized Word",
            rules: [],
            extend: [prefixes(&[("ng", "g"), ("mb", "b"), ("nd", "d"), ("n-", ""), ("m-", "")])],
        },
        transform! {
            name: "[IM] nasalized (Middle Irish)",
            description: "Nasalized Word (Middle Irish)",
            rules: [],
            extend: [prefixes(&[("gc", "c"), ("bp", "p"), ("dt", "d")])],
        },
        transform! {
            name: "[IM] lenited",
            description: "Lenited Word",
            rules: [],
            extend: [prefixes(&[("ch", "c"), ("ph", "p"), ("th", "t")])],
        },
        transform! {
            name: "[IM] lenited (Middle Irish)",
            description: "Lenited Word (Middle Irish)",
            rules: [],
            extend: [prefixes(&[("gh", "g"), ("bh", "b"), ("dh", "d")])],
        },
        transform! {
            name: "[IM] aspirated",
            description: "Aspirated Word",
            rules: [],
            extend: [prefixes(&[("ha", "a"), ("he", "e"), ("hi", "i"), ("ho", "o"), ("hu", "u"), ("h-", "")])],
        },
        transform! {
            name: "[IM] geminated",
            description: "Geminated Word",
            rules: [],
            extend: [
                GEMINATES.iter().map(|&c| Rule::prefix(format!("{c}{c}"), c, &[], &[])).collect::<Vec<_>>(),
                GEMINATES.iter().map(|&c| Rule::prefix(format!("{c}-{c}"), c, &[], &[])).collect::<Vec<_>>(),
            ],
        },
    ];

    LanguageTransforms { language: "sga", conditions: Vec::new(), transforms }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_beginning_replacement_skips_the_first_letter() {
        assert_eq!(replace_orthography("ccc", "cc", "c", true).as_deref(), Some("cc"));
        assert_eq!(replace_orthography("aab", "aa", "á", true), None);
        assert_eq!(replace_orthography("baab", "aa", "á", true).as_deref(), Some("báb"));
        assert_eq!(replace_orthography("", "aa", "á", true), None);
    }

    #[test]
    fn plain_replacement_covers_every_occurrence() {
        assert_eq!(replace_orthography("cgacg", "cg", "c", false).as_deref(), Some("cac"));
        assert_eq!(replace_orthography("ac", "cg", "c", false), None);
    }
}
