use crate::{Condition, LanguageTransforms, Rule};
use once_cell::sync::Lazy;
use regex::Regex;

const SEPARABLE_PREFIXES: &[&str] = &[
    "ab", "an", "auf", "aus", "auseinander", "bei", "da", "dabei", "dar", "daran", "dazwischen", "durch", "ein",
    "empor", "entgegen", "entlang", "entzwei", "fehl", "fern", "fest", "fort", "frei", "gegenüber", "gleich", "heim",
    "her", "herab", "heran", "herauf", "heraus", "herbei", "herein", "herüber", "herum", "herunter", "hervor", "hin",
    "hinab", "hinauf", "hinaus", "hinein", "hinterher", "hinunter", "hinweg", "hinzu", "hoch", "los", "mit", "nach",
    "nebenher", "nieder", "statt", "um", "vor", "voran", "voraus", "vorbei", "vorüber", "vorweg", "weg", "weiter",
    "wieder", "zu", "zurecht", "zurück", "zusammen",
];

static SEPARABLE_PAST_PARTICIPLE: Lazy<Regex> = Lazy::new(|| {
    let prefixes = SEPARABLE_PREFIXES.join("|");
    Regex::new(&format!("^({prefixes})ge([a-zA-ZäöüßÄÖÜẞ]+)t$")).expect("separable prefixes are plain words")
});

fn is_german_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || "äöüßÄÖÜẞ".contains(c)
}

/// `"rufe dich an"` with prefix `an` -> `"rufe"`.
fn separated_verb<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let (verb, rest) = text.split_once(' ')?;
    let middle = rest.strip_suffix(prefix)?.strip_suffix(' ')?;
    (!verb.is_empty() && verb.chars().all(is_german_letter) && !middle.is_empty()).then_some(verb)
}

/// Moves a separated prefix back next to its verb: `"rufe dich an" -> "rufe an"`.
fn separated_prefix(prefix: &'static str) -> Rule {
    Rule::other(
        pred!(move |text: &str| separated_verb(text, prefix).is_some()),
        move |text: &str| separated_verb(text, prefix).map(|verb| format!("{verb} {prefix}")),
        &[],
        &[],
    )
}

/// `gemacht -> machen`, `gesagt -> sagen`, ...
fn basic_past_participles() -> Vec<Rule> {
    ["n", "en"]
        .into_iter()
        .map(|suffix| {
            let pattern = regex!(r"^ge([a-zA-ZäöüßÄÖÜẞ]+)t$").clone();
            Rule::regex_replace(pattern, format!("${{1}}{suffix}"), &[], &["vw"])
        })
        .collect()
}

/// `aufgemacht -> aufmachen`.
fn separable_past_participles() -> Vec<Rule> {
    ["n", "en"]
        .into_iter()
        .map(|suffix| {
            let pattern = Regex::clone(&SEPARABLE_PAST_PARTICIPLE);
            Rule::regex_replace(pattern, format!("${{1}}${{2}}{suffix}"), &[], &["vw"])
        })
        .collect()
}

pub(crate) fn transforms() -> LanguageTransforms {
    let conditions: Vec<Condition> = vec![
        condition! { id: "v", name: "Verb", dictionary_form: true, sub: ["vw", "vs"] },
        condition! { id: "vw", name: "Weak verb", dictionary_form: true },
        condition! { id: "vs", name: "Strong verb", dictionary_form: true },
        condition! { id: "n", name: "Noun", dictionary_form: true },
        condition! { id: "adj", name: "Adjective", dictionary_form: true },
    ];

    let transforms = vec![
        transform! {
            name: "nominalization",
            description: "Noun formed from a verb",
            rules: [
                suffix!("ung", "en", [], ["v"]),
                suffix!("lung", "eln", [], ["v"]),
                suffix!("rung", "rn", [], ["v"]),
            ],
        },
        transform! {
            name: "-bar",
            description: "-able adjective from a verb",
            rules: [suffix!("bar", "en", ["adj"], ["v"]), suffix!("bar", "n", ["adj"], ["v"])],
        },
        transform! {
            name: "negative",
            description: "Negation",
            rules: [prefix!("un", "", [], ["adj"])],
        },
        transform! {
            name: "past participle",
            rules: [],
            extend: [basic_past_participles(), separable_past_participles()],
        },
        transform! {
            name: "separated prefix",
            rules: [],
            extend: [SEPARABLE_PREFIXES.iter().map(|&prefix| separated_prefix(prefix)).collect::<Vec<_>>()],
        },
        transform! {
            name: "zu-infinitive",
            rules: [],
            extend: [SEPARABLE_PREFIXES
                .iter()
                .map(|&prefix| Rule::prefix(format!("{prefix}zu"), prefix, &[], &["v"]))
                .collect::<Vec<_>>()],
        },
        transform! {
            name: "-heit",
            description: "Converts an adjective into a noun denoting an abstract quality (schön -> Schönheit), \
                          or a concrete noun into an abstract one (Kind -> Kindheit)",
            rules: [suffix!("heit", "", ["n"], ["adj", "n"]), suffix!("keit", "", ["n"], ["adj", "n"])],
        },
    ];

    LanguageTransforms { language: "de", conditions, transforms }
}
