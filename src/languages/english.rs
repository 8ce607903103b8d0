use crate::{Condition, LanguageTransforms, Rule};

const PHRASAL_VERB_PARTICLES: &[&str] = &[
    "aboard", "about", "above", "across", "ahead", "alongside", "apart", "around", "aside", "astray", "away", "back",
    "before", "behind", "below", "beneath", "besides", "between", "beyond", "by", "close", "down", "east", "west",
    "north", "south", "eastward", "westward", "northward", "southward", "forward", "backward", "backwards", "forwards",
    "home", "in", "inside", "instead", "near", "off", "on", "opposite", "out", "outside", "over", "overhead", "past",
    "round", "since", "through", "throughout", "together", "under", "underneath", "up", "within", "without",
];

const PHRASAL_VERB_PREPOSITIONS: &[&str] = &[
    "aback", "about", "above", "across", "after", "against", "ahead", "along", "among", "apart", "around", "as",
    "aside", "at", "away", "back", "before", "behind", "below", "between", "beyond", "by", "down", "even", "for",
    "forth", "forward", "from", "in", "into", "of", "off", "on", "onto", "open", "out", "over", "past", "round",
    "through", "to", "together", "toward", "towards", "under", "up", "upon", "way", "with", "without",
];

fn is_phrasal_word(word: &str) -> bool {
    PHRASAL_VERB_PARTICLES.contains(&word) || PHRASAL_VERB_PREPOSITIONS.contains(&word)
}

fn starts_with_phrasal_word(text: &str) -> bool {
    PHRASAL_VERB_PARTICLES.iter().chain(PHRASAL_VERB_PREPOSITIONS).any(|w| text.starts_with(w))
}

fn starts_with_particle(text: &str) -> bool {
    PHRASAL_VERB_PARTICLES.iter().any(|w| text.starts_with(w))
}

fn is_word(token: &str) -> bool {
    token.chars().all(|c| c.is_alphanumeric() || c == '_')
}

type Pairs = Vec<(String, String)>;

fn pairs(list: &[(&str, &str)]) -> Pairs {
    list.iter().map(|&(inflected, deinflected)| (inflected.to_string(), deinflected.to_string())).collect()
}

/// `bbed -> b`, `dded -> d`, ... for every consonant in `consonants`.
fn doubled_consonant(consonants: &str, suffix: &str) -> Pairs {
    consonants.chars().map(|c| (format!("{c}{c}{suffix}"), c.to_string())).collect()
}

fn suffix_rules(
    pairs: &[(String, String)],
    conditions_in: &'static [&'static str],
    conditions_out: &'static [&'static str],
) -> Vec<Rule> {
    pairs
        .iter()
        .map(|(inflected, deinflected)| {
            Rule::suffix(inflected.as_str(), deinflected.as_str(), conditions_in, conditions_out)
        })
        .collect()
}

/// Split `"walked out"` into `("walk", "out")` when the first word ends with
/// `inflected` and a phrasal verb word follows.
fn split_phrasal<'a>(text: &'a str, inflected: &str) -> Option<(&'a str, &'a str)> {
    let (head, rest) = text.split_once(' ')?;
    let stem = head.strip_suffix(inflected)?;
    (is_word(head) && starts_with_phrasal_word(rest)).then_some((stem, rest))
}

/// The phrasal verb counterpart of a verb suffix rule: `walked out -> walk out`.
fn phrasal_verb_rule(inflected: String, deinflected: String) -> Rule {
    let matcher = inflected.clone();
    Rule::other(
        pred!(move |text: &str| split_phrasal(text, &matcher).is_some()),
        move |text: &str| split_phrasal(text, &inflected).map(|(stem, rest)| format!("{stem}{deinflected} {rest}")),
        &["v"],
        &["v_phr"],
    )
}

fn phrasal_verb_rules(pairs: &[(String, String)]) -> Vec<Rule> {
    pairs.iter().map(|(inflected, deinflected)| phrasal_verb_rule(inflected.clone(), deinflected.clone())).collect()
}

/// `"look the word up" -> "look up"`: drop the object between a verb and its
/// particle. The object may not contain phrasal verb words itself.
fn remove_interposed_object(text: &str) -> Option<String> {
    let tokens: Vec<&str> = text.split(' ').collect();
    if tokens.len() < 3 || !is_word(tokens[0]) {
        return None;
    }
    // Tokens after the verb up to (and including) the first phrasal word.
    let limit = tokens[1..].iter().position(|t| is_phrasal_word(t)).map_or(tokens.len(), |p| p + 2);
    let particle = (2..limit).rev().find(|&j| starts_with_particle(tokens[j]))?;
    Some(format!("{} {}", tokens[0], tokens[particle..].join(" ")))
}

fn past() -> Pairs {
    let mut past = pairs(&[("ed", ""), ("ed", "e"), ("ied", "y"), ("cked", "c")]);
    past.extend(doubled_consonant("bdgklmnprstz", "ed"));
    past.extend(pairs(&[("laid", "lay"), ("paid", "pay"), ("said", "say")]));
    past
}

fn ing() -> Pairs {
    let mut ing = pairs(&[("ing", ""), ("ing", "e"), ("ying", "ie"), ("cking", "c")]);
    ing.extend(doubled_consonant("bdgklmnprstz", "ing"));
    ing
}

fn third_person() -> Pairs {
    pairs(&[("s", ""), ("es", ""), ("ies", "y")])
}

pub(crate) fn transforms() -> LanguageTransforms {
    let conditions: Vec<Condition> = vec![
        condition! { id: "v", name: "Verb", dictionary_form: true, sub: ["v_phr"] },
        condition! { id: "v_phr", name: "Phrasal verb", dictionary_form: true },
        condition! { id: "n", name: "Noun", dictionary_form: true, sub: ["np", "ns"] },
        condition! { id: "np", name: "Noun plural", dictionary_form: true },
        condition! { id: "ns", name: "Noun singular", dictionary_form: true },
        condition! { id: "adj", name: "Adjective", dictionary_form: true },
        condition! { id: "adv", name: "Adverb", dictionary_form: true },
    ];

    let (past, ing, third_person) = (past(), ing(), third_person());

    let transforms = vec![
        transform! {
            name: "plural",
            description: "Plural form of a noun",
            rules: [
                suffix!("s", "", ["np"], ["ns"]),
                suffix!("es", "", ["np"], ["ns"]),
                suffix!("ies", "y", ["np"], ["ns"]),
                suffix!("ves", "fe", ["np"], ["ns"]),
                suffix!("ves", "f", ["np"], ["ns"]),
            ],
        },
        transform! {
            name: "possessive",
            description: "Possessive form of a noun",
            rules: [suffix!("'s", "", ["n"], ["n"]), suffix!("s'", "s", ["n"], ["n"])],
        },
        transform! {
            name: "past",
            description: "Simple past tense of a verb",
            rules: [],
            extend: [suffix_rules(&past, &["v"], &["v"]), phrasal_verb_rules(&past)],
        },
        transform! {
            name: "ing",
            description: "Present participle of a verb",
            rules: [],
            extend: [suffix_rules(&ing, &["v"], &["v"]), phrasal_verb_rules(&ing)],
        },
        transform! {
            name: "3rd pers. sing. pres",
            description: "Third person singular present tense of a verb",
            rules: [],
            extend: [suffix_rules(&third_person, &["v"], &["v"]), phrasal_verb_rules(&third_person)],
        },
        transform! {
            name: "interposed object",
            description: "Phrasal verb with interposed object",
            rules: [Rule::other(
                pred!(|text: &str| remove_interposed_object(text).is_some()),
                remove_interposed_object,
                &[],
                &["v_phr"],
            )],
        },
        transform! {
            name: "archaic",
            description: "Archaic form of a word",
            rules: [suffix!("'d", "ed", ["v"], ["v"])],
        },
        transform! {
            name: "adverb",
            description: "Adverb form of an adjective",
            rules: [
                suffix!("ly", "", ["adv"], ["adj"]),
                suffix!("ily", "y", ["adv"], ["adj"]),
                suffix!("ly", "le", ["adv"], ["adj"]),
            ],
        },
        transform! {
            name: "comparative",
            description: "Comparative form of an adjective",
            rules: [
                suffix!("er", "", ["adj"], ["adj"]),
                suffix!("er", "e", ["adj"], ["adj"]),
                suffix!("ier", "y", ["adj"], ["adj"]),
            ],
            extend: [suffix_rules(&doubled_consonant("bdgmnt", "er"), &["adj"], &["adj"])],
        },
        transform! {
            name: "superlative",
            description: "Superlative form of an adjective",
            rules: [
                suffix!("est", "", ["adj"], ["adj"]),
                suffix!("est", "e", ["adj"], ["adj"]),
                suffix!("iest", "y", ["adj"], ["adj"]),
            ],
            extend: [suffix_rules(&doubled_consonant("bdgmnt", "est"), &["adj"], &["adj"])],
        },
        transform! {
            name: "dropped g",
            description: "Dropped g in -ing form of a verb",
            rules: [suffix!("in'", "ing", ["v"], ["v"])],
        },
        transform! {
            name: "-y",
            description: "Adjective formed from a verb or noun",
            rules: [suffix!("y", "", ["adj"], ["n", "v"]), suffix!("y", "e", ["adj"], ["n", "v"])],
            extend: [suffix_rules(&doubled_consonant("glmnprst", "y"), &[], &["n", "v"])],
        },
        transform! {
            name: "un-",
            description: "Negative form of an adjective, adverb, or verb",
            rules: [prefix!("un", "", ["adj", "adv", "v"], ["adj", "adv", "v"])],
        },
        transform! {
            name: "going-to future",
            description: "Going-to future tense of a verb",
            rules: [prefix!("going to ", "", ["v"], ["v"])],
        },
        transform! {
            name: "will future",
            description: "Will-future tense of a verb",
            rules: [prefix!("will ", "", ["v"], ["v"])],
        },
        transform! {
            name: "imperative negative",
            description: "Negative imperative form of a verb",
            rules: [prefix!("don't ", "", ["v"], ["v"]), prefix!("do not ", "", ["v"], ["v"])],
        },
        transform! {
            name: "-able",
            description: "Adjective formed from a verb",
            rules: [
                suffix!("able", "", ["v"], ["adj"]),
                suffix!("able", "e", ["v"], ["adj"]),
                suffix!("iable", "y", ["v"], ["adj"]),
            ],
            extend: [suffix_rules(&doubled_consonant("bdgklmnprstz", "able"), &["v"], &["adj"])],
        },
    ];

    LanguageTransforms { language: "en", conditions, transforms }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrasal_split_requires_a_phrasal_word() {
        assert_eq!(split_phrasal("walked out", "ed"), Some(("walk", "out")));
        assert_eq!(split_phrasal("walked home", "ed"), Some(("walk", "home")));
        assert_eq!(split_phrasal("walked quickly", "ed"), None);
        assert_eq!(split_phrasal("walked", "ed"), None);
    }

    #[test]
    fn interposed_object_is_removed() {
        assert_eq!(remove_interposed_object("look the word up").as_deref(), Some("look up"));
        assert_eq!(remove_interposed_object("turn it off").as_deref(), Some("turn off"));
        assert_eq!(remove_interposed_object("look up"), None);
        assert_eq!(remove_interposed_object("go to the store"), None);
    }

    #[test]
    fn doubled_consonants_expand_per_letter() {
        assert_eq!(doubled_consonant("bd", "ed"), pairs(&[("bbed", "b"), ("dded", "d")]));
    }
}
