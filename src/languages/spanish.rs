use crate::{Condition, LanguageTransforms, Rule};
use regex::Regex;

fn add_accent(vowel: char) -> char {
    match vowel {
        'a' => 'á',
        'e' => 'é',
        'i' => 'í',
        'o' => 'ó',
        'u' => 'ú',
        other => other,
    }
}

/// One suffix rule per vowel: `{v}{inflected}` -> `{accented v}{deinflected}`.
fn accented_vowel_rules(
    vowels: &str,
    inflected: &str,
    deinflected: &str,
    conditions_in: &'static [&'static str],
    conditions_out: &'static [&'static str],
) -> Vec<Rule> {
    vowels
        .chars()
        .map(|v| {
            let accented = format!("{}{deinflected}", add_accent(v));
            Rule::suffix(format!("{v}{inflected}"), accented, conditions_in, conditions_out)
        })
        .collect()
}

/// Undo a stem vowel change (first occurrence of `from`) and replace the
/// matched ending with the infinitive ending.
fn change_stem(text: &str, from: &str, to: &str, ending: &Regex, infinitive: &str) -> Option<String> {
    let stem = text.replacen(from, to, 1);
    Some(ending.replace(&stem, infinitive).into_owned())
}

fn whole_words(forms: &[&'static str], lemma: &'static str) -> Vec<Rule> {
    forms.iter().map(|&form| Rule::whole_word(form, lemma, &["v"], &["v"])).collect()
}

fn suffixes(
    pairs: &[(&str, &str)],
    conditions_in: &'static [&'static str],
    conditions_out: &'static [&'static str],
) -> Vec<Rule> {
    pairs
        .iter()
        .map(|&(inflected, deinflected)| Rule::suffix(inflected, deinflected, conditions_in, conditions_out))
        .collect()
}

fn present_indicative() -> Vec<Rule> {
    let mut rules = vec![
        // Stem-changing verbs first: e -> ie
        Rule::other(
            re!(r"ie([a-z]*)(o|as|a|an)$"),
            |t: &str| change_stem(t, "ie", "e", regex!(r"(o|as|a|an)$"), "ar"),
            &["v_ar"],
            &["v_ar"],
        ),
        Rule::other(
            re!(r"ie([a-z]*)(o|es|e|en)$"),
            |t: &str| change_stem(t, "ie", "e", regex!(r"(o|es|e|en)$"), "er"),
            &["v_er"],
            &["v_er"],
        ),
        Rule::other(
            re!(r"ie([a-z]*)(o|es|e|en)$"),
            |t: &str| change_stem(t, "ie", "e", regex!(r"(o|es|e|en)$"), "ir"),
            &["v_ir"],
            &["v_ir"],
        ),
        // o -> ue (u -> ue for jugar)
        Rule::other(
            re!(r"ue([a-z]*)(o|as|a|an)$"),
            |t: &str| {
                let to = if t.starts_with("jue") { "u" } else { "o" };
                change_stem(t, "ue", to, regex!(r"(o|as|a|an)$"), "ar")
            },
            &["v_ar"],
            &["v_ar"],
        ),
        // o -> hue for oler
        Rule::other(
            re!(r"ue([a-z]*)(o|es|e|en)$"),
            |t: &str| {
                let (from, to) = if t.starts_with("hue") { ("hue", "o") } else { ("ue", "o") };
                change_stem(t, from, to, regex!(r"(o|es|e|en)$"), "er")
            },
            &["v_er"],
            &["v_er"],
        ),
        Rule::other(
            re!(r"ue([a-z]*)(o|es|e|en)$"),
            |t: &str| change_stem(t, "ue", "o", regex!(r"(o|es|e|en)$"), "ir"),
            &["v_ir"],
            &["v_ir"],
        ),
        // e -> i
        Rule::other(
            re!(r"i([a-z]*)(o|es|e|en)$"),
            |t: &str| change_stem(t, "i", "e", regex!(r"(o|es|e|en)$"), "ir"),
            &["v_ir"],
            &["v_ir"],
        ),
    ];
    rules.extend(suffixes(
        &[("o", "ar"), ("as", "ar"), ("a", "ar"), ("amos", "ar"), ("áis", "ar"), ("an", "ar")],
        &["v_ar"],
        &["v_ar"],
    ));
    rules.extend(suffixes(
        &[("o", "er"), ("es", "er"), ("e", "er"), ("emos", "er"), ("éis", "er"), ("en", "er")],
        &["v_er"],
        &["v_er"],
    ));
    rules.extend(suffixes(
        &[("o", "ir"), ("es", "ir"), ("e", "ir"), ("imos", "ir"), ("ís", "ir"), ("en", "ir")],
        &["v_ir"],
        &["v_ir"],
    ));
    // i -> y (incluir, huir, construir)
    rules.extend(suffixes(&[("uyo", "uir"), ("uyes", "uir"), ("uye", "uir"), ("uyen", "uir")], &["v_ir"], &["v_ir"]));
    rules.extend(suffixes(
        &[
            ("tengo", "tener"),
            ("tienes", "tener"),
            ("tiene", "tener"),
            ("tenemos", "tener"),
            ("tenéis", "tener"),
            ("tienen", "tener"),
            ("oigo", "oír"),
            ("oyes", "oír"),
            ("oye", "oír"),
            ("oímos", "oír"),
            ("oís", "oír"),
            ("oyen", "oír"),
            ("vengo", "venir"),
            ("vienes", "venir"),
            ("viene", "venir"),
            ("venimos", "venir"),
            ("venís", "venir"),
            ("vienen", "venir"),
            // irregular yo forms
            ("go", "guir"),
            ("jo", "ger"),
            ("jo", "gir"),
            ("aigo", "aer"),
            ("zco", "cer"),
            ("zco", "cir"),
            ("hago", "hacer"),
            ("pongo", "poner"),
            ("lgo", "lir"),
            ("lgo", "ler"),
        ],
        &["v"],
        &["v"],
    ));
    rules.extend([
        Rule::whole_word("quepo", "caber", &["v"], &["v"]),
        Rule::whole_word("doy", "dar", &["v"], &["v"]),
        Rule::whole_word("sé", "saber", &["v"], &["v"]),
        Rule::whole_word("veo", "ver", &["v"], &["v"]),
    ]);
    rules.extend(whole_words(&["soy", "eres", "es", "somos", "sois", "son"], "ser"));
    rules.extend(whole_words(&["estoy", "estás", "está", "estamos", "estáis", "están"], "estar"));
    rules.extend(whole_words(&["voy", "vas", "va", "vamos", "vais", "van"], "ir"));
    rules.extend(whole_words(&["he", "has", "ha", "hemos", "habéis", "han"], "haber"));
    rules
}

fn preterite() -> Vec<Rule> {
    let mut rules = vec![
        // Stem changes only happen in the third person.
        Rule::other(
            re!(r"i([a-z]*)(ió|ieron)$"),
            |t: &str| change_stem(t, "i", "e", regex!(r"(ió|ieron)$"), "ir"),
            &["v_ir"],
            &["v_ir"],
        ),
        Rule::other(
            re!(r"u([a-z]*)(ió|ieron)$"),
            |t: &str| change_stem(t, "u", "o", regex!(r"(ió|ieron)$"), "ir"),
            &["v_ir"],
            &["v_ir"],
        ),
    ];
    rules.extend(suffixes(
        &[("é", "ar"), ("aste", "ar"), ("ó", "ar"), ("amos", "ar"), ("asteis", "ar"), ("aron", "ar")],
        &["v_ar"],
        &["v_ar"],
    ));
    rules.extend(suffixes(
        &[("í", "er"), ("iste", "er"), ("ió", "er"), ("imos", "er"), ("isteis", "er"), ("ieron", "er")],
        &["v_er"],
        &["v_er"],
    ));
    rules.extend(suffixes(
        &[("í", "ir"), ("iste", "ir"), ("ió", "ir"), ("imos", "ir"), ("isteis", "ir"), ("ieron", "ir")],
        &["v_ir"],
        &["v_ir"],
    ));
    rules.extend(suffixes(&[("qué", "car"), ("gué", "gar"), ("cé", "zar"), ("í", "uir")], &["v"], &["v"]));
    let fui = ["fui", "fuiste", "fue", "fuimos", "fuisteis", "fueron"];
    rules.extend(whole_words(&fui, "ser"));
    rules.extend(whole_words(&fui, "ir"));
    rules.extend(whole_words(&["di", "diste", "dio", "dimos", "disteis", "dieron"], "dar"));
    rules
}

fn imperfect() -> Vec<Rule> {
    let mut rules = suffixes(
        &[("aba", "ar"), ("abas", "ar"), ("ábamos", "ar"), ("abais", "ar"), ("aban", "ar")],
        &["v_ar"],
        &["v_ar"],
    );
    rules.extend(suffixes(
        &[("ía", "er"), ("ías", "er"), ("íamos", "er"), ("íais", "er"), ("ían", "er")],
        &["v_er"],
        &["v_er"],
    ));
    rules.extend(suffixes(
        &[("ía", "ir"), ("ías", "ir"), ("íamos", "ir"), ("íais", "ir"), ("ían", "ir")],
        &["v_ir"],
        &["v_ir"],
    ));
    rules.extend(whole_words(&["era", "eras", "éramos", "erais", "eran"], "ser"));
    rules.extend(whole_words(&["iba", "ibas", "íbamos", "ibais", "iban"], "ir"));
    rules.extend(whole_words(&["veía", "veías", "veíamos", "veíais", "veían"], "ver"));
    rules
}

fn progressive() -> Vec<Rule> {
    let mut rules = vec![
        Rule::other(
            re!(r"i([a-z]*)(iendo)$"),
            |t: &str| change_stem(t, "i", "e", regex!(r"(iendo)$"), "ir"),
            &["v_ir"],
            &["v_ir"],
        ),
        Rule::other(
            re!(r"u([a-z]*)(iendo)$"),
            |t: &str| change_stem(t, "u", "o", regex!(r"(iendo)$"), "er"),
            &["v_er"],
            &["v_er"],
        ),
        Rule::other(
            re!(r"u([a-z]*)(iendo)$"),
            |t: &str| change_stem(t, "u", "o", regex!(r"(iendo)$"), "ir"),
            &["v_ir"],
            &["v_ir"],
        ),
        suffix!("ando", "ar", ["v_ar"], ["v_ar"]),
        suffix!("iendo", "er", ["v_er"], ["v_er"]),
        suffix!("iendo", "ir", ["v_ir"], ["v_ir"]),
        // traer -> trayendo, leer -> leyendo, huir -> huyendo
        suffix!("ayendo", "aer", ["v_er"], ["v_er"]),
        suffix!("eyendo", "eer", ["v_er"], ["v_er"]),
        suffix!("uyendo", "uir", ["v_ir"], ["v_ir"]),
    ];
    rules.extend(whole_words(&["oyendo"], "oír"));
    rules.extend(whole_words(&["yendo"], "ir"));
    rules
}

fn future() -> Vec<Rule> {
    let mut rules = suffixes(
        &[("é", ""), ("ás", ""), ("á", ""), ("emos", ""), ("éis", ""), ("án", "")],
        &["v"],
        &["v"],
    );
    for (stem, lemma) in [("dir", "decir"), ("pondr", "poner"), ("tendr", "tener"), ("vendr", "venir")] {
        for ending in ["é", "ás", "á", "emos", "éis", "án"] {
            rules.push(Rule::suffix(format!("{stem}{ending}"), lemma, &["v"], &["v"]));
        }
    }
    rules.extend(whole_words(&["haré", "harás", "hará", "haremos", "haréis", "harán"], "hacer"));
    rules.extend(whole_words(&["saldré", "saldrás", "saldrá", "saldremos", "saldréis", "saldrán"], "salir"));
    rules
}

pub(crate) fn transforms() -> LanguageTransforms {
    let conditions: Vec<Condition> = vec![
        condition! { id: "n", name: "Noun", dictionary_form: true, sub: ["ns", "np"] },
        condition! { id: "np", name: "Noun plural", dictionary_form: false },
        condition! { id: "ns", name: "Noun singular", dictionary_form: false },
        condition! { id: "v", name: "Verb", dictionary_form: true, sub: ["v_ar", "v_er", "v_ir"] },
        condition! { id: "v_ar", name: "-ar verb", dictionary_form: false },
        condition! { id: "v_er", name: "-er verb", dictionary_form: false },
        condition! { id: "v_ir", name: "-ir verb", dictionary_form: false },
        condition! { id: "adj", name: "Adjective", dictionary_form: true },
    ];

    let transforms = vec![
        transform! {
            name: "plural",
            description: "Plural form of a noun",
            rules: [
                suffix!("s", "", ["np"], ["ns"]),
                suffix!("es", "", ["np"], ["ns"]),
                // lápices -> lápiz
                suffix!("ces", "z", ["np"], ["ns"]),
            ],
            // autobuses -> autobús, canciones -> canción
            extend: [
                accented_vowel_rules("aeiou", "ses", "s", &["np"], &["ns"]),
                accented_vowel_rules("aeiou", "nes", "n", &["np"], &["ns"]),
            ],
        },
        transform! {
            name: "feminine adjective",
            description: "feminine form of an adjective",
            rules: [suffix!("a", "o", ["adj"], ["adj"]), suffix!("a", "", ["adj"], ["adj"])],
            // dormilona -> dormilón, francesa -> francés
            extend: [
                accented_vowel_rules("aeio", "na", "n", &["adj"], &["adj"]),
                accented_vowel_rules("aeio", "sa", "s", &["adj"], &["adj"]),
            ],
        },
        transform! {
            name: "present indicative",
            description: "Present indicative form of a verb",
            rules: [],
            extend: [present_indicative()],
        },
        transform! {
            name: "preterite",
            description: "Preterite (past) form of a verb",
            rules: [],
            extend: [preterite()],
        },
        transform! {
            name: "imperfect",
            description: "Imperfect form of a verb",
            rules: [],
            extend: [imperfect()],
        },
        transform! {
            name: "progressive",
            description: "Progressive form of a verb",
            rules: [],
            extend: [progressive()],
        },
        transform! {
            name: "future",
            description: "Future form of a verb",
            rules: [],
            extend: [future()],
        },
        transform! {
            name: "participle",
            description: "Participle form of a verb",
            rules: [
                suffix!("ado", "ar", ["adj"], ["v_ar"]),
                suffix!("ido", "er", ["adj"], ["v_er"]),
                suffix!("ido", "ir", ["adj"], ["v_ir"]),
                suffix!("oído", "oír", ["adj"], ["v"]),
                whole_word!("dicho", "decir", ["adj"], ["v"]),
                whole_word!("escrito", "escribir", ["adj"], ["v"]),
                whole_word!("hecho", "hacer", ["adj"], ["v"]),
                whole_word!("muerto", "morir", ["adj"], ["v"]),
                whole_word!("puesto", "poner", ["adj"], ["v"]),
                whole_word!("roto", "romper", ["adj"], ["v"]),
                whole_word!("visto", "ver", ["adj"], ["v"]),
                whole_word!("vuelto", "volver", ["adj"], ["v"]),
            ],
        },
        transform! {
            name: "reflexive",
            description: "Reflexive form of a verb",
            rules: [
                suffix!("arse", "ar", ["v_ar"], ["v_ar"]),
                suffix!("erse", "er", ["v_er"], ["v_er"]),
                suffix!("irse", "ir", ["v_ir"], ["v_ir"]),
            ],
        },
        transform! {
            name: "pronoun substitution",
            description: "Substituted pronoun of a reflexive verb",
            rules: [
                suffix!("arme", "arse", ["v_ar"], ["v_ar"]),
                suffix!("arte", "arse", ["v_ar"], ["v_ar"]),
                suffix!("arnos", "arse", ["v_ar"], ["v_ar"]),
                suffix!("erme", "erse", ["v_er"], ["v_er"]),
                suffix!("erte", "erse", ["v_er"], ["v_er"]),
                suffix!("ernos", "erse", ["v_er"], ["v_er"]),
                suffix!("irme", "irse", ["v_ir"], ["v_ir"]),
                suffix!("irte", "irse", ["v_ir"], ["v_ir"]),
                suffix!("irnos", "irse", ["v_ir"], ["v_ir"]),
            ],
        },
        transform! {
            name: "pronominal",
            description: "Pronominal form of a verb",
            // me despertar -> despertarse
            rules: [Rule::other(
                re!(r"\b(me|te|se|nos|os)\s+(\w+)(ar|er|ir)\b"),
                |t: &str| {
                    let pronominal = regex!(r"\b(me|te|se|nos|os)\s+(\w+)(ar|er|ir)\b");
                    Some(pronominal.replace_all(t, "${2}${3}se").into_owned())
                },
                &["v"],
                &["v"],
            )],
        },
    ];

    LanguageTransforms { language: "es", conditions, transforms }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_change_rewrites_first_occurrence_and_ending() {
        assert_eq!(change_stem("piensan", "ie", "e", regex!(r"(o|as|a|an)$"), "ar").as_deref(), Some("pensar"));
        assert_eq!(change_stem("duermo", "ue", "o", regex!(r"(o|es|e|en)$"), "ir").as_deref(), Some("dormir"));
    }

    #[test]
    fn accents_only_touch_vowels() {
        assert_eq!(add_accent('o'), 'ó');
        assert_eq!(add_accent('n'), 'n');
    }
}
