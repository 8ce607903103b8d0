use crate::languages::{build, builtin};
use crate::{DeinflectError, ResolveOptions};

/// Traces (transform names, application order) of every candidate for
/// `input` whose lemma is `lemma`.
fn traces(iso: &str, input: &str, lemma: &str) -> Vec<Vec<&'static str>> {
    builtin()
        .deinflect(iso, input)
        .unwrap()
        .into_iter()
        .filter(|c| c.lemma == lemma)
        .map(|c| c.trace.iter().map(|frame| frame.transform).collect())
        .collect()
}

#[test]
fn builtin_language_examples() {
    // (iso, input, expected lemma, one expected trace)
    let cases: Vec<(&str, &str, &str, Vec<&str>)> = vec![
        ("en", "cats", "cat", vec!["plural"]),
        ("en", "knives", "knife", vec!["plural"]),
        ("en", "tried", "try", vec!["past"]),
        ("en", "Running", "run", vec!["ing"]),
        ("en", "happily", "happy", vec!["adverb"]),
        ("en", "unhappiest", "happy", vec!["superlative", "un-"]),
        ("en", "walked out", "walk out", vec!["past"]),
        ("en", "looked it up", "look up", vec!["interposed object", "past"]),
        ("en", "will walk", "walk", vec!["will future"]),
        ("en", "baggy", "bag", vec!["-y"]),
        ("de", "gemacht", "machen", vec!["past participle"]),
        ("de", "aufgemacht", "aufmachen", vec!["past participle"]),
        ("de", "anzurufen", "anrufen", vec!["zu-infinitive"]),
        ("de", "Schönheit", "schön", vec!["-heit"]),
        ("de", "rufe dich an", "rufe an", vec!["separated prefix"]),
        ("es", "hablo", "hablar", vec!["present indicative"]),
        ("es", "piensan", "pensar", vec!["present indicative"]),
        ("es", "soy", "ser", vec!["present indicative"]),
        ("es", "canciones", "canción", vec!["plural"]),
        ("es", "comiendo", "comer", vec!["progressive"]),
        ("es", "me despertar", "despertarse", vec!["pronominal"]),
        ("sga", "mbó", "bó", vec!["[IM] nasalized"]),
        ("sga", "h-ainm", "ainm", vec!["[IM] aspirated"]),
        ("sga", "saccart", "sacart", vec!["doubled consonant"]),
    ];

    for (iso, input, lemma, trace) in cases {
        let found = traces(iso, input, lemma);
        assert!(found.contains(&trace), "{iso}: {input:?} -> {lemma:?} via {trace:?}; got {found:?}");
    }
}

#[test]
fn unhappiest_reads_as_un_superlative() {
    let candidates = builtin().deinflect("en", "unhappiest").unwrap();
    assert!(
        candidates.iter().any(|c| c.lemma == "happy" && c.inflection_chain() == vec!["un-", "superlative"]),
        "{candidates:?}"
    );
}

#[test]
fn identity_is_always_the_first_candidate() {
    for language in builtin().languages() {
        let candidates = builtin().deinflect(language.iso, "xyz").unwrap();
        assert_eq!(candidates[0].lemma, "xyz", "{}", language.iso);
        assert!(candidates[0].trace.is_empty());
    }
}

#[test]
fn preprocessor_chains_are_reported() {
    let candidates = builtin().deinflect("en", "Running").unwrap();
    let run = candidates.iter().find(|c| c.lemma == "run").unwrap();
    assert_eq!(run.source, "running");
    assert_eq!(run.processor_chains, vec![vec!["decapitalize"]]);

    let candidates = builtin().deinflect("de", "Straße").unwrap();
    let spelled_out = candidates.iter().find(|c| c.source == "Strasse" && c.trace.is_empty()).unwrap();
    assert!(spelled_out.processor_chains.contains(&vec!["eszett"]));
}

#[test]
fn korean_round_trips_through_jamo() {
    let candidates = builtin().deinflect("ko", "먹었다").unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].lemma, "먹었다");
    assert_eq!(candidates[0].processor_chains, vec![vec!["disassembleHangul", "reassembleHangul"]]);
}

#[test]
fn builtin_languages_are_registered_in_order() {
    let isos: Vec<_> = builtin().languages().iter().map(|l| l.iso).collect();
    assert_eq!(isos, vec!["en", "de", "es", "sga", "ko"]);
    assert!(build().is_ok());
}

#[test]
fn user_facing_rules_describe_transforms() {
    let rules = builtin().user_facing_rules("en", &["plural", "mystery"]);
    assert_eq!(rules[0].name, "plural");
    assert_eq!(rules[0].description.as_deref(), Some("Plural form of a noun"));
    assert_eq!(rules[1].name, "mystery");
    assert_eq!(rules[1].description, None);
}

#[test]
fn unknown_languages() {
    let err = builtin().deinflect("xx", "cats").unwrap_err();
    assert_eq!(err, DeinflectError::UnsupportedLanguage("xx".to_string()));
    let results = builtin().transform("xx", "cats");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].lemma, "cats");
}

#[test]
fn step_budget_applies_to_builtin_languages() {
    let options = ResolveOptions { step_budget: Some(10), ..ResolveOptions::default() };
    let details = builtin().deinflect_verbose_with("sga", "h-mbccachtt", &options).unwrap();
    assert!(details.is_partial());
    assert_eq!(details.candidates[0].lemma, "h-mbccachtt");
}

#[test]
fn old_irish_mutations_stack() {
    let found = traces("sga", "h-mbó", "bó");
    assert!(found.contains(&vec!["[IM] aspirated", "[IM] nasalized"]), "{found:?}");
}
