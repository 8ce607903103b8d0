use crate::engine::{
    ConditionMask, DeinflectionResult, InflectionRule, ResolveMetrics, ResolveOptions, Resolver, TraceFrame,
    TransformDescriptor,
};
use crate::errors::{ConfigurationError, DeinflectError, Result};
use crate::processors::{ProcessorPipeline, TextProcessor};
use crate::{LanguageTransforms, languages};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// A language: its compiled rule table plus the processors that run around
/// the resolver.
#[derive(Debug)]
pub struct Language {
    /// ISO 639 code used to select the language, e.g. `"en"` or `"sga"`.
    pub iso: &'static str,
    pub name: &'static str,
    pub descriptor: TransformDescriptor,
    /// Run on the surface text before deinflection.
    pub preprocessors: ProcessorPipeline,
    /// Run on every lemma after deinflection.
    pub postprocessors: ProcessorPipeline,
}

impl Language {
    /// Compile `table` into a language without processors.
    pub fn new(iso: &'static str, name: &'static str, table: LanguageTransforms) -> Result<Self> {
        Ok(Language {
            iso,
            name,
            descriptor: TransformDescriptor::compile(table)?,
            preprocessors: ProcessorPipeline::empty(),
            postprocessors: ProcessorPipeline::empty(),
        })
    }

    pub fn with_preprocessors(mut self, processors: Vec<Box<dyn TextProcessor>>) -> Self {
        self.preprocessors = ProcessorPipeline::new(processors);
        self
    }

    pub fn with_postprocessors(mut self, processors: Vec<Box<dyn TextProcessor>>) -> Self {
        self.postprocessors = ProcessorPipeline::new(processors);
        self
    }
}

/// A lemma candidate returned by [`Deinflector::deinflect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Preprocessed text the resolver started from.
    pub source: String,
    /// Postprocessed lemma.
    pub lemma: String,
    /// Applied transforms, surface form first.
    pub trace: Vec<TraceFrame>,
    pub conditions: ConditionMask,
    /// Every combination of preprocessor and postprocessor chains that
    /// leads to this candidate.
    pub processor_chains: Vec<Vec<&'static str>>,
}

impl Candidate {
    /// Transform names from the lemma outward.
    pub fn inflection_chain(&self) -> Vec<&'static str> {
        self.trace.iter().rev().map(|frame| frame.display_name).collect()
    }
}

/// One resolver run inside a verbose deinflection.
#[derive(Debug, Clone)]
pub struct VariantRun {
    pub source: String,
    pub chains: Vec<Vec<&'static str>>,
    pub metrics: ResolveMetrics,
}

/// Result of [`deinflect_verbose_with`]: the candidates plus a per-variant
/// breakdown of the resolver work, for debugging and profiling.
#[derive(Debug, Clone)]
pub struct DeinflectDetails {
    pub text: String,
    pub language: &'static str,
    pub candidates: Vec<Candidate>,
    pub total: Duration,
    pub variants: Vec<VariantRun>,
}

impl DeinflectDetails {
    pub fn steps(&self) -> usize {
        self.variants.iter().map(|v| v.metrics.steps).sum()
    }

    /// True when any resolver run was cut short by a budget.
    pub fn is_partial(&self) -> bool {
        self.variants.iter().any(|v| v.metrics.is_partial())
    }
}

/// Routes deinflection requests to languages by ISO code.
#[derive(Debug, Default)]
pub struct Deinflector {
    languages: Vec<Language>,
    by_iso: HashMap<&'static str, usize>,
}

impl Deinflector {
    pub fn new(languages: Vec<Language>) -> Result<Self> {
        let mut by_iso = HashMap::with_capacity(languages.len());
        for (idx, language) in languages.iter().enumerate() {
            if by_iso.insert(language.iso, idx).is_some() {
                return Err(ConfigurationError::DuplicateLanguage(language.iso.to_string()));
            }
        }
        Ok(Deinflector { languages, by_iso })
    }

    /// Languages in registration order.
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn language(&self, iso: &str) -> Option<&Language> {
        self.by_iso.get(iso).map(|&idx| &self.languages[idx])
    }

    pub fn deinflect(&self, iso: &str, text: &str) -> Result<Vec<Candidate>, DeinflectError> {
        self.deinflect_with(iso, text, &ResolveOptions::default())
    }

    /// Preprocess `text`, resolve every variant, and postprocess every lemma.
    pub fn deinflect_with(
        &self,
        iso: &str,
        text: &str,
        options: &ResolveOptions,
    ) -> Result<Vec<Candidate>, DeinflectError> {
        self.deinflect_verbose_with(iso, text, options).map(|details| details.candidates)
    }

    pub fn deinflect_verbose_with(
        &self,
        iso: &str,
        text: &str,
        options: &ResolveOptions,
    ) -> Result<DeinflectDetails, DeinflectError> {
        let language = self.language(iso).ok_or_else(|| DeinflectError::UnsupportedLanguage(iso.to_string()))?;
        let start = Instant::now();
        let resolver = Resolver::new(&language.descriptor, options.clone());

        let mut candidates = Vec::new();
        let mut variants = Vec::new();
        for variant in language.preprocessors.variants(text) {
            let resolution = resolver.run(&variant.text);
            for result in resolution.results {
                for post in language.postprocessors.variants(&result.lemma) {
                    let processor_chains = variant
                        .chains
                        .iter()
                        .flat_map(|pre| {
                            post.chains.iter().map(move |tail| pre.iter().chain(tail).copied().collect::<Vec<_>>())
                        })
                        .collect();
                    candidates.push(Candidate {
                        source: variant.text.clone(),
                        lemma: post.text,
                        trace: result.trace.clone(),
                        conditions: result.conditions,
                        processor_chains,
                    });
                }
            }
            variants.push(VariantRun { source: variant.text, chains: variant.chains, metrics: resolution.metrics });
        }

        let total = start.elapsed();
        Ok(DeinflectDetails { text: text.to_string(), language: language.iso, candidates, total, variants })
    }

    /// Resolver-only entry point, without processors. An unknown language
    /// yields just the identity result.
    pub fn transform(&self, iso: &str, text: &str) -> Vec<DeinflectionResult> {
        match self.language(iso) {
            Some(language) => crate::engine::resolve(&language.descriptor, text),
            None => vec![DeinflectionResult {
                lemma: text.to_string(),
                trace: Vec::new(),
                conditions: ConditionMask::UNCONSTRAINED,
            }],
        }
    }

    /// Presentation labels for transform names recorded in a trace.
    pub fn user_facing_rules(&self, iso: &str, names: &[&str]) -> Vec<InflectionRule> {
        match self.language(iso) {
            Some(language) => language.descriptor.user_facing_rules(names),
            None => names.iter().map(|&name| InflectionRule { name: name.to_string(), description: None }).collect(),
        }
    }

    /// Mask of condition ids (e.g. part-of-speech tags from a dictionary).
    /// Unknown languages and unknown ids contribute nothing.
    pub fn condition_flags(&self, iso: &str, ids: &[&str]) -> ConditionMask {
        match self.language(iso) {
            Some(language) => language.descriptor.condition_flags(ids),
            None => ConditionMask::empty(),
        }
    }
}

/// Deinflect `text` with the built-in languages and default options.
///
/// # Example
/// ```
/// use deinflector::deinflect;
///
/// let candidates = deinflect("en", "cats").unwrap();
/// assert!(candidates.iter().any(|c| c.lemma == "cat"));
/// ```
pub fn deinflect(iso: &str, text: &str) -> Result<Vec<Candidate>, DeinflectError> {
    languages::builtin().deinflect(iso, text)
}

/// Deinflect `text` with the built-in languages and the given `options`.
pub fn deinflect_with(
    iso: &str,
    text: &str,
    options: &ResolveOptions,
) -> Result<Vec<Candidate>, DeinflectError> {
    languages::builtin().deinflect_with(iso, text, options)
}

/// Like [`deinflect_with`], also returning per-variant resolver metrics.
pub fn deinflect_verbose_with(
    iso: &str,
    text: &str,
    options: &ResolveOptions,
) -> Result<DeinflectDetails, DeinflectError> {
    languages::builtin().deinflect_verbose_with(iso, text, options)
}
