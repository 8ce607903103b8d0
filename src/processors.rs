//! Text processors.
//!
//! Processors normalize text around the resolver: preprocessors run on the
//! surface form before deinflection (case folding, orthographic variants),
//! postprocessors run on each lemma afterwards (re-assembling scripts that
//! were decomposed for matching).
//!
//! A processor declares the settings it can run with. A pipeline tries every
//! setting of every processor, in declaration order, and keeps each distinct
//! text once together with the *chains* of processor ids that led to it:
//!
//! ```text
//! "Straße" ── decapitalize {Off, Direct} ──────> "Straße"  [[]]
//!                                                 "straße"  [[decapitalize]]
//!           ── eszett {Off, Direct, Inverse} ──> "Straße"  [[]]
//!                                                 "Strasse" [[eszett]]
//!                                                 "straße"  [[decapitalize]]
//!                                                 "strasse" [[decapitalize, eszett]]
//! ```
//!
//! A setting that leaves the text unchanged does not add its id.

#[path = "processors/casing.rs"]
mod casing;
#[path = "processors/eszett.rs"]
mod eszett;
#[path = "processors/hangul.rs"]
mod hangul;

pub use casing::{CapitalizeFirstLetter, Decapitalize};
pub use eszett::Eszett;
pub use hangul::{HangulDisassemble, HangulReassemble, disassemble_hangul, reassemble_hangul};

use std::fmt;

/// How a processor runs for one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessorSetting {
    /// Leave the text alone.
    Off,
    /// Apply the processor.
    Direct,
    /// Apply the inverse mapping, for processors that have one.
    Inverse,
}

/// Settings of an on/off processor.
pub const ON_OFF: &[ProcessorSetting] = &[ProcessorSetting::Off, ProcessorSetting::Direct];

pub trait TextProcessor: Send + Sync {
    /// Stable id, recorded in processor chains.
    fn id(&self) -> &'static str;

    /// Settings the pipeline tries, in order.
    fn settings(&self) -> &'static [ProcessorSetting];

    fn process(&self, text: &str, setting: ProcessorSetting) -> String;
}

/// A distinct processed text and every processor chain that produces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextVariant {
    pub text: String,
    pub chains: Vec<Vec<&'static str>>,
}

/// Processors in a fixed order.
#[derive(Default)]
pub struct ProcessorPipeline {
    processors: Vec<Box<dyn TextProcessor>>,
}

impl ProcessorPipeline {
    pub fn new(processors: Vec<Box<dyn TextProcessor>>) -> Self {
        ProcessorPipeline { processors }
    }

    pub fn empty() -> Self {
        ProcessorPipeline::default()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.processors.iter().map(|p| p.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Expand `text` through every processor and setting.
    ///
    /// The input itself is always the first variant. Variants keep the order
    /// in which they were first produced.
    pub fn variants(&self, text: &str) -> Vec<TextVariant> {
        let mut variants = vec![TextVariant { text: text.to_string(), chains: vec![Vec::new()] }];

        for processor in &self.processors {
            let id = processor.id();
            let mut next: Vec<TextVariant> = Vec::new();

            for variant in &variants {
                for &setting in processor.settings() {
                    let processed = processor.process(&variant.text, setting);
                    let existing = next.iter_mut().find(|v| v.text == processed);

                    if processed == variant.text {
                        // Unchanged: carry the chains over, unless another
                        // path already reached this text.
                        if existing.is_none() {
                            next.push(variant.clone());
                        }
                        continue;
                    }

                    let extended = variant.chains.iter().map(|chain| {
                        let mut chain = chain.clone();
                        chain.push(id);
                        chain
                    });
                    match existing {
                        Some(existing) => {
                            for chain in extended {
                                if !existing.chains.contains(&chain) {
                                    existing.chains.push(chain);
                                }
                            }
                        }
                        None => next.push(TextVariant { text: processed, chains: extended.collect() }),
                    }
                }
            }
            variants = next;
        }

        variants
    }
}

impl fmt::Debug for ProcessorPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.processors.iter().map(|p| p.id())).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(variants: &[TextVariant]) -> Vec<&str> {
        variants.iter().map(|v| v.text.as_str()).collect()
    }

    #[test]
    fn empty_pipeline_yields_the_input() {
        let variants = ProcessorPipeline::empty().variants("Word");
        assert_eq!(variants, vec![TextVariant { text: "Word".to_string(), chains: vec![vec![]] }]);
    }

    #[test]
    fn unchanged_settings_do_not_extend_chains() {
        let pipeline = ProcessorPipeline::new(vec![Box::new(Decapitalize)]);
        let variants = pipeline.variants("walk");
        assert_eq!(variants, vec![TextVariant { text: "walk".to_string(), chains: vec![vec![]] }]);
    }

    #[test]
    fn variants_combine_processors_in_order() {
        let pipeline = ProcessorPipeline::new(vec![Box::new(Decapitalize), Box::new(Eszett)]);
        let variants = pipeline.variants("Straße");
        assert_eq!(texts(&variants), vec!["Straße", "Strasse", "straße", "strasse"]);
        assert_eq!(variants[0].chains, vec![Vec::<&str>::new()]);
        assert_eq!(variants[1].chains, vec![vec!["eszett"]]);
        assert_eq!(variants[2].chains, vec![vec!["decapitalize"]]);
        assert_eq!(variants[3].chains, vec![vec!["decapitalize", "eszett"]]);
    }

    #[test]
    fn converging_paths_merge_their_chains() {
        let pipeline = ProcessorPipeline::new(vec![Box::new(Decapitalize), Box::new(CapitalizeFirstLetter)]);
        let variants = pipeline.variants("WALK");
        assert_eq!(texts(&variants), vec!["WALK", "walk", "Walk"]);
        assert_eq!(variants[2].chains, vec![vec!["decapitalize", "capitalizeFirstLetter"]]);

        let variants = pipeline.variants("Walk");
        assert_eq!(texts(&variants), vec!["Walk", "walk"]);
        assert_eq!(variants[0].chains, vec![vec![], vec!["decapitalize", "capitalizeFirstLetter"]]);
        assert_eq!(variants[1].chains, vec![vec!["decapitalize"]]);
    }

    #[test]
    fn pipeline_debug_lists_ids() {
        let pipeline = ProcessorPipeline::new(vec![Box::new(Decapitalize), Box::new(Eszett)]);
        assert_eq!(format!("{pipeline:?}"), r#"["decapitalize", "eszett"]"#);
        assert_eq!(pipeline.ids(), vec!["decapitalize", "eszett"]);
    }
}
