use super::{ON_OFF, ProcessorSetting, TextProcessor};

/// Lower-cases the whole text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decapitalize;

impl TextProcessor for Decapitalize {
    fn id(&self) -> &'static str {
        "decapitalize"
    }

    fn settings(&self) -> &'static [ProcessorSetting] {
        ON_OFF
    }

    fn process(&self, text: &str, setting: ProcessorSetting) -> String {
        match setting {
            ProcessorSetting::Direct => text.to_lowercase(),
            ProcessorSetting::Off | ProcessorSetting::Inverse => text.to_string(),
        }
    }
}

/// Upper-cases the first character, leaving the rest alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapitalizeFirstLetter;

impl TextProcessor for CapitalizeFirstLetter {
    fn id(&self) -> &'static str {
        "capitalizeFirstLetter"
    }

    fn settings(&self) -> &'static [ProcessorSetting] {
        ON_OFF
    }

    fn process(&self, text: &str, setting: ProcessorSetting) -> String {
        if setting != ProcessorSetting::Direct {
            return text.to_string();
        }
        let mut chars = text.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decapitalize_lowers_everything() {
        assert_eq!(Decapitalize.process("ÜBER Alles", ProcessorSetting::Direct), "über alles");
        assert_eq!(Decapitalize.process("ÜBER", ProcessorSetting::Off), "ÜBER");
    }

    #[test]
    fn capitalize_touches_only_the_first_letter() {
        assert_eq!(CapitalizeFirstLetter.process("éclair pie", ProcessorSetting::Direct), "Éclair pie");
        assert_eq!(CapitalizeFirstLetter.process("ßa", ProcessorSetting::Direct), "SSa");
        assert_eq!(CapitalizeFirstLetter.process("", ProcessorSetting::Direct), "");
        assert_eq!(CapitalizeFirstLetter.process("walk", ProcessorSetting::Off), "walk");
    }
}
