use super::{ProcessorSetting, TextProcessor};

/// German sharp s: `ß` <-> `ss`.
///
/// `Direct` spells out `ß`/`ẞ` as `ss`/`SS`; `Inverse` folds every `ss`
/// back into `ß`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eszett;

const SETTINGS: &[ProcessorSetting] = &[ProcessorSetting::Off, ProcessorSetting::Direct, ProcessorSetting::Inverse];

impl TextProcessor for Eszett {
    fn id(&self) -> &'static str {
        "eszett"
    }

    fn settings(&self) -> &'static [ProcessorSetting] {
        SETTINGS
    }

    fn process(&self, text: &str, setting: ProcessorSetting) -> String {
        match setting {
            ProcessorSetting::Off => text.to_string(),
            ProcessorSetting::Direct => text.replace('ẞ', "SS").replace('ß', "ss"),
            ProcessorSetting::Inverse => text.replace("ss", "ß"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spells_out_and_folds_back() {
        assert_eq!(Eszett.process("Straße", ProcessorSetting::Direct), "Strasse");
        assert_eq!(Eszett.process("GROẞ", ProcessorSetting::Direct), "GROSS");
        assert_eq!(Eszett.process("Strasse", ProcessorSetting::Inverse), "Straße");
        assert_eq!(Eszett.process("Strasse", ProcessorSetting::Off), "Strasse");
    }
}
