//! Built-in languages.
//!
//! The tables here are representative subsets of real inflection tables and
//! double as end-to-end fixtures. Each table is plain data built with the
//! rule macros; `build` compiles them all.
//!
//! | iso   | transforms | preprocessors                                  | postprocessors   |
//! |-------|------------|------------------------------------------------|------------------|
//! | `en`  | English    | decapitalize, capitalizeFirstLetter            |                  |
//! | `de`  | German     | decapitalize, capitalizeFirstLetter, eszett    |                  |
//! | `es`  | Spanish    | decapitalize, capitalizeFirstLetter            |                  |
//! | `sga` | Old Irish  | decapitalize, capitalizeFirstLetter            |                  |
//! | `ko`  | (none)     | disassembleHangul                              | reassembleHangul |

#[path = "languages/english.rs"]
mod english;
#[path = "languages/german.rs"]
mod german;
#[path = "languages/old_irish.rs"]
mod old_irish;
#[path = "languages/spanish.rs"]
mod spanish;

#[cfg(test)]
#[path = "languages/tests.rs"]
mod tests;

use crate::api::{Deinflector, Language};
use crate::errors::Result;
use crate::LanguageTransforms;
use crate::processors::{CapitalizeFirstLetter, Decapitalize, Eszett, HangulDisassemble, HangulReassemble, TextProcessor};
use once_cell::sync::Lazy;

static BUILTIN: Lazy<Deinflector> = Lazy::new(|| build().expect("built-in language tables compile"));

/// The shared deinflector with every built-in language, compiled on first
/// use.
pub fn builtin() -> &'static Deinflector {
    &BUILTIN
}

fn capitalization() -> Vec<Box<dyn TextProcessor>> {
    vec![Box::new(Decapitalize), Box::new(CapitalizeFirstLetter)]
}

/// Compile the built-in languages into a new deinflector.
pub fn build() -> Result<Deinflector> {
    let mut german_processors = capitalization();
    german_processors.push(Box::new(Eszett));
    let korean = LanguageTransforms { language: "ko", conditions: Vec::new(), transforms: Vec::new() };

    Deinflector::new(vec![
        Language::new("en", "English", english::transforms())?.with_preprocessors(capitalization()),
        Language::new("de", "German", german::transforms())?.with_preprocessors(german_processors),
        Language::new("es", "Spanish", spanish::transforms())?.with_preprocessors(capitalization()),
        Language::new("sga", "Old Irish", old_irish::transforms())?.with_preprocessors(capitalization()),
        Language::new("ko", "Korean", korean)?
            .with_preprocessors(vec![Box::new(HangulDisassemble)])
            .with_postprocessors(vec![Box::new(HangulReassemble)]),
    ])
}
