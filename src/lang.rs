//! Whisper language handling.
//!
//! The model accepts a fixed set of language codes. Users tend to type either
//! the code (`zh`) or the English name (`chinese`), so the CLI accepts both and
//! we normalize to the code here. `"auto"` means "let the model detect".

use anyhow::{Result, bail};

/// Every language whisper.cpp understands, as `(code, english name)` pairs.
///
/// This table mirrors the model's own tokenizer language list; the order is the
/// model's, which roughly tracks training data volume.
pub static LANGUAGES: &[(&str, &str)] = &[
    ("en", "english"),
    ("zh", "chinese"),
    ("de", "german"),
    ("es", "spanish"),
    ("ru", "russian"),
    ("ko", "korean"),
    ("fr", "french"),
    ("ja", "japanese"),
    ("pt", "portuguese"),
    ("tr", "turkish"),
    ("pl", "polish"),
    ("ca", "catalan"),
    ("nl", "dutch"),
    ("ar", "arabic"),
    ("sv", "swedish"),
    ("it", "italian"),
    ("id", "indonesian"),
    ("hi", "hindi"),
    ("fi", "finnish"),
    ("vi", "vietnamese"),
    ("he", "hebrew"),
    ("uk", "ukrainian"),
    ("el", "greek"),
    ("ms", "malay"),
    ("cs", "czech"),
    ("ro", "romanian"),
    ("da", "danish"),
    ("hu", "hungarian"),
    ("ta", "tamil"),
    ("no", "norwegian"),
    ("th", "thai"),
    ("ur", "urdu"),
    ("hr", "croatian"),
    ("bg", "bulgarian"),
    ("lt", "lithuanian"),
    ("la", "latin"),
    ("mi", "maori"),
    ("ml", "malayalam"),
    ("cy", "welsh"),
    ("sk", "slovak"),
    ("te", "telugu"),
    ("fa", "persian"),
    ("lv", "latvian"),
    ("bn", "bengali"),
    ("sr", "serbian"),
    ("az", "azerbaijani"),
    ("sl", "slovenian"),
    ("kn", "kannada"),
    ("et", "estonian"),
    ("mk", "macedonian"),
    ("br", "breton"),
    ("eu", "basque"),
    ("is", "icelandic"),
    ("hy", "armenian"),
    ("ne", "nepali"),
    ("mn", "mongolian"),
    ("bs", "bosnian"),
    ("kk", "kazakh"),
    ("sq", "albanian"),
    ("sw", "swahili"),
    ("gl", "galician"),
    ("mr", "marathi"),
    ("pa", "punjabi"),
    ("si", "sinhala"),
    ("km", "khmer"),
    ("sn", "shona"),
    ("yo", "yoruba"),
    ("so", "somali"),
    ("af", "afrikaans"),
    ("oc", "occitan"),
    ("ka", "georgian"),
    ("be", "belarusian"),
    ("tg", "tajik"),
    ("sd", "sindhi"),
    ("gu", "gujarati"),
    ("am", "amharic"),
    ("yi", "yiddish"),
    ("lo", "lao"),
    ("uz", "uzbek"),
    ("fo", "faroese"),
    ("ht", "haitian creole"),
    ("ps", "pashto"),
    ("tk", "turkmen"),
    ("nn", "nynorsk"),
    ("mt", "maltese"),
    ("sa", "sanskrit"),
    ("lb", "luxembourgish"),
    ("my", "myanmar"),
    ("bo", "tibetan"),
    ("tl", "tagalog"),
    ("mg", "malagasy"),
    ("as", "assamese"),
    ("tt", "tatar"),
    ("haw", "hawaiian"),
    ("ln", "lingala"),
    ("ha", "hausa"),
    ("ba", "bashkir"),
    ("jw", "javanese"),
    ("su", "sundanese"),
    ("yue", "cantonese"),
];

/// Normalize a user-supplied language into a Whisper language code.
///
/// Accepts a language code (`"zh"`), an English language name in any case
/// (`"Chinese"`), or `"auto"`. Returns `None` for `"auto"` (detect), and an
/// error for anything the model does not know.
pub fn normalize_language(input: &str) -> Result<Option<String>> {
    let lowered = input.trim().to_lowercase();
    if lowered == "auto" {
        return Ok(None);
    }

    for (code, name) in LANGUAGES {
        if lowered == *code || lowered == *name {
            return Ok(Some((*code).to_string()));
        }
    }

    bail!("unknown language: '{input}' (use a language code, an English name, or 'auto')")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_accepts_codes_names_and_auto() -> Result<()> {
        assert_eq!(normalize_language("en")?, Some("en".to_string()));
        assert_eq!(normalize_language("Chinese")?, Some("zh".to_string()));
        assert_eq!(normalize_language("FRENCH")?, Some("fr".to_string()));
        assert_eq!(normalize_language("auto")?, None);
        Ok(())
    }

    #[test]
    fn normalize_rejects_unknown_languages() {
        let err = normalize_language("klingon").unwrap_err();
        assert!(err.to_string().contains("unknown language"));
    }

    #[test]
    fn language_table_has_unique_codes() {
        let mut codes: Vec<&str> = LANGUAGES.iter().map(|(code, _)| *code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), LANGUAGES.len());
    }
}
