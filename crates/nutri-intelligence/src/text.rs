// ABOUTME: Text normalization helpers shared by the catalog, parser, and classifiers
// ABOUTME: Lowercasing, diacritic stripping, whitespace collapsing, and Spanish number words
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase, strip diacritics and collapse whitespace
///
/// `"  Comí   PLÁTANO "` becomes `"comi platano"`.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let stripped: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a decimal that may use a comma separator (`"80,5"`)
#[must_use]
pub fn parse_decimal(value: &str) -> Option<f64> {
    value.trim().replace(',', ".").parse::<f64>().ok()
}

/// Value of a Spanish cardinal word between one and twelve
#[must_use]
pub fn spanish_number(word: &str) -> Option<u32> {
    let value = match word {
        "un" | "una" | "uno" => 1,
        "dos" => 2,
        "tres" => 3,
        "cuatro" => 4,
        "cinco" => 5,
        "seis" => 6,
        "siete" => 7,
        "ocho" => 8,
        "nueve" => 9,
        "diez" => 10,
        "once" => 11,
        "doce" => 12,
        _ => return None,
    };
    Some(value)
}

/// Singular candidates for a Spanish plural ("huevos" -> "huevo", "unidades" -> "unidad")
#[must_use]
pub fn singular_forms(word: &str) -> Vec<String> {
    let mut forms = vec![word.to_owned()];
    if let Some(stem) = word.strip_suffix("es") {
        forms.push(stem.to_owned());
    }
    if let Some(stem) = word.strip_suffix('s') {
        forms.push(stem.to_owned());
    }
    forms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_accents_and_spaces() {
        assert_eq!(normalize_text("  Comí   PLÁTANO "), "comi platano");
        assert_eq!(normalize_text("Me equivoqué,\tcorrígelo"), "me equivoque, corrigelo");
        assert_eq!(normalize_text("Año"), "ano");
    }

    #[test]
    fn test_parse_decimal_accepts_comma() {
        assert_eq!(parse_decimal("80,5"), Some(80.5));
        assert_eq!(parse_decimal("72"), Some(72.0));
        assert_eq!(parse_decimal("x"), None);
    }

    #[test]
    fn test_singular_forms() {
        assert!(singular_forms("huevos").contains(&"huevo".to_owned()));
        assert!(singular_forms("unidades").contains(&"unidad".to_owned()));
    }
}
