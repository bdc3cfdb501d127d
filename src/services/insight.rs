use rand::seq::SliceRandom;
use serde::Deserialize;
use std::collections::HashMap;

use crate::common::error::ServiceError;

const FALLBACK_LANGUAGES: [&str; 2] = ["pt", "en"];

/// Tips documents come in three shapes:
///
/// * `[{"pt": "...", "en": "..."}, ...]`, one localized object per tip;
/// * `{"pt": ["..."], "en": ["..."]}`, one list per language;
/// * `["...", ...]`, untranslated tips.
#[derive(Deserialize)]
#[serde(untagged)]
enum TipsDocument {
    Localized(Vec<HashMap<String, String>>),
    ByLanguage(HashMap<String, Vec<String>>),
    Plain(Vec<String>),
}

/// Extracts the tips for `language`. A localized tip missing that language
/// falls back to Portuguese, then English.
pub fn parse_insights(json: &str, language: &str) -> Result<Vec<String>, ServiceError> {
    let doc: TipsDocument = serde_json::from_str(json)?;

    let tips: Vec<String> = match doc {
        TipsDocument::Localized(items) => items
            .into_iter()
            .filter_map(|mut item| {
                std::iter::once(language)
                    .chain(FALLBACK_LANGUAGES)
                    .find_map(|lang| item.remove(lang))
            })
            .collect(),
        TipsDocument::ByLanguage(mut by_lang) => by_lang.remove(language).unwrap_or_default(),
        TipsDocument::Plain(items) => items,
    };

    let tips: Vec<String> = tips
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if tips.is_empty() {
        return Err(ServiceError::NoInsights(language.to_string()));
    }
    Ok(tips)
}

/// One tip chosen uniformly at random.
pub fn pick(tips: &[String]) -> Option<&str> {
    tips.choose(&mut rand::thread_rng()).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_objects_use_requested_language() {
        let json = r#"[{"pt": "Poupe", "en": "Save"}, {"pt": "Invista", "en": "Invest"}]"#;
        assert_eq!(parse_insights(json, "en").unwrap(), vec!["Save", "Invest"]);
    }

    #[test]
    fn localized_object_missing_language_falls_back() {
        let json = r#"[{"pt": "Poupe"}, {"en": "Invest"}]"#;
        assert_eq!(parse_insights(json, "es").unwrap(), vec!["Poupe", "Invest"]);
    }

    #[test]
    fn lists_per_language() {
        let json = r#"{"pt": ["Poupe"], "en": ["Save", "Budget"]}"#;
        assert_eq!(parse_insights(json, "en").unwrap(), vec!["Save", "Budget"]);
    }

    #[test]
    fn plain_list() {
        let json = r#"["Save", "  "]"#;
        assert_eq!(parse_insights(json, "pt").unwrap(), vec!["Save"]);
    }

    #[test]
    fn empty_or_malformed_documents_are_errors() {
        assert!(matches!(
            parse_insights(r#"{"pt": []}"#, "pt"),
            Err(ServiceError::NoInsights(_))
        ));
        assert!(matches!(parse_insights("<html>", "pt"), Err(ServiceError::Json(_))));
    }

    #[test]
    fn pick_returns_one_of_the_tips() {
        let tips = vec!["a".to_string(), "b".to_string()];
        let chosen = pick(&tips).unwrap();
        assert!(tips.iter().any(|t| t == chosen));
        assert_eq!(pick(&[]), None);
    }
}
