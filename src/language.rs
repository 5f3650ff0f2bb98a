//! Language and locale resolution for API queries.
//!
//! Pure table lookups: the UI language preference maps to an API language
//! code, and each API language maps to the country the API expects alongside
//! it (NewsData.io localizes by language *and* country). Unsupported codes
//! fall back to English / US rather than failing.

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_COUNTRY: &str = "us";

/// Languages the UI offers, with native display names.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Español"),
    ("fr", "Français"),
    ("de", "Deutsch"),
    ("it", "Italiano"),
    ("pt", "Português"),
    ("ru", "Русский"),
    ("zh", "中文"),
    ("ja", "日本語"),
    ("ko", "한국어"),
    ("ar", "العربية"),
    ("hi", "हिन्दी"),
    ("tr", "Türkçe"),
    ("nl", "Nederlands"),
];

pub fn is_supported(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|(c, _)| *c == code)
}

/// Native display name for a language code; unknown codes echo back
/// uppercased.
pub fn display_name(code: &str) -> String {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.to_uppercase())
}

/// Map a UI language preference to an API language code.
///
/// Every UI language happens to be supported by the API today, so this is an
/// identity lookup with an English fallback for anything unrecognized.
pub fn resolve_api_language(ui_language: &str) -> &'static str {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| *c == ui_language)
        .map(|(c, _)| *c)
        .unwrap_or(DEFAULT_LANGUAGE)
}

/// Country the API expects for a given language. Hindi needs India, Arabic
/// an Arab country, and so on; everything else defaults to US.
pub fn resolve_country(api_language: &str) -> &'static str {
    match api_language {
        "hi" => "in",
        "ar" => "ae",
        "zh" => "cn",
        "ja" => "jp",
        "ko" => "kr",
        "ru" => "ru",
        "tr" => "tr",
        "nl" => "nl",
        _ => DEFAULT_COUNTRY,
    }
}
