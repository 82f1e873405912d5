//! Bilingual (English/Arabic) display text.

use serde::{Deserialize, Serialize};

/// Error returned when a locale tag is not one the admin supports.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported locale: {0}")]
pub struct LocaleError(pub String);

/// UI language of the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    /// BCP 47 language tag.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// Text direction for the `dir` HTML attribute.
    #[must_use]
    pub const fn direction(&self) -> &'static str {
        match self {
            Self::En => "ltr",
            Self::Ar => "rtl",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for Locale {
    type Err = LocaleError;

    /// Accepts bare tags and regional variants (`ar-SA`, `en_GB`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            _ => Err(LocaleError(s.to_string())),
        }
    }
}

/// Text carried in both admin languages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub ar: String,
}

impl LocalizedText {
    /// Create a bilingual text.
    #[must_use]
    pub fn new(en: &str, ar: &str) -> Self {
        Self {
            en: en.to_string(),
            ar: ar.to_string(),
        }
    }

    /// The text for `locale`, falling back to English when the Arabic text is blank.
    #[must_use]
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar if !self.ar.trim().is_empty() => &self.ar,
            _ => &self.en,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        assert_eq!("ar".parse::<Locale>().unwrap(), Locale::Ar);
        assert_eq!("ar-SA".parse::<Locale>().unwrap(), Locale::Ar);
        assert_eq!("EN_gb".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_localized_text_fallback() {
        let label = LocalizedText::new("Name", "الاسم");
        assert_eq!(label.get(Locale::Ar), "الاسم");
        assert_eq!(label.get(Locale::En), "Name");

        let untranslated = LocalizedText::new("SKU", " ");
        assert_eq!(untranslated.get(Locale::Ar), "SKU");
    }
}
