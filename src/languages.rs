//! Supported language registry.
//! Process-wide read-only table of (display name, ISO 639-1 code) pairs.
//! Registry order is presentation order; the code is the lookup key.

/// One supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub name: &'static str,
    pub code: &'static str,
}

/// All languages offered for selection, in menu order.
pub static LANGUAGES: &[Language] = &[
    Language { name: "🇧🇬 Bulgarian", code: "bg" },
    Language { name: "🇨🇿 Czech", code: "cs" },
    Language { name: "🇬🇧 English", code: "en" },
    Language { name: "🇫🇷 French", code: "fr" },
    Language { name: "🇩🇪 German", code: "de" },
    Language { name: "🇭🇷 Croatian", code: "hr" },
    Language { name: "🇮🇹 Italian", code: "it" },
    Language { name: "🇵🇱 Polish", code: "pl" },
    Language { name: "🇵🇹 Portuguese", code: "pt" },
    Language { name: "🇷🇺 Russian", code: "ru" },
    Language { name: "🇷🇸 Serbian", code: "sr" },
    Language { name: "🇸🇰 Slovak", code: "sk" },
    Language { name: "🇪🇸 Spanish", code: "es" },
    Language { name: "🇺🇦 Ukrainian", code: "uk" },
];

/// Look up a language by code. Unknown codes are not an error here;
/// the conversation layer decides how to surface them.
pub fn lookup(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|lang| lang.code == code)
}

/// Human-readable name for a code, falling back to the raw code when unknown.
pub fn display_name(code: &str) -> &str {
    lookup(code).map(|lang| lang.name).unwrap_or(code)
}

/// Languages offered for selection, optionally excluding an already-chosen code.
pub fn choices(exclude: Option<&str>) -> impl Iterator<Item = &'static Language> + '_ {
    LANGUAGES
        .iter()
        .filter(move |lang| exclude != Some(lang.code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_code() {
        let lang = lookup("it").unwrap();
        assert_eq!(lang.name, "🇮🇹 Italian");
    }

    #[test]
    fn lookup_unknown_code() {
        assert!(lookup("xx").is_none());
    }

    #[test]
    fn display_name_falls_back_to_code() {
        assert_eq!(display_name("en"), "🇬🇧 English");
        assert_eq!(display_name("tlh"), "tlh");
    }

    #[test]
    fn choices_exclude_selected_source() {
        let codes: Vec<&str> = choices(Some("en")).map(|l| l.code).collect();
        assert_eq!(codes.len(), LANGUAGES.len() - 1);
        assert!(!codes.contains(&"en"));
    }

    #[test]
    fn choices_preserve_registry_order() {
        let codes: Vec<&str> = choices(None).map(|l| l.code).collect();
        let all: Vec<&str> = LANGUAGES.iter().map(|l| l.code).collect();
        assert_eq!(codes, all);
    }
}
