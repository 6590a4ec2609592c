pub trait LanguageTag {
    /// Converts a POSIX locale such as `en_US.UTF-8` or `nl_NL@euro` into a language tag (`en-US`).
    /// Returns `None` for the portable `C` and `POSIX` locales, which do not name a language.
    fn to_language_tag(&self) -> Option<String>;
}

impl LanguageTag for str {
    fn to_language_tag(&self) -> Option<String> {
        let locale = self.split(['.', '@']).next().unwrap_or_default().trim();
        if locale.is_empty() || locale == "C" || locale == "POSIX" {
            return None;
        }

        Some(locale.replace('_', "-"))
    }
}

/// Language tag of the process' default locale, following the usual `LC_ALL` > `LC_MESSAGES` > `LANG` precedence.
pub fn default_language_tag() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
        .and_then(|value| value.to_language_tag())
}
