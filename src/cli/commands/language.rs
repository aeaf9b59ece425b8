use anyhow::Result;

use crate::auth::{FileStorage, Storage, save_language};
use crate::i18n::{Language, print_languages, translations, validate_language};
use crate::status;
use crate::ui::Style;

pub fn run_languages() {
    print_languages();
}

/// Validates `code` and persists it as the UI language.
pub fn set_language<S: Storage>(storage: &mut S, code: &str) -> Result<Language> {
    let language = validate_language(code)?;
    save_language(storage, language)?;
    Ok(language)
}

pub fn run_language(code: &str) -> Result<()> {
    let mut storage = FileStorage::open_default()?;
    let language = set_language(&mut storage, code)?;

    status!(
        "{} {}: {} ({})",
        Style::success("✓"),
        translations(language).menu.language,
        Style::code(language.code()),
        language.display_name()
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::{LANGUAGE_KEY, MemoryStorage};

    #[test]
    fn test_set_language_persists() {
        let mut storage = MemoryStorage::new();
        let language = set_language(&mut storage, "en").unwrap();

        assert_eq!(language, Language::En);
        assert_eq!(storage.get(LANGUAGE_KEY), Some("en".to_string()));
    }

    #[test]
    fn test_set_language_rejects_unknown() {
        let mut storage = MemoryStorage::new();
        let err = set_language(&mut storage, "xx").unwrap_err();

        assert!(err.to_string().contains("Invalid language code"));
        assert!(storage.get(LANGUAGE_KEY).is_none());
    }
}
