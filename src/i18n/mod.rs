mod language;
mod strings;

pub use language::{Language, SUPPORTED_LANGUAGES, print_languages, validate_language};
pub use strings::{
    AuthStrings, ChatStrings, MenuStrings, MessageStrings, Translations, translations,
};
