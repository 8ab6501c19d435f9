//! 言語切り替え
//!
//! Runtime side of the translation layer: choosing the initial locale, switching
//! between locales and remembering the choice.

mod detect;
mod preference;
mod switcher;

pub use detect::{
    environment_language,
    initial_locale,
};
pub use preference::{
    FilePreferenceStore,
    MemoryPreferenceStore,
    PreferenceError,
    PreferenceStore,
};
pub use switcher::{
    LanguageSwitcher,
    SwitchError,
    SwitchOutcome,
};
