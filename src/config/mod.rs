//! 設定ファイル、ファイルマッチャー、バックエンド接続情報

mod credentials;
mod loader;
mod manager;
mod matcher;
mod types;

pub use credentials::{
    ANON_KEY_VAR,
    BackendCredentials,
    CACHE_CONTROL,
    CredentialsError,
    URL_VAR,
};
pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    I18nSettings,
    TranslationFilesConfig,
    ValidationError,
};
