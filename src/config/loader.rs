//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    I18nSettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".medal-i18n.json";

/// プロジェクトルートから設定を読み込む
///
/// `.medal-i18n.json` ファイルを探して読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
pub(super) fn load_from_project(project_root: &Path) -> Result<Option<I18nSettings>, ConfigError> {
    let config_path = project_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: I18nSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// `load_from_project`: 設定ファイルが存在する場合
    #[rstest]
    fn test_load_from_project_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"baselineLanguage": "en"}"#).unwrap();

        let settings = load_from_project(temp_dir.path()).unwrap();

        assert_eq!(settings.unwrap().baseline_language, "en");
    }

    /// `load_from_project`: 設定ファイルが存在しない場合
    #[rstest]
    fn test_load_from_project_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_project(temp_dir.path());

        assert!(result.unwrap().is_none());
    }

    /// `load_from_project`: JSON パースエラー
    #[rstest]
    fn test_load_from_project_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "invalid json").unwrap();

        let result = load_from_project(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
