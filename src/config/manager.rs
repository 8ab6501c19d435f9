//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    I18nSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: I18nSettings,

    /// プロジェクトのルートパス
    project_root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: I18nSettings::default(), project_root: None }
    }

    /// 設定を読み込む
    ///
    /// 設定ファイルがない場合はデフォルト値を使う。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, project_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for project: {:?}", project_root);

        let settings = if let Some(root) = &project_root {
            loader::load_from_project(root)?.unwrap_or_default()
        } else {
            I18nSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.project_root = project_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &I18nSettings {
        &self.current_settings
    }

    /// 翻訳ファイルのディレクトリ（プロジェクトルートからの相対パスを解決済み）
    #[must_use]
    pub fn translation_dir(&self) -> PathBuf {
        let directory = Path::new(&self.current_settings.translation_files.directory);
        self.project_root.as_ref().map_or_else(|| directory.to_path_buf(), |root| root.join(directory))
    }
}
