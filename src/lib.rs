//! medal-i18n
//!
//! メダルコレクションアプリの翻訳レイヤー: translation store, DOM applier,
//! language switching and the locale file sync/audit tool.

pub mod audit;
pub mod catalog;
pub mod config;
pub mod keys;
pub mod locale;
pub mod render;
pub mod store;
pub mod types;
