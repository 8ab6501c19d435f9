//! ロケールファイルの読み込みと探索
//!
//! The sync/audit tool works on files, not on the runtime store: it needs the raw
//! text (for format-preserving edits) and where each key sits in it (for reports).

mod discovery;
mod locale_file;

pub use discovery::{
    DiscoveryError,
    discover_locale_files,
    locale_from_path,
};
pub use locale_file::{
    LocaleFile,
    extract_key_ranges,
    load_locale_file,
};
