use crate::types::FillerKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub filler: FillerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// フィラー音声設定
///
/// カット区間に挿入するフィラー音声に関する設定。
/// `frequency_hz` と `gain` は `kind = "tone"` の場合のみ使用される。
///
/// # デフォルト値
///
/// - `kind`: "silence" (無音)
/// - `frequency_hz`: 1000.0 Hz
/// - `gain`: 0.2
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FillerConfig {
    #[serde(default = "default_filler_kind")]
    pub kind: FillerKind,
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: f32,
    #[serde(default = "default_gain")]
    pub gain: f32,
}

/// 出力設定
///
/// 出力ファイル名とログに関する設定。
///
/// # デフォルト値
///
/// - `redacted_suffix`: "_redacted" (出力ファイル名に付ける接尾辞)
/// - `log_level`: "info"
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_redacted_suffix")]
    pub redacted_suffix: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default functions
fn default_filler_kind() -> FillerKind {
    FillerKind::Silence
}

fn default_frequency_hz() -> f32 {
    1000.0 // 1kHzトーン
}

fn default_gain() -> f32 {
    0.2
}

fn default_redacted_suffix() -> String {
    "_redacted".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filler: FillerConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for FillerConfig {
    fn default() -> Self {
        Self {
            kind: default_filler_kind(),
            frequency_hz: default_frequency_hz(),
            gain: default_gain(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            redacted_suffix: default_redacted_suffix(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// 設定ファイルから読み込み
    ///
    /// TOML形式の設定ファイルをパースしてConfig構造体を生成する。
    ///
    /// # Arguments
    ///
    /// * `path` - 設定ファイルのパス
    ///
    /// # Errors
    ///
    /// ファイルの読み込みまたはパースに失敗した場合にエラーを返す。
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use dcr_redact::config::Config;
    /// let config = Config::from_file("config.toml").unwrap();
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("設定ファイルの読み込みに失敗: {:?}", path.as_ref()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| "設定ファイルのパースに失敗")?;
        Ok(config)
    }

    /// デフォルト設定をファイルに書き出し
    ///
    /// デフォルト値を持つ設定ファイルを生成する。
    /// 既存のファイルは上書きされる。
    ///
    /// # Arguments
    ///
    /// * `path` - 出力先のパス
    ///
    /// # Errors
    ///
    /// ファイルの書き込みに失敗した場合にエラーを返す。
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use dcr_redact::config::Config;
    /// Config::write_default("config.toml").unwrap();
    /// ```
    pub fn write_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Config::default();
        let content =
            toml::to_string_pretty(&config).with_context(|| "設定のシリアライズに失敗")?;
        fs::write(path.as_ref(), content)
            .with_context(|| format!("設定ファイルの書き込みに失敗: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// 設定ファイルがあれば読み込み、なければデフォルトを使用
    ///
    /// 設定ファイルの存在を確認し、存在する場合は読み込み、
    /// 存在しない場合はデフォルト設定を返す。
    ///
    /// # Arguments
    ///
    /// * `path` - 設定ファイルのパス
    ///
    /// # Errors
    ///
    /// ファイルが存在するがパースに失敗した場合にエラーを返す。
    /// ファイルが存在しない場合はエラーにならず、デフォルト設定を返す。
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use dcr_redact::config::Config;
    /// let config = Config::load_or_default("config.toml").unwrap();
    /// ```
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            log::warn!(
                "設定ファイルが見つかりません。デフォルト設定を使用します: {:?}",
                path.as_ref()
            );
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.filler.kind, FillerKind::Silence);
        assert_eq!(config.filler.frequency_hz, 1000.0);
        assert_eq!(config.filler.gain, 0.2);
        assert_eq!(config.output.redacted_suffix, "_redacted");
        assert_eq!(config.output.log_level, "info");
    }

    #[test]
    fn test_write_and_read_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        // デフォルト設定を書き込み
        Config::write_default(path).unwrap();

        // 読み込み
        let config = Config::from_file(path).unwrap();
        assert_eq!(config.filler.kind, FillerKind::Silence);
        assert_eq!(config.output.redacted_suffix, "_redacted");
    }

    #[test]
    fn test_custom_config() {
        let toml_content = r#"
[filler]
kind = "tone"
frequency_hz = 440.0
gain = 0.5

[output]
redacted_suffix = "_masked"
log_level = "debug"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::from_file(temp_file.path()).unwrap();

        assert_eq!(config.filler.kind, FillerKind::Tone);
        assert_eq!(config.filler.frequency_hz, 440.0);
        assert_eq!(config.filler.gain, 0.5);
        assert_eq!(config.output.redacted_suffix, "_masked");
        assert_eq!(config.output.log_level, "debug");
    }

    #[test]
    fn test_load_or_default_nonexistent() {
        let config = Config::load_or_default("nonexistent_file.toml").unwrap();
        // デフォルト設定が返されることを確認
        assert_eq!(config.filler.kind, FillerKind::Silence);
    }

    #[test]
    fn test_partial_config() {
        // 一部の設定のみ記述した場合、残りはデフォルト値が使われる
        let toml_content = r#"
[filler]
kind = "tone"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::from_file(temp_file.path()).unwrap();

        // 指定した値
        assert_eq!(config.filler.kind, FillerKind::Tone);

        // デフォルト値
        assert_eq!(config.filler.frequency_hz, 1000.0);
        assert_eq!(config.filler.gain, 0.2);
        assert_eq!(config.output.redacted_suffix, "_redacted");
    }
}
