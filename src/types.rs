use crate::error::{RedactError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 32ビット浮動小数点型のオーディオサンプル
///
/// デコード後のPCM音声を表現するための型エイリアス。
/// -1.0 から 1.0 の範囲に正規化された値を取る。
pub type SampleF32 = f32;

/// デコード済みPCMオーディオストリーム
///
/// 全チャンネルのサンプルをフレーム単位でインターリーブして保持する。
/// ステレオの場合の並び: `[ch0, ch1, ch0, ch1, ...]`
///
/// フレーム番号 `n` は実時間 `n × 1000 / sample_rate` ミリ秒
/// （切り捨て）に対応する。
///
/// # 不変条件
///
/// - `sample_rate` は正の値
/// - `channels` は正の値
/// - `samples.len()` は `channels` で割り切れる
///
/// # Examples
///
/// ```
/// # use dcr_redact::types::PcmAudio;
/// // 16kHz ステレオ 1秒分
/// let audio = PcmAudio::new(16000, 2, vec![0.0; 32000]).unwrap();
/// assert_eq!(audio.frame_count(), 16000);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PcmAudio {
    /// サンプリングレート (Hz)
    ///
    /// 典型的な値: 8000, 16000, 44100, 48000
    pub sample_rate: u32,

    /// チャンネル数
    ///
    /// 1: モノラル, 2: ステレオ
    pub channels: u16,

    /// インターリーブされたPCMサンプルの配列
    pub samples: Vec<SampleF32>,
}

impl PcmAudio {
    /// 形状を検証してPcmAudioを作成
    ///
    /// # Errors
    ///
    /// サンプリングレートまたはチャンネル数が0の場合は
    /// `InvalidArgument`、サンプル数がチャンネル数で割り切れない
    /// 場合は `StructuralMismatch` を返す。
    pub fn new(sample_rate: u32, channels: u16, samples: Vec<SampleF32>) -> Result<Self> {
        let audio = Self {
            sample_rate,
            channels,
            samples,
        };
        audio.validate()?;
        Ok(audio)
    }

    /// 不変条件を検証
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(RedactError::InvalidArgument(
                "サンプリングレートは正の値でなければなりません".to_string(),
            ));
        }
        if self.channels == 0 {
            return Err(RedactError::InvalidArgument(
                "チャンネル数は正の値でなければなりません".to_string(),
            ));
        }
        if self.samples.len() % self.channels as usize != 0 {
            return Err(RedactError::StructuralMismatch {
                channels: self.channels,
                samples: self.samples.len(),
            });
        }
        Ok(())
    }

    /// フレーム数（チャンネルあたりのサンプル数）
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// 音声の長さ（秒）
    pub fn duration_seconds(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }
}

/// 墨消しスパン
///
/// ミュート対象の閉区間 `[offset, offset + duration]` をミリ秒で表す。
/// 構築後は変更されない。
///
/// # Examples
///
/// ```
/// # use dcr_redact::types::RedactionSpan;
/// let span = RedactionSpan::new(200, 100);
/// assert_eq!(span.end_ms(), 300);
/// assert!(span.contains_ms(200));
/// assert!(span.contains_ms(300)); // 両端を含む
/// assert!(!span.contains_ms(301));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedactionSpan {
    /// 区間の開始位置（ミリ秒）
    pub offset_ms: u64,

    /// 区間の長さ（ミリ秒）
    pub duration_ms: u64,
}

impl RedactionSpan {
    pub fn new(offset_ms: u64, duration_ms: u64) -> Self {
        Self {
            offset_ms,
            duration_ms,
        }
    }

    /// 区間の終了位置（ミリ秒）
    pub fn end_ms(&self) -> u64 {
        self.offset_ms + self.duration_ms
    }

    /// 指定時刻が区間内（両端を含む）かどうか
    pub fn contains_ms(&self, t_ms: u64) -> bool {
        t_ms >= self.offset_ms && t_ms <= self.end_ms()
    }
}

/// カット区間
///
/// 単一チャンネルの音声から切り取り、同じ長さのフィラー音声に
/// 置き換える区間。開始位置は元の（カット前の）タイムライン基準。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CutInterval {
    /// 区間の開始位置（ミリ秒）
    pub start_ms: u64,

    /// 区間の長さ（ミリ秒）
    pub duration_ms: u64,
}

impl CutInterval {
    pub fn new(start_ms: u64, duration_ms: u64) -> Self {
        Self {
            start_ms,
            duration_ms,
        }
    }

    /// 区間の終了位置（ミリ秒）
    pub fn end_ms(&self) -> u64 {
        self.start_ms + self.duration_ms
    }
}

/// カット区間に挿入するフィラー音声の種類
///
/// # Examples
///
/// ```
/// # use dcr_redact::types::FillerKind;
/// let kind = FillerKind::Silence; // 無音で埋める
/// ```
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FillerKind {
    /// 無音
    ///
    /// 切り取った区間を同じ長さの無音で埋める
    Silence,

    /// トーン
    ///
    /// 固定周波数・固定ゲインの正弦波で埋める
    Tone,
}

/// 墨消しの処理モード
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RedactionMode {
    /// サンプルをその場でミュート（長さ不変）
    Mute,

    /// 区間を切り取ってフィラーに置換（長さ不変）
    Cut,
}

/// 墨消し処理のサマリ
///
/// 1回の処理が完了するたびにJSON形式でシリアライズして
/// 標準出力に出力される。
///
/// # JSON出力例
///
/// ```json
/// {
///   "mode": "mute",
///   "input": "recordings/session_01.wav",
///   "output": "recordings/session_01_redacted.wav",
///   "timestamp": "2025-01-02T14:30:15+09:00",
///   "sample_rate": 16000,
///   "channels": 2,
///   "frames": 16000,
///   "regions": 3,
///   "duration_seconds": 1.0
/// }
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct RedactionReport {
    /// 処理モード
    pub mode: RedactionMode,

    /// 入力ファイルのパス
    pub input: String,

    /// 出力ファイルのパス
    pub output: String,

    /// ISO 8601形式の処理完了時刻
    pub timestamp: String,

    /// サンプリングレート (Hz)
    pub sample_rate: u32,

    /// チャンネル数
    pub channels: u16,

    /// 出力のフレーム数
    pub frames: usize,

    /// 適用したスパン/カット区間の数
    pub regions: usize,

    /// 出力音声の長さ（秒）
    pub duration_seconds: f64,
}

impl RedactionReport {
    /// 処理結果からサマリを作成
    ///
    /// # Arguments
    ///
    /// * `mode` - 処理モード
    /// * `input` - 入力ファイルのパス
    /// * `output` - 出力ファイルのパス
    /// * `audio` - 出力したPCM音声
    /// * `regions` - 適用したスパン/カット区間の数
    pub fn new(
        mode: RedactionMode,
        input: &Path,
        output: &Path,
        audio: &PcmAudio,
        regions: usize,
    ) -> Self {
        Self {
            mode,
            input: input.display().to_string(),
            output: output.display().to_string(),
            timestamp: chrono::Local::now().to_rfc3339(),
            sample_rate: audio.sample_rate,
            channels: audio.channels,
            frames: audio.frame_count(),
            regions,
            duration_seconds: audio.duration_seconds(),
        }
    }
}
