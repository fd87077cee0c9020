//! dcr-redact - 録音音声の墨消しツール
//!
//! このクレートは、録音済みのWAVファイルから個人情報などの聞かせたく
//! ない区間を取り除くための2種類の墨消しエンジンを提供します。
//!
//! # 主な機能
//!
//! - **ミュートモード**: マルチチャンネル音声のチャンネル別スパン区間をその場で無音化
//! - **カットモード**: モノラル音声の区間を切り取り、同じ長さのフィラー（無音またはトーン）に置換
//! - **スパン索引**: チャンネル別の区間リストをソート・検証して1パス走査用のカーソルを提供
//! - **WAV入出力**: 16/24/32bit整数および32bit浮動小数点PCMを入力と同じフォーマットで再出力
//!
//! どちらのモードも出力の長さは入力と一致し、墨消し区間より後ろの
//! タイムスタンプはずれません。
//!
//! # アーキテクチャ
//!
//! ```text
//! [spans.json] → [SpanFile] → [SpanIndex]
//!                                  ↓
//! [input.wav] → [WavIo] ──→ [Redactor / Splicer] ──→ [WavIo] → [output.wav]
//!                                  ↓
//!                          [RedactionReport]
//! ```
//!
//! # 使用例
//!
//! ```
//! use dcr_redact::redactor;
//! use dcr_redact::span_index::SpanIndex;
//! use dcr_redact::types::{PcmAudio, RedactionSpan};
//! use std::collections::HashMap;
//!
//! // 16kHz モノラル 1秒の音声
//! let audio = PcmAudio::new(16000, 1, vec![0.5; 16000]).unwrap();
//!
//! // チャンネル0の 200ms〜300ms をミュート
//! let mut spans = HashMap::new();
//! spans.insert(0, vec![RedactionSpan::new(200, 100)]);
//! let index = SpanIndex::new(spans).unwrap();
//!
//! let redacted = redactor::redact(&audio, &index).unwrap();
//! assert_eq!(redacted.frame_count(), audio.frame_count());
//! ```

pub mod config;
pub mod error;
pub mod redactor;
pub mod span_file;
pub mod span_index;
pub mod splicer;
pub mod types;
pub mod wav_io;
