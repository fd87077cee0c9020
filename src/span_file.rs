use crate::types::{CutInterval, RedactionSpan};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// スパンファイルの1エントリ
///
/// ミュート対象のチャンネルと区間をミリ秒で指定する。
///
/// # JSON形式
///
/// ```json
/// [
///   { "channel": 0, "offset_ms": 200, "duration_ms": 100 },
///   { "channel": 1, "offset_ms": 1500, "duration_ms": 300 }
/// ]
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct SpanFileEntry {
    /// 対象チャンネルID（0始まり）
    pub channel: usize,

    /// 区間の開始位置（ミリ秒）
    pub offset_ms: u64,

    /// 区間の長さ（ミリ秒）
    pub duration_ms: u64,
}

/// カットファイルの1エントリ
///
/// カット対象の区間をミリ秒で指定する。カットモードは
/// モノラル音声のみが対象のためチャンネル指定はない。
///
/// # JSON形式
///
/// ```json
/// [
///   { "start_ms": 500, "duration_ms": 250 }
/// ]
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct CutFileEntry {
    /// 区間の開始位置（ミリ秒）
    pub start_ms: u64,

    /// 区間の長さ（ミリ秒）
    pub duration_ms: u64,
}

/// スパンファイルを読み込んでチャンネル別に分類
///
/// JSON配列をパースし、チャンネルIDごとのスパンリストに
/// まとめて返す。リスト内の順序は保証しない（索引の構築時に
/// ソートされる）。
///
/// # Errors
///
/// ファイルの読み込みまたはパースに失敗した場合にエラーを返す。
pub fn load_spans<P: AsRef<Path>>(path: P) -> Result<HashMap<usize, Vec<RedactionSpan>>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("スパンファイルの読み込みに失敗: {:?}", path))?;
    let entries: Vec<SpanFileEntry> = serde_json::from_str(&content)
        .with_context(|| format!("スパンファイルのパースに失敗: {:?}", path))?;

    let mut spans: HashMap<usize, Vec<RedactionSpan>> = HashMap::new();
    for entry in &entries {
        spans
            .entry(entry.channel)
            .or_insert_with(Vec::new)
            .push(RedactionSpan::new(entry.offset_ms, entry.duration_ms));
    }

    log::info!(
        "スパンファイル読み込み完了: {:?} ({}件, {}チャンネル)",
        path,
        entries.len(),
        spans.len()
    );

    Ok(spans)
}

/// カットファイルを読み込み
///
/// JSON配列をパースし、ファイル内の順序を保ったまま返す。
/// 時系列順の検証は置換処理の側で行う。
///
/// # Errors
///
/// ファイルの読み込みまたはパースに失敗した場合にエラーを返す。
pub fn load_cuts<P: AsRef<Path>>(path: P) -> Result<Vec<CutInterval>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("カットファイルの読み込みに失敗: {:?}", path))?;
    let entries: Vec<CutFileEntry> = serde_json::from_str(&content)
        .with_context(|| format!("カットファイルのパースに失敗: {:?}", path))?;

    let cuts: Vec<CutInterval> = entries
        .iter()
        .map(|entry| CutInterval::new(entry.start_ms, entry.duration_ms))
        .collect();

    log::info!("カットファイル読み込み完了: {:?} ({}件)", path, cuts.len());

    Ok(cuts)
}
