use crate::config::FillerConfig;
use crate::error::{RedactError, Result};
use crate::types::{CutInterval, FillerKind, SampleF32};

/// モノラル音声のカット区間をフィラーに置き換える
///
/// 各カット区間を同じフレーム数のフィラー（無音またはトーン）で
/// 置き換えるため、出力の長さは常に入力と一致し、カット区間より
/// 後ろのタイムスタンプもずれない。
///
/// カットリストは適用前にまとめて検証する。検証に失敗した場合、
/// 部分的に加工された結果が返ることはない。
///
/// # Arguments
///
/// * `samples` - 単一チャンネルのPCMサンプル
/// * `sample_rate` - サンプリングレート (Hz)
/// * `cuts` - 元のタイムライン基準のカット区間リスト
/// * `filler` - フィラー音声の設定
///
/// # Errors
///
/// サンプリングレートが0、またはカット区間が音声の範囲を超える
/// 場合は `InvalidArgument`、カット区間が時系列順でない・重なって
/// いる場合は `PreconditionViolation` を返す。
pub fn cut_and_splice(
    samples: &[SampleF32],
    sample_rate: u32,
    cuts: &[CutInterval],
    filler: &FillerConfig,
) -> Result<Vec<SampleF32>> {
    if sample_rate == 0 {
        return Err(RedactError::InvalidArgument(
            "サンプリングレートは正の値でなければなりません".to_string(),
        ));
    }
    if cuts.is_empty() {
        return Ok(samples.to_vec());
    }

    validate_cuts(samples.len(), sample_rate, cuts)?;

    let mut working = samples.to_vec();
    for cut in cuts {
        let start = ms_to_frames(cut.start_ms, sample_rate);
        let end = ms_to_frames(cut.end_ms(), sample_rate);
        let filler_segment = render_filler(end - start, sample_rate, filler);
        working.splice(start..end, filler_segment);
    }

    log::debug!(
        "カット置換完了: {}区間を{:?}フィラーで置換",
        cuts.len(),
        filler.kind
    );

    Ok(working)
}

/// カットリストの事前条件を検証
///
/// 各区間が直前の区間の終了位置以降から始まること（時系列順かつ
/// 重なりなし）と、音声の範囲内に収まることを先頭から順に確認する。
/// 接している区間は許容する。
fn validate_cuts(len: usize, sample_rate: u32, cuts: &[CutInterval]) -> Result<()> {
    let mut cursor_ms = 0u64;

    for cut in cuts {
        if cut.start_ms < cursor_ms {
            return Err(RedactError::PreconditionViolation(format!(
                "カット区間 [{}ms, {}ms] が直前の区間の終了位置 {}ms より前に開始しています",
                cut.start_ms,
                cut.end_ms(),
                cursor_ms
            )));
        }
        let end = ms_to_frames(cut.end_ms(), sample_rate);
        if end > len {
            return Err(RedactError::InvalidArgument(format!(
                "カット区間 [{}ms, {}ms] が音声の範囲 ({}フレーム) を超えています",
                cut.start_ms,
                cut.end_ms(),
                len
            )));
        }
        cursor_ms = cut.end_ms();
    }

    Ok(())
}

/// ミリ秒をフレーム番号に変換（切り捨て）
fn ms_to_frames(ms: u64, sample_rate: u32) -> usize {
    (ms * sample_rate as u64 / 1000) as usize
}

/// フィラー音声を生成
///
/// トーンは固定周波数・固定ゲインの正弦波で、クリッピングを防ぐ
/// ため -1.0 から 1.0 の範囲に制限する。
fn render_filler(len: usize, sample_rate: u32, config: &FillerConfig) -> Vec<SampleF32> {
    match config.kind {
        FillerKind::Silence => vec![0.0; len],
        FillerKind::Tone => (0..len)
            .map(|n| {
                let t = n as f32 / sample_rate as f32;
                let sample = (t * config.frequency_hz * 2.0 * std::f32::consts::PI).sin()
                    * config.gain;
                sample.clamp(-1.0, 1.0)
            })
            .collect(),
    }
}
