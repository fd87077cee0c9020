use crate::error::{RedactError, Result};
use crate::span_index::SpanIndex;
use crate::types::PcmAudio;

/// マルチチャンネル音声のスパン区間をミュートする
///
/// フレーム同期で全チャンネルを1パス走査し、各チャンネルの
/// カーソルが指すスパンに含まれるサンプルを無音に置き換える。
/// 出力は入力と同じフレーム数・同じチャンネル数を持つ。
///
/// フレーム番号 `n` の時刻は `n × 1000 / sample_rate` ミリ秒
/// （切り捨て）で求め、スパンの両端を含む閉区間で判定する。
/// カーソルは現在のスパンの終了位置を過ぎたフレームの通過時に
/// 1つだけ進む。
///
/// # Arguments
///
/// * `audio` - 入力PCM音声（インターリーブ形式）
/// * `index` - チャンネル別の墨消しスパン索引
///
/// # Errors
///
/// 入力の形状が不正な場合は `StructuralMismatch`、スパンの
/// チャンネルIDが音声のチャンネル数以上の場合は
/// `InvalidArgument` を返す。
pub fn redact(audio: &PcmAudio, index: &SpanIndex) -> Result<PcmAudio> {
    audio.validate()?;

    if let Some(max) = index.max_channel() {
        if max >= audio.channels as usize {
            return Err(RedactError::InvalidArgument(format!(
                "スパンのチャンネルID {} は音声のチャンネル数 {} の範囲外です",
                max, audio.channels
            )));
        }
    }

    let channels = audio.channels as usize;
    let mut cursors = index.cursors(channels);
    let mut output = Vec::with_capacity(audio.samples.len());
    let mut muted = 0usize;

    for (frame, frame_samples) in audio.samples.chunks_exact(channels).enumerate() {
        let t_ms = frame as u64 * 1000 / audio.sample_rate as u64;

        for (ch, &sample) in frame_samples.iter().enumerate() {
            match cursors[ch].current() {
                Some(span) if span.contains_ms(t_ms) => {
                    output.push(0.0);
                    muted += 1;
                }
                Some(span) => {
                    output.push(sample);
                    if t_ms > span.end_ms() {
                        cursors[ch].advance(index.channel_spans(ch));
                    }
                }
                None => {
                    output.push(sample);
                }
            }
        }
    }

    log::debug!(
        "ミュート完了: {}フレーム中{}サンプルをミュート (スパン{}件)",
        audio.frame_count(),
        muted,
        index.total_spans()
    );

    PcmAudio::new(audio.sample_rate, audio.channels, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RedactionSpan;
    use std::collections::HashMap;

    fn index_of(entries: &[(usize, &[(u64, u64)])]) -> SpanIndex {
        let map: HashMap<usize, Vec<RedactionSpan>> = entries
            .iter()
            .map(|(ch, spans)| {
                let list = spans
                    .iter()
                    .map(|&(offset, duration)| RedactionSpan::new(offset, duration))
                    .collect();
                (*ch, list)
            })
            .collect();
        SpanIndex::new(map).unwrap()
    }

    #[test]
    fn test_stereo_mute_exact_boundaries() {
        // 16kHz ステレオ 1秒、チャンネル0に [200ms, 300ms] のスパン。
        // t(n) = n / 16 ms なので、ミュートされるのは n = 3200..=4815。
        let frames = 16000;
        let mut samples = Vec::with_capacity(frames * 2);
        for _ in 0..frames {
            samples.push(0.5);
            samples.push(0.25);
        }
        let audio = PcmAudio::new(16000, 2, samples).unwrap();
        let index = index_of(&[(0, &[(200, 100)])]);

        let result = redact(&audio, &index).unwrap();
        assert_eq!(result.frame_count(), frames);

        let mut expected = Vec::with_capacity(frames * 2);
        for n in 0..frames {
            if (3200..=4815).contains(&n) {
                expected.push(0.0);
            } else {
                expected.push(0.5);
            }
            expected.push(0.25);
        }
        assert_eq!(result.samples, expected);

        // 境界フレームの確認
        assert_eq!(result.samples[3199 * 2], 0.5);
        assert_eq!(result.samples[3200 * 2], 0.0);
        assert_eq!(result.samples[4815 * 2], 0.0);
        assert_eq!(result.samples[4816 * 2], 0.5);
    }

    #[test]
    fn test_empty_index_is_identity() {
        let samples: Vec<f32> = (0..2000).map(|n| (n as f32 * 0.001).sin()).collect();
        let audio = PcmAudio::new(16000, 2, samples.clone()).unwrap();
        let index = index_of(&[]);

        let result = redact(&audio, &index).unwrap();
        assert_eq!(result.samples, samples);
    }

    #[test]
    fn test_span_channel_out_of_range() {
        let audio = PcmAudio::new(16000, 1, vec![0.5; 1600]).unwrap();
        let index = index_of(&[(1, &[(0, 100)])]);

        let result = redact(&audio, &index);
        assert!(matches!(result, Err(RedactError::InvalidArgument(_))));
    }

    #[test]
    fn test_zero_frames() {
        let audio = PcmAudio::new(16000, 2, Vec::new()).unwrap();
        let index = index_of(&[(0, &[(0, 100)])]);

        let result = redact(&audio, &index).unwrap();
        assert!(result.samples.is_empty());
    }

    #[test]
    fn test_span_beyond_audio_end() {
        // 1秒の音声に対して2秒以降のスパンは何もミュートしない
        let audio = PcmAudio::new(16000, 1, vec![0.5; 16000]).unwrap();
        let index = index_of(&[(0, &[(2000, 100)])]);

        let result = redact(&audio, &index).unwrap();
        assert_eq!(result.samples, vec![0.5; 16000]);
    }

    #[test]
    fn test_multiple_spans_on_one_channel() {
        // 1kHz モノラルなら t(n) = n ms で境界計算が単純になる
        let audio = PcmAudio::new(1000, 1, vec![0.5; 100]).unwrap();
        let index = index_of(&[(0, &[(50, 10), (0, 10)])]);

        let result = redact(&audio, &index).unwrap();

        let expected: Vec<f32> = (0..100)
            .map(|n| {
                if (0..=10).contains(&n) || (50..=60).contains(&n) {
                    0.0
                } else {
                    0.5
                }
            })
            .collect();
        assert_eq!(result.samples, expected);
    }

    #[test]
    fn test_only_target_channel_muted() {
        // チャンネル1のみのスパンでチャンネル0は無傷のまま
        let frames = 200;
        let mut samples = Vec::with_capacity(frames * 2);
        for _ in 0..frames {
            samples.push(0.5);
            samples.push(0.75);
        }
        let audio = PcmAudio::new(1000, 2, samples).unwrap();
        let index = index_of(&[(1, &[(50, 20)])]);

        let result = redact(&audio, &index).unwrap();
        for n in 0..frames {
            assert_eq!(result.samples[n * 2], 0.5, "frame {}", n);
            if (50..=70).contains(&n) {
                assert_eq!(result.samples[n * 2 + 1], 0.0, "frame {}", n);
            } else {
                assert_eq!(result.samples[n * 2 + 1], 0.75, "frame {}", n);
            }
        }
    }

    #[test]
    fn test_malformed_audio_rejected() {
        // 2チャンネル宣言に対して奇数サンプル
        let audio = PcmAudio {
            sample_rate: 16000,
            channels: 2,
            samples: vec![0.0; 3],
        };
        let index = index_of(&[]);

        let result = redact(&audio, &index);
        assert!(matches!(
            result,
            Err(RedactError::StructuralMismatch { .. })
        ));
    }
}
