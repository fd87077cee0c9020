use crate::types::PcmAudio;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// デコード済みWAVファイル
///
/// 正規化されたPCM音声と元ファイルのフォーマット情報をまとめて
/// 保持する。出力時に同じフォーマットで再エンコードするため、
/// 読み込んだ `spec` をそのまま持ち回る。
#[derive(Clone, Debug)]
pub struct DecodedWav {
    /// -1.0 から 1.0 に正規化されたPCM音声
    pub audio: PcmAudio,

    /// 入力ファイルのWAVフォーマット情報
    pub spec: hound::WavSpec,
}

/// WAVファイルを読み込んで正規化f32に変換
///
/// 対応フォーマット: 16/24/32bit整数PCMと32bit浮動小数点。
/// 整数サンプルはビット深度に応じたスケールで -1.0 から 1.0 に
/// 正規化する。
///
/// # Errors
///
/// ファイルが開けない、サンプルの読み込みに失敗した、または
/// 未対応のフォーマットの場合にエラーを返す。
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<DecodedWav> {
    let path = path.as_ref();
    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("WAVファイルのオープンに失敗: {:?}", path))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32768.0))
            .collect::<std::result::Result<Vec<f32>, _>>()
            .with_context(|| format!("WAVサンプルの読み込みに失敗: {:?}", path))?,
        (hound::SampleFormat::Int, 24) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 8_388_608.0))
            .collect::<std::result::Result<Vec<f32>, _>>()
            .with_context(|| format!("WAVサンプルの読み込みに失敗: {:?}", path))?,
        (hound::SampleFormat::Int, 32) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 2_147_483_648.0))
            .collect::<std::result::Result<Vec<f32>, _>>()
            .with_context(|| format!("WAVサンプルの読み込みに失敗: {:?}", path))?,
        (hound::SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .with_context(|| format!("WAVサンプルの読み込みに失敗: {:?}", path))?,
        (format, bits) => {
            bail!("未対応のWAVフォーマット: {:?} {}bit", format, bits);
        }
    };

    let audio = PcmAudio::new(spec.sample_rate, spec.channels, samples)?;

    log::info!(
        "WAVファイル読み込み完了: {:?} ({}ch, {}Hz, {:.2}秒)",
        path,
        audio.channels,
        audio.sample_rate,
        audio.duration_seconds()
    );

    Ok(DecodedWav { audio, spec })
}

/// PCM音声を指定フォーマットでWAVファイルに書き出し
///
/// 入力と同じフォーマットで出力するため、`read_wav` が返した
/// `spec` をそのまま渡す。整数フォーマットへは正規化f32から
/// 元のスケールに戻して書き込む。
///
/// # Errors
///
/// フォーマット情報と音声のチャンネル数・サンプリングレートが
/// 一致しない場合、または書き込みに失敗した場合にエラーを返す。
pub fn write_wav<P: AsRef<Path>>(path: P, audio: &PcmAudio, spec: hound::WavSpec) -> Result<()> {
    let path = path.as_ref();

    if spec.channels != audio.channels || spec.sample_rate != audio.sample_rate {
        bail!(
            "出力フォーマットが音声と一致しません: フォーマット {}ch/{}Hz, 音声 {}ch/{}Hz",
            spec.channels,
            spec.sample_rate,
            audio.channels,
            audio.sample_rate
        );
    }

    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("WAVファイルの作成に失敗: {:?}", path))?;

    match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 16) => {
            for &sample in &audio.samples {
                let value = (sample * 32768.0).clamp(-32768.0, 32767.0) as i16;
                writer
                    .write_sample(value)
                    .with_context(|| "WAVファイルへのサンプル書き込みに失敗")?;
            }
        }
        (hound::SampleFormat::Int, 24) => {
            for &sample in &audio.samples {
                let value = (sample * 8_388_608.0).clamp(-8_388_608.0, 8_388_607.0) as i32;
                writer
                    .write_sample(value)
                    .with_context(|| "WAVファイルへのサンプル書き込みに失敗")?;
            }
        }
        (hound::SampleFormat::Int, 32) => {
            for &sample in &audio.samples {
                // f32では32bit整数の末尾桁を表現できないためf64で計算する
                let value = (sample as f64 * 2_147_483_648.0)
                    .clamp(-2_147_483_648.0, 2_147_483_647.0) as i32;
                writer
                    .write_sample(value)
                    .with_context(|| "WAVファイルへのサンプル書き込みに失敗")?;
            }
        }
        (hound::SampleFormat::Float, 32) => {
            for &sample in &audio.samples {
                writer
                    .write_sample(sample)
                    .with_context(|| "WAVファイルへのサンプル書き込みに失敗")?;
            }
        }
        (format, bits) => {
            bail!("未対応のWAVフォーマット: {:?} {}bit", format, bits);
        }
    }

    writer
        .finalize()
        .with_context(|| "WAVファイルのファイナライズに失敗")?;

    log::info!(
        "WAVファイル書き込み完了: {:?} ({}サンプル, {:.2}秒)",
        path,
        audio.samples.len(),
        audio.duration_seconds()
    );

    Ok(())
}
