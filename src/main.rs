use anyhow::{bail, Result};
use dcr_redact::config::Config;
use dcr_redact::redactor;
use dcr_redact::span_file;
use dcr_redact::span_index::SpanIndex;
use dcr_redact::splicer;
use dcr_redact::types::{PcmAudio, RedactionMode, RedactionReport};
use dcr_redact::wav_io;
use env_logger::Env;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    // コマンドライン引数をパース
    let args: Vec<String> = std::env::args().collect();

    // 設定ファイル生成モード
    if args.len() > 1 && args[1] == "--generate-config" {
        let config_path = if args.len() > 2 {
            &args[2]
        } else {
            "config.toml"
        };
        Config::write_default(config_path)?;
        println!("設定ファイルを生成しました: {}", config_path);
        return Ok(());
    }

    let mut config_path = "config.toml".to_string();
    let mut cut_mode = false;
    let mut positional = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--cut" => cut_mode = true,
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => config_path = path.clone(),
                    None => {
                        print_usage();
                        bail!("--config にはパスを指定してください");
                    }
                }
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            arg if arg.starts_with("--") => {
                print_usage();
                bail!("不明なオプション: {}", arg);
            }
            arg => positional.push(arg.to_string()),
        }
        i += 1;
    }

    if positional.len() < 2 || positional.len() > 3 {
        print_usage();
        bail!("入力WAVと区間JSONを指定してください");
    }

    // 設定を読み込み
    let config = Config::load_or_default(&config_path)?;

    // ロガーを初期化（RUST_LOG環境変数が設定のログレベルより優先）
    env_logger::Builder::from_env(
        Env::default().default_filter_or(config.output.log_level.as_str()),
    )
    .format_timestamp(None)
    .init();

    log::info!("dcr-redact を起動します");
    log::info!("設定: {:?}", config);

    let input_path = PathBuf::from(&positional[0]);
    let regions_path = PathBuf::from(&positional[1]);
    let output_path = match positional.get(2) {
        Some(path) => PathBuf::from(path),
        None => default_output_path(&input_path, &config.output.redacted_suffix),
    };

    let report = if cut_mode {
        run_cut(&input_path, &regions_path, &output_path, &config)?
    } else {
        run_mute(&input_path, &regions_path, &output_path)?
    };

    // 処理サマリをJSON形式で出力
    println!("{}", serde_json::to_string(&report)?);

    log::info!("dcr-redact を終了しました");

    Ok(())
}

fn print_usage() {
    println!("使い方:");
    println!("  dcr-redact [オプション] <入力WAV> <区間JSON> [出力WAV]");
    println!();
    println!("オプション:");
    println!("  --cut                     カットモード（区間を切り取ってフィラーに置換）");
    println!("  --config <パス>           設定ファイルのパス (デフォルト: config.toml)");
    println!("  --generate-config [パス]  デフォルト設定ファイルを生成して終了");
    println!("  -h, --help                このヘルプを表示");
    println!();
    println!("デフォルトはミュートモード（チャンネル別スパンをその場で無音化）。");
    println!("出力WAVを省略すると入力ファイル名に接尾辞を付けたパスに出力する。");
}

/// 入力パスから出力パスを導出
///
/// `recording.wav` と接尾辞 `_redacted` から
/// `recording_redacted.wav` を作る。
fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let mut name = format!("{}{}", stem, suffix);
    if let Some(ext) = input.extension().and_then(|s| s.to_str()) {
        name.push('.');
        name.push_str(ext);
    }
    input.with_file_name(name)
}

/// ミュートモードの実行
///
/// スパンファイルを読み込み、対象チャンネルのスパン区間を
/// 無音化したWAVを入力と同じフォーマットで書き出す。
fn run_mute(input: &Path, spans_path: &Path, output: &Path) -> Result<RedactionReport> {
    let spans = span_file::load_spans(spans_path)?;
    let index = SpanIndex::new(spans)?;
    let decoded = wav_io::read_wav(input)?;

    log::info!("ミュート処理を開始します: スパン{}件", index.total_spans());
    let redacted = redactor::redact(&decoded.audio, &index)?;

    wav_io::write_wav(output, &redacted, decoded.spec)?;

    Ok(RedactionReport::new(
        RedactionMode::Mute,
        input,
        output,
        &redacted,
        index.total_spans(),
    ))
}

/// カットモードの実行
///
/// カットファイルを読み込み、各区間をフィラーに置き換えたWAVを
/// 入力と同じフォーマットで書き出す。モノラル音声のみ対応。
fn run_cut(
    input: &Path,
    cuts_path: &Path,
    output: &Path,
    config: &Config,
) -> Result<RedactionReport> {
    let cuts = span_file::load_cuts(cuts_path)?;
    let decoded = wav_io::read_wav(input)?;

    if decoded.audio.channels != 1 {
        bail!(
            "カットモードはモノラル音声のみ対応しています (入力は{}チャンネル)",
            decoded.audio.channels
        );
    }

    log::info!(
        "カット置換を開始します: カット{}件, フィラー{:?}",
        cuts.len(),
        config.filler.kind
    );
    let spliced = splicer::cut_and_splice(
        &decoded.audio.samples,
        decoded.audio.sample_rate,
        &cuts,
        &config.filler,
    )?;
    let redacted = PcmAudio::new(decoded.audio.sample_rate, 1, spliced)?;

    wav_io::write_wav(output, &redacted, decoded.spec)?;

    Ok(RedactionReport::new(
        RedactionMode::Cut,
        input,
        output,
        &redacted,
        cuts.len(),
    ))
}
