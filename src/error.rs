use thiserror::Error;

/// 墨消し処理のエラー型
///
/// 呼び出し側が「入力の形が不正」なのか「区間リストの事前条件違反」
/// なのかを区別できるように分類する。いずれも即座に呼び出し側へ
/// 伝播し、部分的に加工されたバッファが結果として返ることはない。
#[derive(Debug, Error)]
pub enum RedactError {
    /// 不正な引数（サンプリングレートが0、範囲外のカット区間など）
    #[error("不正な引数: {0}")]
    InvalidArgument(String),

    /// 事前条件違反（スパン/カット区間の重なり・順序逆転）
    #[error("事前条件違反: {0}")]
    PreconditionViolation(String),

    /// PCMデータ構造の不整合
    ///
    /// インターリーブされたサンプル数が宣言されたチャンネル数で
    /// 割り切れない場合。回復不能。
    #[error("PCM構造の不整合: サンプル数 {samples} がチャンネル数 {channels} で割り切れません")]
    StructuralMismatch { channels: u16, samples: usize },
}

pub type Result<T> = std::result::Result<T, RedactError>;
