use crate::error::{RedactError, Result};
use crate::types::RedactionSpan;
use std::collections::HashMap;

/// チャンネル別の墨消しスパン索引
///
/// チャンネルIDからそのチャンネルのスパンリストへの索引を保持する。
/// 構築時に各リストを開始位置の昇順にソートし、重なりを検証する。
/// 構築後は変更されない。
///
/// 隣接するスパンが接している（前のスパンの終了位置と次のスパンの
/// 開始位置が一致する）ことは許容される。重なりは事前条件違反と
/// して拒否する。
///
/// # Examples
///
/// ```
/// # use dcr_redact::span_index::SpanIndex;
/// # use dcr_redact::types::RedactionSpan;
/// # use std::collections::HashMap;
/// let mut spans = HashMap::new();
/// spans.insert(0, vec![RedactionSpan::new(200, 100)]);
///
/// let index = SpanIndex::new(spans).unwrap();
/// assert_eq!(index.total_spans(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct SpanIndex {
    /// チャンネルIDごとのソート済みスパンリスト
    ///
    /// 空のリストは構築時に除去されるため、登録されている
    /// チャンネルは必ず1つ以上のスパンを持つ。
    channels: HashMap<usize, Vec<RedactionSpan>>,
}

impl SpanIndex {
    /// スパンリストをソート・検証して索引を構築
    ///
    /// 各チャンネルのリストを開始位置の昇順にソートし、空のリストを
    /// 除去した上で隣接スパンの重なりを検証する。
    ///
    /// # Errors
    ///
    /// 同一チャンネル内でスパンが重なっている場合は
    /// `PreconditionViolation` を返す。
    pub fn new(spans: HashMap<usize, Vec<RedactionSpan>>) -> Result<Self> {
        let mut channels = HashMap::new();

        for (channel, mut list) in spans {
            if list.is_empty() {
                continue;
            }
            list.sort_by_key(|s| s.offset_ms);

            for pair in list.windows(2) {
                let (prev, next) = (&pair[0], &pair[1]);
                if next.offset_ms < prev.end_ms() {
                    return Err(RedactError::PreconditionViolation(format!(
                        "チャンネル{}のスパンが重なっています: [{}ms, {}ms] と [{}ms, {}ms]",
                        channel,
                        prev.offset_ms,
                        prev.end_ms(),
                        next.offset_ms,
                        next.end_ms()
                    )));
                }
            }

            channels.insert(channel, list);
        }

        Ok(Self { channels })
    }

    /// 指定チャンネルのソート済みスパンリスト
    ///
    /// 未登録のチャンネルに対しては空のスライスを返す。
    pub fn channel_spans(&self, channel: usize) -> &[RedactionSpan] {
        self.channels
            .get(&channel)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    /// 指定チャンネルの先頭スパンを指すカーソルを作成
    ///
    /// スパンを持たないチャンネルには消費済みカーソルを返す。
    pub fn cursor(&self, channel: usize) -> SpanCursor {
        match self.channel_spans(channel).first() {
            Some(span) => SpanCursor::Active {
                span: *span,
                index: 0,
            },
            None => SpanCursor::Exhausted,
        }
    }

    /// 全チャンネル分のカーソル配列を作成
    ///
    /// チャンネル0から `channel_count - 1` までのカーソルを順に返す。
    pub fn cursors(&self, channel_count: usize) -> Vec<SpanCursor> {
        (0..channel_count).map(|ch| self.cursor(ch)).collect()
    }

    /// 索引に含まれるスパンの総数
    pub fn total_spans(&self) -> usize {
        self.channels.values().map(|list| list.len()).sum()
    }

    /// スパンを持つ最大のチャンネルID
    pub fn max_channel(&self) -> Option<usize> {
        self.channels.keys().max().copied()
    }

    /// スパンを1つも持たないかどうか
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// スパン走査カーソル
///
/// 1チャンネル分のソート済みスパンリストを先頭から順に指す。
/// 状態はタグ付きの2値で、現在のスパンを指しているか、リストを
/// 走査し終えたかのどちらかを取る。一度消費済みになったカーソルが
/// 復帰することはない。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpanCursor {
    /// 現在のスパンを指している状態
    Active {
        /// 現在のスパン
        span: RedactionSpan,
        /// リスト内の位置
        index: usize,
    },

    /// リストを走査し終えた状態
    Exhausted,
}

impl SpanCursor {
    /// 現在指しているスパン
    ///
    /// 消費済みの場合は `None` を返す。
    pub fn current(&self) -> Option<RedactionSpan> {
        match self {
            SpanCursor::Active { span, .. } => Some(*span),
            SpanCursor::Exhausted => None,
        }
    }

    /// 次のスパンへ進める
    ///
    /// リストの末尾に達した場合は消費済み状態へ遷移する。
    /// 消費済みカーソルに対しては何もしない。
    pub fn advance(&mut self, spans: &[RedactionSpan]) {
        if let SpanCursor::Active { index, .. } = self {
            let next = *index + 1;
            *self = match spans.get(next) {
                Some(span) => SpanCursor::Active {
                    span: *span,
                    index: next,
                },
                None => SpanCursor::Exhausted,
            };
        }
    }
}
