/// ドメインサービス: 表示用の整形
///
/// APIから受け取った値を人間向けの行に変換する。
/// 出力先への書き込みはプレゼンテーション層が行う。
use crate::api::types::{AccountInfo, VideoSummary};
use serde_json::Value;

const INDENT: &str = "  ";

/// アカウント情報を「キー: 値」の行に展開する
///
/// ネストしたオブジェクトと配列は1段ずつインデントして展開する。
/// 文字列は引用符なしで出す。
pub fn account_info_lines(info: &AccountInfo) -> Vec<String> {
    let mut lines = Vec::new();
    push_object(&mut lines, info, 0);
    lines
}

fn push_object(lines: &mut Vec<String>, map: &serde_json::Map<String, Value>, depth: usize) {
    for (key, value) in map {
        push_entry(lines, key, value, depth);
    }
}

fn push_entry(lines: &mut Vec<String>, label: &str, value: &Value, depth: usize) {
    let pad = INDENT.repeat(depth);
    match value {
        Value::Object(map) if map.is_empty() => lines.push(format!("{}{}: {{}}", pad, label)),
        Value::Array(items) if items.is_empty() => lines.push(format!("{}{}: []", pad, label)),
        Value::Object(map) => {
            lines.push(format!("{}{}:", pad, label));
            push_object(lines, map, depth + 1);
        }
        Value::Array(items) => {
            lines.push(format!("{}{}:", pad, label));
            for (idx, item) in items.iter().enumerate() {
                push_entry(lines, &format!("[{}]", idx), item, depth + 1);
            }
        }
        scalar => lines.push(format!("{}{}: {}", pad, label, scalar_text(scalar))),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// 動画一覧の1行
pub fn video_line(video: &VideoSummary) -> String {
    format!(
        "- [{}] {} (ID: {}) - Hidden: {}",
        video.status.as_deref().unwrap_or("unknown"),
        video.title.as_deref().unwrap_or("(untitled)"),
        video.id,
        video
            .is_hidden
            .map(|h| h.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    )
}
