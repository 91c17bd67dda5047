use crate::domain::model::{Diagnosis, AXES, AXIS_COUNT};
use crate::utils::error::{DiagError, Result};
use regex::Regex;
use serde_json::{Map, Value};

/// 依優先序探測模型回覆所在的封包路徑
const CONTENT_PATHS: [&str; 3] = [
    "/choices/0/message/content",
    "/output/0/content/0/text",
    "/output_text",
];

/// 把 provider 的原始封包整形成固定形狀的診斷結果
///
/// The reply is hunted down across the known envelope shapes, repaired if
/// it arrived as fenced or prose-wrapped text, parsed, then clamped into
/// the guaranteed shape. The only unrecoverable case is a reply that never
/// contains a JSON object.
pub fn normalize(envelope: &Value) -> Result<Diagnosis> {
    let candidate = extract_content(envelope).ok_or(DiagError::ModelOutputNotJson)?;

    let parsed = match candidate {
        // 已經是結構化物件就直接採用,不做文字修補
        Value::Object(map) => map.clone(),
        Value::String(text) => parse_repaired(text)?,
        _ => return Err(DiagError::ModelOutputNotJson),
    };

    Ok(finalize(&parsed))
}

/// 0–100 夾取,整數四捨五入(0.5 進位)
pub fn clip(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

fn extract_content(envelope: &Value) -> Option<&Value> {
    CONTENT_PATHS
        .iter()
        .filter_map(|path| envelope.pointer(path))
        .find(|value| match value {
            Value::String(text) => !text.is_empty(),
            Value::Object(_) => true,
            _ => false,
        })
}

fn parse_repaired(text: &str) -> Result<Map<String, Value>> {
    let repaired = sanitize(text);
    match serde_json::from_str::<Value>(&repaired) {
        Ok(Value::Object(map)) => Ok(map),
        // 解析失敗或頂層不是物件,都算模型沒交出 JSON
        _ => Err(DiagError::ModelOutputNotJson),
    }
}

/// 三段修補:去掉 Markdown 圍欄、彎引號換成 ASCII、裁到大括號跨度
///
/// Best-effort only: unbalanced braces or replies truncated mid-object are
/// left for the parse step to reject.
fn sanitize(text: &str) -> String {
    let fence = Regex::new(r"(?i)```[a-z]*\n?").unwrap();
    let mut repaired = fence.replace_all(text, "").into_owned();

    repaired = repaired
        .replace('“', "\"")
        .replace('”', "\"")
        .replace('‘', "'")
        .replace('’', "'");

    if let (Some(start), Some(end)) = (repaired.find('{'), repaired.rfind('}')) {
        if end > start {
            repaired = repaired[start..=end].to_string();
        }
    }

    repaired
}

fn finalize(parsed: &Map<String, Value>) -> Diagnosis {
    let axes = clamp_axes(parsed.get("axes"));

    let total = match parsed.get("total").and_then(Value::as_f64) {
        Some(value) => clip(value),
        None => clip(weighted_total(&axes)),
    };

    let advice = parsed
        .get("advice")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let details = parsed
        .get("details")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    Diagnosis {
        axes,
        total,
        advice,
        details,
    }
}

/// 逐元素夾取並固定為五軸;缺軸補 0,多出來的丟棄
fn clamp_axes(raw: Option<&Value>) -> [u8; AXIS_COUNT] {
    let mut axes = [0u8; AXIS_COUNT];
    if let Some(Value::Array(values)) = raw {
        for (slot, value) in axes.iter_mut().zip(values) {
            *slot = clip(value.as_f64().unwrap_or(0.0));
        }
    }
    axes
}

fn weighted_total(axes: &[u8; AXIS_COUNT]) -> f64 {
    axes.iter()
        .zip(AXES.iter())
        .map(|(score, axis)| f64::from(*score) * axis.weight)
        .sum()
}
