use crate::domain::model::{BusinessModel, ScoringRequest, AXES};
use crate::utils::error::Result;

/// 閉環診斷的評分規則(系統提示)
///
/// Rendered from the axis table so the rubric, the weights and the
/// breakdown schema can never drift apart. The rubric is Japanese because
/// the product surface is; it demands a complete JSON object and nothing
/// else, which the normalizer then enforces defensively anyway.
pub fn system_prompt() -> String {
    let axis_lines = AXES
        .iter()
        .enumerate()
        .map(|(index, axis)| format!("{}) {}（{}）", index + 1, axis.label, axis.description))
        .collect::<Vec<_>>()
        .join("\n");

    let weights = AXES
        .iter()
        .map(|axis| format!("{:.2}", axis.weight))
        .collect::<Vec<_>>()
        .join(",");

    let breakdown = AXES
        .iter()
        .enumerate()
        .map(|(index, axis)| {
            format!(
                r#"      {{"name":"{}","score":n{},"strengths":["…"],"improvements":["…"],"examples":["…"],"to_reach_100":"…"}}"#,
                axis.label,
                index + 1
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        r#"あなたは新規事業の「閉ループ診断」アナリストです。
入力（why, who, value, delivery, money, feedback, driver）を読み、5軸を各0–100で厳密に採点してください：
{axis_lines}

重み [{weights}] で total(0–100) を算出（整数, 四捨五入）。
評価方針：空欄・曖昧語・検証不能主張は減点。具体性（誰が/何に払う/単価/頻度/導線/行動ログ/改善サイクル）を加点。
出力は必ず **JSONオブジェクトのみ**（自然文禁止）。

出力仕様（上位キー3つは必須）：
{{
  "axes": [n1,n2,n3,n4,n5],
  "total": n,
  "advice": "全体への一言助言（60字以内）",
  "details": {{
    "axis_breakdown": [
{breakdown}
    ],
    "overall": {{
      "top_strengths": ["全体の良い点（最大3）"],
      "top_issues": ["本質的な課題（最大3）"],
      "top_risks": ["前提崩れ・競合・規制など（最大2）"],
      "missing_info_questions": ["不足情報を埋める質問（最大5）"],
      "prioritized_actions": [
        {{"action":"最優先の改善","impact":5,"effort":2,"confidence":0.8,"rationale":"短文理由"}},
        {{"action":"第二優先","impact":4,"effort":2,"confidence":0.7,"rationale":"短文理由"}},
        {{"action":"第三優先","impact":3,"effort":1,"confidence":0.9,"rationale":"短文理由"}}
      ],
      "summary": "全体講評（200字以内）"
    }}
  }}
}}
条件：
- すべて日本語。配列要素は各60字以内。
- 入力が乏しい場合は厳しめに採点し、missing_info_questions と to_reach_100 を充実させる。
- ⚠️ 出力は**完全なJSON**で終了させること。途中省略（...）や未閉鎖を含めない。"#
    )
}

/// 使用者訊息:輸入原樣序列化,接在「入力:」之後
pub fn user_message(input: &BusinessModel) -> Result<String> {
    Ok(format!("入力: {}", serde_json::to_string(input)?))
}

pub fn scoring_request(input: &BusinessModel) -> Result<ScoringRequest> {
    Ok(ScoringRequest {
        system: system_prompt(),
        user: user_message(input)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rubric_lists_every_axis_with_weights() {
        let prompt = system_prompt();
        for axis in AXES.iter() {
            assert!(prompt.contains(axis.label), "missing axis {}", axis.label);
        }
        assert!(prompt.contains("[0.25,0.25,0.20,0.15,0.15]"));
        assert!(prompt.contains("axis_breakdown"));
        assert!(prompt.contains("JSONオブジェクトのみ"));
    }

    #[test]
    fn user_message_embeds_serialized_input() {
        let input = BusinessModel::from_json_lenient(r#"{"why":"習慣化支援","money":"月額980円"}"#);
        let message = user_message(&input).unwrap();
        assert!(message.starts_with("入力: {"));
        assert!(message.contains("月額980円"));
    }

    #[test]
    fn empty_input_still_produces_a_request() {
        let request = scoring_request(&BusinessModel::default()).unwrap();
        assert_eq!(request.user, "入力: {}");
        assert!(!request.system.is_empty());
    }
}
