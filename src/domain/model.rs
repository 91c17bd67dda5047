use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 評分軸定義:顯示名稱、說明與加權
#[derive(Debug, Clone, Copy)]
pub struct Axis {
    pub label: &'static str,
    pub description: &'static str,
    pub weight: f64,
}

/// The five closed-loop axes, in scoring order. Weights sum to 1.0 and the
/// order is part of the contract: `axes[i]` always refers to `AXES[i]`.
pub const AXES: [Axis; 5] = [
    Axis {
        label: "顧客↔価値",
        description: "Problem-Solution Fit",
        weight: 0.25,
    },
    Axis {
        label: "価値↔収益",
        description: "Value→Money変換の明確さ",
        weight: 0.25,
    },
    Axis {
        label: "収益↔改善",
        description: "収益が学習に戻る設計",
        weight: 0.20,
    },
    Axis {
        label: "改善↔顧客価値",
        description: "改善が価値向上に再接続",
        weight: 0.15,
    },
    Axis {
        label: "継続動機",
        description: "習慣化/コミュニティ/ネットワーク効果等",
        weight: 0.15,
    },
];

pub const AXIS_COUNT: usize = AXES.len();

/// 診斷輸入:自由欄位的商業模式描述
///
/// Conventional keys are `why`, `who`, `value`, `delivery`, `money`,
/// `feedback` and `driver`, but nothing here validates or inspects them;
/// the whole mapping is serialized into the scoring prompt as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessModel {
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
}

impl BusinessModel {
    /// Lenient構造:壞掉或非物件的輸入一律當成空模型,不報錯
    pub fn from_json_lenient(raw: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Object(map)) => Self {
                fields: map.into_iter().collect(),
            },
            Ok(_) | Err(_) => {
                tracing::warn!("⚠️ Request body is not a JSON object, scoring an empty model");
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// 送往補全服務的評分請求(系統提示 + 使用者輸入)
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringRequest {
    pub system: String,
    pub user: String,
}

/// 正規化後的診斷結果
///
/// The shape is guaranteed no matter how malformed the model reply was:
/// exactly five axis scores in [0,100], a total in [0,100], an advice
/// string and an object for details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub axes: [u8; AXIS_COUNT],
    pub total: u8,
    pub advice: String,
    pub details: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_weights_sum_to_one() {
        let sum: f64 = AXES.iter().map(|axis| axis.weight).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn lenient_parse_keeps_object_fields() {
        let model = BusinessModel::from_json_lenient(r#"{"why":"健康習慣の定着","who":"多忙な会社員"}"#);
        assert_eq!(model.fields.len(), 2);
        assert_eq!(model.fields["why"], "健康習慣の定着");
    }

    #[test]
    fn lenient_parse_absorbs_garbage() {
        assert!(BusinessModel::from_json_lenient("not json at all").is_empty());
        assert!(BusinessModel::from_json_lenient("[1,2,3]").is_empty());
        assert!(BusinessModel::from_json_lenient("").is_empty());
    }

    #[test]
    fn diagnosis_serializes_with_fixed_shape() {
        let diagnosis = Diagnosis {
            axes: [72, 65, 58, 61, 70],
            total: 66,
            advice: "収益の学習サイクルを明確に".to_string(),
            details: serde_json::Map::new(),
        };

        let value = serde_json::to_value(&diagnosis).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert_eq!(value["axes"].as_array().unwrap().len(), 5);
        assert_eq!(value["total"], 66);
        assert_eq!(value["details"], serde_json::json!({}));
    }
}
