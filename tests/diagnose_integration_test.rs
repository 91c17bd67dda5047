use httpmock::prelude::*;
use loop_diag::utils::error::DiagError;
use loop_diag::{BusinessModel, CliConfig, DiagnosisEngine, OpenAiProvider};

fn cli_config(server: &MockServer) -> CliConfig {
    CliConfig {
        input: None,
        base_url: server.url("/v1"),
        model: "gpt-4o".to_string(),
        temperature: 0.2,
        max_tokens: 2500,
        timeout_seconds: 5,
        api_key_env: "OPENAI_API_KEY".to_string(),
        profile: None,
        verbose: false,
        monitor: false,
        pretty: false,
    }
}

fn engine_for(server: &MockServer) -> DiagnosisEngine<OpenAiProvider<CliConfig>> {
    let provider = OpenAiProvider::new(cli_config(server), "test-key".to_string());
    DiagnosisEngine::new(provider)
}

fn sample_input() -> BusinessModel {
    BusinessModel::from_json_lenient(
        r#"{"why":"運動習慣の定着","who":"多忙な会社員","value":"5分で終わる宅トレ動画","money":"月額980円"}"#,
    )
}

#[tokio::test]
async fn test_end_to_end_diagnosis_with_fenced_reply() {
    let server = MockServer::start();

    let reply = serde_json::json!({
        "axes": [72, 65, 58, 61, 70],
        "total": 66,
        "advice": "収益を学習に回す導線を明確にしましょう",
        "details": {
            "axis_breakdown": [
                {
                    "name": "顧客↔価値",
                    "score": 72,
                    "strengths": ["課題が具体的"],
                    "improvements": ["検証データを集める"],
                    "examples": ["週次の利用手順"],
                    "to_reach_100": "有料利用者の定着率を示す"
                }
            ],
            "overall": {
                "top_strengths": ["顧客像が明確"],
                "top_issues": ["収益から改善への接続が弱い"],
                "top_risks": ["競合の価格攻勢"],
                "missing_info_questions": ["解約率は?"],
                "prioritized_actions": [
                    {
                        "action": "行動ログの計測を導入",
                        "impact": 5,
                        "effort": 2,
                        "confidence": 0.8,
                        "rationale": "学習ループの前提"
                    }
                ],
                "summary": "基礎は固いが改善ループの設計が不足"
            }
        }
    });

    // 模型把 JSON 包在 Markdown 圍欄裡回來
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer test-key")
            .json_body_partial(
                r#"{"model":"gpt-4o","response_format":{"type":"json_object"},"temperature":0.2,"max_tokens":2500}"#,
            );
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "choices": [{"message": {"content": format!("```json\n{}\n```", reply)}}]
            }));
    });

    let diagnosis = engine_for(&server).run(&sample_input()).await.unwrap();

    api_mock.assert();
    assert_eq!(diagnosis.axes, [72, 65, 58, 61, 70]);
    assert_eq!(diagnosis.total, 66);
    assert_eq!(diagnosis.advice, "収益を学習に回す導線を明確にしましょう");
    assert_eq!(
        diagnosis.details["overall"]["summary"],
        "基礎は固いが改善ループの設計が不足"
    );
}

#[tokio::test]
async fn test_prose_wrapped_reply_is_repaired_and_total_derived() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(serde_json::json!({
            "choices": [{"message": {"content":
                "診断します。{\"axes\":[40,45,30,35,50],\"advice\":\"顧客検証から始める\"} 以上です。"}}]
        }));
    });

    let diagnosis = engine_for(&server).run(&sample_input()).await.unwrap();

    api_mock.assert();
    assert_eq!(diagnosis.axes, [40, 45, 30, 35, 50]);
    // 40*0.25 + 45*0.25 + 30*0.20 + 35*0.15 + 50*0.15 = 40.0
    assert_eq!(diagnosis.total, 40);
    assert_eq!(diagnosis.advice, "顧客検証から始める");
}

#[tokio::test]
async fn test_smart_quoted_reply_is_repaired() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(serde_json::json!({
            "choices": [{"message": {"content": "{“axes”:[55,55,55,55,55],“total”:55}"}}]
        }));
    });

    let diagnosis = engine_for(&server).run(&sample_input()).await.unwrap();
    assert_eq!(diagnosis.total, 55);
}

#[tokio::test]
async fn test_preparsed_object_reply_is_used_directly() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(serde_json::json!({
            "choices": [{"message": {"content": {
                "axes": [80, 80, 80, 80, 80],
                "advice": "そのまま検証を続ける",
                "details": {}
            }}}]
        }));
    });

    let diagnosis = engine_for(&server).run(&sample_input()).await.unwrap();
    assert_eq!(diagnosis.axes, [80, 80, 80, 80, 80]);
    assert_eq!(diagnosis.total, 80);
}

#[tokio::test]
async fn test_provider_failure_is_classified() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(500).json_body(serde_json::json!({
            "error": {"message": "The server had an error processing your request"}
        }));
    });

    let err = engine_for(&server).run(&sample_input()).await.unwrap_err();

    api_mock.assert();
    assert_eq!(err.kind(), "PROVIDER_CALL_FAILED");
    match err {
        DiagError::ProviderStatus { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "The server had an error processing your request");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_contentless_envelope_is_not_json() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(serde_json::json!({
            "id": "chatcmpl-123",
            "usage": {"total_tokens": 12}
        }));
    });

    let err = engine_for(&server).run(&sample_input()).await.unwrap_err();
    assert!(matches!(err, DiagError::ModelOutputNotJson));
    assert_eq!(err.kind(), "MODEL_OUTPUT_NOT_JSON");
}

#[tokio::test]
async fn test_empty_input_is_still_scored() {
    let server = MockServer::start();

    // 空輸入照樣送出請求,由模型低分處理
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(serde_json::json!({
            "choices": [{"message": {"content": "{\"axes\":[5,0,0,0,10],\"advice\":\"まず入力を埋めてください\"}"}}]
        }));
    });

    let diagnosis = engine_for(&server)
        .run(&BusinessModel::default())
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(diagnosis.axes, [5, 0, 0, 0, 10]);
    // 5*0.25 + 10*0.15 = 2.75 → 3
    assert_eq!(diagnosis.total, 3);
}
