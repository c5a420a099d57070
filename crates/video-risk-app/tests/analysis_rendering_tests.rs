//! Integration tests for rendering successful analyses.

mod common;

use video_risk_app::SubmitOutcome;
use video_risk_contract::RiskLevel;
use video_risk_ui::{
    DisplayContent, LABEL_DETAILS, LABEL_MESSAGE, LABEL_POTENTIAL_RISK, LABEL_STATUS, Tone,
};

use common::ScriptedTransport;

#[tokio::test]
async fn analysis_rendering_tests_shows_all_four_fields_verbatim() {
    let transport = ScriptedTransport::responding(
        200,
        r#"{"status":"success","message":"analyzed 12 frames","potential_risk":"high","details":"Fall or collapse detected."}"#,
    );
    let harness = common::harness(common::clip(), transport.clone());

    let outcome = harness.controller.submit().await;

    let result = match outcome {
        SubmitOutcome::Analyzed(result) => result,
        other => panic!("expected analyzed outcome, got {other:?}"),
    };
    assert_eq!(result.risk_level(), RiskLevel::High);
    assert_eq!(transport.calls(), 1);
    assert_eq!(transport.last_file_name().as_deref(), Some("clip.mp4"));

    let rendered = harness.display.last().expect("result should render");
    assert_eq!(rendered.tone(), Tone::Normal);
    assert_eq!(rendered.field(LABEL_STATUS), Some("success"));
    assert_eq!(rendered.field(LABEL_MESSAGE), Some("analyzed 12 frames"));
    assert_eq!(rendered.field(LABEL_POTENTIAL_RISK), Some("high"));
    assert_eq!(rendered.field(LABEL_DETAILS), Some("Fall or collapse detected."));
}

#[tokio::test]
async fn analysis_rendering_tests_missing_field_renders_empty() {
    let transport = ScriptedTransport::responding(
        200,
        r#"{"status":"success","message":"done","potential_risk":"low"}"#,
    );
    let harness = common::harness(common::clip(), transport);

    let outcome = harness.controller.submit().await;

    assert!(outcome.is_analyzed());
    let rendered = harness.display.last().expect("result should render");
    assert_eq!(rendered.field(LABEL_DETAILS), Some(""));
    assert!(rendered.to_string().ends_with("Details: "));
}

#[tokio::test]
async fn analysis_rendering_tests_progress_precedes_result_and_trigger_toggles() {
    let transport = ScriptedTransport::responding(200, r#"{"status":"ok"}"#);
    let harness = common::harness(common::clip(), transport);

    harness.controller.submit().await;

    let renders = harness.display.renders();
    assert_eq!(renders.len(), 2);
    assert_eq!(renders[0], DisplayContent::progress());
    assert!(matches!(renders[1], DisplayContent::Fields(_)));
    assert_eq!(harness.trigger.changes(), vec![false, true]);
}
