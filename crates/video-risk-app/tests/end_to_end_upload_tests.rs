//! End-to-end test against a mock analysis server.

mod common;

use std::sync::Arc;

use video_risk_app::ClientConfig;
use video_risk_ui::{
    DisplayContent, LABEL_DETAILS, LABEL_MESSAGE, LABEL_POTENTIAL_RISK, LABEL_STATUS,
    PROGRESS_MESSAGE,
};
use video_risk_upload::ReqwestTransport;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn end_to_end_upload_tests_clip_analysis_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/analyze-video"))
        .and(body_string_contains(r#"name="video"; filename="clip.mp4""#))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"status":"ok","message":"done","potential_risk":"low","details":"none"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(&format!("{}/analyze-video", server.uri()))
        .expect("mock endpoint should validate");
    let transport = Arc::new(ReqwestTransport::new().expect("transport should build"));
    let harness = common::harness_with_config(&config, common::clip(), transport);

    let outcome = harness.controller.submit().await;
    assert!(outcome.is_analyzed());

    let renders = harness.display.renders();
    assert_eq!(renders.len(), 2);
    assert_eq!(renders[0].to_string(), PROGRESS_MESSAGE);

    let DisplayContent::Fields(_) = &renders[1] else {
        panic!("expected fields rendering, got {:?}", renders[1]);
    };
    assert_eq!(renders[1].field(LABEL_STATUS), Some("ok"));
    assert_eq!(renders[1].field(LABEL_MESSAGE), Some("done"));
    assert_eq!(renders[1].field(LABEL_POTENTIAL_RISK), Some("low"));
    assert_eq!(renders[1].field(LABEL_DETAILS), Some("none"));

    assert_eq!(harness.trigger.changes(), vec![false, true]);
}
