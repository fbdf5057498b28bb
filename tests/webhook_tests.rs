//! Integration tests for webhook verification and dispatch.
//!
//! These tests feed signed and tampered deliveries through the
//! `WebhookProcessor` and check the reply status and which events reach
//! the handler.

use std::sync::Mutex;

use async_trait::async_trait;
use gocardless_api::clients::RequestContext;
use gocardless_api::webhooks::{
    compute_signature, decode_events, dispatch, verify_reader, verify_signature, Event,
    EventHandler, HandlerError, ResourceType, WebhookError, WebhookProcessor,
    STATUS_INVALID_SIGNATURE,
};
use gocardless_api::WebhookSecret;

const SECRET: &str = "testing";

const BODY: &str = r#"{"events":[{"id":"E1","created_at":"2026-10-19T09:00:00.000Z","resource_type":"mandates","action":"active","links":{"mandate":"MD1"},"details":{"origin":"gocardless","cause":"mandate_activated"}},{"id":"E2","created_at":"2026-10-19T09:00:01.000Z","resource_type":"payments","action":"confirmed","links":{"payment":"PM1"}},{"id":"E3","created_at":"2026-10-19T09:00:02.000Z","resource_type":"payouts","action":"paid","links":{"payout":"PO1"}}],"meta":{"webhook_id":"WB1"}}"#;

/// Records every event it sees and optionally fails on one.
#[derive(Default)]
struct RecordingHandler {
    seen: Mutex<Vec<(String, ResourceType)>>,
    fail_on: Option<&'static str>,
}

impl RecordingHandler {
    fn failing_on(id: &'static str) -> Self {
        Self {
            fail_on: Some(id),
            ..Default::default()
        }
    }

    fn seen_ids(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }
}

#[async_trait]
impl EventHandler for RecordingHandler {
    async fn handle(&self, _ctx: &RequestContext, event: &Event) -> Result<(), HandlerError> {
        self.seen
            .lock()
            .unwrap()
            .push((event.id.clone(), event.resource_type));
        if self.fail_on == Some(event.id.as_str()) {
            return Err("downstream unavailable".into());
        }
        Ok(())
    }
}

fn processor() -> WebhookProcessor {
    WebhookProcessor::new(WebhookSecret::new(SECRET).unwrap())
}

// ============================================================================
// Signature Verification
// ============================================================================

#[tokio::test]
async fn test_valid_delivery_dispatches_all_events_and_replies_204() {
    let signature = compute_signature(BODY.as_bytes(), SECRET);
    let handler = RecordingHandler::default();

    let outcome = processor()
        .process(
            &RequestContext::background(),
            BODY.as_bytes(),
            Some(&signature),
            &handler,
        )
        .await;

    assert_eq!(outcome.status(), 204);
    assert_eq!(outcome.event_count(), 3);
    assert_eq!(handler.seen_ids(), vec!["E1", "E2", "E3"]);
}

#[tokio::test]
async fn test_any_flipped_byte_replies_498_with_no_handler_calls() {
    let signature = compute_signature(BODY.as_bytes(), SECRET);
    let processor = processor();

    for i in (0..BODY.len()).step_by(7) {
        let mut tampered = BODY.as_bytes().to_vec();
        tampered[i] ^= 0x04;
        let handler = RecordingHandler::default();

        let outcome = processor
            .process(
                &RequestContext::background(),
                &tampered,
                Some(&signature),
                &handler,
            )
            .await;

        assert_eq!(outcome.status(), STATUS_INVALID_SIGNATURE, "byte {i}");
        assert!(handler.seen_ids().is_empty(), "byte {i}");
    }
}

#[tokio::test]
async fn test_flipped_signature_byte_replies_498() {
    let mut signature = compute_signature(BODY.as_bytes(), SECRET).into_bytes();
    signature[0] = if signature[0] == b'0' { b'1' } else { b'0' };
    let signature = String::from_utf8(signature).unwrap();
    let handler = RecordingHandler::default();

    let outcome = processor()
        .process(
            &RequestContext::background(),
            BODY.as_bytes(),
            Some(&signature),
            &handler,
        )
        .await;

    assert_eq!(outcome.status(), 498);
    assert!(matches!(outcome.error(), Some(WebhookError::InvalidSignature)));
    assert!(handler.seen_ids().is_empty());
}

#[tokio::test]
async fn test_wrong_secret_and_garbage_signatures_reply_498() {
    let handler = RecordingHandler::default();
    let wrong = compute_signature(BODY.as_bytes(), "not-the-secret");

    for signature in [wrong.as_str(), "", "xyz", "deadbeef"] {
        let outcome = processor()
            .process(
                &RequestContext::background(),
                BODY.as_bytes(),
                Some(signature),
                &handler,
            )
            .await;
        assert_eq!(outcome.status(), 498, "signature {signature:?}");
    }

    assert!(handler.seen_ids().is_empty());
}

#[test]
fn test_verify_signature_matches_verify_reader() {
    let signature = compute_signature(BODY.as_bytes(), SECRET);

    assert!(verify_signature(BODY.as_bytes(), &signature, SECRET));
    let verified = verify_reader(BODY.as_bytes(), &signature, SECRET).unwrap();
    assert_eq!(verified.as_bytes(), BODY.as_bytes());

    let events = decode_events(&verified).unwrap();
    assert_eq!(events[0].resource_id(), Some("MD1"));
    assert_eq!(events[2].resource_type, ResourceType::Payouts);
}

// ============================================================================
// Dispatch
// ============================================================================

#[tokio::test]
async fn test_handler_failure_stops_batch_and_replies_500() {
    let signature = compute_signature(BODY.as_bytes(), SECRET);
    let handler = RecordingHandler::failing_on("E2");

    let outcome = processor()
        .process(
            &RequestContext::background(),
            BODY.as_bytes(),
            Some(&signature),
            &handler,
        )
        .await;

    assert_eq!(outcome.status(), 500);
    assert_eq!(handler.seen_ids(), vec!["E1", "E2"]);

    let error = outcome.into_result().unwrap_err();
    assert_eq!(error.event_id(), Some("E2"));
    assert!(error.to_string().contains("downstream unavailable"));
}

#[tokio::test]
async fn test_signed_but_malformed_body_replies_400() {
    let body = br#"{"not_events": true}"#;
    let signature = compute_signature(body, SECRET);
    let handler = RecordingHandler::default();

    let outcome = processor()
        .process(&RequestContext::background(), body, Some(&signature), &handler)
        .await;

    assert_eq!(outcome.status(), 400);
    assert!(matches!(outcome.error(), Some(WebhookError::Decode(_))));
    assert!(handler.seen_ids().is_empty());
}

#[tokio::test]
async fn test_dispatch_can_be_used_directly() {
    let signature = compute_signature(BODY.as_bytes(), SECRET);
    let verified = verify_reader(BODY.as_bytes(), &signature, SECRET).unwrap();
    let events = decode_events(&verified).unwrap();
    let handler = RecordingHandler::failing_on("E3");

    let result = dispatch(&RequestContext::background(), &events, &handler).await;

    assert!(matches!(result, Err(WebhookError::Handler { ref event_id, .. }) if event_id == "E3"));
    assert_eq!(handler.seen_ids(), vec!["E1", "E2", "E3"]);
}
