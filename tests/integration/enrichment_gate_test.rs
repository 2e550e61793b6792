//! Integration tests for the one-in-flight enrichment gate.

use std::sync::Arc;

use athletehub::athletes::AthleteRecord;
use athletehub::enrichment::{
    EnrichmentError, EnrichmentGate, EnrichmentResult, GateStatus, TriggerOutcome,
};

use crate::mocks::MockGenerator;

fn athlete(id: &str) -> AthleteRecord {
    AthleteRecord {
        id: id.to_string(),
        name: format!("Athlete {}", id),
        sport: "Football".to_string(),
        ..AthleteRecord::default()
    }
}

#[tokio::test]
async fn test_trigger_while_loading_is_dropped() {
    let generator = Arc::new(MockGenerator::replying("Solid season."));
    let gate = EnrichmentGate::new(Arc::clone(&generator));
    assert_eq!(gate.status(), GateStatus::Idle);

    let TriggerOutcome::Started(handle) = gate.trigger(&athlete("a")) else {
        panic!("first trigger should start");
    };
    assert_eq!(gate.status(), GateStatus::Loading);
    assert!(gate.is_busy());

    let second = gate.trigger(&athlete("b"));
    assert!(!second.is_started());

    generator.release();
    handle.await.unwrap();

    assert_eq!(generator.calls(), 1);
    assert_eq!(gate.status(), GateStatus::Success);
    assert!(!gate.is_busy());
    assert!(matches!(
        gate.result("a"),
        Some(EnrichmentResult::Report { ref text, .. }) if text == "Solid season."
    ));
    assert!(gate.result("b").is_none());
}

#[tokio::test]
async fn test_failure_is_recorded_and_gate_reopens() {
    let generator = Arc::new(MockGenerator::failing(EnrichmentError::RateLimited));
    let gate = EnrichmentGate::new(Arc::clone(&generator));

    let TriggerOutcome::Started(handle) = gate.trigger(&athlete("a")) else {
        panic!("trigger should start");
    };
    generator.release();
    handle.await.unwrap();

    assert_eq!(gate.status(), GateStatus::Error);
    let result = gate.result("a").unwrap();
    assert!(result.is_error());
    assert!(result.display_text().contains("Rate limited"));

    // The next trigger goes through and moves back to Loading
    let TriggerOutcome::Started(handle) = gate.trigger(&athlete("b")) else {
        panic!("gate should accept a new trigger after an error");
    };
    assert_eq!(gate.status(), GateStatus::Loading);
    generator.release();
    handle.await.unwrap();
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn test_dismiss_leaves_status() {
    let generator = Arc::new(MockGenerator::replying("ok"));
    let gate = EnrichmentGate::new(Arc::clone(&generator));

    let TriggerOutcome::Started(handle) = gate.trigger(&athlete("a")) else {
        panic!("trigger should start");
    };
    generator.release();
    handle.await.unwrap();

    assert!(gate.dismiss("a").is_some());
    assert!(gate.results().is_empty());
    assert_eq!(gate.status(), GateStatus::Success);
}

#[tokio::test]
async fn test_result_after_teardown_is_discarded() {
    let generator = Arc::new(MockGenerator::replying("late"));
    let gate = EnrichmentGate::new(Arc::clone(&generator));

    let TriggerOutcome::Started(handle) = gate.trigger(&athlete("a")) else {
        panic!("trigger should start");
    };
    drop(gate);

    generator.release();
    handle.await.unwrap();

    assert_eq!(generator.calls(), 1);
    assert_eq!(Arc::strong_count(&generator), 1);
}

#[tokio::test]
async fn test_generator_panic_ends_in_error() {
    let generator = Arc::new(MockGenerator::panicking());
    let gate = EnrichmentGate::new(Arc::clone(&generator));

    let TriggerOutcome::Started(handle) = gate.trigger(&athlete("a")) else {
        panic!("trigger should start");
    };
    assert!(handle.await.unwrap_err().is_panic());

    assert_eq!(gate.status(), GateStatus::Error);
    assert!(!gate.is_busy());
    assert!(gate.result("a").is_some_and(|result| result.is_error()));
    assert!(gate.trigger(&athlete("b")).is_started());
}
