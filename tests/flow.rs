//! Tests for loading, editing and storing whole flow documents.
mod common;
use callflow::flow::FlowHeader;
use callflow::prelude::*;
use common::*;
use serde_json::json;

fn sample_flow() -> FlowDocument {
    FlowDocument::hydrate(&sample_flow_json(), &registry()).expect("sample flow should load")
}

#[test]
fn test_hydrate_loads_nodes_and_steps() {
    let flow = sample_flow();

    assert_eq!(flow.header.start_node_name.as_deref(), Some("start"));
    assert_eq!(flow.nodes().len(), 2);
    assert_eq!(flow.nodes()[0].steps.len(), 2);
    assert_eq!(flow.identifiers().current(), 4);

    let names: Vec<&str> = flow.steps().map(Step::name).collect();
    assert_eq!(names, vec!["step1", "step2", "step4", "step3"]);
    assert_eq!(flow.step("step4").map(Step::kind), Some(StepKind::Say));
    assert!(flow.step("step9").is_none());
}

#[test]
fn test_hydrate_rejects_duplicate_step_names() {
    let mut raw = sample_flow_json();
    raw["nodes"][1]["steps"][0]["name"] = json!("step1");

    let result = FlowDocument::hydrate(&raw, &registry());

    assert_eq!(result, Err(FlowError::DuplicateStepName("step1".to_string())));
}

#[test]
fn test_hydrate_rejects_nested_duplicate_step_names() {
    let mut raw = sample_flow_json();
    raw["nodes"][0]["steps"][1]["steps"][0]["name"] = json!("step3");

    let result = FlowDocument::hydrate(&raw, &registry());

    assert_eq!(result, Err(FlowError::DuplicateStepName("step3".to_string())));
}

#[test]
fn test_hydrate_surfaces_step_errors() {
    let mut raw = sample_flow_json();
    raw["nodes"][1]["steps"][0]["kind"] = json!("voicemail");

    let result = FlowDocument::hydrate(&raw, &registry());

    assert_eq!(
        result,
        Err(FlowError::Step(StepError::UnrecognizedKind("voicemail".to_string())))
    );
}

#[test]
fn test_from_json_reports_invalid_json() {
    let result = FlowDocument::from_json("[1, 2", &registry());
    assert!(matches!(result, Err(FlowError::Json(_))));
}

#[test]
fn test_add_step_continues_after_last_step_id() {
    let mut flow = sample_flow();

    let step = flow.add_step("sales", "say", &registry()).unwrap();
    assert_eq!(step.name(), "step5");
    assert_eq!(step.kind(), StepKind::Say);

    assert_eq!(flow.nodes()[1].steps.len(), 2);
    assert_eq!(flow.identifiers().current(), 5);
}

#[test]
fn test_add_step_skips_names_already_taken() {
    let mut raw = sample_flow_json();
    raw["lastStepId"] = json!(2);
    let mut flow = FlowDocument::hydrate(&raw, &registry()).unwrap();

    let step = flow.add_step("start", "pause", &registry()).unwrap();

    assert_eq!(step.name(), "step5");
}

#[test]
fn test_add_step_fails_for_unknown_node_or_kind() {
    let mut flow = sample_flow();

    assert_eq!(
        flow.add_step("billing", "say", &registry()).map(|step| step.name().to_string()),
        Err(FlowError::UnknownNode("billing".to_string()))
    );
    assert_eq!(
        flow.add_step("start", "sms", &registry()).map(|step| step.name().to_string()),
        Err(FlowError::Step(StepError::UnrecognizedKind("sms".to_string())))
    );
    assert_eq!(flow.identifiers().current(), 4);
}

#[test]
fn test_step_mut_edits_in_place() {
    let mut flow = sample_flow();

    if let Some(Step::Say(say)) = flow.step_mut("step1") {
        say.phrase = "Welcome back".to_string();
    }

    match flow.step("step1") {
        Some(Step::Say(say)) => assert_eq!(say.phrase, "Welcome back"),
        other => panic!("Expected say step, got {:?}", other),
    }
}

#[test]
fn test_remove_step() {
    let mut flow = sample_flow();

    let removed = flow.remove_step("step3").expect("step3 exists");
    assert_eq!(removed.kind(), StepKind::HangUp);
    assert!(flow.nodes()[1].steps.is_empty());
    assert!(flow.remove_step("step3").is_none());
}

#[test]
fn test_canonical_form_round_trips() {
    let mut flow = sample_flow();
    flow.add_step("sales", "reject", &registry()).unwrap();

    let canonical = flow.to_canonical().unwrap();
    assert_eq!(canonical["lastStepId"], json!(5));
    assert_eq!(canonical["nodes"][0]["steps"][1]["kind"], json!("gather"));
    assert_eq!(canonical["nodes"][0]["steps"][1]["menu"]["mappings"][0]["digits"], json!("1"));
    assert!(canonical["nodes"][0]["steps"][1].get("collectDigits").is_none());
    assert_eq!(canonical["nodes"][1]["steps"][1]["name"], json!("step5"));

    let reloaded = FlowDocument::hydrate(&canonical, &registry()).unwrap();
    assert_eq!(reloaded, flow);
}

#[test]
fn test_new_document_builds_from_scratch() {
    let mut flow = FlowDocument::new(FlowHeader {
        start_node_name: Some("start".to_string()),
        ..FlowHeader::default()
    });
    flow.add_node(FlowNode::new("start", "Welcome"));
    flow.add_step("start", "say", &registry()).unwrap();

    let json = flow.to_json_pretty().unwrap();
    let reloaded = FlowDocument::from_json(&json, &registry()).unwrap();

    assert_eq!(reloaded.header.project_kind, "voice");
    assert_eq!(reloaded.step("step1").map(Step::kind), Some(StepKind::Say));
    assert_eq!(reloaded.identifiers().current(), 1);
}

#[test]
fn test_add_step_fails_when_step_names_run_out() {
    let mut raw = sample_flow_json();
    raw["lastStepId"] = json!(u64::MAX);
    let mut flow = FlowDocument::hydrate(&raw, &registry()).unwrap();

    let result = flow
        .add_step("start", "say", &registry())
        .map(|step| step.name().to_string());

    assert_eq!(
        result,
        Err(FlowError::Step(StepError::IdentifiersExhausted(u64::MAX)))
    );
    assert_eq!(flow.nodes()[0].steps.len(), 2);
}
