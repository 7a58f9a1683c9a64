//! Common test utilities: stored step fixtures and path builders.
use callflow::prelude::*;
use serde_json::{Value, json};

/// A default registry, dropping unknown dial targets.
#[allow(dead_code)]
pub fn registry() -> StepRegistry {
    StepRegistry::new()
}

/// A registry that rejects dial targets with an unknown `dialType`.
#[allow(dead_code)]
pub fn strict_registry() -> StepRegistry {
    StepRegistry::builder()
        .with_unknown_target_policy(UnknownTargetPolicy::Fail)
        .build()
}

/// Builds a closed extraction path from the given hops followed by a terminal value.
#[allow(dead_code)]
pub fn closed_path(hops: Vec<AccessOperation>) -> ValueExtractor {
    let mut extractor = ValueExtractor::new();
    for hop in hops {
        set_pending(&mut extractor, hop);
        extractor.add_operation().expect("hop should commit");
    }
    set_pending(&mut extractor, AccessOperation::terminal());
    extractor.finish().expect("terminal should close the path");
    extractor
}

/// Replaces the pending operation of an open extractor.
#[allow(dead_code)]
pub fn set_pending(extractor: &mut ValueExtractor, operation: AccessOperation) {
    *extractor
        .pending_mut()
        .expect("extractor should be open for editing") = operation;
}

/// A dial step as an older editor stored it: legacy `dialNouns`, string timeout.
#[allow(dead_code)]
pub fn legacy_dial_json() -> Value {
    json!({
        "kind": "dial",
        "name": "step7",
        "label": "dial",
        "title": "dial",
        "timeout": "30",
        "record": true,
        "dialNouns": [
            { "dialType": "number", "destination": "+15550100", "sendDigits": "ww1234" },
            { "dialType": "client", "destination": "alice" },
            { "dialType": "conference", "destination": "room-9", "muted": true, "maxParticipants": 10 },
            { "dialType": "sipuri", "destination": "sip:bob@example.com" }
        ],
        "iface": { "collapsed": false }
    })
}

/// An external service step with two assignments and computed routing.
#[allow(dead_code)]
pub fn external_service_json() -> Value {
    json!({
        "kind": "externalService",
        "name": "step3",
        "url": "https://api.example.com/accounts",
        "urlParams": [ { "name": "id", "value": "$caller" } ],
        "assignments": [
            {
                "destVariable": "balance",
                "scope": "module",
                "valueExtractor": {
                    "accessOperations": [
                        { "kind": "object", "action": "propertyNamed", "property": "account" },
                        { "kind": "object", "action": "propertyNamed", "property": "balance" },
                        { "kind": "value" }
                    ]
                }
            },
            {
                "destinationVariable": "firstItem",
                "scope": "application",
                "valueExtractor": {
                    "operations": [
                        { "kind": "property", "property": "items" },
                        { "kind": "index", "position": 0 },
                        { "kind": "value" }
                    ]
                }
            }
        ],
        "doRouting": true,
        "nextType": "computed",
        "nextValueExtractor": {
            "operations": [
                { "kind": "property", "property": "route" },
                { "kind": "value" }
            ]
        }
    })
}

/// A two-node flow document.
#[allow(dead_code)]
pub fn sample_flow_json() -> Value {
    json!({
        "header": { "projectKind": "voice", "version": "1.0", "startNodeName": "start" },
        "lastStepId": 4,
        "nodes": [
            {
                "name": "start",
                "label": "Welcome",
                "kind": "voice",
                "iface": {},
                "steps": [
                    { "kind": "say", "name": "step1", "phrase": "Welcome" },
                    {
                        "kind": "gather",
                        "name": "step2",
                        "steps": [ { "kind": "say", "name": "step4", "phrase": "Press 1" } ],
                        "menu": { "mappings": [ { "digits": 1, "next": "sales" } ] }
                    }
                ]
            },
            {
                "name": "sales",
                "label": "Sales",
                "kind": "voice",
                "iface": {},
                "steps": [ { "kind": "hungup", "name": "step3" } ]
            }
        ]
    })
}
