use crate::error::FlowError;
use crate::registry::{IdentifierGenerator, StepRegistry};
use crate::step::{Step, serde_ext};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Project-level metadata stored with a flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlowHeader {
    pub project_kind: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_node_name: Option<String>,
}

impl Default for FlowHeader {
    fn default() -> Self {
        Self {
            project_kind: "voice".to_string(),
            version: "1.0".to_string(),
            start_node_name: None,
        }
    }
}

/// A module of the flow: a named, ordered list of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowNode {
    pub name: String,
    pub label: String,
    pub kind: String,
    #[serde(default = "serde_ext::empty_object")]
    pub iface: Value,
    #[serde(skip_deserializing)]
    pub steps: Vec<Step>,
}

impl Default for FlowNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            label: String::new(),
            kind: "voice".to_string(),
            iface: serde_ext::empty_object(),
            steps: Vec::new(),
        }
    }
}

impl FlowNode {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredFlow {
    #[serde(default)]
    header: FlowHeader,
    #[serde(default)]
    last_step_id: u64,
    #[serde(default)]
    nodes: Vec<Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CanonicalFlow<'a> {
    header: &'a FlowHeader,
    last_step_id: u64,
    nodes: &'a [FlowNode],
}

/// A whole call flow as the designer stores it.
///
/// The document owns its steps, so it is the one that keeps step names unique and that
/// names new steps from its own [`IdentifierGenerator`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlowDocument {
    pub header: FlowHeader,
    nodes: Vec<FlowNode>,
    ids: IdentifierGenerator,
}

impl FlowDocument {
    pub fn new(header: FlowHeader) -> Self {
        Self {
            header,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str, registry: &StepRegistry) -> Result<Self, FlowError> {
        let raw: Value = serde_json::from_str(json).map_err(|e| FlowError::Json(e.to_string()))?;
        Self::hydrate(&raw, registry)
    }

    /// Rebuilds a document from its stored form, hydrating every step through `registry`.
    pub fn hydrate(raw: &Value, registry: &StepRegistry) -> Result<Self, FlowError> {
        let stored: StoredFlow =
            serde_json::from_value(raw.clone()).map_err(|e| FlowError::Json(e.to_string()))?;

        let mut nodes = Vec::with_capacity(stored.nodes.len());
        for raw_node in &stored.nodes {
            let mut node: FlowNode = serde_json::from_value(raw_node.clone())
                .map_err(|e| FlowError::Json(e.to_string()))?;
            if let Some(steps) = raw_node.get("steps").and_then(Value::as_array) {
                node.steps = steps
                    .iter()
                    .map(|step| registry.hydrate(step))
                    .collect::<Result<_, _>>()?;
            }
            nodes.push(node);
        }

        let document = Self {
            header: stored.header,
            nodes,
            ids: IdentifierGenerator::starting_after(stored.last_step_id),
        };
        document.check_unique_names()?;
        debug!(
            nodes = document.nodes.len(),
            last_step_id = stored.last_step_id,
            "hydrated flow document"
        );
        Ok(document)
    }

    fn check_unique_names(&self) -> Result<(), FlowError> {
        match self
            .steps()
            .map(Step::name)
            .filter(|name| !name.is_empty())
            .duplicates()
            .next()
        {
            Some(name) => Err(FlowError::DuplicateStepName(name.to_string())),
            None => Ok(()),
        }
    }

    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    pub fn add_node(&mut self, node: FlowNode) {
        self.nodes.push(node);
    }

    pub fn identifiers(&self) -> &IdentifierGenerator {
        &self.ids
    }

    /// Every step in the flow, including the prompt steps nested inside gathers.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.nodes
            .iter()
            .flat_map(|node| node.steps.iter())
            .flat_map(|step| std::iter::once(step).chain(step.nested_steps()))
    }

    pub fn step(&self, name: &str) -> Option<&Step> {
        self.steps().find(|step| step.name() == name)
    }

    /// Top-level step lookup for editing.
    pub fn step_mut(&mut self, name: &str) -> Option<&mut Step> {
        self.nodes
            .iter_mut()
            .flat_map(|node| node.steps.iter_mut())
            .find(|step| step.name() == name)
    }

    /// Appends a fresh step of `kind` to the node called `node`.
    ///
    /// Names already taken in the flow are skipped, so a stale `lastStepId` cannot produce
    /// a duplicate.
    pub fn add_step(
        &mut self,
        node: &str,
        kind: &str,
        registry: &StepRegistry,
    ) -> Result<&mut Step, FlowError> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.name == node)
            .ok_or_else(|| FlowError::UnknownNode(node.to_string()))?;

        let mut step = registry.create(kind, &mut self.ids)?;
        while self.step(step.name()).is_some() {
            step = registry.create(kind, &mut self.ids)?;
        }

        let steps = &mut self.nodes[index].steps;
        steps.push(step);
        let last = steps.len() - 1;
        Ok(&mut steps[last])
    }

    /// Removes a top-level step. References to it from other steps are left as they are.
    pub fn remove_step(&mut self, name: &str) -> Option<Step> {
        self.nodes.iter_mut().find_map(|node| {
            let position = node.steps.iter().position(|step| step.name() == name)?;
            Some(node.steps.remove(position))
        })
    }

    /// The canonical stored form of the whole flow.
    pub fn to_canonical(&self) -> Result<Value, FlowError> {
        let canonical = CanonicalFlow {
            header: &self.header,
            last_step_id: self.ids.current(),
            nodes: &self.nodes,
        };
        serde_json::to_value(&canonical).map_err(|e| FlowError::Json(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, FlowError> {
        let canonical = self.to_canonical()?;
        serde_json::to_string_pretty(&canonical).map_err(|e| FlowError::Json(e.to_string()))
    }
}
