//! Visitors that record or misbehave, for exercising the engine in tests.

use std::sync::Arc;

use parking_lot::Mutex;
use sanitree_ast::{DomNode, SafeNode};

use crate::Cursor;
use crate::visitor::{HasChildren, NodeVisitor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Enter,
    Leave,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Enter => "enter",
            Phase::Leave => "leave",
        }
    }
}

/// One hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitEvent {
    pub visitor: String,
    pub phase: Phase,
    pub node: String,
}

/// Shared, thread-safe log of hook invocations.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<VisitEvent>>>,
}

impl EventLog {
    pub fn record(&self, visitor: &str, phase: Phase, node: &DomNode<'_>) {
        self.events.lock().push(VisitEvent {
            visitor: visitor.to_string(),
            phase,
            node: node.name.to_string(),
        });
    }

    pub fn events(&self) -> Vec<VisitEvent> {
        self.events.lock().clone()
    }

    /// Events formatted as `phase:visitor`, e.g. `enter:v1`.
    pub fn labels(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .map(|event| format!("{}:{}", event.phase.as_str(), event.visitor))
            .collect()
    }
}

/// Supports every element and records each hook call.
///
/// A wrapping recorder additionally emits an element named after its label
/// and keeps the children inside it.
#[derive(Debug)]
pub struct RecordingVisitor {
    label: String,
    log: EventLog,
    wrap: Option<HasChildren>,
}

impl RecordingVisitor {
    pub fn new(label: &str, log: EventLog) -> Self {
        Self {
            label: label.to_string(),
            log,
            wrap: None,
        }
    }

    pub fn wrapping(label: &str, log: EventLog) -> Self {
        Self {
            wrap: Some(HasChildren::new(label)),
            ..Self::new(label, log)
        }
    }
}

impl NodeVisitor for RecordingVisitor {
    fn name(&self) -> &str {
        &self.label
    }

    fn supports(&self, node: &DomNode<'_>, _cursor: &Cursor) -> bool {
        node.is_element()
    }

    fn enter_node(&self, node: &DomNode<'_>, cursor: &mut Cursor) {
        self.log.record(&self.label, Phase::Enter, node);
        if let Some(wrap) = &self.wrap {
            wrap.enter(cursor);
        }
    }

    fn leave_node(&self, node: &DomNode<'_>, cursor: &mut Cursor) {
        self.log.record(&self.label, Phase::Leave, node);
        if let Some(wrap) = &self.wrap {
            wrap.leave(cursor);
        }
    }
}

/// Moves the cursor into a new element on enter and never moves it back.
#[derive(Debug)]
pub struct ForgetfulVisitor {
    tag: String,
}

impl ForgetfulVisitor {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
        }
    }
}

impl NodeVisitor for ForgetfulVisitor {
    fn name(&self) -> &str {
        &self.tag
    }

    fn supports(&self, node: &DomNode<'_>, _cursor: &Cursor) -> bool {
        node.is_element_named(&self.tag)
    }

    fn enter_node(&self, _node: &DomNode<'_>, cursor: &mut Cursor) {
        let id = cursor.append(SafeNode::element(self.tag.as_str()));
        cursor.enter(id);
    }

    fn leave_node(&self, _node: &DomNode<'_>, _cursor: &mut Cursor) {}
}
