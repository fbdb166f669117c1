//! Scripted in-memory transport for unit tests.

use super::{Xmlmc, XmlmcError};
use std::collections::{BTreeMap, VecDeque};

/// One invoke as the transport saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedCall {
    pub(crate) service: String,
    pub(crate) method: String,
    pub(crate) params: Vec<(String, String)>,
}

impl RecordedCall {
    pub(crate) fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Scripted reply for one invoke.
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Body(String),
    /// Simulated HTTP failure with this status code.
    Status(u16),
}

/// Replays queued replies per method name and records every call.
#[derive(Debug, Default)]
pub(crate) struct ScriptedXmlmc {
    staged: Vec<(String, String)>,
    replies: BTreeMap<String, VecDeque<Reply>>,
    pub(crate) calls: Vec<RecordedCall>,
}

impl ScriptedXmlmc {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(mut self, method: &str, reply: Reply) -> Self {
        self.replies
            .entry(method.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub(crate) fn calls_to(&self, method: &str) -> Vec<&RecordedCall> {
        self.calls.iter().filter(|call| call.method == method).collect()
    }
}

impl Xmlmc for ScriptedXmlmc {
    fn set_param(&mut self, name: &str, value: &str) {
        self.staged.push((name.to_string(), value.to_string()));
    }

    fn invoke(&mut self, service: &str, method: &str) -> Result<String, XmlmcError> {
        self.calls.push(RecordedCall {
            service: service.to_string(),
            method: method.to_string(),
            params: std::mem::take(&mut self.staged),
        });
        let reply = self
            .replies
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| panic!("no scripted reply left for {method}"));
        match reply {
            Reply::Body(body) => Ok(body),
            Reply::Status(code) => Err(XmlmcError::Http {
                url: format!("https://xmlmc.test/{service}/?method={method}"),
                method: method.to_string(),
                source: ureq::Error::StatusCode(code),
            }),
        }
    }
}

pub(crate) fn ok_spawn(process_id: &str) -> Reply {
    Reply::Body(format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<methodCallResult status="ok">
    <params>
        <bpmProcessId>{process_id}</bpmProcessId>
    </params>
</methodCallResult>"#
    ))
}

pub(crate) fn ok_catalog(workflow_id: &str) -> Reply {
    Reply::Body(format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<methodCallResult status="ok">
    <params>
        <primaryEntityData>
            <record>
                <h_id>12</h_id>
                <h_bpm>{workflow_id}</h_bpm>
            </record>
        </primaryEntityData>
    </params>
</methodCallResult>"#
    ))
}

pub(crate) fn failed(code: &str, error: &str) -> Reply {
    Reply::Body(format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<methodCallResult status="fail">
    <state>
        <code>{code}</code>
        <error>{error}</error>
    </state>
</methodCallResult>"#
    ))
}

pub(crate) fn exception(name: &str, description: &str) -> Reply {
    Reply::Body(format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<methodCallResult status="ok">
    <params>
        <exceptionName>{name}</exceptionName>
        <exceptionDescription>{description}</exceptionDescription>
    </params>
</methodCallResult>"#
    ))
}
