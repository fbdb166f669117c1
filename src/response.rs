//! Decoding and classification of XMLMC method responses.
//!
//! A method call ends in exactly one [`Classification`]. Transport failures
//! never reach the decoder; everything that does is decoded into a
//! [`RemoteResponse`] and then judged by status, then exception name.

use crate::xmlmc::XmlmcError;
use serde::Deserialize;

/// Status attribute value the server uses for a completed method.
pub const STATUS_OK: &str = "ok";

#[derive(Debug, Default, Deserialize)]
struct MethodCallResult {
    #[serde(rename = "@status", default)]
    status: Option<String>,
    #[serde(default)]
    state: Option<State>,
    #[serde(default)]
    params: Option<Params>,
}

#[derive(Debug, Default, Deserialize)]
struct State {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Params {
    #[serde(default)]
    bpm_process_id: Option<String>,
    #[serde(default)]
    exception_name: Option<String>,
    #[serde(default)]
    exception_description: Option<String>,
    #[serde(default)]
    primary_entity_data: Option<PrimaryEntityData>,
}

#[derive(Debug, Default, Deserialize)]
struct PrimaryEntityData {
    #[serde(default)]
    record: Option<CatalogRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogRecord {
    #[serde(default)]
    h_bpm: Option<String>,
}

/// Flattened view of a decoded method response. Absent fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteResponse {
    pub result_status: String,
    pub state_code: String,
    pub state_error: String,
    pub workflow_id: String,
    pub exception_name: String,
    pub exception_description: String,
    pub catalog_workflow_id: String,
}

impl From<MethodCallResult> for RemoteResponse {
    fn from(raw: MethodCallResult) -> Self {
        let state = raw.state.unwrap_or_default();
        let params = raw.params.unwrap_or_default();
        let record = params
            .primary_entity_data
            .and_then(|data| data.record)
            .unwrap_or_default();
        Self {
            result_status: text(raw.status),
            state_code: text(state.code),
            state_error: text(state.error),
            workflow_id: text(params.bpm_process_id),
            exception_name: text(params.exception_name),
            exception_description: text(params.exception_description),
            catalog_workflow_id: text(record.h_bpm),
        }
    }
}

fn text(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Outcome of one remote method call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Success(RemoteResponse),
    /// The server answered with a non-ok status.
    ProtocolError { code: String, message: String },
    /// The method ran but raised a domain exception.
    ApplicationException { name: String, description: String },
    /// The call could not be completed.
    TransportError { cause: String },
    /// The body was not a well-formed method response.
    DecodeError { cause: String },
}

impl Classification {
    /// Short label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::ProtocolError { .. } => "protocol_error",
            Self::ApplicationException { .. } => "application_exception",
            Self::TransportError { .. } => "transport_error",
            Self::DecodeError { .. } => "decode_error",
        }
    }
}

/// Decode a raw response body without judging it.
pub fn decode(raw: &str) -> Result<RemoteResponse, quick_xml::de::DeError> {
    let parsed: MethodCallResult = quick_xml::de::from_str(raw)?;
    Ok(parsed.into())
}

/// Classify a raw response body.
pub fn classify(raw: &str) -> Classification {
    let response = match decode(raw) {
        Ok(response) => response,
        Err(err) => {
            return Classification::DecodeError {
                cause: err.to_string(),
            }
        }
    };
    if response.result_status != STATUS_OK {
        return Classification::ProtocolError {
            code: response.state_code,
            message: response.state_error,
        };
    }
    if !response.exception_name.is_empty() {
        return Classification::ApplicationException {
            name: response.exception_name,
            description: response.exception_description,
        };
    }
    Classification::Success(response)
}

/// Classify the result of an invoke, transport failure included.
pub fn classify_call(result: Result<String, XmlmcError>) -> Classification {
    match result {
        Ok(raw) => classify(&raw),
        Err(err) => Classification::TransportError {
            cause: err.to_string(),
        },
    }
}
