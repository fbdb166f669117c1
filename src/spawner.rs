use crate::logging::ROW_TARGET;
use crate::response::{classify_call, Classification};
use crate::xmlmc::Xmlmc;

pub const SPAWN_SERVICE: &str = "apps/com.hornbill.servicemanager/Requests";
pub const SPAWN_METHOD: &str = "logRequestBPM";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// The server assigned this workflow process id.
    Spawned { process_id: String },
    Failed,
}

/// Attach a BPM workflow to a request.
///
/// With no `workflow_id` the server picks the request's own default.
pub fn spawn_bpm(
    client: &mut impl Xmlmc,
    request_ref: &str,
    workflow_id: Option<&str>,
) -> SpawnOutcome {
    client.set_param("requestId", request_ref);
    if let Some(workflow_id) = workflow_id.filter(|id| !id.is_empty()) {
        client.set_param("defaultBpm", workflow_id);
    }
    let outcome = classify_call(client.invoke(SPAWN_SERVICE, SPAWN_METHOD));
    let kind = outcome.kind();
    match outcome {
        Classification::Success(response) => {
            tracing::info!(
                target: ROW_TARGET,
                request_ref,
                process_id = %response.workflow_id,
                "[SUCCESS] BPM spawned"
            );
            SpawnOutcome::Spawned {
                process_id: response.workflow_id,
            }
        }
        Classification::TransportError { cause } => {
            tracing::error!(
                target: ROW_TARGET,
                request_ref,
                method = SPAWN_METHOD,
                kind,
                "API call failed: {cause}"
            );
            SpawnOutcome::Failed
        }
        Classification::DecodeError { cause } => {
            tracing::error!(
                target: ROW_TARGET,
                request_ref,
                method = SPAWN_METHOD,
                kind,
                "response could not be decoded: {cause}"
            );
            SpawnOutcome::Failed
        }
        Classification::ProtocolError { code, message } => {
            tracing::error!(
                target: ROW_TARGET,
                request_ref,
                method = SPAWN_METHOD,
                kind,
                code = %code,
                "method result not ok: {message}"
            );
            SpawnOutcome::Failed
        }
        Classification::ApplicationException { name, description } => {
            tracing::error!(
                target: ROW_TARGET,
                request_ref,
                method = SPAWN_METHOD,
                kind,
                "exception returned: [{name}] {description}"
            );
            SpawnOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xmlmc::testing::{exception, failed, ok_spawn, Reply, ScriptedXmlmc};

    #[test]
    fn default_bpm_is_only_staged_when_a_workflow_is_given() {
        let mut client = ScriptedXmlmc::new()
            .reply(SPAWN_METHOD, ok_spawn("bpm-1"))
            .reply(SPAWN_METHOD, ok_spawn("bpm-2"))
            .reply(SPAWN_METHOD, ok_spawn("bpm-3"));

        spawn_bpm(&mut client, "IN00001", Some("wf-incident"));
        spawn_bpm(&mut client, "IN00002", None);
        spawn_bpm(&mut client, "IN00003", Some(""));

        let calls = client.calls_to(SPAWN_METHOD);
        assert_eq!(calls[0].service, SPAWN_SERVICE);
        assert_eq!(calls[0].param("requestId"), Some("IN00001"));
        assert_eq!(calls[0].param("defaultBpm"), Some("wf-incident"));
        assert_eq!(calls[1].params.len(), 1);
        assert_eq!(calls[1].param("defaultBpm"), None);
        assert_eq!(calls[2].param("defaultBpm"), None);
    }

    #[test]
    fn success_carries_assigned_process_id() {
        let mut client = ScriptedXmlmc::new().reply(SPAWN_METHOD, ok_spawn("IN00001-bpm"));
        assert_eq!(
            spawn_bpm(&mut client, "IN00001", None),
            SpawnOutcome::Spawned {
                process_id: "IN00001-bpm".to_string()
            }
        );
    }

    #[test]
    fn all_failure_classes_collapse_to_failed() {
        let replies = [
            Reply::Status(503),
            Reply::Body(String::new()),
            failed("0201", "access denied"),
            exception("RequestClosed", "request is already resolved"),
        ];
        for reply in replies {
            let mut client = ScriptedXmlmc::new().reply(SPAWN_METHOD, reply);
            let outcome = spawn_bpm(&mut client, "IN00001", Some("wf"));
            assert_eq!(outcome, SpawnOutcome::Failed);
        }
    }
}
