//! Catalog lookup: maps a catalog id to the workflow it is configured with.

use crate::logging::ROW_TARGET;
use crate::response::{classify_call, Classification};
use crate::xmlmc::Xmlmc;

pub const CATALOG_SERVICE: &str = "data";
pub const CATALOG_METHOD: &str = "entityGetRecord";
pub const CATALOG_APPLICATION: &str = "com.hornbill.servicemanager";
pub const CATALOG_ENTITY: &str = "Catalogs";

/// Fetch the catalog record and return its workflow id.
///
/// Any failed call, and a record without a workflow, yields `None`. The
/// reason is logged here; callers only see whether an id came back.
pub fn resolve_catalog_workflow(
    client: &mut impl Xmlmc,
    request_ref: &str,
    catalog_id: &str,
) -> Option<String> {
    client.set_param("application", CATALOG_APPLICATION);
    client.set_param("entity", CATALOG_ENTITY);
    client.set_param("keyValue", catalog_id);
    let outcome = classify_call(client.invoke(CATALOG_SERVICE, CATALOG_METHOD));
    let kind = outcome.kind();
    match outcome {
        Classification::Success(response) if !response.catalog_workflow_id.is_empty() => {
            tracing::info!(
                target: ROW_TARGET,
                request_ref,
                catalog_id,
                workflow_id = %response.catalog_workflow_id,
                "catalog workflow returned"
            );
            Some(response.catalog_workflow_id)
        }
        Classification::Success(_) => {
            tracing::warn!(
                target: ROW_TARGET,
                request_ref,
                catalog_id,
                "catalog record has no workflow"
            );
            None
        }
        Classification::TransportError { cause } => {
            tracing::error!(
                target: ROW_TARGET,
                request_ref,
                catalog_id,
                method = CATALOG_METHOD,
                kind,
                "API call failed: {cause}"
            );
            None
        }
        Classification::DecodeError { cause } => {
            tracing::error!(
                target: ROW_TARGET,
                request_ref,
                catalog_id,
                method = CATALOG_METHOD,
                kind,
                "response could not be decoded: {cause}"
            );
            None
        }
        Classification::ProtocolError { code, message } => {
            tracing::error!(
                target: ROW_TARGET,
                request_ref,
                catalog_id,
                method = CATALOG_METHOD,
                kind,
                code = %code,
                "method result not ok: {message}"
            );
            None
        }
        Classification::ApplicationException { name, description } => {
            tracing::error!(
                target: ROW_TARGET,
                request_ref,
                catalog_id,
                method = CATALOG_METHOD,
                kind,
                "exception returned: [{name}] {description}"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xmlmc::testing::{exception, failed, ok_catalog, Reply, ScriptedXmlmc};

    #[test]
    fn lookup_stages_application_entity_and_key() {
        let mut client = ScriptedXmlmc::new().reply(CATALOG_METHOD, ok_catalog("wf-laptop"));
        let resolved = resolve_catalog_workflow(&mut client, "IN00001", "42");
        assert_eq!(resolved.as_deref(), Some("wf-laptop"));

        let call = &client.calls[0];
        assert_eq!(call.service, "data");
        assert_eq!(call.method, "entityGetRecord");
        assert_eq!(
            call.params,
            vec![
                ("application".to_string(), "com.hornbill.servicemanager".to_string()),
                ("entity".to_string(), "Catalogs".to_string()),
                ("keyValue".to_string(), "42".to_string()),
            ]
        );
    }

    #[test]
    fn every_failure_class_resolves_to_none() {
        let replies = [
            Reply::Status(502),
            Reply::Body("<methodCallResult status=\"ok\">".to_string()),
            failed("0200", "record not found"),
            exception("CatalogLocked", "catalog is being edited"),
            ok_catalog(""),
        ];
        for reply in replies {
            let mut client = ScriptedXmlmc::new().reply(CATALOG_METHOD, reply);
            assert_eq!(resolve_catalog_workflow(&mut client, "IN00001", "42"), None);
            assert_eq!(client.calls.len(), 1);
        }
    }
}
