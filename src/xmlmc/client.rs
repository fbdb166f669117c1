use super::{Xmlmc, XmlmcError};
use anyhow::{anyhow, Context, Result};
use quick_xml::escape::escape;
use serde::Deserialize;

const ZONEINFO_BASE: &str = "https://files.hornbill.com/instances";

#[derive(Debug, Deserialize)]
struct ZoneInfoEnvelope {
    zoneinfo: ZoneInfo,
}

#[derive(Debug, Deserialize)]
struct ZoneInfo {
    #[serde(default)]
    endpoint: String,
}

#[derive(Debug, Clone)]
enum Endpoint {
    Resolved(String),
    Unavailable(String),
}

/// Blocking XMLMC session bound to one instance and API key.
pub struct XmlmcClient {
    agent: ureq::Agent,
    instance: String,
    api_key: String,
    endpoint: Endpoint,
    params: Vec<(String, String)>,
}

impl XmlmcClient {
    /// Look up the instance's XMLMC endpoint and open a session against it.
    ///
    /// A failed lookup does not fail construction: the session is created in
    /// an unavailable state and every invoke reports the lookup failure.
    pub fn discover(instance: &str, api_key: &str) -> Self {
        let agent = ureq::Agent::new_with_defaults();
        let endpoint = match lookup_endpoint(&agent, instance) {
            Ok(url) => {
                tracing::info!(instance, endpoint = %url, "resolved XMLMC endpoint");
                Endpoint::Resolved(url)
            }
            Err(err) => {
                tracing::error!(instance, "XMLMC endpoint lookup failed: {err:#}");
                Endpoint::Unavailable(format!("{err:#}"))
            }
        };
        Self {
            agent,
            instance: instance.to_string(),
            api_key: api_key.to_string(),
            endpoint,
            params: Vec::new(),
        }
    }

    /// Open a session against a known endpoint, skipping discovery.
    pub fn with_endpoint(endpoint: &str, instance: &str, api_key: &str) -> Self {
        let url = normalize_endpoint(endpoint);
        tracing::info!(instance, endpoint = %url, "using configured XMLMC endpoint");
        Self {
            agent: ureq::Agent::new_with_defaults(),
            instance: instance.to_string(),
            api_key: api_key.to_string(),
            endpoint: Endpoint::Resolved(url),
            params: Vec::new(),
        }
    }

    fn post(
        &self,
        endpoint: &str,
        service: &str,
        method: &str,
        body: String,
    ) -> Result<String, XmlmcError> {
        let url = method_url(endpoint, service, method);
        let http_err = |source| XmlmcError::Http {
            url: url.clone(),
            method: method.to_string(),
            source,
        };
        let mut response = self
            .agent
            .post(&url)
            .header("Content-Type", "text/xmlmc; charset=utf-8")
            .header("Accept", "text/xml")
            .header("Authorization", format!("ESP-APIKEY {}", self.api_key))
            .send(body)
            .map_err(http_err)?;
        response.body_mut().read_to_string().map_err(http_err)
    }
}

impl Xmlmc for XmlmcClient {
    fn set_param(&mut self, name: &str, value: &str) {
        self.params.push((name.to_string(), value.to_string()));
    }

    fn invoke(&mut self, service: &str, method: &str) -> Result<String, XmlmcError> {
        let params = std::mem::take(&mut self.params);
        let endpoint = match &self.endpoint {
            Endpoint::Resolved(url) => url.clone(),
            Endpoint::Unavailable(reason) => {
                return Err(XmlmcError::EndpointUnavailable {
                    instance: self.instance.clone(),
                    reason: reason.clone(),
                })
            }
        };
        let body = method_call_body(service, method, &params);
        tracing::debug!(service, method, params = params.len(), "invoking XMLMC method");
        self.post(&endpoint, service, method, body)
    }
}

fn lookup_endpoint(agent: &ureq::Agent, instance: &str) -> Result<String> {
    if instance.trim().is_empty() {
        return Err(anyhow!("instance id is empty"));
    }
    let url = zoneinfo_url(instance);
    let mut response = agent
        .get(&url)
        .call()
        .with_context(|| format!("fetch {url}"))?;
    let body = response
        .body_mut()
        .read_to_string()
        .with_context(|| format!("read zoneinfo from {url}"))?;
    xmlmc_endpoint_from_zoneinfo(&body)
        .with_context(|| format!("zoneinfo for '{instance}' from {url}"))
}

pub(crate) fn xmlmc_endpoint_from_zoneinfo(body: &str) -> Result<String> {
    let envelope: ZoneInfoEnvelope = serde_json::from_str(body).context("parse zoneinfo")?;
    if envelope.zoneinfo.endpoint.trim().is_empty() {
        return Err(anyhow!("zoneinfo has no endpoint"));
    }
    Ok(format!(
        "{}xmlmc/",
        normalize_endpoint(&envelope.zoneinfo.endpoint)
    ))
}

pub(crate) fn zoneinfo_url(instance: &str) -> String {
    format!("{ZONEINFO_BASE}/{}/zoneinfo", instance.trim())
}

pub(crate) fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

pub(crate) fn method_url(endpoint: &str, service: &str, method: &str) -> String {
    format!("{endpoint}{service}/?method={method}")
}

pub(crate) fn method_call_body(
    service: &str,
    method: &str,
    params: &[(String, String)],
) -> String {
    let mut body = format!(
        r#"<methodCall service="{}" method="{}">"#,
        escape(service),
        escape(method)
    );
    if !params.is_empty() {
        body.push_str("<params>");
        for (name, value) in params {
            body.push_str(&format!("<{name}>{}</{name}>", escape(value.as_str())));
        }
        body.push_str("</params>");
    }
    body.push_str("</methodCall>");
    body
}
