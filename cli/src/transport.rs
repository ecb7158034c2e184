//! ureq-backed `Transport`.
//!
//! The agent is built with the `cookies` feature, so the backend's session
//! cookie set at login is replayed on every later request made through the
//! same `UreqTransport`. Status codes are returned as data; only failures to
//! get a response at all become `TransportError`.

use league_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match req.method {
            HttpMethod::Get | HttpMethod::Delete => {
                let mut builder = if req.method == HttpMethod::Get {
                    self.agent.get(&req.path)
                } else {
                    self.agent.delete(&req.path)
                };
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post | HttpMethod::Put => {
                let mut builder = if req.method == HttpMethod::Post {
                    self.agent.post(&req.path)
                } else {
                    self.agent.put(&req.path)
                };
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match req.body.as_deref() {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::new(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
