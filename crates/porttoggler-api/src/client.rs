// Dashboard API client
//
// Builds the two switch port requests, hands them to a `Transport`, and
// runs the response through `outcome::interpret`. The base URL and the
// transport are fixed at construction; the API key is supplied per call.

use std::io::{self, Write};

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::outcome::{Outcome, interpret};
use crate::port::{PortId, PortUpdate};
use crate::transport::{ApiRequest, HttpTransport, Transport, TransportConfig};

/// Production Dashboard API root.
pub const DEFAULT_BASE_URL: &str = "https://api.meraki.com/api/v0";

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-cisco-meraki-api-key";

const PORT_DETAIL_LABEL: &str = "Switch Port Detail";
const PORT_UPDATE_LABEL: &str = "Switch Port";

/// Client for the switch port endpoints of the Dashboard API.
///
/// Unless [`suppress_print`](Self::suppress_print) is set, every call
/// prints one summary line for its [`Outcome`] to stdout.
#[derive(Debug, Clone)]
pub struct DashboardClient<T = HttpTransport> {
    transport: T,
    base_url: Url,
    suppress_print: bool,
}

impl DashboardClient<HttpTransport> {
    /// Build a client with a `reqwest` transport.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        Self::with_transport(base_url, HttpTransport::new(transport)?)
    }
}

impl<T: Transport> DashboardClient<T> {
    /// Build a client around any [`Transport`].
    pub fn with_transport(base_url: &str, transport: T) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            transport,
            base_url,
            suppress_print: false,
        })
    }

    /// Turn the per-call summary line off (or back on).
    pub fn suppress_print(mut self, suppress: bool) -> Self {
        self.suppress_print = suppress;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Public API ───────────────────────────────────────────────────

    /// `GET /devices/{serial}/switchPorts/{number}`
    pub async fn get_port_detail(
        &self,
        api_key: &SecretString,
        port: &PortId,
    ) -> Result<Outcome, Error> {
        let request = ApiRequest {
            method: Method::GET,
            url: self.port_url(port)?,
            headers: Self::headers(api_key)?,
            body: None,
        };
        self.execute(request, PORT_DETAIL_LABEL).await
    }

    /// `PUT /devices/{serial}/switchPorts/{number}` with only the
    /// attributes present in `update`.
    pub async fn update_port(
        &self,
        api_key: &SecretString,
        port: &PortId,
        update: &PortUpdate,
    ) -> Result<Outcome, Error> {
        // Everything that can fail locally happens before the send.
        let body = update.to_payload()?.to_string();
        let request = ApiRequest {
            method: Method::PUT,
            url: self.port_url(port)?,
            headers: Self::headers(api_key)?,
            body: Some(body),
        };
        self.execute(request, PORT_UPDATE_LABEL).await
    }

    // ── Request plumbing ─────────────────────────────────────────────

    /// `{base}/devices/{serial}/switchPorts/{number}`, segments percent-encoded.
    fn port_url(&self, port: &PortId) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["devices", port.serial(), "switchPorts", port.number()]);
        Ok(url)
    }

    fn headers(api_key: &SecretString) -> Result<HeaderMap, Error> {
        let mut key_value =
            HeaderValue::from_str(api_key.expose_secret()).map_err(|e| Error::InvalidApiKey {
                message: format!("not a valid header value: {e}"),
            })?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    async fn execute(&self, request: ApiRequest, label: &str) -> Result<Outcome, Error> {
        debug!(method = %request.method, url = %request.url, "sending {label} request");

        let raw = self.transport.send(request).await?;
        trace!(status = raw.status, body = %raw.body, "raw response");

        let outcome = interpret(raw.status, &raw.body);
        if !self.suppress_print {
            let mut stdout = io::stdout().lock();
            let _ = writeln!(stdout, "{}", outcome.summary(label));
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::outcome::{FailureKind, SuccessKind};
    use crate::transport::RawResponse;

    /// Records every request and answers with a canned response.
    #[derive(Debug, Clone)]
    struct Recorder {
        sent: Arc<Mutex<Vec<ApiRequest>>>,
        reply: RawResponse,
    }

    impl Recorder {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                sent: Arc::default(),
                reply: RawResponse {
                    status,
                    body: body.to_owned(),
                },
            }
        }

        fn sent(&self) -> Vec<ApiRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Transport for Recorder {
        async fn send(&self, request: ApiRequest) -> Result<RawResponse, Error> {
            self.sent.lock().unwrap().push(request);
            Ok(self.reply.clone())
        }
    }

    fn client(recorder: &Recorder) -> DashboardClient<Recorder> {
        DashboardClient::with_transport("https://dashboard.test/api/v0", recorder.clone())
            .unwrap()
            .suppress_print(true)
    }

    fn key() -> SecretString {
        SecretString::from("0123456789abcdef".to_owned())
    }

    #[tokio::test]
    async fn get_builds_port_path_and_headers() {
        let recorder = Recorder::replying(200, r#"{"enabled": true}"#);
        let port = PortId::new("Q2XX-1111-2222", "51");

        let outcome = client(&recorder).get_port_detail(&key(), &port).await.unwrap();
        assert_eq!(
            outcome,
            Outcome::Success {
                kind: SuccessKind::Ok,
                payload: Some(json!({ "enabled": true })),
            }
        );

        let sent = recorder.sent();
        assert_eq!(sent.len(), 1);
        let request = &sent[0];
        assert_eq!(request.method, Method::GET);
        assert_eq!(
            request.url.as_str(),
            "https://dashboard.test/api/v0/devices/Q2XX-1111-2222/switchPorts/51"
        );
        assert_eq!(request.headers[API_KEY_HEADER], "0123456789abcdef");
        assert!(request.headers[API_KEY_HEADER].is_sensitive());
        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn put_sends_only_present_fields() {
        let recorder = Recorder::replying(200, "");
        let port = PortId::new("Q2XX-1111-2222", "1");

        let outcome = client(&recorder)
            .update_port(&key(), &port, &PortUpdate::with_enabled(false))
            .await
            .unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.payload(), None);

        let sent = recorder.sent();
        assert_eq!(sent[0].method, Method::PUT);
        let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "enabled": false }));
    }

    #[tokio::test]
    async fn empty_update_is_sent_as_empty_object() {
        let recorder = Recorder::replying(200, "{}");
        client(&recorder)
            .update_port(&key(), &PortId::new("S", "2"), &PortUpdate::default())
            .await
            .unwrap();
        assert_eq!(recorder.sent()[0].body.as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn bad_api_key_fails_before_send() {
        let recorder = Recorder::replying(200, "{}");
        let err = client(&recorder)
            .get_port_detail(&SecretString::from("bad\nkey".to_owned()), &PortId::new("S", "2"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidApiKey { .. }));
        assert!(recorder.sent().is_empty());
    }

    #[tokio::test]
    async fn failure_status_is_an_outcome_not_an_error() {
        let recorder = Recorder::replying(404, "");
        let outcome = client(&recorder)
            .get_port_detail(&key(), &PortId::new("S", "99"))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Failure {
                kind: FailureKind::NotFound,
                detail: None,
                payload: None,
            }
        );
    }

    #[test]
    fn path_segments_are_encoded_and_trailing_slash_tolerated() {
        let recorder = Recorder::replying(200, "");
        let client =
            DashboardClient::with_transport("https://dashboard.test/api/v0/", recorder).unwrap();
        let url = client.port_url(&PortId::new("Q2XX 1", "1/2")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://dashboard.test/api/v0/devices/Q2XX%201/switchPorts/1%2F2"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        let recorder = Recorder::replying(200, "");
        assert!(matches!(
            DashboardClient::with_transport("not a url", recorder.clone()),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            DashboardClient::with_transport("mailto:ops@example.com", recorder),
            Err(Error::InvalidBaseUrl(_))
        ));
    }
}
