//! Weaviate Store Implementation
//!
//! Provides the narrow write interface over Weaviate's REST API (v1).
//!
//! # Features
//!
//! - Blocking HTTP communication (the pipeline is strictly sequential)
//! - API key and embedding-provider key sent as default headers
//! - Retry logic with exponential backoff for transport and 5xx failures
//! - Content-derived object ids, so a retried insert never stores a second copy
//! - Readiness probe on connect
//!
//! # Examples
//!
//! ```no_run
//! use sustain_store::{WeaviateConfig, WeaviateStore};
//!
//! let config = WeaviateConfig::new("https://my-cluster.weaviate.network")
//!     .with_api_key("weaviate-key")
//!     .with_openai_api_key("sk-...");
//! let store = WeaviateStore::connect(config)?;
//! # Ok::<(), sustain_store::StoreError>(())
//! ```

use crate::StoreError;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;
use sustain_domain::traits::DocumentStore;
use sustain_domain::{CollectionSchema, PropertyValue, Vectorizer};
use tracing::{debug, warn};
use uuid::Uuid;

/// Default timeout for store requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Header carrying the OpenAI key for `text2vec-openai`
pub const OPENAI_KEY_HEADER: &str = "X-OpenAI-Api-Key";

/// Connection settings for a Weaviate instance
#[derive(Debug, Clone)]
pub struct WeaviateConfig {
    /// Cluster URL; `https://` is assumed when no scheme is given
    pub url: String,

    /// Weaviate API key (sent as a bearer token)
    pub api_key: Option<String>,

    /// Embedding provider key forwarded to the vectorizer module
    pub openai_api_key: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Attempts per request before giving up
    pub max_retries: u32,
}

impl WeaviateConfig {
    /// Create a config for the given cluster URL with default settings
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            openai_api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the Weaviate API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the embedding provider key
    pub fn with_openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Base URL with a scheme and without a trailing slash
    pub fn base_url(&self) -> String {
        let url = self.url.trim().trim_end_matches('/');
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("https://{}", url)
        }
    }

    fn default_headers(&self) -> Result<HeaderMap, StoreError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|_| StoreError::Auth("API key is not a valid header value".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        if let Some(key) = self.openai_api_key.as_deref().filter(|k| !k.is_empty()) {
            let mut value = HeaderValue::from_str(key).map_err(|_| {
                StoreError::Auth("embedding provider key is not a valid header value".to_string())
            })?;
            value.set_sensitive(true);
            headers.insert(OPENAI_KEY_HEADER, value);
        }

        Ok(headers)
    }
}

/// Class definition body for `POST /v1/schema`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassDefinition<'a> {
    class: &'a str,
    description: &'a str,
    vectorizer: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    module_config: Option<Value>,
    properties: Vec<PropertyDefinition<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PropertyDefinition<'a> {
    name: &'a str,
    data_type: [&'static str; 1],
}

impl<'a> From<&'a CollectionSchema> for ClassDefinition<'a> {
    fn from(schema: &'a CollectionSchema) -> Self {
        let module_config = match schema.vectorizer {
            Vectorizer::None => None,
            module => {
                let mut config = Map::new();
                config.insert(module.as_str().to_string(), Value::Object(Map::new()));
                Some(Value::Object(config))
            }
        };

        Self {
            class: &schema.name,
            description: &schema.description,
            vectorizer: schema.vectorizer.as_str(),
            module_config,
            properties: schema
                .properties
                .iter()
                .map(|p| PropertyDefinition {
                    name: &p.name,
                    data_type: [p.data_type.as_str()],
                })
                .collect(),
        }
    }
}

/// Object body for `POST /v1/objects`
#[derive(Debug, Serialize)]
struct ObjectRequest<'a> {
    class: &'a str,
    id: Uuid,
    properties: Map<String, Value>,
}

impl<'a> ObjectRequest<'a> {
    fn new(class: &'a str, properties: &[(&str, PropertyValue)]) -> Result<Self, StoreError> {
        let mut map = Map::new();
        for (name, value) in properties {
            map.insert(name.to_string(), property_json(name, value)?);
        }
        Ok(Self {
            class,
            id: object_id(class, &map),
            properties: map,
        })
    }
}

/// Name-based (v5) id over the class and the ordered property values
///
/// Every attempt at the same insert carries the same id, and equal records
/// in one collection collapse to one object.
fn object_id(class: &str, properties: &Map<String, Value>) -> Uuid {
    let mut name = String::from(class);
    for (key, value) in properties {
        name.push('\n');
        name.push_str(key);
        name.push('=');
        name.push_str(&value.to_string());
    }
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
}

fn property_json(name: &str, value: &PropertyValue) -> Result<Value, StoreError> {
    match value {
        PropertyValue::Text(s) => Ok(Value::String(s.clone())),
        PropertyValue::Int(i) => Ok(Value::from(*i)),
        PropertyValue::Number(n) => serde_json::Number::from_f64(*n)
            .map(Value::Number)
            .ok_or_else(|| {
                StoreError::InvalidRecord(format!("property '{}' is not a finite number: {}", name, n))
            }),
    }
}

/// Weaviate document store
///
/// Holds one HTTP session for the duration of an ingestion run. The session
/// is released when the store is dropped.
pub struct WeaviateStore {
    base_url: String,
    client: Client,
    max_retries: u32,
}

impl WeaviateStore {
    /// Create a store without contacting the server
    pub fn new(config: WeaviateConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(config.default_headers()?)
            .build()
            .map_err(|e| StoreError::Connection(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url(),
            client,
            max_retries: config.max_retries.max(1),
        })
    }

    /// Create a store and verify the server is ready
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The URL or keys cannot be used to build a client
    /// - The server is unreachable or reports not ready
    /// - The credentials are refused
    pub fn connect(config: WeaviateConfig) -> Result<Self, StoreError> {
        let store = Self::new(config)?;
        store.ready()?;
        debug!(url = %store.base_url, "Weaviate session established");
        Ok(store)
    }

    /// Base URL this store talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe `/v1/.well-known/ready`
    pub fn ready(&self) -> Result<(), StoreError> {
        let url = format!("{}/v1/.well-known/ready", self.base_url);
        let response = self.execute(|client| client.get(&url))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::Connection(format!(
                "{} does not look like a Weaviate endpoint",
                self.base_url
            )));
        }
        Ok(())
    }

    fn schema_url(&self, name: &str) -> String {
        format!("{}/v1/schema/{}", self.base_url, name)
    }

    /// Send a request, retrying transport and server failures
    ///
    /// Returns the response for 2xx and 404 so callers can decide what a
    /// missing resource means.
    fn execute<F>(&self, build: F) -> Result<Response, StoreError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        self.send(build, false)
    }

    /// Like [`execute`](Self::execute), but a 422 on a retried attempt is
    /// returned to the caller: the create may have landed before the
    /// earlier attempt failed.
    fn execute_create<F>(&self, build: F) -> Result<Response, StoreError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        self.send(build, true)
    }

    fn send<F>(&self, build: F, conflict_on_retry_ok: bool) -> Result<Response, StoreError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match build(&self.client).send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() || status == StatusCode::NOT_FOUND {
                        return Ok(response);
                    }
                    if conflict_on_retry_ok
                        && attempts > 0
                        && status == StatusCode::UNPROCESSABLE_ENTITY
                    {
                        return Ok(response);
                    }

                    let body = response
                        .text()
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                        return Err(StoreError::Auth(format!("HTTP {}: {}", status, body)));
                    }
                    if status.is_client_error() {
                        return Err(StoreError::Rejected {
                            status: status.as_u16(),
                            body,
                        });
                    }
                    last_error = Some(StoreError::Communication(format!(
                        "HTTP {}: {}",
                        status, body
                    )));
                }
                Err(e) => {
                    last_error = Some(StoreError::from(e));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!(attempt = attempts, ?delay, "Store request failed, retrying");
                std::thread::sleep(delay);
            }
        }

        Err(last_error
            .unwrap_or_else(|| StoreError::Communication("Max retries exceeded".to_string())))
    }
}

impl DocumentStore for WeaviateStore {
    type Error = StoreError;

    fn collection_exists(&self, name: &str) -> Result<bool, Self::Error> {
        let url = self.schema_url(name);
        let response = self.execute(|client| client.get(&url))?;
        Ok(response.status() != StatusCode::NOT_FOUND)
    }

    fn delete_collection(&mut self, name: &str) -> Result<(), Self::Error> {
        let url = self.schema_url(name);
        let response = self.execute(|client| client.delete(&url))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(())
    }

    fn create_collection(&mut self, schema: &CollectionSchema) -> Result<(), Self::Error> {
        let url = format!("{}/v1/schema", self.base_url);
        let body = ClassDefinition::from(schema);
        let response = self.execute(|client| client.post(&url).json(&body))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::InvalidResponse(
                "schema endpoint not found".to_string(),
            ));
        }
        Ok(())
    }

    fn insert(
        &mut self,
        collection: &str,
        properties: &[(&str, PropertyValue)],
    ) -> Result<(), Self::Error> {
        let url = format!("{}/v1/objects", self.base_url);
        let body = ObjectRequest::new(collection, properties)?;
        let response = self.execute_create(|client| client.post(&url).json(&body))?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(collection.to_string())),
            StatusCode::UNPROCESSABLE_ENTITY => {
                debug!(%collection, id = %body.id, "Object stored by an earlier attempt");
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl Drop for WeaviateStore {
    fn drop(&mut self) {
        debug!(url = %self.base_url, "Weaviate session released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[test]
    fn test_config_defaults() {
        let config = WeaviateConfig::new("https://example.weaviate.network");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_base_url_normalization() {
        assert_eq!(
            WeaviateConfig::new("cluster.weaviate.network/").base_url(),
            "https://cluster.weaviate.network"
        );
        assert_eq!(
            WeaviateConfig::new("http://localhost:8080").base_url(),
            "http://localhost:8080"
        );
    }

    #[test]
    fn test_default_headers() {
        let headers = WeaviateConfig::new("localhost")
            .with_api_key("secret")
            .with_openai_api_key("sk-test")
            .default_headers()
            .unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer secret");
        assert_eq!(headers.get(OPENAI_KEY_HEADER).unwrap(), "sk-test");
        assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
    }

    #[test]
    fn test_empty_keys_are_not_sent() {
        let headers = WeaviateConfig::new("localhost")
            .with_api_key("")
            .default_headers()
            .unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn test_class_definition_body() {
        let schema = CollectionSchema::narrative("FerreroNarrative", "Narrative sections");
        let body = serde_json::to_value(ClassDefinition::from(&schema)).unwrap();
        assert_eq!(
            body,
            json!({
                "class": "FerreroNarrative",
                "description": "Narrative sections",
                "vectorizer": "text2vec-openai",
                "moduleConfig": { "text2vec-openai": {} },
                "properties": [
                    { "name": "page", "dataType": ["int"] },
                    { "name": "section", "dataType": ["text"] },
                    { "name": "text", "dataType": ["text"] }
                ]
            })
        );
    }

    #[test]
    fn test_class_definition_without_vectorizer() {
        let schema = CollectionSchema::kpi_facts("FerreroKPI", "KPIs").with_vectorizer(Vectorizer::None);
        let body = serde_json::to_value(ClassDefinition::from(&schema)).unwrap();
        assert_eq!(body["vectorizer"], "none");
        assert!(body.get("moduleConfig").is_none());
        assert_eq!(body["properties"][4], json!({ "name": "value", "dataType": ["number"] }));
    }

    #[test]
    fn test_object_body() {
        let request = ObjectRequest::new(
            "FerreroKPI",
            &[
                ("year", PropertyValue::Text("2023".into())),
                ("value", PropertyValue::Number(90.5)),
                ("page", PropertyValue::Int(12)),
            ],
        )
        .unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["class"], "FerreroKPI");
        assert_eq!(body["id"], request.id.to_string());
        assert_eq!(
            body["properties"],
            json!({ "year": "2023", "value": 90.5, "page": 12 })
        );
    }

    #[test]
    fn test_object_id_is_content_derived() {
        let fact = [
            ("metric", PropertyValue::Text("Water".into())),
            ("year", PropertyValue::Text("2023".into())),
        ];
        let id = ObjectRequest::new("FerreroKPI", &fact).unwrap().id;

        assert_eq!(ObjectRequest::new("FerreroKPI", &fact).unwrap().id, id);
        assert_eq!(id.get_version_num(), 5);
        assert_ne!(ObjectRequest::new("FerreroNarrative", &fact).unwrap().id, id);

        let other_year = [
            ("metric", PropertyValue::Text("Water".into())),
            ("year", PropertyValue::Text("2024".into())),
        ];
        assert_ne!(ObjectRequest::new("FerreroKPI", &other_year).unwrap().id, id);
    }

    #[test]
    fn test_object_body_rejects_nan() {
        let result = ObjectRequest::new("FerreroKPI", &[("value", PropertyValue::Number(f64::NAN))]);
        assert!(matches!(result, Err(StoreError::InvalidRecord(_))));
    }

    #[test]
    fn test_connect_error_handling() {
        // Nothing listens on the discard port
        let config = WeaviateConfig::new("http://127.0.0.1:9")
            .with_max_retries(1)
            .with_timeout_secs(2);

        match WeaviateStore::connect(config) {
            Err(StoreError::Connection(_)) | Err(StoreError::Communication(_)) => {}
            Err(other) => panic!("Expected connection error, got {:?}", other),
            Ok(_) => panic!("Expected connection error"),
        }
    }

    /// One recorded request as seen by [`StubServer`]
    #[derive(Debug, Clone)]
    struct Recorded {
        method: String,
        path: String,
        headers: Vec<(String, String)>,
        body: String,
    }

    impl Recorded {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        }

        fn json(&self) -> Value {
            serde_json::from_str(&self.body).unwrap()
        }
    }

    /// Local HTTP/1.1 server answering each connection with the next scripted reply
    struct StubServer {
        url: String,
        requests: Arc<Mutex<Vec<Recorded>>>,
    }

    impl StubServer {
        fn start(replies: Vec<(u16, &'static str)>) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            let url = format!("http://{}", listener.local_addr().unwrap());
            let requests = Arc::new(Mutex::new(Vec::new()));
            let recorded = Arc::clone(&requests);

            thread::spawn(move || {
                for (status, body) in replies {
                    let Ok((mut stream, _)) = listener.accept() else {
                        return;
                    };
                    let request = read_request(&stream);
                    recorded.lock().unwrap().push(request);
                    let reply = format!(
                        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\n\
                         Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(reply.as_bytes());
                }
            });

            Self { url, requests }
        }

        fn store(&self, max_retries: u32) -> WeaviateStore {
            let config = WeaviateConfig::new(&self.url)
                .with_api_key("secret")
                .with_max_retries(max_retries)
                .with_timeout_secs(5);
            WeaviateStore::new(config).unwrap()
        }

        fn requests(&self) -> Vec<Recorded> {
            self.requests.lock().unwrap().clone()
        }
    }

    fn read_request(stream: &TcpStream) -> Recorded {
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let mut parts = line.split_whitespace();
        let method = parts.next().unwrap_or_default().to_string();
        let path = parts.next().unwrap_or_default().to_string();

        let mut headers = Vec::new();
        let mut length = 0;
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).unwrap();
            let header = header.trim_end();
            if header.is_empty() {
                break;
            }
            if let Some((name, value)) = header.split_once(':') {
                let name = name.trim().to_ascii_lowercase();
                let value = value.trim().to_string();
                if name == "content-length" {
                    length = value.parse().unwrap();
                }
                headers.push((name, value));
            }
        }

        let mut body = vec![0; length];
        reader.read_exact(&mut body).unwrap();
        Recorded {
            method,
            path,
            headers,
            body: String::from_utf8(body).unwrap(),
        }
    }

    fn fact() -> Vec<(&'static str, PropertyValue)> {
        vec![
            ("metric", PropertyValue::Text("Water withdrawal".into())),
            ("year", PropertyValue::Text("2023".into())),
            ("value", PropertyValue::Number(3.2)),
        ]
    }

    #[test]
    fn test_connect_probes_readiness() {
        let server = StubServer::start(vec![(200, "")]);
        let config = WeaviateConfig::new(&server.url).with_api_key("secret");
        WeaviateStore::connect(config).unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].path, "/v1/.well-known/ready");
        assert_eq!(requests[0].header("authorization"), Some("Bearer secret"));
    }

    #[test]
    fn test_insert_sends_object_with_id() {
        let server = StubServer::start(vec![(200, "{}")]);
        let mut store = server.store(3);
        store.insert("FerreroKPI", &fact()).unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/v1/objects");
        let body = requests[0].json();
        assert_eq!(body["class"], "FerreroKPI");
        assert_eq!(body["properties"]["value"], 3.2);
        assert!(body["id"].as_str().is_some_and(|id| Uuid::parse_str(id).is_ok()));
    }

    #[test]
    fn test_insert_retry_reuses_object_id() {
        let server = StubServer::start(vec![(500, "boom"), (200, "{}")]);
        let mut store = server.store(3);
        store.insert("FerreroKPI", &fact()).unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].json()["id"], requests[1].json()["id"]);
    }

    #[test]
    fn test_insert_already_stored_on_retry_is_success() {
        // First attempt lands but its reply is lost; the retry collides
        let server = StubServer::start(vec![
            (503, "unavailable"),
            (422, r#"{"error":[{"message":"id already exists"}]}"#),
        ]);
        let mut store = server.store(3);
        store.insert("FerreroKPI", &fact()).unwrap();

        assert_eq!(server.requests().len(), 2);
    }

    #[test]
    fn test_insert_conflict_on_first_attempt_is_rejected() {
        let server = StubServer::start(vec![(422, r#"{"error":[{"message":"id already exists"}]}"#)]);
        let mut store = server.store(3);
        let result = store.insert("FerreroKPI", &fact());

        assert!(matches!(result, Err(StoreError::Rejected { status: 422, .. })));
        assert_eq!(server.requests().len(), 1);
    }

    #[test]
    fn test_server_errors_exhaust_retries() {
        let server = StubServer::start(vec![(500, "boom"), (502, "bad gateway")]);
        let mut store = server.store(2);
        let result = store.insert("FerreroKPI", &fact());

        match result {
            Err(StoreError::Communication(message)) => assert!(message.contains("502")),
            other => panic!("Expected communication error, got {:?}", other),
        }
        assert_eq!(server.requests().len(), 2);
    }

    #[test]
    fn test_client_errors_are_not_retried() {
        let server = StubServer::start(vec![(400, "no such property")]);
        let mut store = server.store(3);
        let result = store.insert("FerreroKPI", &fact());

        match result {
            Err(StoreError::Rejected { status, body }) => {
                assert_eq!(status, 400);
                assert_eq!(body, "no such property");
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
        assert_eq!(server.requests().len(), 1);
    }

    #[test]
    fn test_auth_failures() {
        for status in [401, 403] {
            let server = StubServer::start(vec![(status, "denied")]);
            let store = server.store(3);
            let result = store.collection_exists("FerreroKPI");

            assert!(matches!(result, Err(StoreError::Auth(_))), "HTTP {}", status);
            assert_eq!(server.requests().len(), 1);
        }
    }

    #[test]
    fn test_collection_exists() {
        let server = StubServer::start(vec![(200, r#"{"class":"FerreroKPI"}"#), (404, "")]);
        let store = server.store(1);

        assert!(store.collection_exists("FerreroKPI").unwrap());
        assert!(!store.collection_exists("FerreroKPI").unwrap());

        let requests = server.requests();
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].path, "/v1/schema/FerreroKPI");
    }

    #[test]
    fn test_delete_collection() {
        let server = StubServer::start(vec![(200, ""), (404, "")]);
        let mut store = server.store(1);

        store.delete_collection("FerreroNarrative").unwrap();
        let result = store.delete_collection("FerreroNarrative");
        assert!(matches!(result, Err(StoreError::NotFound(name)) if name == "FerreroNarrative"));

        let requests = server.requests();
        assert_eq!(requests[0].method, "DELETE");
        assert_eq!(requests[0].path, "/v1/schema/FerreroNarrative");
    }

    #[test]
    fn test_create_collection_posts_class() {
        let server = StubServer::start(vec![(200, "{}")]);
        let mut store = server.store(1);
        let schema = CollectionSchema::narrative("FerreroNarrative", "Narrative sections");
        store.create_collection(&schema).unwrap();

        let requests = server.requests();
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/v1/schema");
        assert_eq!(
            requests[0].json(),
            serde_json::to_value(ClassDefinition::from(&schema)).unwrap()
        );
    }

    // Integration test (requires a running Weaviate)
    #[test]
    #[ignore]
    fn test_weaviate_schema_round_trip_integration() {
        let url = std::env::var("WEAVIATE_URL").unwrap_or_else(|_| "http://localhost:8080".into());
        let mut store = WeaviateStore::connect(WeaviateConfig::new(url)).unwrap();
        let schema = CollectionSchema::narrative("SustainIntegrationTest", "test")
            .with_vectorizer(Vectorizer::None);

        if store.collection_exists(&schema.name).unwrap() {
            store.delete_collection(&schema.name).unwrap();
        }
        store.create_collection(&schema).unwrap();
        store
            .insert(&schema.name, &[("page", PropertyValue::Int(1))])
            .unwrap();
        store.delete_collection(&schema.name).unwrap();
        assert!(!store.collection_exists(&schema.name).unwrap());
    }
}
