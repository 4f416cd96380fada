use std::fmt;
use std::path::PathBuf;

use serde_json::{Map, Value};
use ureq::Agent;

use crate::error::LoadError;
use crate::types::{Note, NoteType, Payload};

/// File name of the bundled dataset resource.
pub const DEFAULT_RESOURCE: &str = "xiaohongshu_data.json";

/// Where the dataset document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A local file, normally the resource bundled with the app.
    File(PathBuf),
    /// An `http://` or `https://` URL.
    Url(String),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Fetches and normalizes the dataset. One attempt per call, no retry.
#[derive(Clone)]
pub struct Loader {
    agent: Agent,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    /// Build a loader. HTTP requests connect directly, with ureq's default
    /// timeouts.
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .proxy(None);
        Self {
            agent: agent.build().into(),
        }
    }

    /// Read the document at `source` and turn it into the dataset.
    pub async fn load(&self, source: &DataSource) -> Result<Vec<Note>, LoadError> {
        tracing::info!("Loading dataset from {source}");
        let body = self.fetch(source).await?;
        let notes = parse_payload(&body)?;
        tracing::info!("Loaded {} notes", notes.len());
        Ok(notes)
    }

    async fn fetch(&self, source: &DataSource) -> Result<Vec<u8>, LoadError> {
        match source {
            DataSource::File(path) => tokio::fs::read(path)
                .await
                .map_err(|e| LoadError::Network(format!("{}: {e}", path.display()))),
            DataSource::Url(url) => {
                // ureq is blocking; keep it off the async workers.
                let agent = self.agent.clone();
                let url = url.clone();
                tokio::task::spawn_blocking(move || fetch_url(&agent, &url))
                    .await
                    .map_err(|e| LoadError::Network(e.to_string()))?
            }
        }
    }
}

fn fetch_url(agent: &Agent, url: &str) -> Result<Vec<u8>, LoadError> {
    let mut response = agent
        .get(url)
        .call()
        .map_err(|e| LoadError::Network(e.to_string()))?;
    let status = response.status();
    tracing::debug!("Response status: {status}");
    if !status.is_success() {
        return Err(LoadError::Network(format!(
            "response status was not ok: {}",
            status.as_u16()
        )));
    }
    response
        .body_mut()
        .read_to_vec()
        .map_err(|e| LoadError::Network(e.to_string()))
}

/// Parse the dataset document and normalize every item.
///
/// Fails with [`LoadError::Format`] unless `success` is `true` and
/// `data.items` is present. Every item yields one note; an item that is not
/// an object becomes a note with all defaults.
pub fn parse_payload(body: &[u8]) -> Result<Vec<Note>, LoadError> {
    let payload: Payload = serde_json::from_slice(body)?;
    if payload.success != Some(true) {
        return Err(LoadError::Format("payload is not marked successful".into()));
    }
    let items = payload
        .data
        .and_then(|data| data.items)
        .ok_or_else(|| LoadError::Format("missing data.items".into()))?;

    let notes = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(fields) => normalize_note(&fields),
            other => {
                tracing::warn!("Item {i} is not an object ({other}), using defaults");
                normalize_note(&Map::new())
            }
        })
        .collect();
    Ok(notes)
}

/// Apply the field defaults and numeric coercion to one raw item.
pub fn normalize_note(fields: &Map<String, Value>) -> Note {
    Note {
        title: text_field(fields.get("title")),
        user_nickname: text_field(fields.get("user_nickname")),
        likes: coerce_count(fields.get("likes")),
        comments: coerce_count(fields.get("comments")),
        collects: coerce_count(fields.get("collects")),
        shares: coerce_count(fields.get("shares")),
        note_type: NoteType::from_raw(fields.get("note_type").and_then(Value::as_str)),
    }
}

/// Non-empty text, or `None`. Numbers are kept as their decimal text.
fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Lenient counter coercion: anything that is not a non-negative number (or
/// numeric text) becomes 0. Fractions are truncated.
pub fn coerce_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(count_from_f64))
            .unwrap_or(0),
        Some(Value::String(s)) => parse_count(s),
        _ => 0,
    }
}

fn parse_count(s: &str) -> u64 {
    let s = s.trim();
    s.parse::<u64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().and_then(count_from_f64))
        .unwrap_or(0)
}

fn count_from_f64(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0).then(|| f.trunc() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    fn note_fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    /// Serve a single HTTP response on a local port and return its URL.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        });
        format!("http://{addr}/{DEFAULT_RESOURCE}")
    }

    #[test]
    fn coerces_numbers_and_numeric_text() {
        assert_eq!(coerce_count(Some(&json!(12))), 12);
        assert_eq!(coerce_count(Some(&json!(12.9))), 12);
        assert_eq!(coerce_count(Some(&json!("2000"))), 2000);
        assert_eq!(coerce_count(Some(&json!(" 42 "))), 42);
        assert_eq!(coerce_count(Some(&json!("7.5"))), 7);
    }

    #[test]
    fn invalid_counts_become_zero() {
        assert_eq!(coerce_count(Some(&json!("1,?"))), 0);
        assert_eq!(coerce_count(None), 0);
        assert_eq!(coerce_count(Some(&Value::Null)), 0);
        assert_eq!(coerce_count(Some(&json!(""))), 0);
        assert_eq!(coerce_count(Some(&json!(-3))), 0);
        assert_eq!(coerce_count(Some(&json!("-3"))), 0);
        assert_eq!(coerce_count(Some(&json!("NaN"))), 0);
        assert_eq!(coerce_count(Some(&json!(true))), 0);
    }

    #[test]
    fn normalize_applies_defaults() {
        let note = normalize_note(&note_fields(json!({
            "title": "",
            "likes": "1,?",
            "note_type": "视频",
        })));
        assert_eq!(note.title, None);
        assert_eq!(note.user_nickname, None);
        assert_eq!(note.likes, 0);
        assert_eq!(note.comments, 0);
        assert!(note.note_type.is_video());
    }

    #[test]
    fn normalize_keeps_unused_counters() {
        let note = normalize_note(&note_fields(json!({
            "title": "t",
            "user_nickname": "u",
            "likes": 1,
            "comments": "2",
            "collects": "3",
            "shares": 4,
        })));
        assert_eq!(
            (note.likes, note.comments, note.collects, note.shares),
            (1, 2, 3, 4)
        );
        assert_eq!(note.note_type, NoteType::ImageText);
    }

    #[test]
    fn parses_well_formed_payload_in_order() {
        let body = json!({
            "success": true,
            "data": { "items": [
                { "title": "first", "likes": "10" },
                { "title": "second", "likes": 20 },
            ]}
        });
        let notes = parse_payload(body.to_string().as_bytes()).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title.as_deref(), Some("first"));
        assert_eq!(notes[1].likes, 20);
    }

    #[test]
    fn rejects_missing_or_false_success() {
        let err = parse_payload(br#"{"data": {"items": []}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Format(_)));

        let err = parse_payload(br#"{"success": false, "data": {"items": []}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Format(_)));
    }

    #[test]
    fn rejects_missing_items() {
        let err = parse_payload(br#"{"success": true}"#).unwrap_err();
        assert_eq!(err, LoadError::Format("missing data.items".into()));

        let err = parse_payload(br#"{"success": true, "data": {}}"#).unwrap_err();
        assert_eq!(err, LoadError::Format("missing data.items".into()));
    }

    #[test]
    fn rejects_invalid_json() {
        let err = parse_payload(b"<html>not json</html>").unwrap_err();
        assert!(matches!(err, LoadError::Format(_)));
    }

    #[test]
    fn non_object_items_become_default_notes() {
        let body = br#"{"success": true, "data": {"items": [{"title": "a"}, 1, {"title": "b"}, null]}}"#;
        let notes = parse_payload(body).unwrap();
        assert_eq!(notes.len(), 4);
        assert_eq!(notes[0].title.as_deref(), Some("a"));
        assert_eq!(notes[2].title.as_deref(), Some("b"));
        for placeholder in [&notes[1], &notes[3]] {
            assert_eq!(placeholder.title, None);
            assert_eq!(placeholder.user_nickname, None);
            assert_eq!(placeholder.likes, 0);
            assert_eq!(placeholder.note_type, NoteType::ImageText);
        }
    }

    #[tokio::test]
    async fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_RESOURCE);
        std::fs::write(
            &path,
            r#"{"success": true, "data": {"items": [{"title": "a", "likes": "5"}]}}"#,
        )
        .unwrap();

        let notes = Loader::default()
            .load(&DataSource::File(path))
            .await
            .unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].likes, 5);
    }

    #[tokio::test]
    async fn missing_file_is_network_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DataSource::File(dir.path().join("absent.json"));
        let err = Loader::default().load(&source).await.unwrap_err();
        assert!(matches!(err, LoadError::Network(_)));
    }

    #[tokio::test]
    async fn loads_from_url() {
        let url = serve_once(
            "200 OK",
            r#"{"success": true, "data": {"items": [{"title": "remote", "note_type": "video"}]}}"#,
        );
        let notes = Loader::default().load(&DataSource::Url(url)).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].note_type.is_video());
    }

    #[tokio::test]
    async fn non_success_status_is_network_error() {
        let url = serve_once("404 Not Found", "{}");
        let err = Loader::default()
            .load(&DataSource::Url(url))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LoadError::Network("response status was not ok: 404".into())
        );
    }

    #[tokio::test]
    async fn bad_body_over_http_is_format_error() {
        let url = serve_once("200 OK", r#"{"success": false}"#);
        let err = Loader::default()
            .load(&DataSource::Url(url))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Format(_)));
    }
}
