//! LanguageTool grammar checker for ost-writing.
//!
//! Talks to a LanguageTool server (a local `languagetool-server.jar` or the
//! public API) over its HTTP interface: each check is a `POST /v2/check`
//! carrying the `text` and `language` form fields, and the error count is the
//! number of entries in the response's `matches` array.
//!
//! ```ignore
//! use std::sync::Arc;
//! use ost_languagetool::LanguageToolClient;
//!
//! let checker = LanguageToolClient::new("http://localhost:8081")?;
//! let extractor = ost_writing::FeatureExtractor::builder()
//!     .senses(senses)
//!     .grammar_checker(Arc::new(checker))
//!     .build()?;
//! ```

use std::time::Duration;

use ost_writing::{CheckError, ConfigError, GrammarChecker};
use reqwest::blocking::Client;
use serde::Deserialize;

pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings, usually nested in an application's config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LanguageToolConfig {
    pub url: String,
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for LanguageToolConfig {
    fn default() -> Self {
        LanguageToolConfig {
            url: "http://localhost:8081".to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl LanguageToolConfig {
    pub fn connect(&self) -> Result<LanguageToolClient, ConfigError> {
        LanguageToolClient::with_options(
            &self.url,
            &self.language,
            Duration::from_secs(self.timeout_secs),
        )
    }
}

#[derive(Deserialize)]
struct CheckResponse {
    matches: Vec<serde_json::Value>,
}

/// Number of rule matches in a `/v2/check` response body.
fn count_matches(body: &str) -> Result<usize, CheckError> {
    serde_json::from_str::<CheckResponse>(body)
        .map(|response| response.matches.len())
        .map_err(|err| CheckError::Decode(err.to_string()))
}

/// A blocking client for one LanguageTool server and language.
#[derive(Debug, Clone)]
pub struct LanguageToolClient {
    client: Client,
    endpoint: String,
    language: String,
}

impl LanguageToolClient {
    /// Client for `base_url` checking American English.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Self::with_options(base_url, DEFAULT_LANGUAGE, DEFAULT_TIMEOUT)
    }

    pub fn with_options(base_url: &str, language: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ConfigError::resource("LanguageTool client", err))?;
        let endpoint = format!("{}/v2/check", base_url.trim_end_matches('/'));
        tracing::info!(%endpoint, language, ?timeout, "using LanguageTool");

        Ok(LanguageToolClient {
            client,
            endpoint,
            language: language.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl GrammarChecker for LanguageToolClient {
    fn check(&self, text: &str) -> Result<usize, CheckError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("text", text), ("language", self.language.as_str())])
            .send()
            .map_err(|err| CheckError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|err| CheckError::Transport(err.to_string()))?;
        count_matches(&body)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Serve one canned HTTP response and hand back the request body.
    fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut request = vec![0; length];
            reader.read_exact(&mut request).unwrap();

            let mut stream = reader.into_inner();
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            String::from_utf8(request).unwrap()
        });

        (url, handle)
    }

    #[test]
    fn counts_matches() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"software":{"name":"LanguageTool"},"matches":[{"offset":0},{"offset":7}]}"#,
        );
        let client = LanguageToolClient::new(&url).unwrap();
        assert_eq!(client.check("This are a test."), Ok(2));

        let request = server.join().unwrap();
        assert_eq!(request, "text=This+are+a+test.&language=en-US");
    }

    #[test]
    fn http_errors_carry_the_status() {
        let (url, server) = serve_once("500 Internal Server Error", "{}");
        let client = LanguageToolClient::new(&url).unwrap();
        assert_eq!(client.check("Some text here."), Err(CheckError::Status(500)));
        server.join().unwrap();
    }

    #[test]
    fn unexpected_bodies_are_decode_errors() {
        let (url, server) = serve_once("200 OK", r#"{"software":{}}"#);
        let client = LanguageToolClient::new(&url).unwrap();
        assert!(matches!(client.check("Some text here."), Err(CheckError::Decode(_))));
        server.join().unwrap();
    }

    #[test]
    fn unreachable_servers_are_transport_errors() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = LanguageToolClient::with_options(&url, "en-GB", Duration::from_secs(2)).unwrap();
        assert!(matches!(client.check("Some text here."), Err(CheckError::Transport(_))));
    }

    #[test]
    fn endpoint_is_normalized() {
        let client = LanguageToolClient::new("http://localhost:8081/").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8081/v2/check");
        assert_eq!(client.language(), "en-US");
    }

    #[test]
    fn config_reads_from_toml() {
        let config: LanguageToolConfig = toml::from_str("language = \"en-GB\"\ntimeout_secs = 5").unwrap();
        assert_eq!(config.url, "http://localhost:8081");
        assert_eq!(config.language, "en-GB");
        assert_eq!(config.connect().unwrap().language(), "en-GB");
        assert!(toml::from_str::<LanguageToolConfig>("port = 1").is_err());
    }

    #[test]
    fn count_matches_rejects_non_json() {
        assert_eq!(count_matches(r#"{"matches":[]}"#), Ok(0));
        assert!(matches!(count_matches("<html>"), Err(CheckError::Decode(_))));
    }
}
