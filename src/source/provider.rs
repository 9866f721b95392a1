use std::time::Duration;

use html_escape::decode_html_entities;
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::models::Question;

/// Open Trivia DB endpoint.
pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";

/// Remote requests are abandoned after this long.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub const DIFFICULTY: &str = "medium";

const QUESTION_TYPE: &str = "multiple";

/// Why the remote path was abandoned.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("provider returned response code {0}")]
    NoResults(i64),

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("remote provider disabled")]
    Disabled,
}

/// Educational categories the daily question is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    ScienceAndNature,
    Geography,
    History,
    GeneralKnowledge,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::ScienceAndNature,
        Category::Geography,
        Category::History,
        Category::GeneralKnowledge,
    ];

    /// Provider-side category id.
    pub fn id(self) -> u32 {
        match self {
            Category::ScienceAndNature => 17,
            Category::Geography => 22,
            Category::History => 23,
            Category::GeneralKnowledge => 9,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::ScienceAndNature => "Science & Nature",
            Category::Geography => "Geography",
            Category::History => "History",
            Category::GeneralKnowledge => "General Knowledge",
        }
    }
}

/// A single remote attempt. No retries.
pub trait QuestionProvider {
    fn fetch_one(&self, category: Category) -> Result<Question, ProviderError>;
}

/// `None` stands for "offline": every attempt reports [`ProviderError::Disabled`].
impl<P: QuestionProvider> QuestionProvider for Option<P> {
    fn fetch_one(&self, category: Category) -> Result<Question, ProviderError> {
        match self {
            Some(provider) => provider.fetch_one(category),
            None => Err(ProviderError::Disabled),
        }
    }
}

/// Blocking client for the Open Trivia DB API.
pub struct OpenTdbClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl OpenTdbClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

impl QuestionProvider for OpenTdbClient {
    fn fetch_one(&self, category: Category) -> Result<Question, ProviderError> {
        let category_id = category.id().to_string();
        debug!("requesting question from {} (category {category_id})", self.base_url);

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("amount", "1"),
                ("difficulty", DIFFICULTY),
                ("type", QUESTION_TYPE),
                ("category", category_id.as_str()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        parse_response(&response.text()?)
    }
}

#[derive(Deserialize)]
struct ApiResponse {
    response_code: i64,
    #[serde(default)]
    results: Vec<ApiQuestion>,
}

#[derive(Deserialize)]
struct ApiQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

fn decode(text: &str) -> String {
    decode_html_entities(text).into_owned()
}

/// Turns a provider response body into a decoded [`Question`].
pub fn parse_response(body: &str) -> Result<Question, ProviderError> {
    let response: ApiResponse = serde_json::from_str(body)?;

    if response.response_code != 0 {
        return Err(ProviderError::NoResults(response.response_code));
    }

    let result = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Malformed("empty results".to_string()))?;

    let question = Question {
        text: decode(&result.question),
        correct_answer: decode(&result.correct_answer),
        incorrect_answers: result.incorrect_answers.iter().map(|a| decode(a)).collect(),
    };

    if question.text.trim().is_empty() || question.correct_answer.trim().is_empty() {
        return Err(ProviderError::Malformed("blank question or answer".to_string()));
    }
    if question.incorrect_answers.is_empty() {
        return Err(ProviderError::Malformed("no incorrect answers".to_string()));
    }

    Ok(question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answers a single HTTP request with `status_line` and `body`, returning
    /// the endpoint URL.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api.php", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request: Vec<u8> = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        });

        (url, handle)
    }

    const SAMPLE: &str = r#"{
        "response_code": 0,
        "results": [{
            "type": "multiple",
            "difficulty": "medium",
            "category": "Geography",
            "question": "Which river flows through &quot;Vienna&quot;?",
            "correct_answer": "Danube",
            "incorrect_answers": ["Rhine", "Elbe &amp; Oder", "Seine"]
        }]
    }"#;

    #[test]
    fn test_parse_response_decodes_entities() {
        let question = parse_response(SAMPLE).unwrap();
        assert_eq!(question.text, "Which river flows through \"Vienna\"?");
        assert_eq!(question.correct_answer, "Danube");
        assert_eq!(question.incorrect_answers[1], "Elbe & Oder");
        assert_eq!(question.incorrect_answers.len(), 3);
    }

    #[test]
    fn test_parse_response_rejects_no_results_code() {
        let err = parse_response(r#"{"response_code": 1, "results": []}"#).unwrap_err();
        assert!(matches!(err, ProviderError::NoResults(1)));
    }

    #[test]
    fn test_parse_response_rejects_empty_results() {
        let err = parse_response(r#"{"response_code": 0, "results": []}"#).unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn test_parse_response_rejects_garbage() {
        assert!(matches!(
            parse_response("<html>oops</html>").unwrap_err(),
            ProviderError::Decode(_)
        ));
        assert!(matches!(
            parse_response(r#"{"response_code": 0, "results": [{"question": "q"}]}"#).unwrap_err(),
            ProviderError::Decode(_)
        ));
    }

    #[test]
    fn test_parse_response_rejects_blank_fields() {
        let body = r#"{"response_code": 0, "results": [
            {"question": " ", "correct_answer": "a", "incorrect_answers": ["b"]}
        ]}"#;
        assert!(matches!(
            parse_response(body).unwrap_err(),
            ProviderError::Malformed(_)
        ));
    }

    #[test]
    fn test_client_reports_server_error_status() {
        let (url, server) = serve_once("500 Internal Server Error", "");
        let client = OpenTdbClient::new(url, Duration::from_secs(5)).unwrap();

        let result = client.fetch_one(Category::Geography);

        assert!(matches!(result, Err(ProviderError::Status(500))));
        server.join().unwrap();
    }

    #[test]
    fn test_client_parses_successful_response() {
        let (url, server) = serve_once("200 OK", SAMPLE);
        let client = OpenTdbClient::new(url, Duration::from_secs(5)).unwrap();

        let question = client.fetch_one(Category::Geography).unwrap();

        assert_eq!(question.correct_answer, "Danube");
        server.join().unwrap();
    }

    #[test]
    fn test_client_connection_refused_is_http_error() {
        let client = OpenTdbClient::new("http://127.0.0.1:1/api.php", Duration::from_secs(1)).unwrap();
        assert!(matches!(
            client.fetch_one(Category::History),
            Err(ProviderError::Http(_))
        ));
    }

    #[test]
    fn test_category_ids() {
        let ids: Vec<u32> = Category::ALL.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![17, 22, 23, 9]);
    }

    #[test]
    fn test_offline_option_is_disabled() {
        let provider: Option<OpenTdbClient> = None;
        assert!(matches!(
            provider.fetch_one(Category::History),
            Err(ProviderError::Disabled)
        ));
    }
}
