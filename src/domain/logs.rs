// Loki log query model and formatting
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const DEFAULT_RANGE_SECS: i64 = 3600;

/// Parameters of a Loki range query. `start`/`end` are Unix-epoch seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct LogQueryRequest {
    pub query: String,
    pub start: i64,
    pub end: i64,
    pub limit: u32,
    pub direction: LogDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDirection {
    Forward,
    Backward,
}

impl LogDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            LogDirection::Forward => "forward",
            LogDirection::Backward => "backward",
        }
    }

    /// Newest-first unless the caller asks for "forward".
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("forward") {
            LogDirection::Forward
        } else {
            LogDirection::Backward
        }
    }
}

/// Loki `query_range` response shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogQueryResponse {
    pub status: String,
    pub data: LogQueryData,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogQueryData {
    #[serde(default, rename = "resultType")]
    pub result_type: String,
    #[serde(default)]
    pub result: Vec<LogStream>,
}

/// One labeled stream with its (timestamp, line) pairs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogStream {
    #[serde(default)]
    pub stream: HashMap<String, String>,
    #[serde(default)]
    pub values: Vec<(String, String)>,
}

/// A formatted log line with level/source extracted from the message text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogLine {
    pub timestamp: String,
    pub time_ms: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub labels: HashMap<String, String>,
}

/// Resolve a relative range expression ("5m", "1h", "1d") to seconds.
/// Unparsable input falls back to one hour.
pub fn parse_relative_range(range: &str) -> i64 {
    let Some(unit) = range.chars().last() else {
        return DEFAULT_RANGE_SECS;
    };
    let Ok(value) = range[..range.len() - unit.len_utf8()].parse::<i64>() else {
        return DEFAULT_RANGE_SECS;
    };
    match unit {
        'm' => value * 60,
        'h' => value * 3600,
        'd' => value * 86_400,
        _ => DEFAULT_RANGE_SECS,
    }
}

/// Flatten a Loki response into formatted lines. Responses without
/// `status == "success"` yield nothing.
pub fn format_log_response(response: &LogQueryResponse) -> Vec<LogLine> {
    let mut lines = Vec::new();
    if response.status != "success" {
        return lines;
    }

    for stream in &response.data.result {
        for (timestamp, message) in &stream.values {
            let time_ms = timestamp
                .parse::<f64>()
                .map(|secs| (secs * 1000.0) as i64)
                .unwrap_or(0);

            lines.push(LogLine {
                timestamp: timestamp.clone(),
                time_ms,
                message: message.clone(),
                level: extract_level(message),
                source: extract_source(message),
                labels: stream.stream.clone(),
            });
        }
    }

    lines
}

const LEVELS: [&str; 4] = ["INFO", "ERROR", "WARN", "DEBUG"];

/// Extract a bracketed log level ("[INFO]", "[error]") from a message.
pub fn extract_level(message: &str) -> Option<String> {
    bracketed_segments(message)
        .into_iter()
        .map(|segment| segment.to_ascii_uppercase())
        .find(|upper| LEVELS.contains(&upper.as_str()))
}

/// The source is the second bracketed segment, when present
/// (e.g. "[INFO] [PaymentService] charge accepted").
pub fn extract_source(message: &str) -> Option<String> {
    let segments = bracketed_segments(message);
    (segments.len() > 1).then(|| segments[1].to_string())
}

fn bracketed_segments(message: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = message;
    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        let Some(close) = after.find(']') else {
            break;
        };
        segments.push(&after[..close]);
        rest = &after[close + 1..];
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_relative_ranges() {
        assert_eq!(parse_relative_range("5m"), 300);
        assert_eq!(parse_relative_range("2h"), 7200);
        assert_eq!(parse_relative_range("1d"), 86_400);
        assert_eq!(parse_relative_range("90x"), 3600);
        assert_eq!(parse_relative_range(""), 3600);
    }

    #[test]
    fn direction_defaults_to_backward() {
        assert_eq!(LogDirection::parse("forward"), LogDirection::Forward);
        assert_eq!(LogDirection::parse("FORWARD"), LogDirection::Forward);
        assert_eq!(LogDirection::parse("backward"), LogDirection::Backward);
        assert_eq!(LogDirection::parse("sideways"), LogDirection::Backward);
    }

    #[test]
    fn extracts_level_case_insensitively() {
        assert_eq!(extract_level("[INFO] started").as_deref(), Some("INFO"));
        assert_eq!(extract_level("[error] boom").as_deref(), Some("ERROR"));
        assert_eq!(extract_level("no level here"), None);
        assert_eq!(extract_level("[2024-01-01] [WARN] slow"), Some("WARN".to_string()));
    }

    #[test]
    fn extracts_second_bracketed_segment_as_source() {
        let message = "[ERROR] [PaymentService] charge failed";
        assert_eq!(extract_source(message).as_deref(), Some("PaymentService"));
        assert_eq!(extract_source("[INFO] no source"), None);
    }

    #[test]
    fn formats_successful_response() {
        let response = LogQueryResponse {
            status: "success".to_string(),
            data: LogQueryData {
                result_type: "streams".to_string(),
                result: vec![LogStream {
                    stream: HashMap::from([("app".to_string(), "target-api".to_string())]),
                    values: vec![(
                        "1700000000.5".to_string(),
                        "[INFO] [Startup] ready".to_string(),
                    )],
                }],
            },
        };

        let lines = format_log_response(&response);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].time_ms, 1_700_000_000_500);
        assert_eq!(lines[0].level.as_deref(), Some("INFO"));
        assert_eq!(lines[0].source.as_deref(), Some("Startup"));
        assert_eq!(lines[0].labels["app"], "target-api");
    }

    #[test]
    fn failed_response_yields_no_lines() {
        let response = LogQueryResponse {
            status: "error".to_string(),
            data: LogQueryData {
                result_type: String::new(),
                result: vec![],
            },
        };
        assert!(format_log_response(&response).is_empty());
    }
}
