use minijinja::HtmlEscape;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CheckinError;

const UNKNOWN: &str = "Unknown";
const NO_DATA: &str = "No Data";

#[derive(Deserialize, Debug, Default)]
pub struct CheckinRequest {
    pub id: Option<String>,
    pub mac: Option<String>,
    pub msg: Option<String>,
}

impl CheckinRequest {
    /// Parses a raw request body. Devices frequently omit `Content-Type`, so the
    /// header is not consulted. An absent body, invalid JSON, `null`, a non-object,
    /// an empty object or a non-string field all count as missing data.
    pub fn parse(body: &[u8]) -> Result<Self, CheckinError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| CheckinError::NoJsonData)?;
        match &value {
            Value::Object(fields) if !fields.is_empty() => {}
            _ => return Err(CheckinError::NoJsonData),
        }
        serde_json::from_value(value).map_err(|_| CheckinError::NoJsonData)
    }

    pub fn sanitize(self) -> Checkin {
        Checkin {
            id: escape_html(self.id.as_deref().unwrap_or(UNKNOWN)),
            mac: escape_html(self.mac.as_deref().unwrap_or(UNKNOWN)),
            message: escape_html(self.msg.as_deref().unwrap_or(NO_DATA)),
        }
    }
}

fn escape_html(value: &str) -> String {
    HtmlEscape(value).to_string()
}

/// A check-in with defaults applied and every field HTML-escaped.
#[derive(Debug, PartialEq, Eq)]
pub struct Checkin {
    pub id: String,
    pub mac: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct CheckinResponse {
    pub status: &'static str,
    pub server_time: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_get_placeholders() {
        let checkin = CheckinRequest::parse(br#"{"mac":"AA:BB"}"#)
            .expect("parse")
            .sanitize();
        assert_eq!(
            checkin,
            Checkin {
                id: "Unknown".to_string(),
                mac: "AA:BB".to_string(),
                message: "No Data".to_string(),
            }
        );
    }

    #[test]
    fn fields_are_escaped() {
        let checkin = CheckinRequest::parse(
            br#"{"id":"<b>\"Bob\" & 'co'","mac":"AA","msg":"<script>alert('x')</script>"}"#,
        )
        .expect("parse")
        .sanitize();
        assert_eq!(checkin.id, "&lt;b&gt;&quot;Bob&quot; &amp; &#x27;co&#x27;");
        assert!(checkin.message.starts_with("&lt;script&gt;alert(&#x27;x&#x27;)"));
        assert!(!checkin.message.contains('<'));
        assert!(!checkin.message.contains('>'));
    }

    #[test]
    fn plain_values_pass_through() {
        let checkin = CheckinRequest::parse(
            br#"{"id":"Alice","mac":"AA:BB:CC:DD:EE:FF","msg":"temp 21.5 ok"}"#,
        )
        .expect("parse")
        .sanitize();
        assert_eq!(checkin.id, "Alice");
        assert_eq!(checkin.mac, "AA:BB:CC:DD:EE:FF");
        assert_eq!(checkin.message, "temp 21.5 ok");
    }

    #[test]
    fn explicit_null_fields_take_placeholders() {
        let checkin = CheckinRequest::parse(br#"{"id":null,"mac":"AA","msg":null}"#)
            .expect("parse")
            .sanitize();
        assert_eq!(checkin.id, "Unknown");
        assert_eq!(checkin.mac, "AA");
        assert_eq!(checkin.message, "No Data");
    }

    #[test]
    fn rejects_missing_or_empty_payloads() {
        let bodies: [&[u8]; 8] = [
            b"",
            b"   ",
            b"not json",
            b"null",
            b"{}",
            b"[1,2]",
            b"\"hello\"",
            br#"{"id": 42}"#,
        ];
        for body in bodies {
            assert!(
                matches!(CheckinRequest::parse(body), Err(CheckinError::NoJsonData)),
                "body {:?} should be rejected",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let request = CheckinRequest::parse(br#"{"rssi": -60}"#).expect("parse");
        assert!(request.id.is_none());
        assert_eq!(request.sanitize().message, "No Data");
    }

    #[test]
    fn error_response_omits_missing_reason() {
        let body = serde_json::to_value(ErrorResponse {
            status: "error",
            reason: None,
        })
        .expect("serialize");
        assert_eq!(body, serde_json::json!({ "status": "error" }));
    }
}
