use serde::{Deserialize, Serialize};
use std::fmt;

// ===== MESSAGE TYPES =====

#[derive(Serialize, Deserialize, Debug)]
pub enum UpMsg {
    /// First message on every connection. The transport has no token slot,
    /// so the page's csrf token rides here.
    SessionJoined { csrf_token: String },
    /// Console round-trip probe; `sent_at_ms` is echoed back in `Pong`.
    Ping { sent_at_ms: f64 },
}

#[derive(Serialize, Deserialize, Debug)]
pub enum DownMsg {
    SessionAccepted,
    Pong { sent_at_ms: f64 },
    /// Server-driven view update; consumed by the view layer, not by the
    /// bootstrap itself.
    ViewPatch { target: String, html: String },
    Diagnostic { level: DiagnosticLevel, message: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "INFO"),
            DiagnosticLevel::Warning => write!(f, "WARNING"),
            DiagnosticLevel::Error => write!(f, "ERROR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_joined_round_trip() {
        let msg = UpMsg::SessionJoined {
            csrf_token: "token-abc123".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        let back: UpMsg = serde_json::from_str(&json).unwrap();
        match back {
            UpMsg::SessionJoined { csrf_token } => assert_eq!(csrf_token, "token-abc123"),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn view_patch_round_trip() {
        let msg = DownMsg::ViewPatch {
            target: "main".to_string(),
            html: "<p>updated</p>".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        let back: DownMsg = serde_json::from_str(&json).unwrap();
        match back {
            DownMsg::ViewPatch { target, html } => {
                assert_eq!(target, "main");
                assert_eq!(html, "<p>updated</p>");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn diagnostic_level_tags() {
        assert_eq!(DiagnosticLevel::Info.to_string(), "INFO");
        assert_eq!(DiagnosticLevel::Warning.to_string(), "WARNING");
        assert_eq!(DiagnosticLevel::Error.to_string(), "ERROR");
    }
}
