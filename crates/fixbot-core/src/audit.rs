use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde::Serialize;

use crate::Result;

const AUDIT_MAX_TEXT: usize = 500;

/// One moderation attempt, as written to the audit log.
#[derive(Clone, Debug, Serialize)]
pub struct AuditEvent {
    pub timestamp: String,
    pub event: String,
    pub chat_id: i64,
    pub invoker_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<i64>,
    pub action: String,
    pub outcome: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEvent {
    pub fn moderation(
        chat_id: i64,
        invoker_id: i64,
        target_id: Option<i64>,
        action: &str,
        outcome: &str,
        error: Option<&str>,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            event: "moderation".to_string(),
            chat_id,
            invoker_id,
            target_id,
            action: action.to_string(),
            outcome: outcome.to_string(),
            error: error.map(|s| s.to_string()),
        }
    }

    /// `<timestamp> <action> chat=.. invoker=.. target=.. outcome=..[ error=".."]`
    fn plain_line(&self) -> String {
        let target = self
            .target_id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        let mut line = format!(
            "{} {} chat={} invoker={} target={} outcome={}",
            self.timestamp, self.action, self.chat_id, self.invoker_id, target, self.outcome
        );
        if let Some(err) = &self.error {
            line.push_str(&format!(" error={err:?}"));
        }
        line
    }
}

/// Append-only moderation log on local disk.
#[derive(Clone, Debug)]
pub struct AuditLogger {
    path: PathBuf,
    json: bool,
}

impl AuditLogger {
    pub fn new(path: impl Into<PathBuf>, json: bool) -> Self {
        Self {
            path: path.into(),
            json,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, mut event: AuditEvent) -> Result<()> {
        if let Some(s) = &event.error {
            event.error = Some(truncate_text(s, AUDIT_MAX_TEXT));
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if self.json {
            let line = serde_json::to_string(&event)?;
            writeln!(file, "{line}")?;
            return Ok(());
        }

        writeln!(file, "{}", event.plain_line())?;
        Ok(())
    }
}

pub fn truncate_text(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let mut out = s.chars().take(max_len).collect::<String>();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn tmp_file(prefix: &str) -> PathBuf {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(0))
            .as_nanos();
        let pid = std::process::id();
        PathBuf::from(format!("/tmp/{prefix}-{pid}-{ts}.log"))
    }

    #[test]
    fn truncate_text_adds_ellipsis() {
        let s = "a".repeat(AUDIT_MAX_TEXT + 10);
        let t = truncate_text(&s, AUDIT_MAX_TEXT);
        assert!(t.ends_with("..."));
        assert_eq!(t.chars().count(), AUDIT_MAX_TEXT + 3);
        assert_eq!(truncate_text("short", AUDIT_MAX_TEXT), "short");
    }

    #[test]
    fn json_lines_are_appended() {
        let log = AuditLogger::new(tmp_file("fixbot-audit-json"), true);
        log.write(AuditEvent::moderation(-1, 2, Some(3), "ban", "applied", None))
            .unwrap();
        log.write(AuditEvent::moderation(-1, 2, None, "kick", "failed", Some("boom")))
            .unwrap();

        let written = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["action"], "ban");
        assert_eq!(first["target_id"], 3);
        assert!(first.get("error").is_none());

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["error"], "boom");
        let _ = std::fs::remove_file(log.path());
    }

    #[test]
    fn plain_format_truncates_errors() {
        let log = AuditLogger::new(tmp_file("fixbot-audit-plain"), false);
        let long = "z".repeat(AUDIT_MAX_TEXT + 10);
        log.write(AuditEvent::moderation(-1, 2, Some(3), "unban", "failed", Some(&long)))
            .unwrap();
        log.write(AuditEvent::moderation(-1, 2, None, "kick", "not_administrator", None))
            .unwrap();

        let written = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);

        assert!(lines[0].contains(" unban chat=-1 invoker=2 target=3 outcome=failed error=\""));
        assert!(lines[0].ends_with("...\""));
        assert!(!written.contains(&long));

        assert!(lines[1].ends_with(" kick chat=-1 invoker=2 target=- outcome=not_administrator"));
        let _ = std::fs::remove_file(log.path());
    }
}
