//! Real-time channel protocol: inbound client messages and outbound envelopes.
//!
//! Both directions are JSON objects tagged by a kebab-case `type` field.

use serde::{Deserialize, Serialize};

use vitals_core::errors::{ProtocolError, VitalsErrorCode};
use vitals_core::models::{
    Alert, BackupSnapshot, DomActivity, DomActivityKind, ErrorDetail, Event, EventPayload,
    HealthState, NetworkSample, NewEvent, PerformanceSample, RecoveryAction, Severity,
};
use vitals_recovery::{RecoveryOutcome, RepairReport};

use crate::engine::{StatusReport, VitalsEngine};
use crate::tracing_setup::events;

/// Source tag for events ingested over the channel.
pub const CLIENT_SOURCE: &str = "client";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    ClientError {
        message: String,
        #[serde(default)]
        severity: Option<Severity>,
        #[serde(default)]
        stack: Option<String>,
        #[serde(default)]
        location: Option<String>,
    },
    PerformanceMetric {
        metric: String,
        value: f64,
        #[serde(default)]
        memory_usage_mb: Option<f64>,
    },
    NetworkRequest {
        url: String,
        #[serde(default)]
        method: Option<String>,
        #[serde(default)]
        status: Option<u16>,
        response_time_ms: f64,
    },
    DomChange {
        target: String,
        #[serde(default)]
        detail: serde_json::Value,
    },
    StateChange {
        target: String,
        #[serde(default)]
        detail: serde_json::Value,
    },
    GetStatus,
    CreateBackup,
    Rollback {
        #[serde(default, alias = "backupId")]
        backup_id: Option<String>,
    },
    Repair,
}

impl ClientMessage {
    /// Parse one inbound text frame.
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(text).map_err(|e| ProtocolError::Malformed {
            message: e.to_string(),
        })
    }

    /// The event an ingestion message maps to; `None` for control messages.
    pub fn into_event(self) -> Option<NewEvent> {
        let (severity, payload) = match self {
            Self::ClientError {
                message,
                severity,
                stack,
                location,
            } => (
                severity.unwrap_or(Severity::Medium),
                EventPayload::Error(ErrorDetail {
                    message,
                    stack,
                    location,
                    alert_rule: None,
                }),
            ),
            Self::PerformanceMetric {
                metric,
                value,
                memory_usage_mb,
            } => (
                Severity::Info,
                EventPayload::Performance(PerformanceSample {
                    metric,
                    value,
                    memory_usage_mb,
                }),
            ),
            Self::NetworkRequest {
                url,
                method,
                status,
                response_time_ms,
            } => (
                Severity::Info,
                EventPayload::Network(NetworkSample {
                    url,
                    method,
                    status,
                    response_time_ms,
                }),
            ),
            Self::DomChange { target, detail } => (
                Severity::Info,
                EventPayload::Dom(DomActivity {
                    kind: DomActivityKind::Mutation,
                    target,
                    detail,
                }),
            ),
            Self::StateChange { target, detail } => (
                Severity::Info,
                EventPayload::Dom(DomActivity {
                    kind: DomActivityKind::StateChange,
                    target,
                    detail,
                }),
            ),
            Self::GetStatus | Self::CreateBackup | Self::Rollback { .. } | Self::Repair => {
                return None
            }
        };
        Some(NewEvent::new(severity, CLIENT_SOURCE, payload))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    InitialEvents { events: Vec<Event> },
    Event { event: Event },
    Alert { alert: Alert },
    Health { health: HealthState },
    Recovery { outcome: RecoveryOutcome },
    /// A backup, rollback, or repair requested outside a recovery run.
    Action { action: RecoveryAction },
    RestartRequested { reason: String },
    Status { status: StatusReport },
    BackupCreated { backup: BackupSnapshot },
    RollbackResult {
        success: bool,
        backup_id: Option<String>,
    },
    RepairResult { report: RepairReport },
    Error { code: String, message: String },
}

impl ServerMessage {
    pub fn error<E: VitalsErrorCode + std::fmt::Display>(err: &E) -> Self {
        Self::Error {
            code: err.error_code().to_string(),
            message: err.to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"type":"error","code":"SERIALIZATION_ERROR","message":"unserializable reply"}"#
                .to_string()
        })
    }
}

impl VitalsEngine {
    /// Handle one inbound text frame and return the direct reply, if any.
    ///
    /// Ingestion messages reply through the broadcast feed only. Malformed
    /// frames and engine failures come back as an `error` reply.
    pub fn handle_raw(&self, text: &str) -> Option<ServerMessage> {
        let message = match ClientMessage::parse(text) {
            Ok(message) => message,
            Err(e) => {
                events::message_rejected(e.error_code(), &e.to_string());
                return Some(ServerMessage::error(&e));
            }
        };
        self.handle_message(message)
    }

    pub fn handle_message(&self, message: ClientMessage) -> Option<ServerMessage> {
        let reply = match message {
            ClientMessage::GetStatus => self
                .status()
                .map(|status| Some(ServerMessage::Status { status })),
            ClientMessage::CreateBackup => self
                .create_backup("manual")
                .map(|backup| Some(ServerMessage::BackupCreated { backup })),
            ClientMessage::Rollback { backup_id } => {
                self.rollback(backup_id.as_deref()).map(|success| {
                    Some(ServerMessage::RollbackResult { success, backup_id })
                })
            }
            ClientMessage::Repair => self
                .repair()
                .map(|report| Some(ServerMessage::RepairResult { report })),
            ingest => match ingest.into_event() {
                Some(event) => self.add_event(event).map(|_| None),
                None => Ok(None),
            },
        };
        reply.unwrap_or_else(|e| {
            events::message_rejected(e.error_code(), &e.to_string());
            Some(ServerMessage::error(&e))
        })
    }
}
