//! JSON Event Sink
//!
//! Outputs pipeline events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, mut event: Value) {
        if let Value::Object(map) = &mut event {
            map.insert(
                "ts".to_string(),
                Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            );
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON shape of one event, without the timestamp
pub fn event_json(event: &DeployEvent) -> Value {
    match event {
        DeployEvent::Started {
            pipeline,
            target,
            host,
            version,
        } => json!({
            "event": "start",
            "pipeline": pipeline.as_str(),
            "target": target,
            "host": host,
            "version": version,
        }),

        DeployEvent::StepStarted { step, detail } => json!({
            "event": "step_start",
            "step": step.as_str(),
            "detail": detail,
        }),

        DeployEvent::StepDone { step } => json!({
            "event": "step_done",
            "step": step.as_str(),
        }),

        DeployEvent::StepSkipped { step, reason } => json!({
            "event": "step_skipped",
            "step": step.as_str(),
            "reason": reason,
        }),

        DeployEvent::PromptSkipped { message } => json!({
            "event": "prompt_skipped",
            "message": message,
        }),

        DeployEvent::ServiceTolerated {
            service,
            action,
            reason,
        } => json!({
            "event": "service_tolerated",
            "service": service,
            "action": action.as_str(),
            "reason": reason.as_str(),
            "level": if reason.is_warning() { "warning" } else { "info" },
        }),

        DeployEvent::RemoteError { message } => json!({
            "event": "remote_error",
            "message": message,
        }),

        DeployEvent::RemoteOutput { step, output } => json!({
            "event": "remote_output",
            "step": step.as_str(),
            "output": output,
        }),

        DeployEvent::DependenciesInstalled {
            node_version,
            npm_version,
            nvm_invoked,
        } => json!({
            "event": "dependencies_installed",
            "node_version": node_version,
            "npm_version": npm_version,
            "nvm_invoked": nvm_invoked,
        }),

        DeployEvent::Declined { pipeline } => json!({
            "event": "declined",
            "pipeline": pipeline.as_str(),
        }),

        DeployEvent::Completed {
            pipeline,
            elapsed_ms,
        } => json!({
            "event": "complete",
            "pipeline": pipeline.as_str(),
            "status": "success",
            "elapsed_ms": *elapsed_ms as u64,
        }),

        DeployEvent::Failed { pipeline, error } => json!({
            "event": "complete",
            "pipeline": pipeline.as_str(),
            "status": "failed",
            "error": error,
        }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(event_json(&event));
    }
}
