//! Structured, serializable record of a single `resolve` call, plus the
//! non-fatal [`Warning`] side channel.

use crate::error::{ElementPath, Warning};

#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct RoundLog {
    pub round: u32,
    pub placeholders_resolved: Vec<PlaceholderResolution>,
    pub elements_processed: Vec<ElementPath>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct PlaceholderResolution {
    pub path: ElementPath,
    pub resolved_base: ElementPath,
}

/// Accumulates a per-round trace of what the resolver driver did, so a
/// caller can dump it as JSON for diffing between runs.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct ResolveLog {
    pub rounds: Vec<RoundLog>,
}

impl ResolveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_round(&mut self, round: u32) {
        self.rounds.push(RoundLog {
            round,
            ..Default::default()
        });
    }

    pub fn record_placeholder_resolution(&mut self, path: ElementPath, resolved_base: ElementPath) {
        if let Some(current) = self.rounds.last_mut() {
            current.placeholders_resolved.push(PlaceholderResolution { path, resolved_base });
        }
    }

    pub fn record_processed(&mut self, path: ElementPath) {
        if let Some(current) = self.rounds.last_mut() {
            current.elements_processed.push(path);
        }
    }
}

/// Appends a warning to the caller-supplied sink and logs it at `warn` level.
pub fn emit_warning(sink: &mut Vec<Warning>, warning: Warning) {
    log::warn!("{warning:?}");
    sink.push(warning);
}
