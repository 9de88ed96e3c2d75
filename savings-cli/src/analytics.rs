//! Analytics event dispatch.
//!
//! Every completed estimate produces one `tax_calculation` event. The
//! estimator itself never sees this layer; the presenter records events
//! through an injected [`AnalyticsSink`], so calculation stays pure and the
//! transport (structured log line, JSON-lines file) is swappable.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use savings_core::EntityType;

/// Event name recorded for every completed estimate.
pub const TAX_CALCULATION: &str = "tax_calculation";

/// One analytics event, ready for any transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub name: &'static str,
    pub income: Decimal,
    pub business_type: EntityType,
    pub savings: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    /// Builds a `tax_calculation` event stamped with the current time.
    pub fn tax_calculation(
        income: Decimal,
        business_type: EntityType,
        savings: Decimal,
    ) -> Self {
        Self {
            name: TAX_CALCULATION,
            income,
            business_type,
            savings,
            timestamp: Utc::now(),
        }
    }
}

/// Capability for recording analytics events.
///
/// Recording is fire-and-forget: sinks log delivery failures instead of
/// propagating them, since an estimate must never fail because its analytics
/// could not be written.
pub trait AnalyticsSink {
    fn record(
        &self,
        event: &AnalyticsEvent,
    );
}

/// Sink that emits events as structured log lines.
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn record(
        &self,
        event: &AnalyticsEvent,
    ) {
        info!(
            name = event.name,
            income = %event.income,
            business_type = %event.business_type,
            savings = %event.savings,
            "analytics event"
        );
    }
}

/// Sink that appends one JSON object per line to a file.
pub struct JsonLinesSink {
    file: Mutex<File>,
}

impl JsonLinesSink {
    /// Opens `path` for appending, creating it if needed.
    /// The directory must already exist.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = File::options().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AnalyticsSink for JsonLinesSink {
    fn record(
        &self,
        event: &AnalyticsEvent,
    ) {
        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(error) => {
                warn!(?error, "failed to serialize analytics event");
                return;
            }
        };

        // A poisoned lock only means an earlier writer panicked; the file
        // handle itself is still usable, so keep recording.
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = writeln!(file, "{line}") {
            warn!(?error, "failed to write analytics event");
        }
    }
}

/// Sink that collects events in memory. Intended for tests.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemorySink {
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AnalyticsSink for MemorySink {
    fn record(
        &self,
        event: &AnalyticsEvent,
    ) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
