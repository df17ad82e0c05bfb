use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::TableMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for table metrics snapshots.
///
/// Writes the text exposition format so the output can be scraped by
/// Prometheus or forwarded to an OpenTelemetry collector. Write failures are
/// dropped; metrics are observational.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", &self.metric_name(suffix), value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_metric("gauge", &self.metric_name(suffix), value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<TableMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &TableMetricsSnapshot) {
        self.write_counter("add_calls_total", snapshot.add_calls);
        self.write_counter("promotions_total", snapshot.promotions);
        self.write_counter("admissions_total", snapshot.admissions);
        self.write_counter("replacements_total", snapshot.replacements);
        self.write_counter("buckets_created_total", snapshot.buckets_created);
        self.write_counter("buckets_dropped_total", snapshot.buckets_dropped);
        self.write_counter("lookup_calls_total", snapshot.lookup_calls);
        self.write_counter("lookup_hits_total", snapshot.lookup_hits);
        self.write_gauge("tracked_len", snapshot.tracked_len as u64);
        self.write_gauge("capacity", snapshot.capacity as u64);
        self.write_gauge("bucket_count", snapshot.bucket_count as u64);
        self.write_gauge("min_count", snapshot.min_count);
        self.write_gauge("observed", snapshot.observed);
    }
}
