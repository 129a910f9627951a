use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for pipeline orchestration events.
///
/// Decouples use cases from specific output mechanisms (stdout, log crate)
/// so each caller can observe pipeline behavior without changing the
/// orchestration code.
pub trait PipelineLogger {
    /// Report photo-level progress.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named pipeline stage took for one photo.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. faces detected in one photo).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-pipeline summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events. Used by tests.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger: progress and status lines on stdout, per-stage
/// timings and metrics collected for a summary at the end of the run.
pub struct StdoutPipelineLogger {
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    total_photos: usize,
}

impl StdoutPipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            total_photos: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let photos = self.total_photos;
        let mut lines = vec![format!(
            "Pipeline summary ({photos} photos, {:.1}s total):",
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len().max(1) as f64;
            let pct = if elapsed_ms > 0.0 {
                total_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "  {stage:8}: avg {avg_ms:7.1}ms  total {total_ms:8.0}ms  ({pct:4.1}%)"
            ));
        }

        let mut metric_names: Vec<_> = self.metrics.keys().collect();
        metric_names.sort();
        for name in metric_names {
            let values = &self.metrics[name];
            let sum: f64 = values.iter().sum();
            let avg = sum / values.len().max(1) as f64;
            lines.push(format!("  {name}: total {sum:.0}, avg {avg:.1}"));
        }

        Some(lines.join("\n"))
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.total_photos = total;
        if total > 0 {
            let pct = current as f64 / total as f64 * 100.0;
            println!("Processing: {current}/{total} photos ({pct:.1}%)");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        println!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullPipelineLogger;
        logger.progress(1, 10);
        logger.timing("detect", 5.0);
        logger.metric("faces", 3.0);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_timing_records_values() {
        let mut logger = StdoutPipelineLogger::new();
        logger.timing("fetch", 20.0);
        logger.timing("fetch", 30.0);
        logger.timing("detect", 5.0);

        assert_eq!(logger.timings["fetch"], vec![20.0, 30.0]);
        assert_eq!(logger.timings["detect"], vec![5.0]);
        assert!(!logger.timings.contains_key("draw"));
    }

    #[test]
    fn test_summary_includes_stages_and_metric_totals() {
        let mut logger = StdoutPipelineLogger::new();
        logger.progress(2, 2);
        logger.timing("fetch", 20.0);
        logger.timing("detect", 30.0);
        logger.metric("faces", 3.0);
        logger.metric("faces", 0.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Pipeline summary (2 photos"));
        assert!(summary.contains("fetch"));
        assert!(summary.contains("detect"));
        assert!(summary.contains("faces: total 3, avg 1.5"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        assert!(StdoutPipelineLogger::new().summary_string().is_none());
    }

    #[test]
    fn test_info_is_printed_not_recorded() {
        let mut logger = StdoutPipelineLogger::new();
        for i in 0..100 {
            logger.info(&format!("Saved visualization at dbg/{i}.png"));
        }
        assert!(logger.timings.is_empty());
        assert!(logger.metrics.is_empty());
        assert!(logger.summary_string().is_none());
    }
}
