use log::{info, warn};
use std::time::Duration;

/// Receives per-key warnings and run completion from the converter
///
/// The converter never logs recoverable problems directly; it reports them
/// here so callers decide where they go.
pub trait RunObserver {
    /// A recoverable problem while processing `key`
    fn on_warning(&mut self, key: &str, message: &str);

    /// The run finished (with or without output)
    fn on_run_complete(&mut self, duration: Duration);
}

/// Forwards observer events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl RunObserver for LogObserver {
    fn on_warning(&mut self, key: &str, message: &str) {
        warn!("{}: {}", key, message);
    }

    fn on_run_complete(&mut self, duration: Duration) {
        info!("Conversion finished in {} ms", duration.as_millis());
    }
}

/// Keeps observer events in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub warnings: Vec<(String, String)>,
    pub completed: Option<Duration>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings reported for one key
    pub fn warnings_for(&self, key: &str) -> Vec<&str> {
        self.warnings
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, message)| message.as_str())
            .collect()
    }
}

impl RunObserver for RecordingObserver {
    fn on_warning(&mut self, key: &str, message: &str) {
        self.warnings.push((key.to_string(), message.to_string()));
    }

    fn on_run_complete(&mut self, duration: Duration) {
        self.completed = Some(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer() {
        let mut observer = RecordingObserver::new();
        observer.on_warning("P001", "tag 'PatientID' not found");
        observer.on_warning("P002", "no auxiliary file matches key");
        observer.on_warning("P001", "could not read dimensions");

        assert_eq!(
            observer.warnings_for("P001"),
            vec!["tag 'PatientID' not found", "could not read dimensions"]
        );
        assert!(observer.completed.is_none());

        observer.on_run_complete(Duration::from_millis(12));
        assert_eq!(observer.completed, Some(Duration::from_millis(12)));
    }

    #[test]
    fn test_log_observer_does_not_panic() {
        let mut observer = LogObserver;
        observer.on_warning("P001", "message");
        observer.on_run_complete(Duration::ZERO);
    }
}
