/// Snapshot passed to a [`ProgressObserver`] after each chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Bytes fed to the hasher so far.
    pub bytes_processed: u64,

    /// Total expected bytes, if the source length is known.
    pub total_bytes: Option<u64>,
}

impl ProgressEvent {
    /// Percentage of completion.
    ///
    /// Returns `None` if `total_bytes` is unknown. A known empty source is 100%.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        self.total_bytes.map(|total| {
            if total == 0 {
                100.0
            } else {
                (self.bytes_processed as f64 / total as f64 * 100.0).min(100.0)
            }
        })
    }
}

/// Observer verdict after a progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    Cancel,
}

/// Receives progress during incremental hashing and may cancel it.
pub trait ProgressObserver {
    fn on_progress(&mut self, event: &ProgressEvent) -> Flow;
}

impl<F> ProgressObserver for F
where
    F: FnMut(&ProgressEvent) -> Flow,
{
    fn on_progress(&mut self, event: &ProgressEvent) -> Flow { self(event) }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _event: &ProgressEvent) -> Flow { Flow::Continue }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_unknown_total() {
        let event = ProgressEvent {
            bytes_processed: 10,
            total_bytes: None,
        };
        assert_eq!(event.percentage(), None);
    }

    #[test]
    fn test_percentage_empty_total() {
        let event = ProgressEvent {
            bytes_processed: 0,
            total_bytes: Some(0),
        };
        assert_eq!(event.percentage(), Some(100.0));
    }

    #[test]
    fn test_percentage_clamped_when_source_grows() {
        let event = ProgressEvent {
            bytes_processed: 300,
            total_bytes: Some(200),
        };
        assert_eq!(event.percentage(), Some(100.0));
    }

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        let mut observer = |event: &ProgressEvent| {
            seen.push(event.bytes_processed);
            Flow::Continue
        };
        let event = ProgressEvent {
            bytes_processed: 4,
            total_bytes: Some(8),
        };
        assert_eq!(observer.on_progress(&event), Flow::Continue);
        assert_eq!(seen, vec![4]);
    }
}
