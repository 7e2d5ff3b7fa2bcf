//! Worker configuration.

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Maximum highlights selected per video
    pub max_highlights: usize,
    /// Process every Nth frame during subject tracking
    pub sample_rate: u64,
    /// EMA factor for crop position smoothing
    pub smoothing_alpha: f64,
    /// Work directory for per-job scratch space
    pub work_dir: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_highlights: 5,
            sample_rate: 10,
            smoothing_alpha: 0.3,
            work_dir: "/tmp/reelcut".to_string(),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            max_highlights: std::env::var("REELCUT_MAX_HIGHLIGHTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            sample_rate: std::env::var("REELCUT_SAMPLE_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|&rate| rate > 0)
                .unwrap_or(10),
            smoothing_alpha: std::env::var("REELCUT_SMOOTHING_ALPHA")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.3),
            work_dir: std::env::var("REELCUT_WORK_DIR")
                .unwrap_or_else(|_| "/tmp/reelcut".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WorkerConfig::default();
        assert_eq!(config.max_highlights, 5);
        assert_eq!(config.sample_rate, 10);
        assert_eq!(config.smoothing_alpha, 0.3);
    }

    #[test]
    fn test_zero_sample_rate_env_falls_back_to_default() {
        std::env::set_var("REELCUT_SAMPLE_RATE", "0");
        assert_eq!(WorkerConfig::from_env().sample_rate, 10);
        std::env::remove_var("REELCUT_SAMPLE_RATE");
    }
}
