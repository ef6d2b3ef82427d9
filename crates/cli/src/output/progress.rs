//! Progress spinner for transfer operations
//!
//! Uploads and downloads of unknown duration get an indeterminate spinner.
//! In quiet mode, or with --no-progress, the spinner is suppressed.

use super::OutputConfig;

/// Spinner wrapper around indicatif
#[derive(Debug)]
pub struct Spinner {
    bar: Option<indicatif::ProgressBar>,
}

impl Spinner {
    /// Create a spinner with a message, honoring the output configuration
    pub fn new(config: &OutputConfig, message: &str) -> Self {
        let bar = if config.quiet || config.no_progress {
            None
        } else {
            let bar = indicatif::ProgressBar::new_spinner();
            bar.set_style(
                indicatif::ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .expect("valid template"),
            );
            bar.set_message(message.to_string());
            bar.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(bar)
        };

        Self { bar }
    }

    /// Remove the spinner from the terminal
    pub fn clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_suppressed_when_quiet() {
        let config = OutputConfig {
            quiet: true,
            ..Default::default()
        };
        let spinner = Spinner::new(&config, "uploading");
        assert!(spinner.bar.is_none());
        spinner.clear();
    }

    #[test]
    fn test_spinner_suppressed_with_no_progress() {
        let config = OutputConfig {
            no_progress: true,
            ..Default::default()
        };
        let spinner = Spinner::new(&config, "uploading");
        assert!(spinner.bar.is_none());
    }
}
