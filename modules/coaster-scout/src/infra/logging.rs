use tracing_subscriber::filter::{Directive, EnvFilter};

/// Targets logged at `info` unless `RUST_LOG` says otherwise. `coaster`
/// prefixes `coaster_scout`, `coaster_common` and `coasterpedia_client`.
const DEFAULT_DIRECTIVES: [&str; 2] = ["coaster=info", "youtube_client=info"];

/// `RUST_LOG` filter with every workspace crate enabled at `info`.
pub fn env_filter() -> EnvFilter {
    DEFAULT_DIRECTIVES
        .iter()
        .filter_map(|d| d.parse::<Directive>().ok())
        .fold(EnvFilter::from_default_env(), EnvFilter::add_directive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn config_and_client_targets_are_enabled() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            coaster_common::Config::default().log_redacted();
            tracing::info!(target: "youtube_client", "client line");
            tracing::info!(target: "coasterpedia_client", "wiki line");
        });

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("YOUTUBE_API_KEY: <not set>"));
        assert!(output.contains("client line"));
        assert!(output.contains("wiki line"));
    }
}
