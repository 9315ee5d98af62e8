use tracing_subscriber::{
    fmt::{self, format::FmtSpan, MakeWriter},
    layer::Layer as LayerTrait,
    registry::LookupSpan,
};

use crate::logging::config::{LogFormat, LoggingConfig};

/// Builds the fmt layer for the configured format.
///
/// Returned boxed to erase the concrete format type (json/pretty/compact).
pub fn build_formatter_from_config<S, W>(
    config: &LoggingConfig,
    writer: W,
) -> Box<dyn LayerTrait<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    match config.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .event_format(fmt::format().json().with_current_span(true))
                .with_writer(writer)
                .with_ansi(false)
                .with_target(config.with_target);
            Box::new(layer)
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .event_format(fmt::format().pretty())
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target)
                .with_thread_names(true);
            Box::new(layer)
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .event_format(fmt::format().compact())
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target);
            Box::new(layer)
        }
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::{prelude::*, registry::Registry};

    use super::*;
    use crate::logging::capture::VecMakeWriter;

    fn capture(format: LogFormat) -> String {
        let sink = VecMakeWriter::default();
        let config = LoggingConfig {
            format,
            with_ansi: false,
            ..Default::default()
        };
        let subscriber =
            Registry::default().with(build_formatter_from_config(&config, sink.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(event = "save", "subscriber registered");
        });

        sink.contents()
    }

    #[test]
    fn test_compact_output() {
        let out = capture(LogFormat::Compact);
        assert!(out.contains("subscriber registered"));
        assert!(out.contains("event=\"save\""));
    }

    #[test]
    fn test_json_output_is_json() {
        let out = capture(LogFormat::Json);
        let line = out.lines().next().expect("one line");
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["fields"]["message"], "subscriber registered");
        assert_eq!(value["fields"]["event"], "save");
    }

    #[test]
    fn test_pretty_output() {
        let out = capture(LogFormat::Pretty);
        assert!(out.contains("subscriber registered"));
    }
}
