use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

/// One line per event with every field in brackets:
/// `[UTC TIMESTAMP] [LEVEL] [SPAN{fields}] [TARGET: FILE:LINE]: MESSAGE`
///
/// Events outside any span show the last segment of their module path in
/// the span slot, so `core::matcher` events read `[matcher]`.
pub struct BracketedFormatter;

impl<S, N> FormatEvent<S, N> for BracketedFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        let now = chrono::Utc::now();
        write!(writer, "[{}] ", now.format("%Y-%m-%dT%H:%M:%S%.3fZ"))?;
        write!(writer, "[{:5}] ", metadata.level())?;

        match ctx.event_scope().and_then(|scope| scope.from_root().last()) {
            Some(span) => {
                write!(writer, "[{}", span.name())?;
                let extensions = span.extensions();
                if let Some(fields) = extensions.get::<FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write!(writer, "{{{}}}", fields)?;
                    }
                }
                write!(writer, "] ")?;
            }
            None => {
                let module = metadata.target().rsplit("::").next().unwrap_or("-");
                write!(writer, "[{}] ", module)?;
            }
        }

        if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
            write!(writer, "[{}: {}:{}]: ", metadata.target(), file, line)?;
        } else {
            write!(writer, "[{}]: ", metadata.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture_with(f: impl FnOnce()) -> String {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .event_format(BracketedFormatter)
            .with_writer(capture.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        capture.contents()
    }

    #[test]
    fn test_event_outside_span_uses_module_name() {
        let output = capture_with(|| tracing::warn!("falling back to gray"));

        assert!(output.starts_with('['));
        let target = "wardrobe_matcher::logging::formatter::tests";
        assert!(output.contains(&format!("Z] [WARN ] [tests] [{}: ", target)));
        assert!(output.ends_with("]: falling back to gray\n"));
    }

    #[test]
    fn test_event_inside_span_shows_span_fields() {
        let output = capture_with(|| {
            let span = tracing::info_span!("ingest", user = "user1");
            let _guard = span.enter();
            tracing::info!("stored item");
        });

        assert!(output.contains("[INFO ] [ingest{user=\"user1\"}] "));
        assert!(output.ends_with("stored item\n"));
    }
}
