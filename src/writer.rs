use crate::waiter::WaitOutcome;
use std::fmt::Debug;
use termcolor::{Color, ColorSpec, StandardStreamLock, WriteColor};

pub(crate) struct Writer<'a>(StandardStreamLock<'a>);

impl<'a> Writer<'a> {
    pub(crate) fn new(inner: StandardStreamLock<'a>) -> Self {
        Self(inner)
    }
}

impl<'a> Debug for Writer<'a> {
    fn fmt(&self, w: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        w.write_str("writer")
    }
}

impl<'a> std::io::Write for Writer<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.flush()
    }
}

impl<'a> WriteColor for Writer<'a> {
    fn supports_color(&self) -> bool {
        self.0.supports_color()
    }

    fn set_color(&mut self, spec: &ColorSpec) -> std::io::Result<()> {
        self.0.set_color(spec)
    }

    fn reset(&mut self) -> std::io::Result<()> {
        self.0.reset()
    }
}

/// Print a single line describing what the pre-flight check found.
pub(crate) fn write_outcome<W>(
    writer: &mut W,
    stack_name: &str,
    outcome: &WaitOutcome,
) -> std::io::Result<()>
where
    W: WriteColor,
{
    let mut name_spec = ColorSpec::new();
    name_spec.set_fg(Some(Color::Yellow));
    writer.set_color(&name_spec)?;
    write!(writer, "{}", stack_name)?;
    writer.reset()?;
    write!(writer, " | ")?;

    match outcome {
        WaitOutcome::Idle => writeln!(writer, "idle, ready to deploy"),
        WaitOutcome::Settled(status) => {
            if let Some(spec) = status.color_spec() {
                writer.set_color(&spec)?;
            }
            write!(writer, "{}", status)?;
            writer.reset()?;
            writeln!(writer, ", ready to deploy")
        }
        WaitOutcome::TimedOut => {
            let mut spec = ColorSpec::new();
            spec.set_fg(Some(Color::Red));
            writer.set_color(&spec)?;
            write!(writer, "still busy")?;
            writer.reset()?;
            writeln!(writer, ", gave up waiting")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack_status::StackStatus;
    use termcolor::Buffer;

    fn render(outcome: &WaitOutcome) -> String {
        let mut buffer = Buffer::no_color();
        write_outcome(&mut buffer, "wiki", outcome).unwrap();
        String::from_utf8(buffer.into_inner()).unwrap()
    }

    #[test]
    fn idle_line() {
        assert_eq!(render(&WaitOutcome::Idle), "wiki | idle, ready to deploy\n");
    }

    #[test]
    fn settled_line_names_status() {
        assert_eq!(
            render(&WaitOutcome::Settled(StackStatus::UpdateRollbackComplete)),
            "wiki | UPDATE_ROLLBACK_COMPLETE, ready to deploy\n"
        );
    }

    #[test]
    fn timed_out_line() {
        assert_eq!(
            render(&WaitOutcome::TimedOut),
            "wiki | still busy, gave up waiting\n"
        );
    }
}
