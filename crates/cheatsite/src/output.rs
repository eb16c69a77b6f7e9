//! Human-facing status lines for `check` and `nav`.
//!
//! Everything goes to stderr: `nav` owns stdout for its JSON manifest.

use console::{Style, Term};

/// Styled status printer.
pub(crate) struct Output {
    term: Term,
    ok: Style,
    warn: Style,
    fail: Style,
    heading: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red(),
            heading: Style::new().cyan().bold(),
        }
    }

    /// Config paths and summary counts.
    pub(crate) fn info(&self, msg: &str) {
        self.line(None, msg);
    }

    /// Final verdict of a passing check.
    pub(crate) fn success(&self, msg: &str) {
        self.line(Some(&self.ok), msg);
    }

    /// Orphan documents and other findings that don't fail the run.
    pub(crate) fn warning(&self, msg: &str) {
        self.line(Some(&self.warn), msg);
    }

    /// The error that ends the process.
    pub(crate) fn error(&self, msg: &str) {
        self.line(Some(&self.fail), msg);
    }

    /// Site title at the top of a report.
    pub(crate) fn highlight(&self, msg: &str) {
        self.line(Some(&self.heading), msg);
    }

    // Write errors on a closed stderr are dropped; there is nowhere to report them.
    fn line(&self, style: Option<&Style>, msg: &str) {
        let _ = match style {
            Some(style) => self.term.write_line(&style.apply_to(msg).to_string()),
            None => self.term.write_line(msg),
        };
    }
}
