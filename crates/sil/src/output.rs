//! Terminal reporting for the CLI commands.
//!
//! Status lines lead with a right-aligned verb (`      Synced 12 file(s)`),
//! detail lines are indented below the line they belong to. Everything goes
//! to stderr so command output stays pipeable.

use std::fmt::Display;

use console::{Style, Term};

/// Width of the verb column in status lines.
const VERB_WIDTH: usize = 12;

/// Terminal reporter.
pub(crate) struct Output {
    term: Term,
    verb: Style,
    warn: Style,
    fail: Style,
    heading: Style,
    detail: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            verb: Style::new().green().bold(),
            warn: Style::new().yellow().bold(),
            fail: Style::new().red().bold(),
            heading: Style::new().cyan().bold(),
            detail: Style::new().dim(),
        }
    }

    /// Print `verb` in the status column followed by `msg`.
    pub(crate) fn status(&self, verb: &str, msg: impl Display) {
        let verb = self.verb.apply_to(pad_verb(verb));
        self.line(&format!("{verb} {msg}"));
    }

    /// Print a `name: value` line, used for the settings a command runs with.
    pub(crate) fn field(&self, name: &str, value: impl Display) {
        let name = self.detail.apply_to(pad_verb(name));
        self.line(&format!("{name} {value}"));
    }

    pub(crate) fn warn(&self, msg: impl Display) {
        self.line(&format!("{} {msg}", self.warn.apply_to("warning:")));
    }

    pub(crate) fn fail(&self, msg: impl Display) {
        self.line(&format!("{} {msg}", self.fail.apply_to("error:")));
    }

    pub(crate) fn heading(&self, msg: impl Display) {
        self.line(&self.heading.apply_to(msg).to_string());
    }

    /// Print one indented detail line.
    pub(crate) fn detail(&self, msg: impl Display) {
        self.line(&detail_line(&self.detail.apply_to(msg)));
    }

    /// Print each item as a detail line.
    pub(crate) fn list<I>(&self, items: I)
    where
        I: IntoIterator,
        I::Item: Display,
    {
        for item in items {
            self.detail(item);
        }
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}

fn pad_verb(verb: &str) -> String {
    format!("{verb:>VERB_WIDTH$}")
}

fn detail_line(msg: &impl Display) -> String {
    format!("{:VERB_WIDTH$} {msg}", "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_verbs_right_aligned() {
        assert_eq!(pad_verb("Synced"), "      Synced");
        assert_eq!(pad_verb("Would remove"), "Would remove");
        assert_eq!(pad_verb("Longer than the column"), "Longer than the column");
    }

    #[test]
    fn test_details_line_up_with_messages() {
        assert_eq!(detail_line(&"research/NOTES.md"), "             research/NOTES.md");
        assert_eq!(
            detail_line(&"x").find('x'),
            format!("{} msg", pad_verb("Synced")).find('m')
        );
    }
}
