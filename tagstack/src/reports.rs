use crate::validator::Verdict;
use crate::{TPath, TResult};
use ariadne::{Color, Config, Report, Source};
use std::ops::Range;

#[macro_export]
macro_rules! error_report {
    (
        file: $file:expr,
        span: $span:expr,
        config: $config:expr,
        message: $message:expr
        $(, labels: {
            $($label_span:expr => {
                message: $label_msg:expr => $label_color:expr
            }),* $(,)?
        })?
        $(, notes: [$($note:expr),* $(,)?])?
        $(,)?
    ) => {{
        #[allow(unused_mut)]
        let mut report = ::ariadne::Report::build(::ariadne::ReportKind::Error, ($file, $span))
            .with_config($config)
            .with_message($message);

        $(
            $(
                let label = ::ariadne::Label::new(($file, $label_span))
                    .with_message($label_msg).with_color($label_color);

                report = report.with_label(label);
            )*
        )?

        $(
            $(
                report = report.with_note($note);
            )*
        )?

        report.finish()
    }};
}

pub type TReport<'a> = Report<'a, (&'a TPath, Range<usize>)>;

/// Collects the source excerpts of one document and prints them together.
#[derive(Debug)]
pub struct ReportsBag<'a> {
    reports: Vec<TReport<'a>>,
    file_name: &'a TPath,
    source_content: &'a str,
    color: bool,
}

impl<'a> ReportsBag<'a> {
    pub fn new(file_name: &'a TPath, source_content: &'a str, color: bool) -> Self {
        Self { reports: Vec::new(), file_name, source_content, color }
    }

    pub fn add(&mut self, report: TReport<'a>) {
        self.reports.push(report);
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Adds an excerpt explaining `verdict`. Valid documents add nothing.
    pub fn add_verdict(&mut self, verdict: &Verdict) {
        let file = self.file_name;
        let span = line_span(self.source_content, verdict.line());
        let config = Config::default().with_color(self.color);

        let (label, note) = match verdict {
            Verdict::Valid { .. } => return,
            Verdict::MissingDoctype => (
                "expected the document type declaration here".to_string(),
                "The first line must be exactly the declaration, e.g. <!DOCTYPE html>",
            ),
            Verdict::InvalidTag { tag, .. } => (
                format!("'{tag}' is unknown or closes a tag that is not the innermost open one"),
                "Closing tags must match the most recently opened tag",
            ),
            Verdict::SelfClosingTagClosed { tag, .. } => (
                format!("'{tag}' cannot have a closing tag"),
                "Self-closing tags are complete without a closing form",
            ),
            Verdict::UnclosedTag { tag, .. } => (
                format!("end of document reached while '{tag}' is still open"),
                "Every opened tag needs a matching closing tag",
            ),
            Verdict::UnterminatedTag { column, .. } => (
                format!("tag starting at column {column} is missing its '>'"),
                "A tag name has to end with '>' or a space on the same line",
            ),
        };

        self.add(error_report!(
            file: file,
            span: span.clone(),
            config: config,
            message: verdict.to_string(),
            labels: { span => { message: label => Color::BrightRed } },
            notes: [note]
        ));
    }

    /// Writes every collected report to stderr.
    pub fn print(&self) -> TResult<()> {
        for report in &self.reports {
            report.eprint((self.file_name, Source::from(self.source_content)))?;
        }
        Ok(())
    }
}

/// Character range covered by the 1-based `line` of `source`, without its line break.
/// Lines past the end map to an empty range at the end of the source.
pub fn line_span(source: &str, line: usize) -> Range<usize> {
    let mut start = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        let len = text.chars().count();
        if index + 1 == line {
            let content = text.trim_end_matches(['\n', '\r']).chars().count();
            return start..start + content;
        }
        start += len;
    }

    start..start
}
