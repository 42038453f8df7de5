use autolink_common::Colors;
use autolink_core::Segment;
use serde::Serialize;
use serde_json::Value;

use crate::commands::OutputFormat;
use crate::error::CliError;
use crate::targets::LinkTarget;

/// A woven segment together with what the command line shows and opens for
/// it.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedSegment {
    #[serde(flatten)]
    pub segment: Segment,
    /// Link display text after truncation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<LinkTarget>,
    /// URL a viewer should open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl RenderedSegment {
    pub fn text(segment: Segment) -> Self {
        Self {
            segment,
            display: None,
            target: None,
            href: None,
        }
    }

    pub fn shown_text(&self) -> &str {
        self.display
            .as_deref()
            .unwrap_or_else(|| self.segment.display_text())
    }
}

/// Plain text with links highlighted. With `show_targets`, each link is
/// followed by its href in angle brackets.
pub fn render_text(segments: &[RenderedSegment], show_targets: bool) -> String {
    let mut out = String::new();
    for rendered in segments {
        if !rendered.segment.is_link() {
            out.push_str(rendered.shown_text());
            continue;
        }
        out.push_str(&Colors::link(rendered.shown_text()));
        if show_targets {
            if let Some(href) = &rendered.href {
                out.push(' ');
                out.push_str(&Colors::dim(&format!("<{href}>")));
            }
        }
    }
    out
}

pub trait Presenter {
    fn present_segments(&self, segments: &[RenderedSegment]);

    fn present_truncated(&self, original: &str, truncated: &str);

    fn present_matchers(&self, ids: &[&str]);

    fn present_error(&self, error: &CliError);
}

pub struct TextPresenter {
    pub verbose: bool,
}

impl Presenter for TextPresenter {
    fn present_segments(&self, segments: &[RenderedSegment]) {
        let rendered = render_text(segments, self.verbose);
        if rendered.ends_with('\n') {
            print!("{rendered}");
        } else {
            println!("{rendered}");
        }
    }

    fn present_truncated(&self, _original: &str, truncated: &str) {
        println!("{truncated}");
    }

    fn present_matchers(&self, ids: &[&str]) {
        println!("{}", Colors::bold("Custom matchers:"));
        for id in ids {
            println!("  {}", Colors::kind(id));
        }
    }

    fn present_error(&self, error: &CliError) {
        eprintln!("{} {}", Colors::error("Error:"), error);
        eprintln!("{} {}", Colors::dim("Suggestion:"), error.suggestion());
        if error.is_retryable() {
            eprintln!(
                "{}",
                Colors::dim("(This error may be transient - retry may succeed)")
            );
        }
    }
}

pub struct JsonPresenter;

fn print_json(value: &impl Serialize) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

impl Presenter for JsonPresenter {
    fn present_segments(&self, segments: &[RenderedSegment]) {
        print_json(&segments);
    }

    fn present_truncated(&self, original: &str, truncated: &str) {
        print_json(&serde_json::json!({
            "original": original,
            "truncated": truncated
        }));
    }

    fn present_matchers(&self, ids: &[&str]) {
        print_json(&serde_json::json!({ "matchers": ids }));
    }

    fn present_error(&self, error: &CliError) {
        let value: Value = error.to_json();
        eprintln!("{value}");
    }
}

pub fn create_presenter(format: OutputFormat, verbose: bool) -> Box<dyn Presenter> {
    match format {
        OutputFormat::Json => Box::new(JsonPresenter),
        OutputFormat::Text => Box::new(TextPresenter { verbose }),
    }
}
