use std::io::Read;

use autolink_core::DetectorOptions;
use autolink_core::LATLNG_MATCHER_ID;
use autolink_core::MatcherRegistry;
use autolink_core::StripPrefix;
use autolink_core::TruncateLocation;
use autolink_core::TruncateOptions;
use autolink_core::UrlOptions;
use autolink_core::WeaveOptions;
use autolink_core::Weaver;
use autolink_core::truncate;
use autolink_detect::PatternDetector;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::commands::LinkArgs;
use crate::config::AutolinkConfig;
use crate::error::CliError;
use crate::presenter::Presenter;
use crate::presenter::RenderedSegment;
use crate::targets::PhoneAction;
use crate::targets::TargetOptions;
use crate::targets::link_target;

pub type HandlerResult = Result<(), CliError>;

pub struct HandlerContext<'a> {
    pub presenter: &'a dyn Presenter,
    pub config: AutolinkConfig,
}

impl<'a> HandlerContext<'a> {
    pub fn new(presenter: &'a dyn Presenter, config: AutolinkConfig) -> Self {
        Self { presenter, config }
    }
}

pub fn handle_link(ctx: &HandlerContext<'_>, args: LinkArgs) -> HandlerResult {
    let text = read_input(&args)?;
    let segments = link_text(&text, &args, &ctx.config)?;
    ctx.presenter.present_segments(&segments);
    Ok(())
}

pub fn handle_truncate(
    ctx: &HandlerContext<'_>,
    text: String,
    length: Option<usize>,
    chars: Option<String>,
    location: Option<TruncateLocation>,
) -> HandlerResult {
    let length = length.unwrap_or(ctx.config.truncate);
    if length == 0 {
        return Err(CliError::InvalidInput(
            "truncate length must be greater than zero".to_string(),
        ));
    }
    let options = TruncateOptions::new(length)
        .with_ellipsis(chars.unwrap_or_else(|| ctx.config.truncate_chars.clone()))
        .with_location(location.unwrap_or(ctx.config.truncate_location));
    let truncated = truncate(&text, &options);
    ctx.presenter.present_truncated(&text, &truncated);
    Ok(())
}

pub fn handle_matchers(ctx: &HandlerContext<'_>) -> HandlerResult {
    let ids: Vec<&str> = MatcherRegistry::builtin().ids().collect();
    ctx.presenter.present_matchers(&ids);
    Ok(())
}

fn read_input(args: &LinkArgs) -> Result<String, CliError> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path).map_err(|e| CliError::io(Some(path.clone()), e));
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| CliError::io(None, e))?;
    Ok(text)
}

/// Applies the command line flags on top of `config`.
fn effective_config(args: &LinkArgs, config: &AutolinkConfig) -> AutolinkConfig {
    let mut config = config.clone();
    if let Some(length) = args.truncate {
        config = config.with_truncate(length);
    }
    if let Some(chars) = &args.truncate_chars {
        config = config.with_truncate_chars(chars.clone());
    }
    if let Some(location) = args.truncate_location {
        config = config.with_truncate_location(location);
    }
    config
}

pub fn weave_options(args: &LinkArgs) -> WeaveOptions {
    let detector = DetectorOptions {
        email: !args.no_email,
        hashtag: args.hashtag.service(),
        mention: args.mention.service(),
        phone: args.phone != PhoneAction::Off,
        urls: UrlOptions::from(!args.no_url),
        strip_prefix: StripPrefix::from(!args.no_strip_prefix),
        strip_trailing_slash: !args.no_strip_trailing_slash,
    };
    let options = WeaveOptions::new(detector);
    if args.latlng {
        options.with_custom(LATLNG_MATCHER_ID)
    } else {
        options
    }
}

/// Weaves `text` and attaches display text and targets to every link.
pub fn link_text(
    text: &str,
    args: &LinkArgs,
    config: &AutolinkConfig,
) -> Result<Vec<RenderedSegment>, CliError> {
    let config = effective_config(args, config);
    let detector = PatternDetector::new().with_max_input_len(config.max_input_len);
    let weaver = Weaver::new(&detector);
    let options = weave_options(args);

    let segments = match args.seed {
        Some(seed) => weaver.weave_with_rng(text, &options, &mut StdRng::seed_from_u64(seed))?,
        None => weaver.weave(text, &options)?,
    };
    debug!(segments = segments.len(), "text woven");

    let truncation = config.truncate_options();
    let targets = TargetOptions {
        phone: args.phone,
        map_provider: args.map_provider,
    };

    Ok(segments
        .into_iter()
        .map(|segment| {
            let Some(record) = segment.record() else {
                return RenderedSegment::text(segment);
            };
            let target = link_target(record, &targets);
            let display = match &truncation {
                Some(options) => truncate(segment.display_text(), options),
                None => segment.display_text().to_string(),
            };
            RenderedSegment {
                href: Some(target.preferred(args.web_fallback).to_string()),
                display: Some(display),
                target: Some(target),
                segment,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Cli;
    use crate::commands::Commands;
    use autolink_core::MatchKind;
    use clap::Parser;

    fn link_args(argv: &[&str]) -> LinkArgs {
        let mut full = vec!["autolink", "link"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Link(args) => args,
            other => panic!("Expected Link command, got {:?}", other),
        }
    }

    fn shown_text(segments: &[RenderedSegment]) -> String {
        segments.iter().map(RenderedSegment::shown_text).collect()
    }

    fn has_links(segments: &[RenderedSegment]) -> bool {
        segments.iter().any(|s| s.segment.is_link())
    }

    fn kinds(segments: &[RenderedSegment]) -> Vec<MatchKind> {
        segments
            .iter()
            .filter_map(|s| s.segment.record())
            .map(|r| r.kind())
            .collect()
    }

    #[test]
    fn test_phone_off_disables_phone_detection() {
        let args = link_args(&["--phone", "off", "call 555-1234 or visit test@x.com"]);
        let segments = link_text(args.text.as_deref().unwrap(), &args, &AutolinkConfig::default()).unwrap();
        assert_eq!(kinds(&segments), vec![MatchKind::Email]);
    }

    #[test]
    fn test_display_is_truncated_but_source_is_kept() {
        let args = link_args(&["--truncate", "12", "--truncate-location", "end", "x"]);
        let text = "see https://example.com/a/really/long/path";
        let segments = link_text(text, &args, &AutolinkConfig::default()).unwrap();

        let link = segments.iter().find(|s| s.segment.is_link()).unwrap();
        assert_eq!(link.display.as_deref(), Some("example.co.."));
        assert_eq!(link.segment.source_text(), "https://example.com/a/really/long/path");
        assert_eq!(link.href.as_deref(), Some("https://example.com/a/really/long/path"));
    }

    #[test]
    fn test_zero_truncate_keeps_full_display() {
        let args = link_args(&["--truncate", "0", "x"]);
        let text = "see https://example.com/a/really/long/path";
        let segments = link_text(text, &args, &AutolinkConfig::default().with_truncate(5)).unwrap();
        assert_eq!(shown_text(&segments), "see example.com/a/really/long/path");
    }

    #[test]
    fn test_web_fallback_prefers_web_url() {
        let args = link_args(&["--mention", "twitter", "--web-fallback", "x"]);
        let segments = link_text("hi @ferris", &args, &AutolinkConfig::default()).unwrap();
        let link = segments.iter().find(|s| s.segment.is_link()).unwrap();
        assert_eq!(link.href.as_deref(), Some("https://twitter.com/ferris"));
        assert_eq!(
            link.target.as_ref().map(|t| t.url.as_str()),
            Some("twitter://user?screen_name=ferris")
        );
    }

    #[test]
    fn test_latlng_flag_enables_custom_matcher() {
        let text = "meet me at 40.7128, -74.0060 tomorrow";
        let without = link_text(text, &link_args(&["x"]), &AutolinkConfig::default()).unwrap();
        assert!(!has_links(&without));

        let args = link_args(&["--latlng", "--seed", "3", "x"]);
        let with = link_text(text, &args, &AutolinkConfig::default()).unwrap();
        assert_eq!(kinds(&with), vec![MatchKind::LatLng]);
    }

    #[test]
    fn test_input_limit_comes_from_config() {
        let args = link_args(&["x"]);
        let err = link_text("too long", &args, &AutolinkConfig::default().with_max_input_len(3)).unwrap_err();
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_weave_options_from_flags() {
        let args = link_args(&["--no-email", "--no-url", "--no-strip-prefix", "x"]);
        let options = weave_options(&args);
        assert!(!options.detector.email);
        assert!(!options.detector.urls.is_enabled());
        assert!(!options.detector.strip_prefix.scheme);
        assert!(options.detector.strip_trailing_slash);
        assert!(options.custom.is_empty());
    }
}
