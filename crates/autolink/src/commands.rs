use std::path::PathBuf;

use autolink_core::HashtagService;
use autolink_core::MentionService;
use autolink_core::TruncateLocation;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
pub use clap_complete::Shell;

use crate::targets::MapProvider;
use crate::targets::PhoneAction;

const LONG_ABOUT: &str = r#"autolink finds emails, urls, hashtags, mentions, phone numbers and
geographic coordinates in plain text and prints the text with each of them
turned into a link.

LINK KINDS:
    email     ops@example.com, mailto:ops@example.com
    url       https://example.com, www.example.com, example.com
    phone     555-1234, (555) 123-4567, 5551234567, +1 555 123 4567
    hashtag   #rustlang            (off unless --hashtag picks a service)
    mention   @ferris              (off unless --mention picks a service)
    latlng    40.7128, -74.0060    (off unless --latlng)

ENVIRONMENT:
    AUTOLINK_TRUNCATE           Default --truncate length (0 disables)
    AUTOLINK_TRUNCATE_CHARS     Default --truncate-chars
    AUTOLINK_TRUNCATE_LOCATION  Default --truncate-location
    AUTOLINK_MAX_INPUT          Largest accepted input in bytes
    AUTOLINK_LOG                Write logs to this file instead of stderr

EXAMPLES:
    autolink link "mail ops@example.com or call 555-1234"
    echo "see https://www.rust-lang.org/learn" | autolink link --json
    autolink link --latlng --map-provider apple "meet at 40.7128, -74.0060"
    autolink link --hashtag twitter --mention twitter -v "@ferris loves #rustlang"
    autolink truncate --length 20 https://example.com/a/very/long/path"#;

#[derive(Parser)]
#[command(name = "autolink")]
#[command(author, version)]
#[command(about = "Turn emails, urls, hashtags, mentions, phone numbers and coordinates into links")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Output as JSON (shorthand for --format json)
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Show link targets and debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Returns the effective output format, considering --json shorthand.
    pub fn effective_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect links in text and print the linked text
    #[command(long_about = r#"Detect links in text and print the linked text.

The text comes from the argument, from --file, or from standard input when
neither is given. Link display text is shortened to --truncate characters.

EXAMPLES:
    autolink link "call 555-1234 or visit test@x.com"
    autolink link --phone sms --no-email "call 555-1234 or visit test@x.com"
    autolink link --file notes.txt --json"#)]
    Link(LinkArgs),

    /// Shorten text the way link display text is shortened
    Truncate {
        /// Text to shorten
        text: String,

        /// Maximum length in characters
        #[arg(short = 'n', long)]
        length: Option<usize>,

        /// Characters inserted where text was cut
        #[arg(long = "chars")]
        chars: Option<String>,

        /// Where to cut: end, middle or smart
        #[arg(long, value_name = "LOCATION")]
        location: Option<TruncateLocation>,
    },

    /// List the custom matchers that can be enabled
    Matchers,

    /// Generate shell completions
    #[command(long_about = r#"Generate shell completion scripts.

EXAMPLES:
    autolink completions bash > ~/.local/share/bash-completion/completions/autolink
    autolink completions zsh > ~/.zfunc/_autolink
    autolink completions fish > ~/.config/fish/completions/autolink.fish"#)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct LinkArgs {
    /// Text to link (reads --file or stdin when omitted)
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Do not link email addresses
    #[arg(long)]
    pub no_email: bool,

    /// Do not link urls
    #[arg(long)]
    pub no_url: bool,

    /// How phone numbers are linked
    #[arg(long, value_enum, default_value_t = PhoneAction::Call)]
    pub phone: PhoneAction,

    /// Service hashtags link to
    #[arg(long, value_enum, default_value_t = HashtagArg::Off)]
    pub hashtag: HashtagArg,

    /// Service mentions link to
    #[arg(long, value_enum, default_value_t = MentionArg::Off)]
    pub mention: MentionArg,

    /// Link geographic coordinates
    #[arg(long)]
    pub latlng: bool,

    /// Keep the scheme and www. in url display text
    #[arg(long)]
    pub no_strip_prefix: bool,

    /// Keep a trailing slash in url display text
    #[arg(long)]
    pub no_strip_trailing_slash: bool,

    /// Maximum link display length in characters (0 disables)
    #[arg(long, value_name = "N")]
    pub truncate: Option<usize>,

    /// Characters inserted where display text was cut
    #[arg(long, value_name = "CHARS")]
    pub truncate_chars: Option<String>,

    /// Where display text is cut: end, middle or smart
    #[arg(long, value_name = "LOCATION")]
    pub truncate_location: Option<TruncateLocation>,

    /// Map service coordinates link to
    #[arg(long, value_enum, default_value_t = MapProvider::Google)]
    pub map_provider: MapProvider,

    /// Seed for the placeholder salt, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Prefer web urls over app deep links
    #[arg(long)]
    pub web_fallback: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HashtagArg {
    Off,
    Facebook,
    Instagram,
    Twitter,
}

impl HashtagArg {
    pub fn service(self) -> Option<HashtagService> {
        match self {
            HashtagArg::Off => None,
            HashtagArg::Facebook => Some(HashtagService::Facebook),
            HashtagArg::Instagram => Some(HashtagService::Instagram),
            HashtagArg::Twitter => Some(HashtagService::Twitter),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MentionArg {
    Off,
    Instagram,
    Soundcloud,
    Twitter,
}

impl MentionArg {
    pub fn service(self) -> Option<MentionService> {
        match self {
            MentionArg::Off => None,
            MentionArg::Instagram => Some(MentionService::Instagram),
            MentionArg::Soundcloud => Some(MentionService::Soundcloud),
            MentionArg::Twitter => Some(MentionService::Twitter),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
