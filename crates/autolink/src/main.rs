use clap::CommandFactory;
use clap::Parser;
use clap_complete::generate;

use autolink::AutolinkConfig;
use autolink::CliError;
use autolink::commands::Cli;
use autolink::commands::Commands;
use autolink::handlers;
use autolink::handlers::HandlerContext;
use autolink::presenter::Presenter;
use autolink::presenter::create_presenter;
use autolink_common::color_init;
use autolink_common::init_tracing;

fn main() {
    let cli = Cli::parse();

    color_init(cli.no_color);
    let telemetry = init_tracing(if cli.verbose { "debug" } else { "warn" });

    let presenter = create_presenter(cli.effective_format(), cli.verbose);
    let exit_code = match run(cli, presenter.as_ref()) {
        Ok(()) => 0,
        Err(e) => {
            presenter.present_error(&e);
            e.exit_code()
        }
    };

    // Flush buffered log lines before exiting.
    drop(telemetry);
    std::process::exit(exit_code);
}

fn run(cli: Cli, presenter: &dyn Presenter) -> Result<(), CliError> {
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        generate(*shell, &mut cmd, "autolink", &mut std::io::stdout());
        return Ok(());
    }

    let ctx = HandlerContext::new(presenter, AutolinkConfig::from_env());

    match cli.command {
        Commands::Completions { .. } => unreachable!(),
        Commands::Link(args) => handlers::handle_link(&ctx, args),
        Commands::Truncate {
            text,
            length,
            chars,
            location,
        } => handlers::handle_truncate(&ctx, text, length, chars, location),
        Commands::Matchers => handlers::handle_matchers(&ctx),
    }
}
