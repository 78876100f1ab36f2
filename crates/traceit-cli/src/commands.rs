use super::args::{AuthCommand, Cli, Commands, CommentCommand, ReportCommand};
use super::context::ExecutionContext;
use super::handlers;
use anyhow::Result;
use traceit_runtime::resolve_workspace_path;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(&cli);

    let data_dir = resolve_workspace_path(cli.data_dir.as_deref())?;

    let Some(command) = cli.command else {
        show_guidance();
        return Ok(());
    };

    let ctx = ExecutionContext::new(data_dir, cli.api_url.clone(), cli.format)?;

    match command {
        Commands::Init { api_url } => handlers::init::handle(&ctx, api_url),

        Commands::Auth { command } => match command {
            AuthCommand::Login {
                email,
                password,
                role,
            } => handlers::auth::login(&ctx, &email, &password, role.into()),
            AuthCommand::Register {
                name,
                email,
                password,
            } => handlers::auth::register(&ctx, &name, &email, &password),
            AuthCommand::Logout => handlers::auth::logout(&ctx),
            AuthCommand::Status => handlers::auth::status(&ctx),
        },

        Commands::Report { command } => match command {
            ReportCommand::List { all, status } => {
                handlers::report::list(&ctx, all, status.map(Into::into))
            }
            ReportCommand::Submit {
                title,
                description,
                image,
            } => handlers::report::submit(&ctx, title, description, image),
            ReportCommand::Show {
                report_id,
                comments,
            } => handlers::report::show(&ctx, &report_id, comments),
            ReportCommand::Approve { report_id } => handlers::report::approve(&ctx, &report_id),
            ReportCommand::Delete { report_id, yes } => {
                handlers::report::delete(&ctx, &report_id, yes)
            }
        },

        Commands::Comment { command } => match command {
            CommentCommand::List { report_id } => handlers::comment::list(&ctx, &report_id),
            CommentCommand::Post {
                report_id,
                content,
                reply_to,
            } => handlers::comment::post(&ctx, &report_id, content, reply_to),
        },

        Commands::Watch {
            report_id,
            feed,
            interval,
        } => handlers::watch::handle(&ctx, report_id, feed, interval),
    }
}

fn init_logging(cli: &Cli) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_filter()));

    // Logs go to stderr so plain/json stdout stays machine-readable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn show_guidance() {
    println!("traceit - campus lost & found from the terminal");
    println!();
    println!("Get started:");
    println!("  traceit init                       Write the initial config");
    println!("  traceit auth login --email <e> --password <p>");
    println!("  traceit report list                Browse approved items");
    println!("  traceit report submit --title <t> --description <d>");
    println!("  traceit comment list <report-id>   Read a discussion");
    println!("  traceit watch <report-id>          Follow a discussion live");
    println!();
    println!("Run 'traceit --help' for the full command list.");
}
