use super::args::{CategoryCommand, Cli, Commands, ServiceCommand, SessionCommand, SpeakerCommand};
use super::handlers::{self, HandlerContext};
use crate::config::resolve_data_dir;
use anyhow::Result;
use confcat_engine::Page;

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;

    let ctx = HandlerContext::load(data_dir, cli.format)?;

    match cli.command {
        Commands::Init { force } => handlers::init::handle(&ctx, force),

        Commands::Collect { source } => handlers::collect::handle(&ctx, &source),

        Commands::Report { category } => handlers::report::handle(&ctx, category),

        Commands::Encode => handlers::encode::handle(&ctx),

        Commands::Run { source } => handlers::pipeline::handle(&ctx, &source),

        Commands::Serve => handlers::serve::handle(&ctx),

        Commands::Session { command } => match command {
            SessionCommand::Search { query, page } => handlers::session::search(
                &ctx,
                &query,
                &Page::new(page.limit, page.cursor.as_deref()),
            ),
            SessionCommand::Show { code } => handlers::session::show(&ctx, &code),
        },

        Commands::Category { command } => match command {
            CategoryCommand::List { key } => handlers::category::list(&ctx, &key),
            CategoryCommand::Sessions {
                category,
                value,
                page,
            } => handlers::category::sessions(
                &ctx,
                category,
                &value,
                &Page::new(page.limit, page.cursor.as_deref()),
            ),
            CategoryCommand::Level { level, page } => handlers::category::level(
                &ctx,
                &level,
                &Page::new(page.limit, page.cursor.as_deref()),
            ),
        },

        Commands::Speaker { command } => match command {
            SpeakerCommand::Search {
                name,
                limit,
                cursor,
            } => handlers::speaker::search(&ctx, &name, &Page::new(limit, cursor.as_deref())),
        },

        Commands::Service { command } => match command {
            ServiceCommand::Search { query, page } => handlers::service::search(
                &ctx,
                &query,
                &Page::new(page.limit, page.cursor.as_deref()),
            ),
        },
    }
}
