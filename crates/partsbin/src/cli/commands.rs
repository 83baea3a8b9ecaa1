use super::print::{
    print_field_errors, print_messages, render_listing_detail, render_listing_rows, render_page,
    render_stats,
};
use super::setup::{AdminCommands, BrowseArgs, Cli, Commands, SessionCommands};
use anyhow::{Context, Result};
use clap::Parser;
use partsbinapp::api::CatalogApi;
use partsbinapp::commands::admin::ListingEdit;
use partsbinapp::commands::CmdResult;
use partsbinapp::error::CatalogError;
use partsbinapp::init::initialize;
use partsbinapp::state::fs::FileKv;
use partsbinapp::store::BackendStore;
use tracing_subscriber::EnvFilter;

type AppApi = CatalogApi<BackendStore, FileKv>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = initialize(cli.data.clone()).context("Failed to initialize partsbin")?;
    tracing::debug!(data_dir = %ctx.data_dir.display(), "starting");
    let mut api = ctx.api;

    let outcome = match cli.command {
        Some(Commands::Browse(args)) => handle_browse(&api, &args),
        Some(Commands::View { id }) => handle_view(&mut api, &id),
        Some(Commands::Fav { id }) => handle_simple(api.toggle_favorite(&id)),
        Some(Commands::Favorites) => handle_list(api.favorites()),
        Some(Commands::Recent) => handle_list(api.recent()),
        Some(Commands::Login { username, password }) => {
            handle_simple(api.login(&username, &password))
        }
        Some(Commands::Logout) => handle_simple(api.logout()),
        Some(Commands::Admin { command }) => handle_admin(&mut api, command),
        Some(Commands::Session {
            command: SessionCommands::End,
        }) => handle_simple(api.end_session()),
        None => handle_browse(&api, &BrowseArgs::default()),
    };

    outcome.map_err(report)
}

/// Installs the stderr log subscriber. `RUST_LOG` wins unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("partsbin=debug,partsbinapp=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Prints field-level detail for validation failures before the error is reported.
fn report(err: CatalogError) -> anyhow::Error {
    if let CatalogError::ValidationFailed(errors) = &err {
        print_field_errors(errors);
    }
    let retryable = err.is_retryable();
    let err = anyhow::Error::new(err);
    if retryable {
        err.context("Could not reach the listing store, try again")
    } else {
        err
    }
}

fn handle_browse(api: &AppApi, args: &BrowseArgs) -> partsbinapp::error::Result<()> {
    let result = api.browse(args.to_params())?;
    if let Some(page) = &result.page {
        print!("{}", render_page(page, &result));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(api: &mut AppApi, id: &str) -> partsbinapp::error::Result<()> {
    let result = api.view(id)?;
    for listing in &result.listed_listings {
        print!(
            "{}",
            render_listing_detail(listing, result.is_favorite(&listing.id))
        );
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(result: partsbinapp::error::Result<CmdResult>) -> partsbinapp::error::Result<()> {
    let result = result?;
    print!("{}", render_listing_rows(&result.listed_listings, &result));
    print_messages(&result.messages);
    Ok(())
}

fn handle_simple(result: partsbinapp::error::Result<CmdResult>) -> partsbinapp::error::Result<()> {
    let result = result?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_admin(api: &mut AppApi, command: AdminCommands) -> partsbinapp::error::Result<()> {
    match command {
        AdminCommands::List { term } => handle_list(api.admin_list(term.as_deref().unwrap_or(""))),
        AdminCommands::Create(fields) => {
            handle_simple(api.create(ListingEdit::from(fields).into_draft()))
        }
        AdminCommands::Edit { id, fields } => handle_simple(api.update(&id, fields.into())),
        AdminCommands::Delete { id } => handle_simple(api.delete(&id)),
        AdminCommands::Stats => {
            let result = api.dashboard()?;
            if let Some(stats) = &result.stats {
                print!("{}", render_stats(stats));
            }
            print_messages(&result.messages);
            Ok(())
        }
    }
}
