//! # CLI Layer
//!
//! This module is **one possible UI client** for nestnote; it is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, prompts)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Logging, data directory, configuration and the API
//! 3. **API Dispatch**: Call the appropriate `NestnoteApi` method
//! 4. **Output Formatting**: Convert `CmdResult` into terminal output
//! 5. **Confirmation**: Ask before deleting a page that has sub-pages
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call the API and print results

use super::render::{render_json, render_messages, render_page, render_recent, render_tree, PageView};
use super::setup::{Cli, Commands};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use nestnoteapp::api::NestnoteApi;
use nestnoteapp::commands::tree::RecentOrder;
use nestnoteapp::commands::CmdResult;
use nestnoteapp::init::initialize;
use nestnoteapp::model::BlockType;
use nestnoteapp::store::fs::FileStore;
use nestnoteapp::store::DataStore;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: NestnoteApi<FileStore>,
    json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::New {
            parent,
            icon,
            title,
        }) => handle_new(&mut ctx, parent, icon, title),
        Some(Commands::Tree) | None => handle_tree(&mut ctx),
        Some(Commands::Show { page }) => handle_show(&mut ctx, &page),
        Some(Commands::Recent { created }) => handle_recent(&mut ctx, created),
        Some(Commands::Type { page, block, text }) => {
            let result = ctx.api.change_block_content(&page, &block, &text.join(" "))?;
            print_result(&result);
            Ok(())
        }
        Some(Commands::Add {
            page,
            after,
            block_type,
            text,
        }) => handle_add(&mut ctx, &page, after, block_type, &text.join(" ")),
        Some(Commands::RmBlock { page, block }) => {
            let result = ctx.api.delete_block(&page, &block)?;
            print_result(&result);
            Ok(())
        }
        Some(Commands::MoveBlock {
            page,
            block,
            position,
        }) => {
            let result = ctx.api.move_block(&page, &block, position)?;
            print_result(&result);
            Ok(())
        }
        Some(Commands::Retype {
            page,
            block,
            block_type,
        }) => {
            let result = ctx.api.change_block_type(&page, &block, block_type)?;
            print_result(&result);
            Ok(())
        }
        Some(Commands::Check { page, block }) => {
            let result = ctx.api.toggle_checked(&page, &block)?;
            print_result(&result);
            Ok(())
        }
        Some(Commands::Follow { page, block }) => handle_follow(&mut ctx, &page, &block),
        Some(Commands::Cleanup { page }) => {
            let result = ctx.api.cleanup_empty_blocks(&page)?;
            print_result(&result);
            Ok(())
        }
        Some(Commands::Rename { page, title }) => {
            let result = ctx.api.rename_page(&page, &title.join(" "))?;
            print_result(&result);
            Ok(())
        }
        Some(Commands::Icon { page, icon }) => {
            let result = ctx.api.set_icon(&page, icon)?;
            print_result(&result);
            Ok(())
        }
        Some(Commands::Mv { page, parent }) => {
            let result = ctx.api.move_page(&page, parent.as_deref())?;
            print_result(&result);
            Ok(())
        }
        Some(Commands::Rm { page, yes }) => handle_rm(&mut ctx, &page, yes),
        Some(Commands::Toggle { page }) => {
            let result = ctx.api.toggle_folder(&page)?;
            print_result(&result);
            Ok(())
        }
        Some(Commands::Doctor) => {
            let result = ctx.api.doctor()?;
            print_result(&result);
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "nestnote=debug,nestnoteapp=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_override = cli.data.as_ref().map(PathBuf::from);
    let ctx = initialize(data_override).context("Could not open the nestnote data directory")?;
    debug!(data_dir = %ctx.data_dir.display(), "Context ready");

    Ok(AppContext {
        api: ctx.api,
        json: cli.json,
    })
}

fn print_result(result: &CmdResult) {
    print!("{}", render_messages(&result.messages));
}

fn handle_new(
    ctx: &mut AppContext,
    parent: Option<String>,
    icon: Option<String>,
    title: Vec<String>,
) -> Result<()> {
    let title = title.join(" ");
    let title = (!title.trim().is_empty()).then_some(title);
    let result = ctx.api.create_page(title.as_deref(), parent.as_deref(), icon)?;
    print_result(&result);
    if let Some(document) = result.affected_documents.first() {
        println!("{}", document.id);
    }
    Ok(())
}

fn handle_tree(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.tree()?;
    if ctx.json {
        print!("{}", render_json(&result.tree)?);
    } else {
        print!("{}", render_tree(&result.tree));
    }
    Ok(())
}

fn handle_show(ctx: &mut AppContext, page: &str) -> Result<()> {
    let result = ctx.api.open(page)?;
    let id = result
        .affected_documents
        .first()
        .map(|d| d.id)
        .context("Opening the page returned nothing")?;
    let store = ctx.api.store();
    let document = store
        .get_document_by_id(&id)
        .context("Page vanished while opening")?;
    let blocks = store.get_blocks_by_document_id(&id);

    if ctx.json {
        print!(
            "{}",
            render_json(&PageView {
                document,
                blocks: &blocks,
            })?
        );
    } else {
        print!("{}", render_page(store, document, &blocks, Utc::now()));
        print!("{}", render_messages(&result.messages));
    }
    Ok(())
}

fn handle_recent(ctx: &mut AppContext, created: bool) -> Result<()> {
    let order = if created {
        RecentOrder::Created
    } else {
        RecentOrder::Updated
    };
    let result = ctx.api.recent(order)?;
    if ctx.json {
        print!("{}", render_json(&result.listed_documents)?);
    } else {
        print!("{}", render_recent(&result.listed_documents, created, Utc::now()));
    }
    Ok(())
}

fn handle_add(
    ctx: &mut AppContext,
    page: &str,
    after: Option<String>,
    block_type: BlockType,
    text: &str,
) -> Result<()> {
    let result = match after {
        Some(after) => {
            let added = ctx.api.add_block_after(page, &after, block_type)?;
            let focus = added
                .focus
                .context("The new block was not created")?;
            if text.is_empty() {
                added
            } else {
                ctx.api
                    .change_block_content(page, &focus.block_id.to_string(), text)?
            }
        }
        None => ctx.api.append_block(page, block_type, text)?,
    };
    print_result(&result);
    Ok(())
}

fn handle_follow(ctx: &mut AppContext, page: &str, block: &str) -> Result<()> {
    let result = ctx.api.open_page_block(page, block)?;
    print_result(&result);
    if let Some(target) = result.navigate_to {
        let id = target.to_string();
        handle_show(ctx, &id)?;
    }
    Ok(())
}

fn handle_rm(ctx: &mut AppContext, page: &str, yes: bool) -> Result<()> {
    let result = ctx.api.delete_page(page, yes)?;
    print_result(&result);
    if !result.needs_confirmation {
        return Ok(());
    }

    if !std::io::stdin().is_terminal() {
        bail!("Refusing to delete without confirmation; pass --yes");
    }
    if !confirm("Delete it anyway? [y/N] ")? {
        println!("Nothing deleted.");
        return Ok(());
    }
    let result = ctx.api.delete_page(page, true)?;
    print_result(&result);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{}", prompt);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
