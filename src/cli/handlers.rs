use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::{catalog_io, config_io};
use crate::model::{CatalogItem, KioskConfig};
use crate::ops::{Enquiry, filter_catalog};
use crate::store::{FileBackend, SelectionStore, default_state_dir};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Everything a subcommand needs: the resolved root, the parsed config,
/// and a store on the resolved state directory.
pub struct Context {
    pub root: PathBuf,
    pub config: KioskConfig,
    pub store: SelectionStore,
}

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let root = resolve_root(cli.root.as_deref())?;
    let config = config_io::read_config(&root)?;
    let state_dir = resolve_state_dir(&root, &config, cli.state_dir.as_deref());
    let _ = crate::io::logging::init(&state_dir);
    let mut ctx = Context {
        store: SelectionStore::new(Box::new(FileBackend::new(state_dir))),
        root,
        config,
    };

    match cli.command {
        // No subcommand is handled in main.rs (launches the TUI)
        None => Ok(()),
        Some(cmd) => match cmd {
            Commands::Catalog(args) => cmd_catalog(&ctx, args, json),
            Commands::Selection => cmd_selection(&ctx, json),
            Commands::Add(args) => cmd_add(&mut ctx, args, json),
            Commands::Qty(args) => cmd_qty(&mut ctx, args, json),
            Commands::Remove(args) => cmd_remove(&mut ctx, args, json),
            Commands::Clear => cmd_clear(&mut ctx, json),
            Commands::Enquiry(args) => cmd_enquiry(&ctx, args, json),
        },
    }
}

pub fn resolve_root(cli_root: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match cli_root {
        Some(dir) => std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e).into()),
        None => Ok(std::env::current_dir()?),
    }
}

/// State directory precedence: --state-dir, then [store] dir from
/// kiosk.toml, then the platform data dir.
pub fn resolve_state_dir(root: &Path, config: &KioskConfig, cli_override: Option<&str>) -> PathBuf {
    if let Some(dir) = cli_override {
        return root.join(dir);
    }
    if let Some(dir) = &config.store.dir {
        return root.join(dir);
    }
    default_state_dir().unwrap_or_else(|| root.join(".ae-kiosk"))
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_catalog(ctx: &Context, args: CatalogArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let items = catalog_io::load_catalog(&ctx.root, &ctx.config.catalog)?;
    let query = args.query.unwrap_or_default();
    let filtered = filter_catalog(&items, &query);
    let selection = ctx.store.selection();

    if json {
        let out = catalog_to_json(&filtered, &selection);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for item in &filtered {
            let selected = selection.iter().any(|s| s.partnumber == item.partnumber);
            println!("{}", format_catalog_line(item, selected));
        }
        if filtered.is_empty() {
            println!("no products match '{}'", query);
        }
    }
    Ok(())
}

fn cmd_selection(ctx: &Context, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    print_selection(ctx, json)
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &mut Context, args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let items = catalog_io::load_catalog(&ctx.root, &ctx.config.catalog)?;
    let item = find_item(&items, &args.partnumber)?;
    ctx.store
        .add_item(item.partnumber.clone(), item.title.clone(), item.image.clone());
    print_selection(ctx, json)
}

fn cmd_qty(ctx: &mut Context, args: QtyArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    // non-finite and unknown part numbers are ignored, zero removes
    ctx.store.update_quantity(&args.partnumber, args.qty);
    print_selection(ctx, json)
}

fn cmd_remove(ctx: &mut Context, args: RemoveArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    ctx.store.remove_item(&args.partnumber);
    print_selection(ctx, json)
}

fn cmd_clear(ctx: &mut Context, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    ctx.store.clear();
    print_selection(ctx, json)
}

fn cmd_enquiry(ctx: &Context, args: EnquiryArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let selection = ctx.store.selection();
    if selection.is_empty() {
        return Err("the selection is empty; add items first (aek add <PARTNUMBER>)".into());
    }
    let enquiry = Enquiry::for_selection(&ctx.config.shop, &selection);

    if json {
        let out = EnquiryJson {
            recipient: &enquiry.recipient,
            subject: &enquiry.subject,
            body: &enquiry.body,
            mailto: enquiry.to_mailto(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", enquiry.to_mailto());
    }

    if args.send {
        enquiry.send()?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn find_item<'a>(
    items: &'a [CatalogItem],
    partnumber: &str,
) -> Result<&'a CatalogItem, Box<dyn std::error::Error>> {
    items
        .iter()
        .find(|i| i.partnumber.eq_ignore_ascii_case(partnumber))
        .ok_or_else(|| format!("unknown part number '{}'", partnumber).into())
}

fn print_selection(ctx: &Context, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let items = ctx.store.selection();
    if json {
        let out = SelectionJson { count: items.len(), items: &items };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if items.is_empty() {
        println!("selection is empty");
    } else {
        for item in &items {
            println!("{}", format_selection_line(item));
        }
    }
    Ok(())
}
