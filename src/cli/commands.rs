use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "aek",
    about = concat!("[~] ae-kiosk v", env!("CARGO_PKG_VERSION"), " - the electronics counter in your terminal"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different root directory
    #[arg(short = 'C', long = "root", global = true)]
    pub root: Option<String>,

    /// Directory for persisted state (overrides kiosk.toml)
    #[arg(long = "state-dir", global = true)]
    pub state_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalog entries
    Catalog(CatalogArgs),
    /// Show the current selection
    Selection,
    /// Add a catalog item to the selection
    Add(AddArgs),
    /// Set a selected item's quantity (0 removes it)
    Qty(QtyArgs),
    /// Remove an item from the selection
    Remove(RemoveArgs),
    /// Empty the selection
    Clear,
    /// Compose the enquiry email for the selection
    Enquiry(EnquiryArgs),
}

#[derive(Args)]
pub struct CatalogArgs {
    /// Filter by query (regex, falling back to literal text)
    #[arg(short = 'q', long = "query")]
    pub query: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Part number of the catalog item
    pub partnumber: String,
}

#[derive(Args)]
pub struct QtyArgs {
    /// Part number of the selected item
    pub partnumber: String,
    /// New quantity
    pub qty: f64,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Part number of the selected item
    pub partnumber: String,
}

#[derive(Args)]
pub struct EnquiryArgs {
    /// Open the composed mailto URL in the mail client
    #[arg(long)]
    pub send: bool,
}
