use clap::{Args, Parser, Subcommand, ValueEnum};
use partsbinapp::commands::admin::ListingEdit;
use partsbinapp::model::Condition;
use partsbinapp::query::{CategoryFilter, QueryParams, SortMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "partsbin", bin_name = "partsbin", version)]
#[command(about = "Browse and manage an automotive parts catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Data directory (defaults to $PARTSBIN_DATA, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse listings with search, filters, sorting and paging
    #[command(alias = "ls")]
    Browse(BrowseArgs),

    /// Show one listing (and remember it as recently viewed)
    View { id: String },

    /// Toggle a listing as favorite
    Fav { id: String },

    /// List favorite listings
    Favorites,

    /// List listings viewed this session, most recent first
    Recent,

    /// Log in as admin
    Login { username: String, password: String },

    /// Log out of the admin area
    Logout,

    /// Manage the catalog (requires login)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Browsing session commands
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
}

#[derive(Args, Debug, Default)]
pub struct BrowseArgs {
    /// Case-insensitive text to find in title, description or tags
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only this category ("all" for every category)
    #[arg(short, long)]
    pub category: Option<String>,

    #[arg(long, value_enum, default_value_t = SortArg::Newest)]
    pub sort: SortArg,

    /// Lowest price to include; ignored unless it is a number
    #[arg(long, value_name = "PRICE")]
    pub min_price: Option<String>,

    /// Highest price to include; ignored unless it is a number
    #[arg(long, value_name = "PRICE")]
    pub max_price: Option<String>,

    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Listings per page (defaults to the configured page size)
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl BrowseArgs {
    pub fn to_params(&self) -> QueryParams {
        QueryParams {
            search: self.search.clone().unwrap_or_default(),
            category: self
                .category
                .as_deref()
                .and_then(|c| c.parse::<CategoryFilter>().ok())
                .unwrap_or_default(),
            sort: self.sort.into(),
            min_price: self.min_price.clone().unwrap_or_default(),
            max_price: self.max_price.clone().unwrap_or_default(),
            page: self.page,
            // 0 asks the API for the configured size
            page_size: self.page_size.unwrap_or(0),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Newest => SortMode::Newest,
            SortArg::PriceLow => SortMode::PriceLow,
            SortArg::PriceHigh => SortMode::PriceHigh,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConditionArg {
    New,
    Used,
}

impl From<ConditionArg> for Condition {
    fn from(arg: ConditionArg) -> Self {
        match arg {
            ConditionArg::New => Condition::New,
            ConditionArg::Used => Condition::Used,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// List listings, optionally matching a title or category
    List { term: Option<String> },

    /// Create a listing
    Create(ListingArgs),

    /// Change fields of a listing; omitted fields keep their value
    Edit {
        id: String,
        #[command(flatten)]
        fields: ListingArgs,
    },

    /// Delete a listing
    Delete { id: String },

    /// Catalog statistics
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// End the browsing session, clearing recently viewed
    End,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ListingArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub price: Option<f64>,

    /// One of: Engine, Brakes, Lighting, Wheels, Exhaust, Electrical, Suspension, Body, Interior
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long, value_enum)]
    pub condition: Option<ConditionArg>,

    #[arg(long)]
    pub quantity: Option<u32>,

    /// Comma-separated tags, e.g. "performance, oem"
    #[arg(long)]
    pub tags: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<String>,

    /// Absolute image URL
    #[arg(long)]
    pub image: Option<String>,
}

impl From<ListingArgs> for ListingEdit {
    fn from(args: ListingArgs) -> Self {
        ListingEdit {
            title: args.title,
            description: args.description,
            price: args.price,
            category: args.category,
            condition: args.condition.map(Condition::from),
            quantity: args.quantity,
            tags: args.tags,
            location: args.location,
            lat: args.lat,
            lng: args.lng,
            image: args.image,
        }
    }
}
