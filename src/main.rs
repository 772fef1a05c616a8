//! Command-line front end.
//!
//! A thin host around the library: it loads the configuration, opens the store,
//! feeds events to the browse controller and prints the rendered view models.
//! `Navigate` actions are carried out by printing the new location and feeding it
//! back as a `Load`, the same way a router would.
//!
//! ```text
//! carlot browse --brand BMW --fuel-type gasoline --sort price-low-high
//! carlot browse --location '/buy?search=tesla'
//! carlot show car-1
//! carlot login emily@example.com password123
//! carlot book car-1 --date 2024-04-02 --time 10:30
//! carlot sell --from-file draft.json
//! carlot update car-11 --price 24000 --status pending
//! carlot appointment appointment-2 confirmed
//! carlot dashboard
//! ```

#![allow(clippy::multiple_crate_versions)]

use carlot::app::{handle_event, load_draft, Action, BrowseState, Event};
use carlot::domain::{
    format_price, partition_upcoming, AppointmentStatus, Condition, FilterChoice, FuelType,
    ListingStatus, NewListing, Transmission,
};
use carlot::observability::init_tracing;
use carlot::query;
use carlot::session::{self, FileSessionSlot, SessionContext};
use carlot::ui::{
    render_cards, render_detail, render_filter_panel, render_page, FilterPanel, ListingCard,
    ListingDetail, ListingPage,
};
use carlot::{
    book_viewing, initialize, open_storage, sell_listing, set_appointment_status, update_listing,
    withdraw_listing, Config, Dashboard, ListingUpdate, MarketplaceError, SortKey, Storage,
    ViewingRequest,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "carlot",
    version,
    about = "Browse, filter and book viewings of cars for sale",
    long_about = None
)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// JSON catalog file; overrides `data_file` from the configuration
    #[arg(long, value_name = "FILE", global = true)]
    data_file: Option<PathBuf>,

    /// Record debug-level spans
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search and filter listings
    Browse(BrowseArgs),
    /// List every brand in the catalog
    Brands,
    /// Show one listing in detail
    Show { id: String },
    /// Most recently listed cars
    Recent {
        #[arg(short, long)]
        limit: Option<usize>,

        /// Use the featured-section size instead
        #[arg(long)]
        featured: bool,
    },
    /// Sign in and remember the session
    Login { email: String, password: String },
    /// Create an account and sign in
    Register {
        name: String,
        email: String,
        password: String,
    },
    /// Forget the remembered session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Request a viewing of a listing
    Book {
        listing_id: String,

        #[arg(long, value_name = "YYYY-MM-DD")]
        date: NaiveDate,

        #[arg(long, value_name = "HH:MM")]
        time: String,

        #[arg(long)]
        notes: Option<String>,
    },
    /// List your viewing appointments
    Appointments,
    /// Confirm, complete or cancel one of your appointments
    Appointment { id: String, status: AppointmentStatus },
    /// List a car for sale
    Sell(SellArgs),
    /// Change the price or status of one of your listings
    Update {
        id: String,

        #[arg(long)]
        price: Option<u64>,

        #[arg(long)]
        status: Option<ListingStatus>,
    },
    /// Withdraw one of your listings
    Delete { id: String },
    /// Your listings, appointments and transactions
    Dashboard,
}

#[derive(Args)]
struct SellArgs {
    /// Read the whole draft from a JSON file
    #[arg(long, value_name = "FILE", conflicts_with_all = ["title", "brand", "model", "year", "price", "description", "location"])]
    from_file: Option<PathBuf>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    brand: Option<String>,

    #[arg(long)]
    model: Option<String>,

    #[arg(long)]
    year: Option<u16>,

    #[arg(long)]
    price: Option<u64>,

    #[arg(long, default_value_t = 0)]
    mileage: u64,

    #[arg(long, default_value = "gasoline")]
    fuel_type: FuelType,

    #[arg(long, default_value = "automatic")]
    transmission: Transmission,

    #[arg(long, default_value = "good")]
    condition: Condition,

    #[arg(long)]
    description: Option<String>,

    /// Feature (repeatable)
    #[arg(long)]
    feature: Vec<String>,

    /// Image URL (repeatable)
    #[arg(long)]
    image: Vec<String>,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    location: Option<String>,
}

impl SellArgs {
    /// Missing text fields stay empty so validation can name them.
    fn draft(&self) -> carlot::Result<NewListing> {
        if let Some(path) = &self.from_file {
            return load_draft(path);
        }
        Ok(NewListing {
            title: self.title.clone().unwrap_or_default(),
            brand: self.brand.clone().unwrap_or_default(),
            model: self.model.clone().unwrap_or_default(),
            year: self.year,
            price: self.price,
            mileage: self.mileage,
            fuel_type: self.fuel_type,
            transmission: self.transmission,
            description: self.description.clone().unwrap_or_default(),
            features: self.feature.clone(),
            images: self.image.clone(),
            condition: self.condition,
            seller_id: String::new(),
            seller_name: String::new(),
            seller_phone: self.phone.clone(),
            location: self.location.clone().unwrap_or_default(),
        })
    }
}

#[derive(Args)]
struct BrowseArgs {
    /// Start from this location instead of the bare listing route
    #[arg(long)]
    location: Option<String>,

    /// Submit a search term
    #[arg(short, long)]
    search: Option<String>,

    /// Toggle a brand chip (repeatable)
    #[arg(short, long)]
    brand: Vec<String>,

    #[arg(long)]
    transmission: Vec<String>,

    #[arg(long)]
    fuel_type: Vec<String>,

    #[arg(long)]
    condition: Vec<String>,

    #[arg(long)]
    min_price: Option<u64>,

    #[arg(long)]
    max_price: Option<u64>,

    #[arg(long)]
    min_year: Option<u16>,

    #[arg(long)]
    max_year: Option<u16>,

    /// Sort option, e.g. `price-low-high`
    #[arg(long)]
    sort: Option<String>,

    /// Also print the filter sidebar
    #[arg(long)]
    filters: bool,
}

impl BrowseArgs {
    /// Sidebar edits in the order a user would make them.
    fn edits(&self) -> carlot::Result<Vec<Event>> {
        let mut events = Vec::new();
        let dimensions = [
            ("brands", &self.brand),
            ("transmission", &self.transmission),
            ("fuelType", &self.fuel_type),
            ("condition", &self.condition),
        ];
        for (dimension, values) in dimensions {
            for value in values {
                events.push(Event::Toggle(FilterChoice::parse(dimension, value)?));
            }
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            events.push(Event::SetPriceRange {
                min: self.min_price,
                max: self.max_price,
            });
        }
        if self.min_year.is_some() || self.max_year.is_some() {
            events.push(Event::SetYearRange {
                min: self.min_year,
                max: self.max_year,
            });
        }
        Ok(events)
    }
}

fn load_config(cli: &Cli) -> carlot::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::default(),
    };
    if let Some(path) = &cli.data_file {
        config.data_file = Some(path.clone());
    }
    if cli.verbose {
        config.trace_level = "debug".to_string();
    }
    Ok(config)
}

/// Feeds one event and carries out the resulting navigation.
fn dispatch(state: &mut BrowseState, store: &dyn Storage, event: &Event) -> carlot::Result<()> {
    let (_, actions) = handle_event(state, store, event)?;
    for action in actions {
        match action {
            Action::Navigate { location } => {
                println!("→ {location}");
                handle_event(state, store, &Event::Load { location })?;
            }
        }
    }
    Ok(())
}

fn browse(config: &Config, store: &dyn Storage, args: &BrowseArgs) -> carlot::Result<()> {
    let mut state = initialize(config);
    let location = args
        .location
        .clone()
        .unwrap_or_else(|| config.listing_route.clone());
    dispatch(&mut state, store, &Event::Load { location })?;

    let edits = args.edits()?;
    for event in &edits {
        dispatch(&mut state, store, event)?;
    }
    match &args.search {
        Some(term) => dispatch(&mut state, store, &Event::SubmitSearch(term.clone()))?,
        None if !edits.is_empty() => dispatch(&mut state, store, &Event::Apply)?,
        None => {}
    }
    if let Some(sort) = &args.sort {
        dispatch(&mut state, store, &Event::ChangeSort(SortKey::from_param(sort)))?;
    }

    let mut out = String::new();
    if args.filters {
        let brands = store.unique_brands()?;
        let panel = FilterPanel::build(&state, &brands, config.price_range, config.year_range);
        render_filter_panel(&mut out, &panel)?;
        out.push('\n');
    }
    render_page(&mut out, &ListingPage::from_state(&state))?;
    print!("{out}");
    Ok(())
}

fn session_slot(config: &Config) -> FileSessionSlot {
    FileSessionSlot::new(config.session_path())
}

fn print_dashboard(dashboard: &Dashboard) {
    println!(
        "Listings ({}, {} still for sale):",
        dashboard.listings.len(),
        format_price(dashboard.available_value())
    );
    for l in &dashboard.listings {
        println!("  {}  {}  {}  [{}]", l.id, l.title, format_price(l.price), l.status);
    }
    println!("Appointments:");
    for a in &dashboard.appointments {
        println!("  {}  {} {}  {}  [{}]", a.id, a.date, a.time, a.listing_id, a.status.as_str());
    }
    println!("Transactions:");
    for t in &dashboard.transactions {
        println!(
            "  {}  {}  {}  {} → {}  [{}]",
            t.id,
            t.date,
            format_price(t.price),
            t.seller_name,
            t.buyer_name,
            t.status.as_str()
        );
    }
}

fn run(cli: &Cli) -> carlot::Result<()> {
    let config = load_config(cli)?;
    init_tracing(&config);

    let mut store = open_storage(&config)?;
    let mut out = String::new();

    match &cli.command {
        Commands::Browse(args) => return browse(&config, &*store, args),
        Commands::Brands => {
            for brand in store.unique_brands()? {
                println!("{brand}");
            }
        }
        Commands::Show { id } => {
            let listing = store
                .listing(id)?
                .ok_or_else(|| MarketplaceError::not_found("listing", id))?;
            render_detail(&mut out, &ListingDetail::from_listing(&listing))?;
        }
        Commands::Recent { limit, featured } => {
            let default_limit = if *featured {
                config.featured_limit
            } else {
                config.recent_limit
            };
            let listings = query::recent(&store.listings()?, limit.unwrap_or(default_limit));
            let cards: Vec<ListingCard> = listings.iter().map(ListingCard::from_listing).collect();
            render_cards(&mut out, &cards)?;
        }
        Commands::Login { email, password } => {
            let session = session::login(&*store, &mut session_slot(&config), email, password)?;
            match session.identity() {
                Some(identity) => println!("Signed in as {} <{}>", identity.name, identity.email),
                None => {
                    return Err(MarketplaceError::validation(
                        "credentials",
                        "invalid email or password",
                    ))
                }
            }
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            let session =
                session::register(&mut *store, &mut session_slot(&config), name, email, password)?;
            let identity = session.require()?;
            println!("Welcome, {} ({})", identity.name, identity.id);
        }
        Commands::Logout => {
            session::logout(&mut session_slot(&config))?;
            println!("Signed out");
        }
        Commands::Whoami => match SessionContext::restore(&session_slot(&config))?.identity() {
            Some(identity) => println!("{} <{}> ({})", identity.name, identity.email, identity.id),
            None => println!("Not signed in"),
        },
        Commands::Book {
            listing_id,
            date,
            time,
            notes,
        } => {
            let session = SessionContext::restore(&session_slot(&config))?;
            let request = ViewingRequest {
                listing_id: listing_id.clone(),
                date: *date,
                time: time.clone(),
                notes: notes.clone(),
            };
            let appointment = book_viewing(&mut *store, &session, request)?;
            println!(
                "Requested viewing {} of {} on {} at {} ({})",
                appointment.id,
                appointment.listing_id,
                appointment.date,
                appointment.time,
                appointment.status.as_str()
            );
        }
        Commands::Appointments => {
            let session = SessionContext::restore(&session_slot(&config))?;
            let user = session.require()?;
            let today = chrono::Local::now().date_naive();
            let (upcoming, past) = partition_upcoming(store.appointments_for_user(&user.id)?, today);
            for (heading, appointments) in [("Upcoming", upcoming), ("Past", past)] {
                println!("{heading}:");
                if appointments.is_empty() {
                    println!("  (none)");
                }
                for a in appointments {
                    let role = if a.buyer_id == user.id { "buying" } else { "selling" };
                    println!(
                        "  {}  {} {}  {}  {}  [{}]",
                        a.id,
                        a.date,
                        a.time,
                        a.listing_id,
                        role,
                        a.status.as_str()
                    );
                }
            }
        }
        Commands::Appointment { id, status } => {
            let session = SessionContext::restore(&session_slot(&config))?;
            let appointment = set_appointment_status(&mut *store, &session, id, *status)?;
            println!("{} is now {}", appointment.id, appointment.status.as_str());
        }
        Commands::Sell(args) => {
            let session = SessionContext::restore(&session_slot(&config))?;
            let listing = sell_listing(&mut *store, &session, args.draft()?)?;
            println!("Listed {} as {}", listing.title, listing.id);
        }
        Commands::Update { id, price, status } => {
            let session = SessionContext::restore(&session_slot(&config))?;
            let update = ListingUpdate {
                price: *price,
                status: *status,
            };
            let listing = update_listing(&mut *store, &session, id, update)?;
            println!("{}  {}  [{}]", listing.id, format_price(listing.price), listing.status);
        }
        Commands::Delete { id } => {
            let session = SessionContext::restore(&session_slot(&config))?;
            withdraw_listing(&mut *store, &session, id)?;
            println!("Withdrew {id}");
        }
        Commands::Dashboard => {
            let session = SessionContext::restore(&session_slot(&config))?;
            print_dashboard(&Dashboard::load(&*store, &session)?);
        }
    }

    print!("{out}");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
