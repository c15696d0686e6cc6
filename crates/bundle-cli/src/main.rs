use anyhow::{bail, Context, Result};
use bundle_core::{
    BundleConfig, BundleSession, Catalog, RandomSource, RngSource, SelectionPersistence,
    StockLevel, UuidTokens,
};
use bundle_store::{FileStore, SelectionArchive};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const BAR_WIDTH: usize = 20;

fn cli() -> Command {
    Command::new("bundle")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build a fixed-size box of flavors and turn it into cart lines")
        .subcommand_required(true)
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Catalog snapshot (JSON array of items)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Bundle configuration (TOML)"),
        )
        .arg(
            Arg::new("store")
                .long("store")
                .global(true)
                .default_value(".bundle")
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the saved box"),
        )
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .global(true)
                .help("Catalog id of the bundle product itself"),
        )
        .subcommand(Command::new("catalog").about("List flavors with stock and current quantity"))
        .subcommand(
            Command::new("surprise")
                .about("Fill the box at random and save it")
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                ),
        )
        .subcommand(Command::new("restore").about("Show the saved box against today's catalog"))
        .subcommand(
            Command::new("set")
                .about("Set one flavor's quantity in the saved box")
                .arg(Arg::new("item").required(true).help("Catalog item id"))
                .arg(
                    Arg::new("quantity")
                        .required(true)
                        .value_parser(value_parser!(u32))
                        .help("Units (0 removes the flavor)"),
                ),
        )
        .subcommand(
            Command::new("checkout")
                .about("Print cart lines for the saved box")
                .arg(
                    Arg::new("forget")
                        .long("forget")
                        .action(ArgAction::SetTrue)
                        .help("Clear the saved box after a successful checkout"),
                ),
        )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    run(&matches)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => BundleConfig::load(path)?,
        None => BundleConfig::new(),
    };
    let catalog = load_catalog(matches)?;
    let store_dir = matches
        .get_one::<PathBuf>("store")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(".bundle"));

    tracing::debug!(
        items = catalog.len(),
        target = config.target,
        store = %store_dir.display(),
        "session starting"
    );

    let mut archive = SelectionArchive::with_key(FileStore::new(store_dir), &config.storage_key);
    let mut session = BundleSession::new(catalog, config);

    match matches.subcommand() {
        Some(("catalog", _)) => {
            resume(&mut session, &archive);
            print!("{}", render_catalog(&session));
        }
        Some(("surprise", args)) => {
            let mut rng: Box<dyn RandomSource> = match args.get_one::<u64>("seed") {
                Some(seed) => Box::new(RngSource::seeded(*seed)),
                None => Box::new(RngSource::thread()),
            };
            if !session.surprise_me(rng.as_mut()) {
                bail!("no flavors are available right now");
            }
            if !session.persist(&mut archive) {
                tracing::warn!("box not saved");
            }
            print!("{}", render_status(&session));
        }
        Some(("restore", _)) => {
            if !session.load_last(&archive) {
                println!("No saved box.");
                return Ok(());
            }
            print!("{}", render_status(&session));
        }
        Some(("set", args)) => {
            let item = args
                .get_one::<String>("item")
                .context("missing item id")?;
            let quantity = *args.get_one::<u32>("quantity").context("missing quantity")?;

            set_and_save(&mut session, &mut archive, item, quantity)?;
            print!("{}", render_status(&session));
        }
        Some(("checkout", args)) => {
            resume(&mut session, &archive);
            let lines = match session.checkout(&mut UuidTokens) {
                Ok(lines) => lines,
                Err(e) if e.is_checkout_block() => {
                    print!("{}", render_status(&session));
                    bail!("cannot check out: {e}");
                }
                Err(e) => return Err(e.into()),
            };
            println!("{}", serde_json::to_string_pretty(&lines)?);
            if args.get_flag("forget") {
                archive.clear();
            }
        }
        _ => unreachable!("subcommand_required"),
    }
    Ok(())
}

fn load_catalog(matches: &ArgMatches) -> Result<Catalog> {
    let path = matches
        .get_one::<PathBuf>("catalog")
        .context("--catalog <FILE> is required")?;
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    let catalog = Catalog::from_json(&json)?;
    Ok(match matches.get_one::<String>("exclude") {
        Some(bundle_id) => catalog.without(bundle_id),
        None => catalog,
    })
}

/// Pick up the saved box as working state without a shopper action
fn resume<P: SelectionPersistence + ?Sized>(session: &mut BundleSession, archive: &P) {
    let saved = archive.restore(session.catalog());
    session.load_selection(saved);
}

/// Set one quantity on top of the saved box
///
/// An emptied box is not written, so the previous box stays available to
/// repeat.
fn set_and_save<P: SelectionPersistence + ?Sized>(
    session: &mut BundleSession,
    archive: &mut P,
    item: &str,
    quantity: u32,
) -> Result<()> {
    resume(session, &*archive);
    session.set_quantity(item, quantity)?;
    session.persist(archive);
    Ok(())
}

fn render_status(session: &BundleSession) -> String {
    let status = session.status();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = ((status.display_percent() / 100.0) * BAR_WIDTH as f64).round() as usize;

    let mut out = format!(
        "{} / {}  [{}{}]  {}\n",
        status.total,
        status.target,
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        status.message()
    );
    for (id, entry) in session.selection() {
        let title = session
            .catalog()
            .get(id.as_str())
            .map_or(id.as_str(), |item| item.title.as_str());
        out.push_str(&format!("  {title} x{}\n", entry.quantity));
    }
    out.push_str(&format!("-> {}\n", status.action_label()));
    out
}

fn render_catalog(session: &BundleSession) -> String {
    let threshold = session.config().low_stock_threshold;
    let mut out = String::new();
    for item in session.catalog().items() {
        let stock = match item.stock_level(threshold) {
            StockLevel::Unavailable => "sold out".to_string(),
            StockLevel::Low(n) => format!("only {n} left"),
            StockLevel::InStock => "in stock".to_string(),
            StockLevel::Unconfirmed => String::new(),
        };
        out.push_str(&format!(
            "{:<16} {:<24} {:>10}  {:<14} x{}\n",
            item.id.as_str(),
            item.title,
            item.price.to_string(),
            stock,
            session.selection().quantity_of(item.id.as_str())
        ));
    }
    out
}
