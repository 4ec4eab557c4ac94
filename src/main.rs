use std::fs;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nodedesk::config::{self, Config};
use nodedesk::core::{parse_session_line, QueuedAction, SessionCommand};
use nodedesk::domain::address::{AddressResolver, Ss58Prefix};
use nodedesk::domain::endpoints::{
    apply, group_endpoints, CatalogTranslate, EndpointRegistry, EnvChain, GlobalEnv, Location,
    ProcessEnv,
};
use nodedesk::domain::selection::SelectionState;
use nodedesk::store::{KeyValueStore, MemoryStore, SettingsStore, CHAIN_SS58_PREFIX_KEY};

#[derive(Debug, Parser)]
#[command(
    name = "nodedesk",
    version,
    about = "nodedesk: node endpoints and account addresses for substrate chains"
)]
struct Args {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// List selectable node endpoints
    Endpoints {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Normalize an address (SS58, 0x account id, or 0x EVM address)
    Resolve {
        input: String,
        /// Accept account index forms
        #[arg(long)]
        allow_indices: bool,
    },
    /// Build an address selection interactively from stdin
    Select {
        /// Maximum number of selected addresses
        #[arg(long)]
        max: Option<usize>,
        /// Initial candidate addresses
        #[arg(long = "available", value_delimiter = ',')]
        available: Vec<String>,
        /// Initial selection
        #[arg(long = "default", value_delimiter = ',')]
        default: Vec<String>,
    },
    /// Show or persist the network prefix used for EVM addresses
    Prefix { value: Option<u16> },
    /// Make an endpoint active and print the reload URL
    Use {
        url: String,
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        origin: String,
        #[arg(long, default_value = "/")]
        pathname: String,
        #[arg(long, default_value = "")]
        hash: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = config::load();
    let store = open_store();

    match args.command {
        Cmd::Endpoints { json } => print_endpoints(&config, store.as_ref(), json),
        Cmd::Resolve {
            input,
            allow_indices,
        } => {
            let mut resolver = AddressResolver::new(config.resolver_config(), store);
            match resolver.resolve(&input, allow_indices) {
                Some(address) => {
                    println!("{address}");
                    Ok(())
                }
                None => bail!("not a valid address: {input}"),
            }
        }
        Cmd::Select {
            max,
            available,
            default,
        } => run_select(&config, store, max, available, default),
        Cmd::Prefix { value } => set_or_show_prefix(store, value),
        Cmd::Use {
            url,
            origin,
            pathname,
            hash,
        } => {
            let mut store = store;
            let location = Location {
                origin,
                pathname,
                hash,
            };
            if let Some(reload) = apply::apply(store.as_mut(), &location, &url, false)? {
                println!("{reload}");
            }
            Ok(())
        }
    }
}

fn open_store() -> Box<dyn KeyValueStore> {
    if let Some(db_path) = config::settings_db_path() {
        if let Some(parent) = db_path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match SettingsStore::open(&db_path) {
            Ok(store) => return Box::new(store),
            Err(err) => warn!(%err, "settings db disabled, using memory store"),
        }
    }
    Box::new(MemoryStore::new())
}

fn print_endpoints(config: &Config, store: &dyn KeyValueStore, json: bool) -> Result<()> {
    let env = EnvChain::new()
        .then(ProcessEnv)
        .then(GlobalEnv::new(config.process_env.clone()));
    let registry = config
        .endpoint_sections()
        .into_iter()
        .fold(EndpointRegistry::new(env, config.nodes.clone()), |registry, section| {
            registry.with_section(section)
        });
    let translate = CatalogTranslate::new(config.translations.clone());
    let entries = registry.build(&translate);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for group in group_endpoints(&entries) {
        if let Some(header) = &group.header {
            if group.is_spaced {
                println!();
            }
            println!("== {header}");
        }
        for network in group.reachable() {
            let marker = if apply::is_active(store, &network.value) { "*" } else { " " };
            println!("{marker} {:<28} {}", network.text, network.value);
        }
    }
    Ok(())
}

fn set_or_show_prefix(mut store: Box<dyn KeyValueStore>, value: Option<u16>) -> Result<()> {
    match value {
        Some(value) => {
            let prefix = Ss58Prefix::new(value)?;
            store.set(CHAIN_SS58_PREFIX_KEY, &prefix.to_string())?;
            info!(%prefix, "network prefix saved");
            println!("{prefix}");
        }
        None => match store.get(CHAIN_SS58_PREFIX_KEY)? {
            Some(prefix) => println!("{prefix}"),
            None => println!("(unset)"),
        },
    }
    Ok(())
}

fn run_select(
    config: &Config,
    store: Box<dyn KeyValueStore>,
    max: Option<usize>,
    available: Vec<String>,
    default: Vec<String>,
) -> Result<()> {
    let selection_config = config.selection_config(max);
    let resolver = AddressResolver::new(config.resolver_config(), store);
    let (action_tx, action_rx) = mpsc::channel::<QueuedAction>();
    let (line_tx, line_rx) = mpsc::channel::<String>();

    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut state = SelectionState::new(
        available,
        selection_config,
        resolver,
        Box::new(action_tx),
        Box::new(|selected: &[String]| {
            println!("selected ({}): {}", selected.len(), selected.join(", "));
        }),
    );
    if !default.is_empty() {
        state.set_default_value(default);
    }

    let tick_rate = Duration::from_millis(50);
    loop {
        match line_rx.recv_timeout(tick_rate) {
            Ok(line) => match parse_session_line(&line) {
                SessionCommand::Filter(text) => state.on_filter_change(text, Instant::now()),
                SessionCommand::Select(address) => {
                    if !state.on_select(&address) {
                        println!("unchanged (duplicate or limit {} reached)", state.max_count());
                    }
                }
                SessionCommand::Deselect(address) => {
                    if !state.on_deselect(&address) {
                        println!("unchanged (not selected)");
                    }
                }
                SessionCommand::Default(values) => state.set_default_value(values),
                SessionCommand::Show => print_available(&state),
                SessionCommand::Quit => break,
                SessionCommand::Unknown(cmd) => eprintln!("unknown command: {cmd}"),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // Input closed: let a pending filter settle before leaving.
                state.on_tick(Instant::now() + selection_config.debounce);
                drain_actions(&action_rx);
                break;
            }
        }

        state.on_tick(Instant::now());
        drain_actions(&action_rx);
    }

    Ok(())
}

fn drain_actions(rx: &mpsc::Receiver<QueuedAction>) {
    for action in rx.try_iter() {
        println!("[{}] {}", action.status.as_str(), action.message);
    }
}

fn print_available<S: KeyValueStore>(state: &SelectionState<S>) {
    match state.available() {
        Some(available) => {
            println!("available ({}):", available.len());
            for address in available {
                println!("  {address}");
            }
        }
        None => println!("loading…"),
    }
}
