//! claw-settings - settings editor for the Claw Control panel applet
//!
//! Edits the models.json and menu.json files the applet reads.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use claw_settings::cli::{self, commands, LocalServerUpdate};
use claw_settings::config::{AppletDirs, DIR_ENV_VAR};
use claw_settings::menu::MenuItem;
use claw_settings::settings::SettingsStore;

/// Settings editor for the Claw Control applet 🦞
#[derive(Parser, Debug)]
#[command(name = "claw-settings")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Applet data directory (default: XDG_DATA_HOME/cinnamon/applets/oc-applet@farmfield.se)
    #[arg(long, global = true, env = DIR_ENV_VAR)]
    dir: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug)
    #[arg(short = 'd', long, global = true)]
    debug: bool,

    /// Enable verbose logging (equivalent to RUST_LOG=trace)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summary of both settings files
    Status,
    /// Interactive editor (default when no command is given)
    Edit,
    /// List catalog models and whether they are shown
    Catalog,
    /// Show catalog models in the applet
    Enable {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Hide catalog models from the applet
    Disable {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Manual models outside the catalog
    #[command(subcommand)]
    Manual(ManualCommand),
    /// Ollama local server settings
    #[command(subcommand)]
    Local(LocalCommand),
    /// Built-in menu items
    #[command(subcommand)]
    Menu(MenuCommand),
    /// Custom menu items
    #[command(subcommand)]
    Custom(CustomCommand),
    /// Drop model records no section of the editor owns
    Prune,
    /// Render the applet menu as it will appear
    Preview,
    /// Switch the running session to a model
    Switch {
        model: String,
        /// Print the command instead of running it
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ManualCommand {
    /// List manual model slots
    List,
    /// Fill a slot (1-10)
    Set {
        slot: usize,
        title: String,
        model_id: String,
    },
    /// Empty a slot (1-10)
    Clear { slot: usize },
}

#[derive(Subcommand, Debug)]
enum LocalCommand {
    /// Show local server settings
    Show,
    /// Change local server settings
    Set {
        #[arg(long, action = clap::ArgAction::Set)]
        enabled: Option<bool>,
        #[arg(long, action = clap::ArgAction::Set)]
        custom_address: Option<bool>,
        #[arg(long)]
        ip: Option<String>,
        /// Port number; an empty value restores 11434
        #[arg(long)]
        port: Option<String>,
    },
    /// Local server model slots
    #[command(subcommand)]
    Model(LocalModelCommand),
}

#[derive(Subcommand, Debug)]
enum LocalModelCommand {
    /// Fill a slot (1-10); the id gets an `ollama/` prefix
    Set { slot: usize, name: String, id: String },
    /// Empty a slot (1-10)
    Clear { slot: usize },
}

#[derive(Subcommand, Debug)]
enum MenuCommand {
    /// List menu items and custom items
    List,
    /// Show items in the applet menu
    Show {
        #[arg(required = true)]
        items: Vec<MenuItem>,
    },
    /// Hide items from the applet menu
    Hide {
        #[arg(required = true)]
        items: Vec<MenuItem>,
    },
}

#[derive(Subcommand, Debug)]
enum CustomCommand {
    /// Fill a custom item slot (1-3)
    Set {
        slot: usize,
        title: String,
        command: String,
        /// Keep the item but do not draw it
        #[arg(long)]
        disabled: bool,
    },
    /// Remove a custom item slot (1-3)
    Clear { slot: usize },
}

fn init_tracing(args: &Args) {
    let default_filter = if args.verbose {
        "trace"
    } else if args.debug {
        "debug"
    } else {
        "warn" // Quiet by default for normal use
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if args.debug || args.verbose {
        tracing::info!("Debug logging enabled");
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    let dirs = AppletDirs::from_override(args.dir.as_deref());
    let mut store = SettingsStore::open(dirs);

    match args.command.unwrap_or(Command::Edit) {
        Command::Status => commands::cmd_status(&store),
        Command::Edit => {
            cli::run_editor(&mut store)?;
        }
        Command::Catalog => commands::cmd_catalog(&store),
        Command::Enable { ids } => commands::cmd_set_catalog(&mut store, &ids, true)?,
        Command::Disable { ids } => commands::cmd_set_catalog(&mut store, &ids, false)?,
        Command::Manual(cmd) => match cmd {
            ManualCommand::List => commands::cmd_manual_list(&store),
            ManualCommand::Set {
                slot,
                title,
                model_id,
            } => commands::cmd_manual_set(&mut store, slot, &title, &model_id)?,
            ManualCommand::Clear { slot } => commands::cmd_manual_clear(&mut store, slot)?,
        },
        Command::Local(cmd) => match cmd {
            LocalCommand::Show => commands::cmd_local_show(&store),
            LocalCommand::Set {
                enabled,
                custom_address,
                ip,
                port,
            } => commands::cmd_local_set(
                &mut store,
                LocalServerUpdate {
                    enabled,
                    custom_address,
                    ip,
                    port,
                },
            )?,
            LocalCommand::Model(LocalModelCommand::Set { slot, name, id }) => {
                commands::cmd_local_model_set(&mut store, slot, &name, &id)?
            }
            LocalCommand::Model(LocalModelCommand::Clear { slot }) => {
                commands::cmd_local_model_clear(&mut store, slot)?
            }
        },
        Command::Menu(cmd) => match cmd {
            MenuCommand::List => commands::cmd_menu_list(&store),
            MenuCommand::Show { items } => commands::cmd_menu_toggle(&mut store, &items, true)?,
            MenuCommand::Hide { items } => commands::cmd_menu_toggle(&mut store, &items, false)?,
        },
        Command::Custom(cmd) => match cmd {
            CustomCommand::Set {
                slot,
                title,
                command,
                disabled,
            } => commands::cmd_custom_set(&mut store, slot, &title, &command, !disabled)?,
            CustomCommand::Clear { slot } => commands::cmd_custom_clear(&mut store, slot)?,
        },
        Command::Prune => commands::cmd_prune(&mut store)?,
        Command::Preview => commands::cmd_preview(&store),
        Command::Switch { model, dry_run } => commands::cmd_switch(&store, &model, dry_run)?,
    }

    Ok(())
}
