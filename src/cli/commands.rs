//! Non-interactive subcommand handlers.
//!
//! Every mutating handler loads the form from the store, changes it and
//! saves through [`save_form`].

use anyhow::{bail, Result};

use super::preview::{build_preview, print_preview};
use crate::menu::{CustomMenuItem, LocalModel, MenuItem, MAX_CUSTOM_ITEMS};
use crate::models::catalog;
use crate::models::{launch_command, LaunchRunner};
use crate::settings::{classify, ManualModel, RecordOwner, SettingsForm, SettingsStore};

/// Save the form and report the outcome.
pub fn save_form(store: &mut SettingsStore, form: &SettingsForm) -> Result<()> {
    match store.save(form) {
        Ok(()) => {
            println!("✅ Settings saved");
            Ok(())
        }
        Err(e) => {
            println!("❌ Failed to save settings: {}", e);
            Err(e.into())
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "\x1b[32mon\x1b[0m"
    } else {
        "\x1b[2moff\x1b[0m"
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "\x1b[32m[x]\x1b[0m"
    } else {
        "[ ]"
    }
}

// =========================================================================
// status / catalog
// =========================================================================

/// Handle `status` - summary of both files.
pub fn cmd_status(store: &SettingsStore) {
    let form = store.form();

    println!("\n\x1b[1m📊 Claw Control settings\x1b[0m\n");
    println!("  Directory:    {}", store.dirs().data_dir().display());
    println!("  models.json:  {}", store.models_state());
    println!("  menu.json:    {}", store.menu_state());

    let owners: Vec<RecordOwner> = store.models().iter().map(classify).collect();
    let count = |wanted: fn(&RecordOwner) -> bool| owners.iter().filter(|o| wanted(o)).count();
    println!(
        "  Records:      {} ({} catalog, {} manual, {} local, {} unrecognized)",
        owners.len(),
        count(|o| matches!(o, RecordOwner::Catalog(_))),
        count(|o| *o == RecordOwner::Manual),
        count(|o| *o == RecordOwner::LocalServer),
        count(|o| *o == RecordOwner::Unrecognized),
    );
    println!();
    println!(
        "  Catalog:      {}/{} checked",
        form.checked_count(),
        catalog::catalog().len()
    );
    println!("  Manual:       {}", form.manual_records().len());
    println!(
        "  Local server: {} ({} models, {})",
        on_off(form.local.enabled),
        form.local_records().len(),
        form.local.effective_ip()
    );

    let hidden: Vec<_> = MenuItem::TOGGLEABLE
        .iter()
        .filter(|item| !form.menu_enabled(**item))
        .map(|item| item.key())
        .collect();
    if hidden.is_empty() {
        println!("  Hidden items: none");
    } else {
        println!("  Hidden items: {}", hidden.join(", "));
    }

    let custom = form.custom.iter().filter(|c| !c.is_blank()).count();
    println!("  Custom items: {}/{}", custom, MAX_CUSTOM_ITEMS);

    if !form.unrecognized.is_empty() {
        println!(
            "\n  \x1b[33mUnrecognized records ({}), kept on save:\x1b[0m",
            form.unrecognized.len()
        );
        for record in &form.unrecognized {
            println!("    {}  \x1b[2m{}\x1b[0m", record.id, record.name);
        }
        println!("  \x1b[2mRun `claw-settings prune` to remove them.\x1b[0m");
    }
    println!();
}

/// Handle `catalog` - list every catalog entry under its provider.
pub fn cmd_catalog(store: &SettingsStore) {
    let form = store.form();

    println!("\n📋 \x1b[1mModel catalog:\x1b[0m");
    for (provider, entries) in catalog::by_provider() {
        println!("\n  \x1b[1m{}\x1b[0m", provider);
        for entry in entries {
            println!(
                "  {} {:<28} \x1b[2m{}\x1b[0m",
                checkbox(form.is_checked(entry.id)),
                entry.display_name,
                entry.id
            );
        }
    }
    println!();
}

/// Handle `enable` / `disable` - check or uncheck catalog entries.
pub fn cmd_set_catalog(store: &mut SettingsStore, ids: &[String], checked: bool) -> Result<()> {
    let mut form = store.form();
    for id in ids {
        form.set_checked(id.trim(), checked)?;
        println!("  {} {}", checkbox(checked), id.trim());
    }
    save_form(store, &form)
}

// =========================================================================
// manual models
// =========================================================================

pub fn cmd_manual_list(store: &SettingsStore) {
    let form = store.form();
    println!("\n📋 \x1b[1mManual models:\x1b[0m\n");
    for (index, model) in form.manual.iter().enumerate() {
        if model.title.is_empty() && model.model_id.is_empty() {
            println!("  {:>2}. \x1b[2m(empty)\x1b[0m", index + 1);
        } else {
            println!(
                "  {:>2}. {:<24} \x1b[36m{}\x1b[0m",
                index + 1,
                model.title,
                model.model_id
            );
        }
    }
    println!();
}

pub fn cmd_manual_set(
    store: &mut SettingsStore,
    slot: usize,
    title: &str,
    model_id: &str,
) -> Result<()> {
    let mut form = store.form();
    form.set_manual(slot, ManualModel::new(title, model_id))?;
    save_form(store, &form)
}

pub fn cmd_manual_clear(store: &mut SettingsStore, slot: usize) -> Result<()> {
    let mut form = store.form();
    form.set_manual(slot, ManualModel::default())?;
    save_form(store, &form)
}

// =========================================================================
// local server
// =========================================================================

/// Optional changes for `local set`.
#[derive(Debug, Clone, Default)]
pub struct LocalServerUpdate {
    pub enabled: Option<bool>,
    pub custom_address: Option<bool>,
    pub ip: Option<String>,
    pub port: Option<String>,
}

pub fn cmd_local_show(store: &SettingsStore) {
    let config = store.form().local.to_config();

    println!("\n🦙 \x1b[1mLocal server\x1b[0m\n");
    println!("  Enabled:        {}", on_off(config.enabled));
    println!("  Custom address: {}", on_off(config.custom_address));
    println!("  Address:        {}:{}", config.ip, config.port);
    println!("  Endpoint:       {}", config.base_url());

    let models = config.models;
    if models.is_empty() {
        println!("  Models:         \x1b[2mnone\x1b[0m");
    } else {
        println!("  Models:");
        for model in models {
            println!("    {:<24} \x1b[36m{}\x1b[0m", model.name, model.id);
        }
    }
    println!();
}

pub fn cmd_local_set(store: &mut SettingsStore, update: LocalServerUpdate) -> Result<()> {
    let mut form = store.form();
    if let Some(enabled) = update.enabled {
        form.local.enabled = enabled;
    }
    if let Some(custom) = update.custom_address {
        form.local.custom_address = custom;
    }
    if let Some(ip) = update.ip {
        form.local.ip = ip;
    }
    if let Some(port) = update.port {
        form.local.set_port_str(&port)?;
    }
    save_form(store, &form)
}

pub fn cmd_local_model_set(store: &mut SettingsStore, slot: usize, name: &str, id: &str) -> Result<()> {
    let mut form = store.form();
    form.set_local_model(slot, LocalModel::new(name, id))?;
    save_form(store, &form)
}

pub fn cmd_local_model_clear(store: &mut SettingsStore, slot: usize) -> Result<()> {
    let mut form = store.form();
    form.set_local_model(slot, LocalModel::default())?;
    save_form(store, &form)
}

// =========================================================================
// menu items
// =========================================================================

pub fn cmd_menu_list(store: &SettingsStore) {
    let form = store.form();
    println!("\n📋 \x1b[1mMenu items:\x1b[0m\n");
    for item in MenuItem::TOGGLEABLE {
        println!(
            "  {} {:<20} \x1b[2m{}\x1b[0m",
            checkbox(form.menu_enabled(item)),
            item.toggle_label(),
            item.key()
        );
    }

    println!("\n  \x1b[1mCustom items\x1b[0m");
    for (index, custom) in form.custom.iter().enumerate() {
        if custom.is_blank() {
            println!("  {}. \x1b[2m(empty)\x1b[0m", index + 1);
        } else {
            println!(
                "  {}. {} {:<18} \x1b[36m{}\x1b[0m",
                index + 1,
                checkbox(custom.enabled),
                custom.title,
                custom.command
            );
        }
    }
    println!();
}

pub fn cmd_menu_toggle(store: &mut SettingsStore, items: &[MenuItem], enabled: bool) -> Result<()> {
    let mut form = store.form();
    for item in items {
        if !MenuItem::TOGGLEABLE.contains(item) {
            bail!("{} is always shown and cannot be toggled here", item);
        }
        form.set_menu_enabled(*item, enabled);
    }
    save_form(store, &form)
}

pub fn cmd_custom_set(
    store: &mut SettingsStore,
    slot: usize,
    title: &str,
    command: &str,
    enabled: bool,
) -> Result<()> {
    let mut form = store.form();
    let mut item = CustomMenuItem::new(title, command);
    item.enabled = enabled;
    form.set_custom(slot, item)?;
    save_form(store, &form)
}

pub fn cmd_custom_clear(store: &mut SettingsStore, slot: usize) -> Result<()> {
    let mut form = store.form();
    form.set_custom(slot, CustomMenuItem::default())?;
    save_form(store, &form)
}

// =========================================================================
// prune / preview / switch
// =========================================================================

/// Handle `prune` - drop records no section owns.
pub fn cmd_prune(store: &mut SettingsStore) -> Result<()> {
    let mut form = store.form();
    if form.unrecognized.is_empty() {
        println!("Nothing to prune.");
        return Ok(());
    }
    for record in form.unrecognized.drain(..) {
        println!("  🗑️  {}", record.id);
    }
    save_form(store, &form)
}

pub fn cmd_preview(store: &SettingsStore) {
    print_preview(&build_preview(store.models(), store.menu(), store.menu_state()));
}

/// Handle `switch` - run the launch command for a model, as the applet does.
pub fn cmd_switch(store: &SettingsStore, model: &str, dry_run: bool) -> Result<()> {
    let model = model.trim();
    let command = match store.models().find_by_model(model) {
        Some(record) => record.launch_command().unwrap_or_else(|| launch_command(model)),
        None => {
            tracing::debug!(model = %model, "Model not in models.json, using id as given");
            launch_command(model)
        }
    };

    if dry_run {
        println!("{}", command);
        return Ok(());
    }

    let result = LaunchRunner::new().run(&command)?;
    if !result.stdout.is_empty() {
        print!("{}", result.stdout);
    }
    if !result.stderr.is_empty() {
        eprint!("{}", result.stderr);
    }
    if !result.success {
        bail!("Launch command exited with code {}", result.exit_code);
    }
    println!("✅ Switched to {}", model);
    Ok(())
}
