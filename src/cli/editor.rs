//! Interactive settings editor.
//!
//! Four tabs, like the dialog the applet opens: menu items, the model
//! catalog, manual models and the local server. Nothing is written until
//! the user picks "Save".

use anyhow::{bail, Result};
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};

use super::commands::save_form;
use crate::menu::{parse_port, CustomMenuItem, LocalModel, MenuItem, DEFAULT_IP, DEFAULT_PORT};
use crate::models::catalog;
use crate::settings::{ManualModel, SettingsForm, SettingsStore};

const TABS: [&str; 6] = [
    "Menu",
    "Model List",
    "Manual Models",
    "Local Server",
    "Save",
    "Cancel",
];

/// Run the editor. Returns true when the settings were saved.
pub fn run_editor(store: &mut SettingsStore) -> Result<bool> {
    if !Term::stdout().is_term() {
        bail!("The interactive editor needs a terminal; use the subcommands instead");
    }

    let theme = ColorfulTheme::default();
    let mut form = store.form();

    println!("\n\x1b[1m🦞 Claw Control settings\x1b[0m");
    println!("\x1b[2m{}\x1b[0m\n", store.dirs().data_dir().display());

    loop {
        let tab = Select::with_theme(&theme)
            .with_prompt("Section")
            .items(&TABS)
            .default(0)
            .interact_opt()?;

        match tab {
            Some(0) => edit_menu(&theme, &mut form)?,
            Some(1) => edit_catalog(&theme, &mut form)?,
            Some(2) => edit_manual(&theme, &mut form)?,
            Some(3) => edit_local_server(&theme, &mut form)?,
            Some(4) => {
                save_form(store, &form)?;
                return Ok(true);
            }
            _ => {
                if Confirm::with_theme(&theme)
                    .with_prompt("Discard changes?")
                    .default(true)
                    .interact()?
                {
                    println!("Cancelled.");
                    return Ok(false);
                }
            }
        }
    }
}

fn prompt_text(theme: &ColorfulTheme, prompt: &str, current: &str) -> Result<String> {
    let value = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .default(current.to_string())
        .allow_empty(true)
        .interact_text()?;
    Ok(value.trim().to_string())
}

// =========================================================================
// Menu tab
// =========================================================================

fn edit_menu(theme: &ColorfulTheme, form: &mut SettingsForm) -> Result<()> {
    let labels: Vec<&str> = MenuItem::TOGGLEABLE.iter().map(|i| i.toggle_label()).collect();
    let defaults: Vec<bool> = MenuItem::TOGGLEABLE
        .iter()
        .map(|i| form.menu_enabled(*i))
        .collect();

    if let Some(chosen) = MultiSelect::with_theme(theme)
        .with_prompt("Visible menu items (space to toggle)")
        .items(&labels)
        .defaults(&defaults)
        .interact_opt()?
    {
        for (index, item) in MenuItem::TOGGLEABLE.iter().enumerate() {
            form.set_menu_enabled(*item, chosen.contains(&index));
        }
    }

    if !Confirm::with_theme(theme)
        .with_prompt("Edit custom menu items?")
        .default(false)
        .interact()?
    {
        return Ok(());
    }

    for slot in 1..=form.custom.len() {
        let current = form.custom[slot - 1].clone();
        println!("\n  \x1b[1mCustom item {}\x1b[0m \x1b[2m(empty title and command removes it)\x1b[0m", slot);
        let title = prompt_text(theme, "Title", &current.title)?;
        let command = prompt_text(theme, "Command", &current.command)?;
        let mut item = CustomMenuItem::new(title, command);
        if !item.is_blank() {
            item.enabled = Confirm::with_theme(theme)
                .with_prompt("Enabled?")
                .default(current.enabled)
                .interact()?;
        }
        form.set_custom(slot, item)?;
    }
    Ok(())
}

// =========================================================================
// Model List tab
// =========================================================================

fn edit_catalog(theme: &ColorfulTheme, form: &mut SettingsForm) -> Result<()> {
    let entries = catalog::catalog();
    let labels: Vec<String> = entries
        .iter()
        .map(|e| {
            if e.is_mirror() {
                format!("OpenRouter  {}", e.display_name)
            } else {
                format!("{:<11} {}", e.provider, e.display_name)
            }
        })
        .collect();
    let defaults: Vec<bool> = entries.iter().map(|e| form.is_checked(e.id)).collect();

    if let Some(chosen) = MultiSelect::with_theme(theme)
        .with_prompt("Models shown in the applet (space to toggle)")
        .items(&labels)
        .defaults(&defaults)
        .max_length(15)
        .interact_opt()?
    {
        for (index, entry) in entries.iter().enumerate() {
            form.set_checked(entry.id, chosen.contains(&index))?;
        }
    }
    Ok(())
}

// =========================================================================
// Manual Models tab
// =========================================================================

fn slot_labels<'a>(rows: impl Iterator<Item = (&'a str, &'a str)>) -> Vec<String> {
    let mut labels: Vec<String> = rows
        .enumerate()
        .map(|(index, (title, id))| {
            if title.is_empty() && id.is_empty() {
                format!("{:>2}. (empty)", index + 1)
            } else {
                format!("{:>2}. {}  [{}]", index + 1, title, id)
            }
        })
        .collect();
    labels.push("Done".to_string());
    labels
}

fn edit_manual(theme: &ColorfulTheme, form: &mut SettingsForm) -> Result<()> {
    loop {
        let labels = slot_labels(
            form.manual
                .iter()
                .map(|m| (m.title.as_str(), m.model_id.as_str())),
        );
        let choice = Select::with_theme(theme)
            .with_prompt("Manual model slot")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        let index = match choice {
            Some(index) if index < form.manual.len() => index,
            _ => return Ok(()),
        };

        let current = form.manual[index].clone();
        let title = prompt_text(theme, "Title", &current.title)?;
        let model_id = prompt_text(theme, "Model id (provider/model)", &current.model_id)?;
        form.set_manual(index + 1, ManualModel::new(title, model_id))?;
    }
}

// =========================================================================
// Local Server tab
// =========================================================================

fn edit_local_server(theme: &ColorfulTheme, form: &mut SettingsForm) -> Result<()> {
    form.local.enabled = Confirm::with_theme(theme)
        .with_prompt("Enable local server models?")
        .default(form.local.enabled)
        .interact()?;

    form.local.custom_address = Confirm::with_theme(theme)
        .with_prompt("Use a custom server address?")
        .default(form.local.custom_address)
        .interact()?;

    if form.local.custom_address {
        let ip = prompt_text(theme, "Server IP", &form.local.ip)?;
        form.local.ip = if ip.is_empty() { DEFAULT_IP.to_string() } else { ip };

        let port: String = Input::with_theme(theme)
            .with_prompt(format!("Port (empty = {})", DEFAULT_PORT))
            .default(form.local.port.to_string())
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), &str> {
                parse_port(input).map(|_| ()).ok_or("Port must be 1-65535")
            })
            .interact_text()?;
        form.local.set_port_str(&port)?;
    }

    loop {
        let labels = slot_labels(
            form.local
                .models
                .iter()
                .map(|m| (m.name.as_str(), m.id.as_str())),
        );
        let choice = Select::with_theme(theme)
            .with_prompt("Local model slot")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        let index = match choice {
            Some(index) if index < form.local.models.len() => index,
            _ => return Ok(()),
        };

        let current = form.local.models[index].clone();
        let name = prompt_text(theme, "Name", &current.name)?;
        let id = prompt_text(theme, "Model id (e.g. llama3.3)", &current.id)?;
        form.set_local_model(index + 1, LocalModel::new(name, id))?;
    }
}
