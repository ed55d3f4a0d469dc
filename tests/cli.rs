use std::fs;
use std::path::Path;

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

fn claw_settings(dir: &Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("claw-settings")?;
    cmd.env("CLAW_SETTINGS_DIR", dir);
    cmd.env_remove("RUST_LOG");
    Ok(cmd)
}

fn read_json(path: &Path) -> Result<Value> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

#[test]
fn status_with_no_files() -> Result<()> {
    let dir = TempDir::new()?;

    claw_settings(dir.path())?
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("models.json:  missing"))
        .stdout(predicate::str::contains("0/26 checked"));

    assert!(!dir.path().join("models.json").exists());
    Ok(())
}

#[test]
fn enable_writes_both_files() -> Result<()> {
    let dir = TempDir::new()?;

    claw_settings(dir.path())?
        .args(["enable", "anthropic/claude-opus-4.6", "openrouter/moonshotai/kimi-k2.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved"));

    let models = read_json(&dir.path().join("models.json"))?;
    assert_eq!(models[0]["id"], json!("anthropic/claude-opus-4.6"));
    assert_eq!(models[0]["name"], json!("anthropic/claude-opus-4.6"));
    assert_eq!(models[1]["id"], json!("openrouter/moonshotai/kimi-k2.5"));
    assert_eq!(
        models[1]["cmd"],
        json!("/usr/bin/openclaw sessions patch agent:main:main --model openrouter/moonshotai/kimi-k2.5 && /usr/bin/openclaw sessions clear")
    );

    let menu = read_json(&dir.path().join("menu.json"))?;
    assert_eq!(menu["title"]["text"], json!("Claw Control"));
    assert_eq!(menu["ollama"]["port"], json!(11434));

    claw_settings(dir.path())?
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("[x]"))
        .stdout(predicate::str::contains("Moonshot AI"))
        .stdout(predicate::str::contains("OpenRouter"));
    Ok(())
}

#[test]
fn disable_removes_record() -> Result<()> {
    let dir = TempDir::new()?;
    claw_settings(dir.path())?
        .args(["enable", "zai/glm-5", "xai/grok-4.1-fast"])
        .assert()
        .success();

    claw_settings(dir.path())?
        .args(["disable", "zai/glm-5"])
        .assert()
        .success();

    let models = read_json(&dir.path().join("models.json"))?;
    assert_eq!(models.as_array().map(Vec::len), Some(1));
    assert_eq!(models[0]["id"], json!("xai/grok-4.1-fast"));
    Ok(())
}

#[test]
fn enable_unknown_model_fails_without_writing() -> Result<()> {
    let dir = TempDir::new()?;

    claw_settings(dir.path())?
        .args(["enable", "nobody/nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown catalog model"));

    assert!(!dir.path().join("models.json").exists());
    Ok(())
}

#[test]
fn manual_and_local_models_are_appended() -> Result<()> {
    let dir = TempDir::new()?;

    claw_settings(dir.path())?
        .args(["manual", "set", "1", "GPT-4 Turbo", "openai/gpt-4-turbo"])
        .assert()
        .success();
    claw_settings(dir.path())?
        .args(["local", "model", "set", "1", "Llama 3.3", "llama3.3"])
        .assert()
        .success();
    claw_settings(dir.path())?
        .args(["enable", "google/gemini-3-pro"])
        .assert()
        .success();

    let models = read_json(&dir.path().join("models.json"))?;
    let ids: Vec<_> = models
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|m| m["id"].as_str())
        .collect();
    assert_eq!(
        ids,
        vec!["google/gemini-3-pro", "manual_openai/gpt-4-turbo", "ollama/llama3.3"]
    );

    let menu = read_json(&dir.path().join("menu.json"))?;
    assert_eq!(
        menu["ollama"]["models"],
        json!([{"name": "Llama 3.3", "id": "ollama/llama3.3"}])
    );

    claw_settings(dir.path())?
        .args(["manual", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GPT-4 Turbo"));
    Ok(())
}

#[test]
fn manual_slot_out_of_range() -> Result<()> {
    let dir = TempDir::new()?;

    claw_settings(dir.path())?
        .args(["manual", "set", "11", "X", "x/y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
    Ok(())
}

#[test]
fn local_set_validates_port() -> Result<()> {
    let dir = TempDir::new()?;

    claw_settings(dir.path())?
        .args(["local", "set", "--port", "70000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid port"));

    claw_settings(dir.path())?
        .args([
            "local",
            "set",
            "--enabled",
            "true",
            "--custom-address",
            "true",
            "--ip",
            "192.168.1.20",
            "--port",
            "8080",
        ])
        .assert()
        .success();

    let menu = read_json(&dir.path().join("menu.json"))?;
    assert_eq!(menu["ollama"]["enabled"], json!(true));
    assert_eq!(menu["ollama"]["ip"], json!("192.168.1.20"));
    assert_eq!(menu["ollama"]["port"], json!(8080));

    claw_settings(dir.path())?
        .args(["local", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://192.168.1.20:8080"));
    Ok(())
}

#[test]
fn local_section_with_bad_port_survives_unrelated_edit() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(
        dir.path().join("menu.json"),
        r#"{"ollama": {"enabled": true, "ip": "10.0.0.5", "port": 70000,
            "models": [{"name": "Llama", "id": "ollama/llama3.3"}]}}"#,
    )?;
    fs::write(
        dir.path().join("models.json"),
        r#"[{"id": "ollama/llama3.3", "name": "Llama", "model": "ollama/llama3.3"}]"#,
    )?;

    claw_settings(dir.path())?
        .args(["enable", "zai/glm-5"])
        .assert()
        .success();

    let menu = read_json(&dir.path().join("menu.json"))?;
    assert_eq!(menu["ollama"]["ip"], json!("10.0.0.5"));
    assert_eq!(
        menu["ollama"]["models"],
        json!([{"name": "Llama", "id": "ollama/llama3.3"}])
    );
    let models = read_json(&dir.path().join("models.json"))?;
    assert_eq!(models[1]["id"], json!("ollama/llama3.3"));
    Ok(())
}

#[test]
fn menu_hide_and_custom_items() -> Result<()> {
    let dir = TempDir::new()?;

    claw_settings(dir.path())?
        .args(["menu", "hide", "doctor", "oc_json"])
        .assert()
        .success();
    claw_settings(dir.path())?
        .args(["custom", "set", "1", "Top", "htop"])
        .assert()
        .success();

    let menu = read_json(&dir.path().join("menu.json"))?;
    assert_eq!(menu["oc_doctor"]["enabled"], json!(false));
    assert_eq!(menu["oc_json"]["enabled"], json!(false));
    assert_eq!(menu["oc_start"]["enabled"], json!(true));
    assert_eq!(
        menu["custom_1"],
        json!({"title": "Top", "command": "htop", "enabled": true})
    );

    claw_settings(dir.path())?
        .arg("preview")
        .assert()
        .success()
        .stdout(predicate::str::contains("Top"))
        .stdout(predicate::str::contains("OC Doctor").not());

    claw_settings(dir.path())?
        .args(["custom", "clear", "1"])
        .assert()
        .success();
    let menu = read_json(&dir.path().join("menu.json"))?;
    assert!(menu.get("custom_1").is_none());
    Ok(())
}

#[test]
fn preview_of_empty_menu_file_hides_items() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("menu.json"), "{}")?;

    claw_settings(dir.path())?
        .arg("preview")
        .assert()
        .success()
        .stdout(predicate::str::contains("Claw Control").not())
        .stdout(predicate::str::contains("OC Doctor").not());
    Ok(())
}

#[test]
fn menu_rejects_fixed_items() -> Result<()> {
    let dir = TempDir::new()?;

    claw_settings(dir.path())?
        .args(["menu", "hide", "title"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be toggled"));

    claw_settings(dir.path())?
        .args(["menu", "hide", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown menu item"));
    Ok(())
}

#[test]
fn malformed_models_file_is_treated_as_empty() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("models.json"), "{ not json")?;

    claw_settings(dir.path())?
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("malformed"));

    claw_settings(dir.path())?
        .args(["enable", "openai/gpt-5.2"])
        .assert()
        .success();

    let models = read_json(&dir.path().join("models.json"))?;
    assert_eq!(models[0]["id"], json!("openai/gpt-5.2"));
    Ok(())
}

#[test]
fn unrecognized_records_survive_until_pruned() -> Result<()> {
    let dir = TempDir::new()?;
    fs::write(
        dir.path().join("models.json"),
        r#"[{"id": "mistral/large", "name": "Mistral Large", "cmd": "echo mistral"}]"#,
    )?;

    claw_settings(dir.path())?
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("mistral/large"))
        .stdout(predicate::str::contains("1 unrecognized"));

    claw_settings(dir.path())?
        .args(["enable", "deepseek/deepseek-v3.2"])
        .assert()
        .success();
    let models = read_json(&dir.path().join("models.json"))?;
    assert_eq!(models[1]["id"], json!("mistral/large"));
    assert_eq!(models[1]["cmd"], json!("echo mistral"));

    claw_settings(dir.path())?.arg("prune").assert().success();
    let models = read_json(&dir.path().join("models.json"))?;
    assert_eq!(models.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[test]
fn switch_dry_run_prints_command() -> Result<()> {
    let dir = TempDir::new()?;

    claw_settings(dir.path())?
        .args(["switch", "--dry-run", "ollama/llama3.3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "/usr/bin/openclaw sessions patch agent:main:main --model ollama/llama3.3 && /usr/bin/openclaw sessions clear",
        ));
    Ok(())
}

#[test]
fn dir_flag_overrides_environment() -> Result<()> {
    let env_dir = TempDir::new()?;
    let flag_dir = TempDir::new()?;

    claw_settings(env_dir.path())?
        .arg("--dir")
        .arg(flag_dir.path())
        .args(["enable", "qwen/qwen-3.5-plus"])
        .assert()
        .success();

    assert!(flag_dir.path().join("models.json").exists());
    assert!(!env_dir.path().join("models.json").exists());
    Ok(())
}
