//! End-to-end tests for the `forge` binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn forge(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("forge");
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

/// A minimal valid project whose script is not installed anywhere.
fn project(temp: &TempDir) -> &Path {
    let root = temp.path();
    fs::write(
        root.join("forge.ini"),
        "[project]\nproject_name = shop\npackage_name = shop\nscript_name = forge-test-missing-script\n",
    )
    .unwrap();
    fs::create_dir(root.join("shop")).unwrap();
    root
}

fn local_generator(root: &Path, name: &str, files: &[(&str, &str)]) {
    let dir = root.join("lib/generators").join(name);
    fs::create_dir_all(dir.join("template")).unwrap();
    fs::write(
        dir.join("generator.toml"),
        format!("[generator]\ndescription = \"Local {name}\"\n"),
    )
    .unwrap();
    for (path, contents) in files {
        let target = dir.join("template").join(path);
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(target, contents).unwrap();
    }
}

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn missing_descriptor_exits_one_without_report() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .args(["generate", "controller", "users"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not a forge project"))
        .stderr(predicate::str::contains("issues/new").not());
}

#[test]
fn missing_package_directory_exits_one() {
    let temp = TempDir::new().unwrap();
    let root = project(&temp);
    fs::remove_dir(root.join("shop")).unwrap();

    forge(root)
        .args(["generate", "model", "invoice"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("package 'shop' is missing"))
        .stderr(predicate::str::contains("issues/new").not());
}

#[test]
fn unknown_generator_exits_three_and_lists_names() {
    let temp = TempDir::new().unwrap();
    let root = project(&temp);

    forge(root)
        .args(["generate", "nope", "users"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Generator 'nope' not found"))
        .stderr(predicate::str::contains("controller"))
        .stderr(predicate::str::contains("issues/new").not());
}

#[test]
fn unclassified_failure_prints_bug_report() {
    let temp = TempDir::new().unwrap();
    let root = project(&temp);
    local_generator(root, "broken", &[("blocker/file.txt", "x")]);
    fs::write(root.join("blocker"), "a regular file").unwrap();

    forge(root)
        .args(["generate", "broken", "users"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("issues/new"))
        .stderr(predicate::str::contains("forge generate broken users"))
        .stderr(predicate::str::contains("Operating System:"))
        .stderr(predicate::str::contains(format!(
            "forge version: `{}`",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn run_without_installation_exits_one_with_hint() {
    let temp = TempDir::new().unwrap();
    let root = project(&temp);

    forge(root)
        .args(["run", "--", "--port", "8080"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not installed"))
        .stderr(predicate::str::contains("make install"));
}

#[test]
fn failing_install_command_exits_five() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("forge.toml");
    fs::write(&config, "[install]\ncommand = [\"false\"]\n").unwrap();

    forge(temp.path())
        .args(["--config", config.to_str().unwrap(), "new", "my-app"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("`false` failed"));

    assert!(temp.path().join("my-app/forge.ini").is_file());
}

#[test]
fn broken_config_exits_four() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .args(["--config", "absent.toml", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn new_project_then_list_and_generate() {
    let temp = TempDir::new().unwrap();

    forge(temp.path())
        .args(["new", "my-app", "--skip-install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project 'my-app' created!"));

    let app = temp.path().join("my-app");
    let descriptor = fs::read_to_string(app.join("forge.ini")).unwrap();
    assert!(descriptor.contains("package_name = my_app"));
    assert!(app.join("my_app/__init__.py").is_file());

    forge(&app)
        .args(["list", "--format", "list"])
        .assert()
        .success()
        .stdout("controller\ngenerator\nmodel\n");

    forge(&app)
        .args(["generate", "controller", "user-accounts"])
        .assert()
        .success();

    let controller =
        fs::read_to_string(app.join("my_app/app/controllers/user_accounts.py")).unwrap();
    assert!(controller.contains("router = APIRouter(prefix=\"/user_accounts\""));

    // Second run refuses to overwrite.
    forge(&app)
        .args(["generate", "controller", "user-accounts"])
        .assert()
        .code(2);
}

#[test]
fn new_refuses_non_empty_directory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("taken")).unwrap();
    fs::write(temp.path().join("taken/notes.txt"), "keep me").unwrap();

    forge(temp.path())
        .args(["new", "taken", "--skip-install"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn local_generators_merge_but_builtins_win() {
    let temp = TempDir::new().unwrap();
    let root = project(&temp);
    local_generator(root, "controller", &[("hijacked.txt", "x")]);
    local_generator(root, "widget", &[("{{package_name}}/widgets/{{name}}.py", "# {{name}}\n")]);

    let output = forge(root)
        .args(["list", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let origin_of = |name: &str| {
        entries
            .as_array()
            .unwrap()
            .iter()
            .find(|e| e["name"] == name)
            .map(|e| e["origin"].as_str().unwrap().to_owned())
    };
    assert_eq!(origin_of("controller").as_deref(), Some("builtin"));
    assert_eq!(origin_of("widget").as_deref(), Some("local"));

    forge(root)
        .args(["generate", "widget", "gear"])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(root.join("shop/widgets/gear.py")).unwrap(),
        "# gear\n"
    );
    assert!(!root.join("hijacked.txt").exists());
}

#[test]
fn scaffolded_generator_works_on_first_use() {
    let temp = TempDir::new().unwrap();
    forge(temp.path())
        .args(["new", "my-app", "--skip-install"])
        .assert()
        .success();
    let app = temp.path().join("my-app");

    forge(&app)
        .args(["generate", "generator", "widget"])
        .assert()
        .success();
    assert!(app.join("lib/generators/widget/README.md").is_file());

    forge(&app)
        .args(["generate", "widget", "gear"])
        .assert()
        .success();

    let gear = fs::read_to_string(app.join("my_app/gear.py")).unwrap();
    assert!(gear.contains("def gear():"));
    assert!(gear.contains("\"gear from my-app\""));
    assert!(gear.contains("by the widget generator"));
}
