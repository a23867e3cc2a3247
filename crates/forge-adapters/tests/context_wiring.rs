//! The production adapters plugged into a shared context.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use forge_adapters::{
    FileRenderer, IniProjectResolver, LocalGeneratorLoader, SystemProcessRunner, builtin_catalog,
};
use forge_core::application::{Command, GenerateFiles, SharedContext};
use forge_core::domain::{RenderRequest, RenderVariables};
use forge_core::error::ForgeResult;
use tempfile::TempDir;

fn context(root: &Path) -> SharedContext {
    SharedContext::builder()
        .working_dir(root)
        .resolver(IniProjectResolver::default())
        .runner(SystemProcessRunner)
        .discovery(LocalGeneratorLoader::default())
        .renderer(FileRenderer::new())
        .builtin_generators(builtin_catalog())
        .build()
        .unwrap()
}

fn project(root: &Path) {
    fs::write(
        root.join("forge.ini"),
        "[project]\npackage_name = shop\nscript_name = shop\n",
    )
    .unwrap();
    fs::create_dir(root.join("shop")).unwrap();
}

/// Records the order it ran in, and optionally queues another step.
struct Step {
    id: usize,
    log: Arc<std::sync::Mutex<Vec<usize>>>,
    follow_up: Option<usize>,
}

impl Command for Step {
    fn execute(&self, ctx: &SharedContext) -> ForgeResult<()> {
        self.log.lock().unwrap().push(self.id);
        if let Some(id) = self.follow_up {
            ctx.enqueue(Step {
                id,
                log: Arc::clone(&self.log),
                follow_up: None,
            })?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("step {}", self.id)
    }
}

#[test]
fn generates_a_builtin_into_a_resolved_project() {
    let temp = TempDir::new().unwrap();
    project(temp.path());
    let ctx = context(temp.path());

    let project = ctx.require_project().unwrap();
    ctx.load_generators().unwrap();
    let model = ctx.generator("model").unwrap();

    let vars = RenderVariables::new()
        .with("name", "invoice")
        .with("package_name", project.package_name());
    ctx.enqueue(GenerateFiles::new(
        model,
        RenderRequest::new(project.project_root(), vars),
    ))
    .unwrap();
    ctx.execute().unwrap();

    let model = fs::read_to_string(temp.path().join("shop/app/models/invoice.py")).unwrap();
    assert!(model.contains("invoice"));
    assert_eq!(ctx.pending().unwrap(), 0);
}

#[test]
fn clones_see_the_same_project_and_queue() {
    let temp = TempDir::new().unwrap();
    project(temp.path());
    let ctx = context(temp.path());
    let other = ctx.clone();

    ctx.require_project().unwrap();
    assert_eq!(
        other.project().unwrap().map(|p| p.package_name().to_string()),
        Some("shop".to_string())
    );

    let log = Arc::new(std::sync::Mutex::new(Vec::new()));
    other
        .enqueue(Step {
            id: 1,
            log: Arc::clone(&log),
            follow_up: Some(3),
        })
        .unwrap();
    ctx.enqueue(Step {
        id: 2,
        log: Arc::clone(&log),
        follow_up: None,
    })
    .unwrap();

    ctx.execute().unwrap();
    assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
}

#[test]
fn local_generators_appear_after_loading() {
    let temp = TempDir::new().unwrap();
    project(temp.path());
    let widget = temp.path().join("lib/generators/widget");
    fs::create_dir_all(widget.join("template")).unwrap();
    fs::write(widget.join("generator.toml"), "[generator]\ndescription = \"Widgets\"\n").unwrap();
    fs::write(widget.join("template/{{name}}.txt"), "{{name}}").unwrap();

    let ctx = context(temp.path());
    assert!(!ctx.generators().unwrap().contains("widget"));

    ctx.load_generators().unwrap();
    let catalog = ctx.generators().unwrap();
    assert!(catalog.contains("widget"));
    assert!(catalog.contains("controller"));
}

#[test]
fn missing_script_is_not_installed() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("forge.ini"),
        "[project]\npackage_name = shop\nscript_name = forge-wiring-missing-script\n",
    )
    .unwrap();
    fs::create_dir(temp.path().join("shop")).unwrap();

    let ctx = context(temp.path());
    let err = ctx.require_installed().unwrap_err();
    assert_eq!(err.exit_code(), Some(1));
    assert!(!ctx.is_installed().unwrap());
}

#[cfg(unix)]
#[test]
fn successful_probe_marks_installed() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("forge.ini"),
        "[project]\npackage_name = shop\nscript_name = true\n",
    )
    .unwrap();
    fs::create_dir(temp.path().join("shop")).unwrap();

    let ctx = context(temp.path());
    assert!(!ctx.is_installed().unwrap());
    for _ in 0..3 {
        ctx.require_installed().unwrap();
    }
    assert!(ctx.is_installed().unwrap());
}
