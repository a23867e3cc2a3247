//! The per-process shared context.
//!
//! Every handle obtained by cloning a [`SharedContext`] observes the same
//! state: the resolved project, whether installation was verified, the
//! generator catalog, and the pending command queue.
//!
//! ## Locking
//!
//! State sits behind one `RwLock`. A guard is held only for a single field
//! read or write and is always released before calling a port or running a
//! command, so commands can call back into the context (for example to
//! enqueue more work).

use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError, Command,
        ports::{GeneratorDiscovery, GeneratorRenderer, Invocation, ProcessRunner, ProjectResolver},
    },
    domain::{GeneratorCatalog, GeneratorDescriptor, ProjectContext, ProjectError},
    error::{Context, ForgeResult},
};

/// Tunables the context needs from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSettings {
    /// Prefix placed before the project script, e.g. `["poetry", "run"]`.
    pub launcher: Vec<String>,
    /// Harmless argument passed to the script by the installation probe.
    pub probe_flag: String,
    /// Command that installs the project; shown as the remediation hint.
    pub install_command: Vec<String>,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            launcher: Vec::new(),
            probe_flag: "--help".into(),
            install_command: vec!["make".into(), "install".into()],
        }
    }
}

impl ContextSettings {
    pub fn install_hint(&self) -> String {
        self.install_command.join(" ")
    }
}

#[derive(Default)]
struct ContextState {
    project: Option<ProjectContext>,
    installed: bool,
    generators: GeneratorCatalog,
    generators_loaded: bool,
    queue: VecDeque<Box<dyn Command>>,
}

struct Ports {
    resolver: Box<dyn ProjectResolver>,
    runner: Box<dyn ProcessRunner>,
    discovery: Box<dyn GeneratorDiscovery>,
    renderer: Box<dyn GeneratorRenderer>,
}

/// Cheap-to-clone handle onto the process-wide state.
#[derive(Clone)]
pub struct SharedContext {
    state: Arc<RwLock<ContextState>>,
    ports: Arc<Ports>,
    builtins: Arc<GeneratorCatalog>,
    settings: Arc<ContextSettings>,
    working_dir: Arc<PathBuf>,
}

impl fmt::Debug for SharedContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedContext")
            .field("working_dir", &self.working_dir)
            .field("settings", &self.settings)
            .field("builtins", &self.builtins.names())
            .finish_non_exhaustive()
    }
}

impl SharedContext {
    pub fn builder() -> SharedContextBuilder {
        SharedContextBuilder::default()
    }

    /// Resolve and validate the project once, returning the cached value on
    /// every later call.
    ///
    /// # Errors
    ///
    /// Any [`ProjectError`] from the resolver, or
    /// [`ProjectError::PackageMissing`] when the package directory is absent.
    /// Nothing is cached on failure.
    #[instrument(skip(self), fields(dir = %self.working_dir.display()))]
    pub fn require_project(&self) -> ForgeResult<ProjectContext> {
        let cached = self.read()?.project.clone();
        if let Some(project) = cached {
            return Ok(project);
        }

        let project = self.ports.resolver.resolve(&self.working_dir)?;

        let package_dir = project.package_dir();
        if !package_dir.is_dir() {
            debug!(
                package_dir = %package_dir.display(),
                "Package directory does not exist; project or descriptor is likely corrupted"
            );
            return Err(ProjectError::PackageMissing {
                package: project.package_name().to_string(),
                root: project.project_root().to_path_buf(),
            }
            .into());
        }

        info!(
            project = %project.project_name(),
            root = %project.project_root().display(),
            "Project resolved"
        );

        let mut state = self.write()?;
        Ok(state.project.get_or_insert(project).clone())
    }

    /// Verify once per process that the project's script can run.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::NotInstalled`] when the probe exits non-zero or
    /// cannot be started.
    #[instrument(skip(self))]
    pub fn require_installed(&self) -> ForgeResult<()> {
        let project = self.require_project()?;
        if self.read()?.installed {
            return Ok(());
        }

        let probe = self
            .script_invocation(&project, [self.settings.probe_flag.as_str()])
            .quiet();
        debug!(probe = %probe, "Probing installation");

        let installed = match self.ports.runner.run(&probe) {
            Ok(status) => status.success(),
            Err(err) => {
                debug!(error = %err, "Installation probe could not start");
                false
            }
        };

        if !installed {
            return Err(ApplicationError::NotInstalled {
                script: project.script_name().to_string(),
                install_hint: self.settings.install_hint(),
            }
            .into());
        }

        self.write()?.installed = true;
        debug!("Installation verified");
        Ok(())
    }

    /// Discover local generators once and merge them under the built-ins.
    #[instrument(skip(self))]
    pub fn load_generators(&self) -> ForgeResult<()> {
        let project = self.require_project()?;
        if self.read()?.generators_loaded {
            return Ok(());
        }

        let local = self.ports.discovery.discover(project.project_root())?;
        let found = local.len();
        let (merged, shadowed) = self.builtins.as_ref().clone().merge_local(local);

        for name in &shadowed {
            warn!(
                generator = %name,
                "Local generator is shadowed by the built-in generator of the same name"
            );
        }
        info!(local = found, total = merged.len(), "Generators loaded");

        let mut state = self.write()?;
        state.generators = merged;
        state.generators_loaded = true;
        Ok(())
    }

    /// The current catalog: built-ins until [`load_generators`](Self::load_generators)
    /// has run, the merged catalog afterwards.
    pub fn generators(&self) -> ForgeResult<GeneratorCatalog> {
        let state = self.read()?;
        if state.generators_loaded {
            Ok(state.generators.clone())
        } else {
            Ok(self.builtins.as_ref().clone())
        }
    }

    /// Look up one generator in the current catalog.
    pub fn generator(&self, name: &str) -> ForgeResult<GeneratorDescriptor> {
        let catalog = self.generators()?;
        catalog.get(name).cloned().ok_or_else(|| {
            ApplicationError::GeneratorNotFound {
                name: name.to_string(),
                available: catalog.names(),
            }
            .into()
        })
    }

    /// Append a command to the tail of the queue.
    pub fn enqueue(&self, command: impl Command + 'static) -> ForgeResult<()> {
        let command: Box<dyn Command> = Box::new(command);
        debug!(command = %command.describe(), "Command queued");
        self.write()?.queue.push_back(command);
        Ok(())
    }

    /// Run queued commands in FIFO order until the queue is empty.
    ///
    /// Commands enqueued while executing run after those already queued. The
    /// first failure stops execution; everything still queued is discarded
    /// and the error returned.
    #[instrument(skip(self))]
    pub fn execute(&self) -> ForgeResult<()> {
        let mut executed = 0usize;

        loop {
            let next = self.write()?.queue.pop_front();
            let Some(command) = next else {
                break;
            };

            let label = command.describe();
            debug!(command = %label, "Executing command");

            if let Err(err) = command.execute(self) {
                let discarded = {
                    let mut state = self.write()?;
                    let remaining = state.queue.len();
                    state.queue.clear();
                    remaining
                };
                if discarded > 0 {
                    warn!(
                        command = %label,
                        discarded,
                        "Command failed; discarding remaining queued commands"
                    );
                }
                return Err(err);
            }
            executed += 1;
        }

        debug!(executed, "Command queue drained");
        Ok(())
    }

    /// Number of commands waiting to run.
    pub fn pending(&self) -> ForgeResult<usize> {
        Ok(self.read()?.queue.len())
    }

    /// The cached project, if [`require_project`](Self::require_project)
    /// has succeeded.
    pub fn project(&self) -> ForgeResult<Option<ProjectContext>> {
        Ok(self.read()?.project.clone())
    }

    pub fn is_installed(&self) -> ForgeResult<bool> {
        Ok(self.read()?.installed)
    }

    /// `<launcher...> <script> <args...>`, run from the project root.
    pub fn script_invocation<I, S>(&self, project: &ProjectContext, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut launcher = self.settings.launcher.iter();
        let invocation = match launcher.next() {
            Some(program) => Invocation::new(program.as_str())
                .args(launcher.cloned())
                .arg(project.script_name()),
            None => Invocation::new(project.script_name()),
        };
        invocation.args(args).cwd(project.project_root())
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn settings(&self) -> &ContextSettings {
        &self.settings
    }

    pub fn runner(&self) -> &dyn ProcessRunner {
        self.ports.runner.as_ref()
    }

    pub fn renderer(&self) -> &dyn GeneratorRenderer {
        self.ports.renderer.as_ref()
    }

    fn read(&self) -> ForgeResult<RwLockReadGuard<'_, ContextState>> {
        self.state
            .read()
            .map_err(|_| ApplicationError::ContextLockPoisoned.into())
    }

    fn write(&self) -> ForgeResult<RwLockWriteGuard<'_, ContextState>> {
        self.state
            .write()
            .map_err(|_| ApplicationError::ContextLockPoisoned.into())
    }
}

/// Builder for [`SharedContext`].
///
/// All four ports are required. The working directory defaults to the
/// process's current directory, settings to [`ContextSettings::default`], and
/// the built-in catalog to empty.
#[derive(Default)]
pub struct SharedContextBuilder {
    working_dir: Option<PathBuf>,
    resolver: Option<Box<dyn ProjectResolver>>,
    runner: Option<Box<dyn ProcessRunner>>,
    discovery: Option<Box<dyn GeneratorDiscovery>>,
    renderer: Option<Box<dyn GeneratorRenderer>>,
    builtins: GeneratorCatalog,
    settings: ContextSettings,
}

impl SharedContextBuilder {
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn resolver(mut self, resolver: impl ProjectResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    pub fn runner(mut self, runner: impl ProcessRunner + 'static) -> Self {
        self.runner = Some(Box::new(runner));
        self
    }

    pub fn discovery(mut self, discovery: impl GeneratorDiscovery + 'static) -> Self {
        self.discovery = Some(Box::new(discovery));
        self
    }

    pub fn renderer(mut self, renderer: impl GeneratorRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn builtin_generators(mut self, catalog: GeneratorCatalog) -> Self {
        self.builtins = catalog;
        self
    }

    pub fn settings(mut self, settings: ContextSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> ForgeResult<SharedContext> {
        let working_dir = match self.working_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to read current directory")?,
        };

        let ports = Ports {
            resolver: self
                .resolver
                .ok_or(ApplicationError::AdapterNotConfigured { name: "resolver" })?,
            runner: self
                .runner
                .ok_or(ApplicationError::AdapterNotConfigured { name: "runner" })?,
            discovery: self
                .discovery
                .ok_or(ApplicationError::AdapterNotConfigured { name: "discovery" })?,
            renderer: self
                .renderer
                .ok_or(ApplicationError::AdapterNotConfigured { name: "renderer" })?,
        };

        let state = ContextState {
            generators: self.builtins.clone(),
            ..ContextState::default()
        };

        Ok(SharedContext {
            state: Arc::new(RwLock::new(state)),
            ports: Arc::new(ports),
            builtins: Arc::new(self.builtins),
            settings: Arc::new(self.settings),
            working_dir: Arc::new(working_dir),
        })
    }
}
