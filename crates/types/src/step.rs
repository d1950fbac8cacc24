//! Steps: either a shell command or a reusable action invocation.

use indexmap::IndexMap;

use crate::attributes::{Conditional, HasEnv, Monitored, Monitoring, Named};
use crate::env::{Env, Scalar};

/// Shell used to interpret a run command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Pwsh,
    Python,
    Sh,
    Cmd,
    Powershell,
    /// Custom invocation template, for example `perl {0}`.
    Custom(String),
}

impl Shell {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bash => "bash",
            Self::Pwsh => "pwsh",
            Self::Python => "python",
            Self::Sh => "sh",
            Self::Cmd => "cmd",
            Self::Powershell => "powershell",
            Self::Custom(template) => template.as_str(),
        }
    }
}

/// A shell command with its optional working directory and shell selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCommand {
    pub command: String,
    pub working_dir: Option<String>,
    pub shell: Option<Shell>,
}

impl RunCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            working_dir: None,
            shell: None,
        }
    }

    pub fn working_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn shell(mut self, shell: Shell) -> Self {
        self.shell = Some(shell);
        self
    }
}

impl From<&str> for RunCommand {
    fn from(command: &str) -> Self {
        Self::new(command)
    }
}

impl From<String> for RunCommand {
    fn from(command: String) -> Self {
        Self::new(command)
    }
}

/// Reference to an external action, such as `actions/checkout@v4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseAction {
    pub reference: String,
}

/// What a step executes. Exactly one of the two shapes is ever emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    Run(RunCommand),
    Uses(UseAction),
}

/// Inputs handed to an action through its `with` block.
///
/// `args` and `entrypoint` are the two inputs the schema names; everything else goes into
/// `params`, which is flattened next to them when generated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepValues {
    pub args: Option<String>,
    pub entrypoint: Option<String>,
    pub params: IndexMap<String, Scalar>,
}

impl StepValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Scalar>,
    {
        params.into_iter().fold(Self::new(), |values, (key, value)| values.param(key, value))
    }

    pub fn args(mut self, args: impl Into<String>) -> Self {
        self.args = Some(args.into());
        self
    }

    pub fn entrypoint(mut self, entrypoint: impl Into<String>) -> Self {
        self.entrypoint = Some(entrypoint.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// A single step within a job.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub id: Option<String>,
    pub name: Option<String>,
    pub condition: Option<String>,
    pub monitoring: Monitoring,
    pub values: Option<StepValues>,
    pub env: Option<Env>,
    pub action: StepAction,
}

/// Entry point for a step that runs a shell command.
pub fn run(command: impl Into<RunCommand>) -> Step {
    Step::new(StepAction::Run(command.into()))
}

/// Entry point for a step that invokes an action.
pub fn uses(reference: impl Into<String>) -> Step {
    Step::new(StepAction::Uses(UseAction {
        reference: reference.into(),
    }))
}

impl Step {
    pub fn new(action: StepAction) -> Self {
        Self {
            id: None,
            name: None,
            condition: None,
            monitoring: Monitoring::default(),
            values: None,
            env: None,
            action,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Replaces the step's `with` inputs.
    pub fn with_values(mut self, values: StepValues) -> Self {
        self.values = Some(values);
        self
    }
}

impl Named for Step {
    fn name_slot(&mut self) -> &mut Option<String> {
        &mut self.name
    }
}

impl HasEnv for Step {
    fn env_slot(&mut self) -> &mut Option<Env> {
        &mut self.env
    }
}

impl Conditional for Step {
    fn condition_slot(&mut self) -> &mut Option<String> {
        &mut self.condition
    }
}

impl Monitored for Step {
    fn monitoring_slot(&mut self) -> &mut Monitoring {
        &mut self.monitoring
    }
}
