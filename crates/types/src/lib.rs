//! Builder model for CI workflow definitions.
//!
//! Every entity (`Workflow`, `Job`, `Step`, `Event`, `Container`) is a plain value. Combinators
//! take the value by ownership and hand back a new one with a single attribute set or appended,
//! so a chain such as
//!
//! ```
//! use ghflow_types::prelude::*;
//!
//! let definition = workflow("ci")
//!     .on_push(EventArgs::new().branches(["main"]))
//!     .env("RUST_LOG", "debug")
//!     .job(job("test").runs_on("ubuntu-latest").step(run("cargo test")));
//! assert_eq!(definition.on.len(), 1);
//! ```
//!
//! reads left to right like a pipeline. Cloning a value before extending it is the only way to
//! share structure, which keeps two derived workflows from ever observing each other's changes.

pub mod attributes;
pub mod container;
pub mod env;
pub mod event;
pub mod job;
pub mod step;
pub mod workflow;

pub use attributes::{Conditional, ContinueOnError, HasEnv, Monitored, Monitoring, Named};
pub use container::{Container, Credentials, Port};
pub use env::{Env, Scalar};
pub use event::{Event, EventArgs};
pub use job::{Job, RunsOn, job};
pub use step::{RunCommand, Shell, Step, StepAction, StepValues, UseAction, run, uses};
pub use workflow::{Workflow, workflow};

/// Glob import for authoring code: entry points, entity types, and the attribute traits whose
/// provided methods (`named`, `env`, `condition`, ...) must be in scope to chain.
pub mod prelude {
    pub use crate::attributes::{Conditional, ContinueOnError, HasEnv, Monitored, Named};
    pub use crate::container::{Container, Port};
    pub use crate::env::{Env, Scalar};
    pub use crate::event::{Event, EventArgs};
    pub use crate::job::{Job, RunsOn, job};
    pub use crate::step::{RunCommand, Shell, Step, StepValues, run, uses};
    pub use crate::workflow::{Workflow, workflow};
}
