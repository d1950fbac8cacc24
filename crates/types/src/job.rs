//! Jobs: a runner target plus an ordered list of steps.

use indexmap::IndexMap;

use crate::attributes::{Conditional, HasEnv, Monitored, Monitoring, Named};
use crate::container::Container;
use crate::env::Env;
use crate::step::Step;

/// Where a job executes: a single runner label (or expression) or a set of labels that a
/// self-hosted runner must all match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunsOn {
    Label(String),
    Labels(Vec<String>),
}

impl From<&str> for RunsOn {
    fn from(value: &str) -> Self {
        Self::Label(value.to_string())
    }
}

impl From<String> for RunsOn {
    fn from(value: String) -> Self {
        Self::Label(value)
    }
}

impl From<Vec<String>> for RunsOn {
    fn from(value: Vec<String>) -> Self {
        Self::Labels(value)
    }
}

impl<const N: usize> From<[&str; N]> for RunsOn {
    fn from(value: [&str; N]) -> Self {
        Self::Labels(value.iter().map(|label| label.to_string()).collect())
    }
}

/// A unit of execution within a workflow.
///
/// `id` decides the job's key in the generated job map; an unset id lands under the empty key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Job {
    pub id: Option<String>,
    pub name: Option<String>,
    pub env: Option<Env>,
    pub condition: Option<String>,
    pub monitoring: Monitoring,
    /// Upstream job ids, flat and in call order.
    pub needs: Vec<String>,
    pub runs_on: Option<RunsOn>,
    pub container: Option<Container>,
    pub services: IndexMap<String, Container>,
    pub outputs: IndexMap<String, String>,
    pub steps: Vec<Step>,
}

/// Entry point for a job keyed by `id`.
pub fn job(id: impl Into<String>) -> Job {
    Job::default().id(id)
}

impl Job {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn runs_on(mut self, target: impl Into<RunsOn>) -> Self {
        self.runs_on = Some(target.into());
        self
    }

    /// Appends a single upstream dependency.
    pub fn needs(mut self, job_id: impl Into<String>) -> Self {
        self.needs.push(job_id.into());
        self
    }

    /// Appends several upstream dependencies.
    pub fn needs_all<I, S>(mut self, job_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.needs.extend(job_ids.into_iter().map(Into::into));
        self
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.steps.extend(steps);
        self
    }

    pub fn container(mut self, container: Container) -> Self {
        self.container = Some(container);
        self
    }

    /// Adds a sidecar service; reusing an id replaces the earlier definition.
    pub fn service(mut self, id: impl Into<String>, container: Container) -> Self {
        self.services.insert(id.into(), container);
        self
    }

    pub fn output(mut self, key: impl Into<String>, expression: impl Into<String>) -> Self {
        self.outputs.insert(key.into(), expression.into());
        self
    }
}

impl Named for Job {
    fn name_slot(&mut self) -> &mut Option<String> {
        &mut self.name
    }
}

impl HasEnv for Job {
    fn env_slot(&mut self) -> &mut Option<Env> {
        &mut self.env
    }
}

impl Conditional for Job {
    fn condition_slot(&mut self) -> &mut Option<String> {
        &mut self.condition
    }
}

impl Monitored for Job {
    fn monitoring_slot(&mut self) -> &mut Monitoring {
        &mut self.monitoring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{run, uses};

    #[test]
    fn single_and_multi_dependencies_stay_flat() {
        let job = job("deploy").needs("build").needs_all(["lint", "test"]);
        assert_eq!(job.needs, vec!["build", "lint", "test"]);
    }

    #[test]
    fn steps_append_in_call_order() {
        let job = job("lint")
            .step(uses("actions/checkout@v1"))
            .steps([run("yarn"), run("yarn lint")]);
        assert_eq!(job.steps.len(), 3);
    }

    #[test]
    fn deriving_from_a_clone_does_not_touch_the_original() {
        let base = job("test").runs_on("ubuntu-latest");
        let extended = base.clone().env("CI", true).needs("build");

        assert!(base.env.is_none());
        assert!(base.needs.is_empty());
        assert_eq!(extended.needs, vec!["build"]);
    }

    #[test]
    fn service_ids_are_unique() {
        let job = job("db")
            .service("postgres", Container::new("postgres:9.6"))
            .service("postgres", Container::new("postgres:16"));
        assert_eq!(job.services.len(), 1);
        assert_eq!(job.services["postgres"].image, "postgres:16");
    }
}
