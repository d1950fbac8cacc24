//! The top-level authored unit.

use crate::attributes::{HasEnv, Named};
use crate::env::Env;
use crate::event::{Event, EventArgs};
use crate::job::Job;

/// Triggers, environment, and jobs of a single workflow file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workflow {
    pub name: Option<String>,
    pub env: Option<Env>,
    /// Triggers in declaration order; later ones win when two share a type.
    pub on: Vec<Event>,
    /// `None` until a job combinator runs, so a trigger-only workflow emits no `jobs` key.
    pub jobs: Option<Vec<Job>>,
}

/// Entry point: a named workflow with no triggers.
pub fn workflow(name: impl Into<String>) -> Workflow {
    Workflow::default().named(name)
}

impl Workflow {
    pub fn on(mut self, event: Event) -> Self {
        self.on.push(event);
        self
    }

    pub fn on_push(self, args: EventArgs) -> Self {
        self.on(Event::Push(args))
    }

    pub fn on_pull_request(self, args: EventArgs) -> Self {
        self.on(Event::PullRequest(args))
    }

    pub fn job(self, job: Job) -> Self {
        self.jobs([job])
    }

    pub fn jobs(mut self, jobs: impl IntoIterator<Item = Job>) -> Self {
        self.jobs.get_or_insert_with(Vec::new).extend(jobs);
        self
    }
}

impl Named for Workflow {
    fn name_slot(&mut self) -> &mut Option<String> {
        &mut self.name
    }
}

impl HasEnv for Workflow {
    fn env_slot(&mut self) -> &mut Option<Env> {
        &mut self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Scalar;
    use crate::job::job;

    #[test]
    fn has_name() {
        let definition = workflow("github action");
        assert_eq!(definition.name.as_deref(), Some("github action"));
        assert!(definition.on.is_empty());
        assert!(definition.jobs.is_none());
    }

    #[test]
    fn events_keep_declaration_order() {
        let definition = workflow("github action")
            .on_push(EventArgs::new().branches(["master"]))
            .on_pull_request(EventArgs::new().tags(["ci"]));

        assert_eq!(definition.on.len(), 2);
        assert!(matches!(&definition.on[0], Event::Push(args) if args.branches == Some(vec!["master".to_string()]) && args.tags.is_none()));
        assert!(matches!(&definition.on[1], Event::PullRequest(args) if args.branches.is_none() && args.tags == Some(vec!["ci".to_string()])));
    }

    #[test]
    fn env_calls_accumulate() {
        let definition = workflow("github action")
            .env("MY_SECRET1", "MY_VALUE1")
            .env("MY_SECRET2", "MY_VALUE2")
            .with_env([("MY_SECRET3", "MY_VALUE3"), ("MY_SECRET4", "MY_VALUE4")]);

        let env = definition.env.expect("env set");
        assert_eq!(env.len(), 4);
        assert_eq!(env.get("MY_SECRET2"), Some(&Scalar::from("MY_VALUE2")));
        assert_eq!(env.get("MY_SECRET4"), Some(&Scalar::from("MY_VALUE4")));
    }

    #[test]
    fn empty_job_list_is_still_present() {
        let definition = workflow("noop").jobs(Vec::new());
        assert_eq!(definition.jobs, Some(Vec::new()));

        let definition = definition.job(job("a")).job(job("b"));
        assert_eq!(definition.jobs.map(|jobs| jobs.len()), Some(2));
    }
}
