//! Maps the builder model onto the workflow schema's shape.
//!
//! Generation is pure and total: it renames fields to their schema keys, drops every absent
//! attribute, and folds repeated triggers and environment entries into single keys. It does not
//! check required schema fields such as `runs-on`; a document missing them is returned as is.

use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};
use tracing::{debug, trace};

use ghflow_types::{
    Container, ContinueOnError, Credentials, Env, Event, EventArgs, Job, Monitoring, Port, RunsOn, Scalar, Step,
    StepAction, StepValues, Workflow,
};

use crate::document::Document;
use crate::record::Record;

/// Generates the schema document for `workflow`.
///
/// Top-level keys appear as `name`, `on`, `env`, `jobs`. `on` is always written, even when no
/// trigger was declared; `jobs` is written once any job combinator has run, even for an empty
/// list.
pub fn generate(workflow: &Workflow) -> Document {
    let mut record = Record::new();
    record
        .copy("name", workflow.name.clone())
        .insert("on", generate_events(&workflow.on))
        .copy_with("env", workflow.env.as_ref().and_then(generate_env), Value::Mapping)
        .copy_with("jobs", workflow.jobs.as_deref(), |jobs| Value::Mapping(generate_jobs(jobs)));

    debug!(
        name = workflow.name.as_deref().unwrap_or_default(),
        events = workflow.on.len(),
        jobs = workflow.jobs.as_ref().map_or(0, Vec::len),
        "generated workflow document"
    );
    Document::new(record.into_mapping())
}

/// Key under which an event's filters appear in `on`.
pub fn event_key(event: &Event) -> &'static str {
    match event {
        Event::Push(_) => "push",
        Event::PullRequest(_) => "pull_request",
    }
}

/// Folds triggers into one entry per event type. The first occurrence fixes the key's position;
/// later occurrences merge into it field by field.
fn generate_events(events: &[Event]) -> Value {
    let mut union: IndexMap<&'static str, EventArgs> = IndexMap::new();
    for event in events {
        let key = event_key(event);
        match union.get_mut(key) {
            Some(existing) => {
                trace!(event = key, "merging repeated trigger");
                *existing = std::mem::take(existing).merge(event.args().clone());
            }
            None => {
                union.insert(key, event.args().clone());
            }
        }
    }

    let mapping: Mapping = union
        .into_iter()
        .map(|(key, args)| (Value::from(key), generate_event_args(&args)))
        .collect();
    Value::Mapping(mapping)
}

fn generate_event_args(args: &EventArgs) -> Value {
    let mut record = Record::new();
    record
        .copy_with("branches", args.branches.as_deref(), string_sequence)
        .copy_with("tags", args.tags.as_deref(), string_sequence)
        .copy_with("paths", args.paths.as_deref(), string_sequence);
    record.into_value()
}

/// Emits only keys that hold a value. Returns `None` when nothing remains, so that callers omit
/// the `env` key instead of writing an empty mapping.
fn generate_env(env: &Env) -> Option<Mapping> {
    let mapping: Mapping = env
        .present()
        .map(|(key, value)| (Value::from(key), scalar_value(value)))
        .collect();
    if mapping.is_empty() { None } else { Some(mapping) }
}

/// Keys jobs by id. A missing id maps to the empty key and a repeated id replaces the earlier job.
fn generate_jobs(jobs: &[Job]) -> Mapping {
    let mut mapping = Mapping::new();
    for job in jobs {
        let id = job.id.clone().unwrap_or_default();
        if mapping.contains_key(id.as_str()) {
            debug!(job = %id, "job id already present, replacing earlier definition");
        }
        mapping.insert(Value::from(id), generate_job(job));
    }
    mapping
}

fn generate_job(job: &Job) -> Value {
    let mut record = Record::new();
    record
        .copy("name", job.name.clone())
        .copy_with("needs", non_empty(&job.needs), string_sequence)
        .copy("if", job.condition.clone());
    copy_monitoring(&mut record, &job.monitoring);
    record
        .copy_with("env", job.env.as_ref().and_then(generate_env), Value::Mapping)
        .copy_with("container", job.container.as_ref(), generate_container)
        .copy_non_empty(
            "services",
            job.services
                .iter()
                .map(|(id, container)| (Value::from(id.as_str()), generate_container(container)))
                .collect(),
        )
        .copy_non_empty(
            "outputs",
            job.outputs
                .iter()
                .map(|(key, expression)| (Value::from(key.as_str()), Value::from(expression.as_str())))
                .collect(),
        )
        .copy_with("steps", non_empty(&job.steps), |steps| {
            Value::Sequence(steps.iter().map(generate_step).collect())
        })
        // runs-on goes last so its position stays stable across attribute changes.
        .copy_with("runs-on", job.runs_on.as_ref(), runs_on_value);
    record.into_value()
}

fn generate_step(step: &Step) -> Value {
    let mut record = Record::new();
    record
        .copy("id", step.id.clone())
        .copy("name", step.name.clone())
        .copy("if", step.condition.clone());
    match &step.action {
        StepAction::Uses(action) => {
            record.insert("uses", action.reference.as_str());
        }
        StepAction::Run(command) => {
            record
                .insert("run", command.command.as_str())
                .copy("working-dir", command.working_dir.clone())
                .copy_with("shell", command.shell.as_ref(), |shell| Value::from(shell.as_str()));
        }
    }
    record
        .copy_with("with", step.values.as_ref(), generate_values)
        .copy_with("env", step.env.as_ref().and_then(generate_env), Value::Mapping);
    copy_monitoring(&mut record, &step.monitoring);
    record.into_value()
}

/// `args`, `entrypoint`, and every parameter share one level of the `with` mapping.
fn generate_values(values: &StepValues) -> Value {
    let mut record = Record::new();
    record
        .copy("args", values.args.clone())
        .copy("entrypoint", values.entrypoint.clone());
    for (key, value) in &values.params {
        record.insert(key, scalar_value(value));
    }
    record.into_value()
}

fn generate_container(container: &Container) -> Value {
    let mut record = Record::new();
    record
        .insert("image", container.image.as_str())
        .copy_with("credentials", container.credentials.as_ref(), generate_credentials)
        .copy_with("env", container.env.as_ref().and_then(generate_env), Value::Mapping)
        .copy_with("ports", non_empty(&container.ports), |ports| {
            Value::Sequence(ports.iter().map(port_value).collect())
        })
        .copy_with("volumes", non_empty(&container.volumes), string_sequence)
        .copy("options", container.options.clone());
    record.into_value()
}

fn generate_credentials(credentials: &Credentials) -> Value {
    let mut record = Record::new();
    record
        .copy("username", credentials.username.clone())
        .copy("password", credentials.password.clone());
    record.into_value()
}

fn copy_monitoring(record: &mut Record, monitoring: &Monitoring) {
    record
        .copy_with("continue-on-error", monitoring.continue_on_error.as_ref(), |value| match value {
            ContinueOnError::Flag(flag) => Value::Bool(*flag),
            ContinueOnError::Expression(expression) => Value::from(expression.as_str()),
        })
        .copy("timeout-minutes", monitoring.timeout_minutes);
}

fn runs_on_value(runs_on: &RunsOn) -> Value {
    match runs_on {
        RunsOn::Label(label) => Value::from(label.as_str()),
        RunsOn::Labels(labels) => string_sequence(labels),
    }
}

fn port_value(port: &Port) -> Value {
    match port {
        Port::Number(number) => Value::from(*number),
        Port::Mapping(mapping) => Value::from(mapping.as_str()),
    }
}

pub(crate) fn scalar_value(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::String(text) => Value::from(text.as_str()),
        Scalar::Integer(number) => Value::from(*number),
        Scalar::Float(number) => Value::from(*number),
        Scalar::Bool(flag) => Value::Bool(*flag),
    }
}

fn string_sequence(items: &[String]) -> Value {
    Value::Sequence(items.iter().map(|item| Value::from(item.as_str())).collect())
}

fn non_empty<T>(items: &[T]) -> Option<&[T]> {
    if items.is_empty() { None } else { Some(items) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghflow_types::prelude::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).expect("parse expected yaml")
    }

    #[test]
    fn repeated_event_types_merge_field_wise() {
        let definition = workflow("ci")
            .on_push(EventArgs::new().branches(["main"]).paths(["src/**"]))
            .on_pull_request(EventArgs::new())
            .on_push(EventArgs::new().branches(["release"]));

        let on = generate(&definition).get("on").cloned().expect("on present");
        assert_eq!(
            on,
            yaml("push: {branches: [release], paths: ['src/**']}\npull_request: {}\n")
        );
        let keys: Vec<_> = on.as_mapping().expect("mapping").keys().cloned().collect();
        assert_eq!(keys, vec![Value::from("push"), Value::from("pull_request")]);
    }

    #[test]
    fn on_is_written_without_triggers() {
        let document = generate(&workflow("manual"));
        assert_eq!(document.get("on"), Some(&Value::Mapping(Mapping::new())));
        assert!(document.get("jobs").is_none());
        assert!(document.get("env").is_none());
    }

    #[test]
    fn env_skips_unset_keys_but_keeps_falsy_values() {
        let definition = workflow("ci").with_env(
            Env::new()
                .set("ZERO", 0)
                .set("OFF", false)
                .set("EMPTY", "")
                .set("DROPPED", "x")
                .unset("DROPPED"),
        );

        let env = generate(&definition).get("env").cloned().expect("env present");
        assert_eq!(env, yaml("ZERO: 0\nOFF: false\nEMPTY: ''\n"));
    }

    #[test]
    fn env_with_only_unset_keys_is_omitted() {
        let definition = workflow("ci").with_env(Env::new().unset("GONE"));
        assert!(generate(&definition).get("env").is_none());
    }

    #[test]
    fn job_fields_are_renamed_and_runs_on_is_last() {
        let definition = workflow("ci").job(
            job("build")
                .named("Build")
                .runs_on("ubuntu-latest")
                .needs("lint")
                .condition("github.event_name == 'push'")
                .continue_on_error("${{ matrix.experimental }}")
                .timeout_minutes(30)
                .env("CI", true)
                .output("artifact", "${{ steps.pack.outputs.path }}")
                .step(run("make")),
        );

        let document = generate(&definition);
        let jobs = document.get("jobs").and_then(Value::as_mapping).expect("jobs mapping");
        let build = jobs.get("build").and_then(Value::as_mapping).expect("build job");

        let keys: Vec<_> = build.keys().filter_map(Value::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "name",
                "needs",
                "if",
                "continue-on-error",
                "timeout-minutes",
                "env",
                "outputs",
                "steps",
                "runs-on"
            ]
        );
        assert_eq!(build.get("needs"), Some(&yaml("[lint]")));
        assert_eq!(build.get("continue-on-error"), Some(&Value::from("${{ matrix.experimental }}")));
    }

    #[test]
    fn self_hosted_labels_emit_a_sequence() {
        let definition = workflow("ci").job(job("gpu").runs_on(["self-hosted", "linux", "x64"]));
        let document = generate(&definition);
        let runs_on = document
            .get("jobs")
            .and_then(|jobs| jobs.get("gpu"))
            .and_then(|job| job.get("runs-on"))
            .cloned();
        assert_eq!(runs_on, Some(yaml("[self-hosted, linux, x64]")));
    }

    #[test]
    fn run_step_fields() {
        let step = run(RunCommand::new("pytest").working_dir("api").shell(Shell::Python))
            .id("test")
            .condition("success()")
            .env("PYTHONUNBUFFERED", 1);

        assert_eq!(
            generate_step(&step),
            yaml("id: test\nif: success()\nrun: pytest\nworking-dir: api\nshell: python\nenv: {PYTHONUNBUFFERED: 1}\n")
        );
    }

    #[test]
    fn with_block_flattens_params_next_to_args() {
        let step = uses("docker://alpine:3").with_values(
            StepValues::params([("retries", Scalar::from(3)), ("verbose", Scalar::from(true))])
                .args("--help")
                .entrypoint("/bin/sh"),
        );

        assert_eq!(
            generate_step(&step),
            yaml("uses: docker://alpine:3\nwith: {args: \"--help\", entrypoint: /bin/sh, retries: 3, verbose: true}\n")
        );
    }

    #[test]
    fn services_and_container_are_emitted() {
        let definition = workflow("ci").job(
            job("db")
                .runs_on("ubuntu-latest")
                .container(Container::new("node:20").volume("/cache:/cache"))
                .service(
                    "postgres",
                    Container::new("postgres:9.6")
                        .ports(["5432:5432"])
                        .port(6543)
                        .credentials("bot", "${{ secrets.PASSWORD }}")
                        .env("POSTGRES_PASSWORD", "postgres"),
                ),
        );

        let document = generate(&definition);
        let db = document.get("jobs").and_then(|jobs| jobs.get("db")).cloned().expect("db job");
        assert_eq!(
            db,
            yaml(
                r#"
container:
  image: node:20
  volumes: ["/cache:/cache"]
services:
  postgres:
    image: postgres:9.6
    credentials: {username: bot, password: "${{ secrets.PASSWORD }}"}
    env: {POSTGRES_PASSWORD: postgres}
    ports: ["5432:5432", 6543]
runs-on: ubuntu-latest
"#
            )
        );
    }
}
