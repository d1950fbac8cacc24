//! Workflows bundled with the binary, authored through the builder DSL.

use clap::ValueEnum;
use ghflow_types::prelude::*;

/// Names accepted by `--preset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Yarn lint job backed by a Postgres service.
    NodeCi,
    /// Format, lint, and test jobs for a Cargo workspace.
    RustCi,
}

impl Preset {
    pub fn build(self) -> Workflow {
        match self {
            Self::NodeCi => node_ci(),
            Self::RustCi => rust_ci(),
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::NodeCi => "yarn lint with a postgres service",
            Self::RustCi => "cargo fmt, clippy, and test on push and pull request",
        }
    }
}

fn node_ci() -> Workflow {
    workflow("github action")
        .on_push(EventArgs::new().branches(["master"]))
        .on_pull_request(EventArgs::new().tags(["ci"]))
        .env("MY_SECRET1", "MY_VALUE1")
        .env("MY_SECRET2", "MY_VALUE2")
        .with_env([("MY_SECRET3", "MY_VALUE3"), ("MY_SECRET4", "MY_VALUE4")])
        .job(
            job("lint")
                .service(
                    "postgres",
                    Container::new("postgres:9.6")
                        .port("5432:5432")
                        .options("--health-cmd pg_isready\n--health-interval 10s\n--health-timeout 5s\n--health-retries 5"),
                )
                .runs_on("ubuntu-latest")
                .steps([
                    uses("actions/checkout@v1").named("Checkout"),
                    uses("actions/setup-node@v1")
                        .named("Setup Node v12")
                        .with_values(StepValues::params([("node-version", "12.x")])),
                    run("npm install -g yarn\nyarn\nyarn lint").named("Lint"),
                ]),
        )
}

fn rust_ci() -> Workflow {
    let checkout = uses("actions/checkout@v4").named("Checkout");
    let toolchain = uses("dtolnay/rust-toolchain@stable")
        .named("Install toolchain")
        .with_values(StepValues::params([("components", "rustfmt, clippy")]));

    workflow("rust")
        .on_push(EventArgs::new().branches(["main"]))
        .on_pull_request(EventArgs::new().branches(["main"]))
        .env("CARGO_TERM_COLOR", "always")
        .jobs([
            job("fmt")
                .named("Format")
                .runs_on("ubuntu-latest")
                .steps([checkout.clone(), toolchain.clone(), run("cargo fmt --all -- --check")]),
            job("clippy")
                .named("Clippy")
                .runs_on("ubuntu-latest")
                .needs("fmt")
                .steps([
                    checkout.clone(),
                    toolchain.clone(),
                    run("cargo clippy --workspace --all-targets -- -D warnings"),
                ]),
            job("test")
                .named("Test")
                .runs_on("ubuntu-latest")
                .needs_all(["fmt", "clippy"])
                .timeout_minutes(30)
                .steps([
                    checkout,
                    toolchain,
                    run("cargo test --workspace").env("RUST_BACKTRACE", 1),
                ]),
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghflow_gen::{RenderOptions, generate, render};
    use serde_yaml::Value;

    #[test]
    fn every_job_in_every_preset_has_a_runner() {
        for preset in Preset::value_variants() {
            let document = generate(&preset.build());
            let jobs = document.get("jobs").and_then(Value::as_mapping).expect("jobs mapping");
            for (id, job) in jobs {
                assert!(job.get("runs-on").is_some(), "{preset:?} job {id:?} has no runs-on");
            }
        }
    }

    #[test]
    fn node_preset_matches_expected_document() {
        let expected: Value = serde_yaml::from_str(
            r#"
name: github action
env:
  MY_SECRET1: MY_VALUE1
  MY_SECRET2: MY_VALUE2
  MY_SECRET3: MY_VALUE3
  MY_SECRET4: MY_VALUE4
"on":
  push: {branches: [master]}
  pull_request: {tags: [ci]}
jobs:
  lint:
    runs-on: ubuntu-latest
    services:
      postgres:
        image: postgres:9.6
        ports: ["5432:5432"]
        options: "--health-cmd pg_isready\n--health-interval 10s\n--health-timeout 5s\n--health-retries 5"
    steps:
      - name: Checkout
        uses: actions/checkout@v1
      - name: Setup Node v12
        uses: actions/setup-node@v1
        with: {node-version: 12.x}
      - name: Lint
        run: "npm install -g yarn\nyarn\nyarn lint"
"#,
        )
        .expect("parse expected document");

        let options = RenderOptions::sorted();
        assert_eq!(
            render(&Preset::NodeCi.build(), &options).expect("render preset"),
            ghflow_gen::render_value(expected, &options).expect("render expected")
        );
    }
}
