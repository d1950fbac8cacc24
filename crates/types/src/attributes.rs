//! Attributes shared by several entity kinds.
//!
//! Each trait exposes one mutable slot accessor and provides the consuming combinators on top of
//! it, so `named`, `env`, `condition`, and the monitoring setters read the same whether they are
//! chained on a workflow, a job, or a step.

use crate::env::{Env, Scalar};

/// Entities that carry an optional display name.
pub trait Named: Sized {
    fn name_slot(&mut self) -> &mut Option<String>;

    fn named(mut self, name: impl Into<String>) -> Self {
        *self.name_slot() = Some(name.into());
        self
    }
}

/// Entities that carry an environment variable mapping.
pub trait HasEnv: Sized {
    fn env_slot(&mut self) -> &mut Option<Env>;

    /// Sets a single variable; a later call for the same key wins.
    fn env(self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.with_env(Env::new().set(key, value))
    }

    /// Merges a whole mapping into the current one; its keys win on conflict.
    fn with_env(mut self, env: impl Into<Env>) -> Self {
        let slot = self.env_slot();
        let current = slot.take().unwrap_or_default();
        *slot = Some(current.merge(env.into()));
        self
    }
}

/// Entities that may be skipped based on an `if` expression.
pub trait Conditional: Sized {
    fn condition_slot(&mut self) -> &mut Option<String>;

    fn condition(mut self, expression: impl Into<String>) -> Self {
        *self.condition_slot() = Some(expression.into());
        self
    }
}

/// `continue-on-error` accepts either a literal flag or an expression evaluated at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContinueOnError {
    Flag(bool),
    Expression(String),
}

impl From<bool> for ContinueOnError {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for ContinueOnError {
    fn from(value: &str) -> Self {
        Self::Expression(value.to_string())
    }
}

impl From<String> for ContinueOnError {
    fn from(value: String) -> Self {
        Self::Expression(value)
    }
}

/// Failure tolerance and time limit shared by jobs and steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Monitoring {
    pub continue_on_error: Option<ContinueOnError>,
    pub timeout_minutes: Option<u32>,
}

/// Entities that carry [`Monitoring`] attributes.
pub trait Monitored: Sized {
    fn monitoring_slot(&mut self) -> &mut Monitoring;

    fn continue_on_error(mut self, value: impl Into<ContinueOnError>) -> Self {
        self.monitoring_slot().continue_on_error = Some(value.into());
        self
    }

    fn timeout_minutes(mut self, minutes: u32) -> Self {
        self.monitoring_slot().timeout_minutes = Some(minutes);
        self
    }

    /// Replaces both monitoring attributes at once.
    fn monitoring(mut self, monitoring: Monitoring) -> Self {
        *self.monitoring_slot() = monitoring;
        self
    }
}
