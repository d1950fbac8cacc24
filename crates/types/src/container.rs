//! Containers used as a job's runtime image or as sidecar services.

use crate::attributes::HasEnv;
use crate::env::Env;

/// Port published by a container, either a bare number or a `host:container` mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Port {
    Number(u16),
    Mapping(String),
}

impl From<u16> for Port {
    fn from(value: u16) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Port {
    fn from(value: &str) -> Self {
        Self::Mapping(value.to_string())
    }
}

impl From<String> for Port {
    fn from(value: String) -> Self {
        Self::Mapping(value)
    }
}

/// Registry credentials for pulling a private image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// A container definition. `image` is the only required field.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub image: String,
    pub credentials: Option<Credentials>,
    pub env: Option<Env>,
    pub ports: Vec<Port>,
    pub volumes: Vec<String>,
    /// Extra `docker create` options, passed through verbatim.
    pub options: Option<String>,
}

impl Container {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            credentials: None,
            env: None,
            ports: Vec::new(),
            volumes: Vec::new(),
            options: None,
        }
    }

    pub fn port(mut self, port: impl Into<Port>) -> Self {
        self.ports.push(port.into());
        self
    }

    pub fn ports<I, P>(mut self, ports: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Port>,
    {
        self.ports.extend(ports.into_iter().map(Into::into));
        self
    }

    pub fn volume(mut self, volume: impl Into<String>) -> Self {
        self.volumes.push(volume.into());
        self
    }

    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials {
            username: Some(username.into()),
            password: Some(password.into()),
        });
        self
    }
}

impl HasEnv for Container {
    fn env_slot(&mut self) -> &mut Option<Env> {
        &mut self.env
    }
}
