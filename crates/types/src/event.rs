//! Triggering events.

/// Filters narrowing when a source event fires. Every field is optional; an unset field is
/// omitted from the generated trigger rather than emitted empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventArgs {
    pub branches: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub paths: Option<Vec<String>>,
}

impl EventArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn branches<I, S>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.branches = Some(branches.into_iter().map(Into::into).collect());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    /// Field-wise merge: every field set on `later` replaces the one on `self`.
    pub fn merge(self, later: EventArgs) -> Self {
        Self {
            branches: later.branches.or(self.branches),
            tags: later.tags.or(self.tags),
            paths: later.paths.or(self.paths),
        }
    }
}

/// Closed set of supported triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Push(EventArgs),
    PullRequest(EventArgs),
}

impl Event {
    pub fn push(args: EventArgs) -> Self {
        Self::Push(args)
    }

    pub fn pull_request(args: EventArgs) -> Self {
        Self::PullRequest(args)
    }

    pub fn args(&self) -> &EventArgs {
        match self {
            Self::Push(args) | Self::PullRequest(args) => args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_fields_missing_from_later() {
        let earlier = EventArgs::new().branches(["main"]).paths(["src/**"]);
        let later = EventArgs::new().branches(["release"]).tags(["v*"]);

        let merged = earlier.merge(later);

        assert_eq!(merged.branches, Some(vec!["release".to_string()]));
        assert_eq!(merged.tags, Some(vec!["v*".to_string()]));
        assert_eq!(merged.paths, Some(vec!["src/**".to_string()]));
    }

    #[test]
    fn explicit_empty_list_overrides() {
        let merged = EventArgs::new().branches(["main"]).merge(EventArgs::new().branches(Vec::<String>::new()));
        assert_eq!(merged.branches, Some(Vec::new()));
    }
}
