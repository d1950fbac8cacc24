//! Environment variable mappings and the scalar values they carry.

use indexmap::IndexMap;

/// Scalar value accepted wherever the schema allows `string | number | boolean`.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Environment variables keyed by name, preserving authoring order.
///
/// A key may be present with an absent value (see [`Env::unset`]); such keys survive merging so
/// that a later mapping can blank out an earlier assignment, but they are never emitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Env {
    entries: IndexMap<String, Option<Scalar>>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `key` assigned to `value`.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.entries.insert(key.into(), Some(value.into()));
        self
    }

    /// Returns a copy with `key` present but holding no value.
    pub fn unset(mut self, key: impl Into<String>) -> Self {
        self.entries.insert(key.into(), None);
        self
    }

    /// Shallow union of `self` and `later`; keys from `later` win on conflict.
    ///
    /// A key that already exists keeps its original position, matching how object spreads and
    /// `IndexMap::insert` order entries.
    pub fn merge(mut self, later: Env) -> Self {
        for (key, value) in later.entries {
            self.entries.insert(key, value);
        }
        self
    }

    /// Value assigned to `key`, or `None` when the key is missing or explicitly unset.
    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.entries.get(key).and_then(Option::as_ref)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All keys including unset ones, in authoring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Scalar>)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_ref()))
    }

    /// Only the keys that hold a value, in authoring order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.entries
            .iter()
            .filter_map(|(key, value)| value.as_ref().map(|value| (key.as_str(), value)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Env
where
    K: Into<String>,
    V: Into<Scalar>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().fold(Env::new(), |env, (key, value)| env.set(key, value))
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Env
where
    K: Into<String>,
    V: Into<Scalar>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_mapping_wins_and_keeps_first_position() {
        let first = Env::from([("A", "1"), ("B", "2")]);
        let second = Env::from([("B", "3"), ("C", "4")]);

        let merged = first.merge(second);

        let keys: Vec<_> = merged.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["A", "B", "C"]);
        assert_eq!(merged.get("B"), Some(&Scalar::from("3")));
    }

    #[test]
    fn unset_key_is_kept_but_not_present() {
        let env = Env::new().set("TOKEN", "abc").unset("TOKEN").set("DEBUG", false);

        assert!(env.contains_key("TOKEN"));
        assert_eq!(env.get("TOKEN"), None);
        let present: Vec<_> = env.present().collect();
        assert_eq!(present, vec![("DEBUG", &Scalar::Bool(false))]);
    }

    #[test]
    fn falsy_scalars_are_still_values() {
        let env = Env::from([("ZERO", Scalar::from(0)), ("EMPTY", Scalar::from(""))]);
        assert_eq!(env.present().count(), 2);
    }
}
