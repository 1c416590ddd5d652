use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Errors raised while reading or updating an agent's properties.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("missing property: {0}")]
    MissingKey(String),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
    #[error("malformed property {0:?}, expected key=value")]
    MalformedPair(String),
    #[error("unknown strategy {0:?}, expected random, greedy or heuristic")]
    UnknownStrategy(String),
}

/// Named properties of an agent, parsed from `key=value` pairs.
///
/// `name` and `role` are always present. Later pairs override earlier ones.
///
/// ```
/// use agent_2048::agent::Meta;
/// let meta = Meta::parse("name=bot seed=7").unwrap();
/// assert_eq!(meta.property("name").unwrap(), "bot");
/// assert_eq!(meta.property("role").unwrap(), "unknown");
/// assert_eq!(meta.value::<u64>("seed").unwrap(), 7);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    entries: BTreeMap<String, String>,
}

impl Meta {
    /// Parse whitespace-separated `key=value` pairs on top of the
    /// `name=unknown role=unknown` defaults. A pair without `=` is rejected.
    pub fn parse(args: &str) -> Result<Self, AgentError> {
        let mut meta = Meta::default();
        for pair in "name=unknown role=unknown".split_whitespace().chain(args.split_whitespace()) {
            meta.notify(pair)?;
        }
        Ok(meta)
    }

    /// Raw string value of `key`.
    pub fn property(&self, key: &str) -> Result<&str, AgentError> {
        self.entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| AgentError::MissingKey(key.to_string()))
    }

    /// Value of `key` converted with [`FromStr`].
    pub fn value<T: FromStr>(&self, key: &str) -> Result<T, AgentError> {
        let raw = self.property(key)?;
        raw.parse().map_err(|_| AgentError::InvalidValue { key: key.to_string(), value: raw.to_string() })
    }

    /// Like [`Self::value`], but an absent key yields `default`.
    ///
    /// A present key that fails to convert is still an error.
    pub fn value_or<T: FromStr>(&self, key: &str, default: T) -> Result<T, AgentError> {
        if self.contains(key) { self.value(key) } else { Ok(default) }
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool { self.entries.contains_key(key) }

    /// Insert or overwrite a single `key=value` pair.
    ///
    /// Everything after the first `=` is the value, so values may contain `=`.
    pub fn notify(&mut self, msg: &str) -> Result<(), AgentError> {
        let (key, value) = msg.split_once('=').ok_or_else(|| AgentError::MalformedPair(msg.to_string()))?;
        if key.is_empty() {
            return Err(AgentError::MalformedPair(msg.to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter().map(|(k, v)| format!("{k}={v}")).collect();
        f.write_str(&pairs.join(" "))
    }
}
