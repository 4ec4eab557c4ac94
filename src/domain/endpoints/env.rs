//! Environment lookups for endpoint overrides

use std::collections::BTreeMap;

/// Named string values, e.g. `WS_URL`.
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

impl<E: EnvSource + ?Sized> EnvSource for Box<E> {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Global-scope `process_env` table, loaded from config.
#[derive(Debug, Clone, Default)]
pub struct GlobalEnv {
    process_env: BTreeMap<String, String>,
}

impl GlobalEnv {
    pub fn new(process_env: BTreeMap<String, String>) -> Self {
        Self { process_env }
    }
}

impl EnvSource for GlobalEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.process_env.get(name).cloned()
    }
}

/// Ordered fallback: the first source with a non-empty value wins.
#[derive(Default)]
pub struct EnvChain {
    sources: Vec<Box<dyn EnvSource>>,
}

impl EnvChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, source: impl EnvSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl std::fmt::Debug for EnvChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvChain")
            .field("sources", &self.sources.len())
            .finish()
    }
}

impl EnvSource for EnvChain {
    fn var(&self, name: &str) -> Option<String> {
        self.sources
            .iter()
            .filter_map(|source| source.var(name))
            .find(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(pairs: &[(&str, &str)]) -> GlobalEnv {
        GlobalEnv::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_chain_first_non_empty_wins() {
        let chain = EnvChain::new()
            .then(global(&[("WS_URL", "")]))
            .then(global(&[("WS_URL", "wss://second")]))
            .then(global(&[("WS_URL", "wss://third")]));
        assert_eq!(chain.var("WS_URL").as_deref(), Some("wss://second"));
    }

    #[test]
    fn test_chain_whitespace_counts_as_set() {
        let chain = EnvChain::new()
            .then(global(&[("WS_URL", " ")]))
            .then(global(&[("WS_URL", "wss://second")]));
        assert_eq!(chain.var("WS_URL").as_deref(), Some(" "));
    }

    #[test]
    fn test_chain_absent() {
        let chain = EnvChain::new().then(global(&[]));
        assert_eq!(chain.var("WS_URL"), None);
        assert_eq!(EnvChain::new().var("WS_URL"), None);
    }
}
