//! Display text lookup used when building endpoint entries

use std::collections::BTreeMap;

/// Options passed along with a lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TOptions {
    pub ns: Option<String>,
    pub replace: BTreeMap<String, String>,
}

impl TOptions {
    pub fn ns(ns: impl Into<String>) -> Self {
        Self {
            ns: Some(ns.into()),
            replace: BTreeMap::new(),
        }
    }

    pub fn with_replace(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.replace.insert(name.into(), value.into());
        self
    }
}

/// `(key, fallback text, options) -> display string`
pub trait Translate {
    fn translate(&self, key: &str, text: Option<&str>, options: &TOptions) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str, Option<&str>, &TOptions) -> String,
{
    fn translate(&self, key: &str, text: Option<&str>, options: &TOptions) -> String {
        self(key, text, options)
    }
}

/// Prefers an interpolated `host`, then the fallback text, then the key.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTranslate;

impl Translate for DefaultTranslate {
    fn translate(&self, key: &str, text: Option<&str>, options: &TOptions) -> String {
        options
            .replace
            .get("host")
            .map(String::as_str)
            .filter(|host| !host.is_empty())
            .or(text.filter(|text| !text.is_empty()))
            .unwrap_or(key)
            .to_string()
    }
}

/// Catalog-backed lookup with `{{name}}` interpolation.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslate {
    entries: BTreeMap<String, String>,
}

impl CatalogTranslate {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}

impl Translate for CatalogTranslate {
    fn translate(&self, key: &str, text: Option<&str>, options: &TOptions) -> String {
        let template = self
            .entries
            .get(key)
            .map(String::as_str)
            .or(text)
            .filter(|template| !template.is_empty())
            .unwrap_or(key);
        interpolate(template, &options.replace)
    }
}

/// Replaces every `{{name}}` that has a value in `replace`; unknown names stay.
pub fn interpolate(template: &str, replace: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = after[..end].trim();
        match replace.get(name) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefers_host() {
        let options = TOptions::ns("apps-config").with_replace("host", "example.org");
        assert_eq!(DefaultTranslate.translate("k", Some("text"), &options), "example.org");
    }

    #[test]
    fn test_default_falls_back_to_text_then_key() {
        let options = TOptions::ns("apps-config");
        assert_eq!(DefaultTranslate.translate("k", Some("text"), &options), "text");
        assert_eq!(DefaultTranslate.translate("k", None, &options), "k");
        assert_eq!(DefaultTranslate.translate("k", Some(""), &options), "k");
    }

    #[test]
    fn test_default_does_not_interpolate() {
        let options = TOptions::ns("apps-config").with_replace("WS_URL", "wss://x");
        assert_eq!(
            DefaultTranslate.translate("rpc.dev.custom.entry", Some("Custom {{WS_URL}}"), &options),
            "Custom {{WS_URL}}"
        );
    }

    #[test]
    fn test_catalog_interpolates() {
        let mut entries = BTreeMap::new();
        entries.insert("rpc.header.dev".to_string(), "Dev nodes".to_string());
        let t = CatalogTranslate::new(entries);

        assert_eq!(t.translate("rpc.header.dev", Some("Development"), &TOptions::default()), "Dev nodes");

        let options = TOptions::default().with_replace("WS_URL", "wss://x");
        assert_eq!(
            t.translate("rpc.dev.custom.entry", Some("Custom {{WS_URL}}"), &options),
            "Custom wss://x"
        );
    }

    #[test]
    fn test_interpolate_leaves_unknown_and_unclosed() {
        let replace = BTreeMap::from([("a".to_string(), "1".to_string())]);
        assert_eq!(interpolate("{{a}}-{{b}}-{{ a }}", &replace), "1-{{b}}-1");
        assert_eq!(interpolate("x {{a", &replace), "x {{a");
    }

    #[test]
    fn test_closure_translate() {
        let t = |key: &str, _: Option<&str>, _: &TOptions| key.to_uppercase();
        assert_eq!(t.translate("abc", None, &TOptions::default()), "ABC");
    }
}
