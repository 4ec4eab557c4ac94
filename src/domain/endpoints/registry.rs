//! Endpoint list assembly
//!
//! Order of the built list:
//! 1. custom environment endpoint (header + entry), when `WS_URL` is set
//! 2. development header and one entry per development node
//! 3. externally supplied sections, in the order they were added
//!
//! Disabled entries are dropped at the end; everything else keeps its order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::env::EnvSource;
use super::translate::{TOptions, Translate};

pub const CUSTOM_URL_VAR: &str = "WS_URL";
pub const NODES_LOGO: &str = "nodes/ggx.png";

const NS: &str = "apps-config";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointUi {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// One row of the endpoint picker. Headers have an empty `value`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(default)]
    pub is_header: bool,
    #[serde(default)]
    pub is_development: bool,
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default)]
    pub is_spaced: bool,
    #[serde(default)]
    pub is_unreachable: bool,
    pub text: String,
    #[serde(default)]
    pub text_by: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default)]
    pub ui: EndpointUi,
}

impl Endpoint {
    pub fn header(text: impl Into<String>) -> Self {
        Self {
            is_header: true,
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            text: text.into(),
            text_by: url.clone(),
            value: url,
            ..Self::default()
        }
    }

    pub fn is_selectable(&self) -> bool {
        !self.is_header && !self.is_disabled && !self.value.is_empty()
    }
}

/// Statically configured development node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DevNode {
    pub name: String,
    pub link: String,
}

impl DevNode {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
        }
    }
}

pub fn default_dev_nodes() -> Vec<DevNode> {
    vec![
        DevNode::new("SYDNEY", "wss://gate.ggxchain.net/sydney-archive:9944"),
        DevNode::new("BROOKLYN", "wss://brooklyn-archive.dev.ggxchain.io:9944"),
    ]
}

#[derive(Debug)]
pub struct EndpointRegistry<E> {
    env: E,
    dev_nodes: Vec<DevNode>,
    sections: Vec<Vec<Endpoint>>,
}

impl<E: EnvSource> EndpointRegistry<E> {
    pub fn new(env: E, dev_nodes: Vec<DevNode>) -> Self {
        Self {
            env,
            dev_nodes,
            sections: Vec::new(),
        }
    }

    /// Appends an externally supplied section (production, testing, ...).
    pub fn with_section(mut self, section: Vec<Endpoint>) -> Self {
        self.sections.push(section);
        self
    }

    pub fn build(&self, t: &dyn Translate) -> Vec<Endpoint> {
        let mut entries = self.custom_section(t);
        entries.push(Endpoint {
            is_development: true,
            is_spaced: true,
            ..Endpoint::header(t.translate("rpc.header.dev", Some("Development"), &TOptions::ns(NS)))
        });
        entries.extend(self.dev_section(t));
        entries.extend(self.sections.iter().flatten().cloned());

        let built: Vec<Endpoint> = entries
            .into_iter()
            .filter(|entry| !entry.is_disabled)
            .collect();
        debug!(count = built.len(), "built endpoint list");
        built
    }

    fn custom_section(&self, t: &dyn Translate) -> Vec<Endpoint> {
        let Some(url) = self
            .env
            .var(CUSTOM_URL_VAR)
            .filter(|url| !url.is_empty())
        else {
            return Vec::new();
        };

        let header = Endpoint::header(t.translate(
            "rpc.dev.custom",
            Some("Custom environment"),
            &TOptions::ns(NS),
        ));
        let text = t.translate(
            "rpc.dev.custom.entry",
            Some("Custom {{WS_URL}}"),
            &TOptions::ns(NS).with_replace(CUSTOM_URL_VAR, url.clone()),
        );
        let entry = Endpoint {
            info: Some(CUSTOM_URL_VAR.to_string()),
            ..Endpoint::link(text, url)
        };
        vec![header, entry]
    }

    fn dev_section(&self, t: &dyn Translate) -> Vec<Endpoint> {
        self.dev_nodes
            .iter()
            .map(|node| Endpoint {
                info: Some("local".to_string()),
                ui: EndpointUi {
                    logo: Some(NODES_LOGO.to_string()),
                },
                ..Endpoint::link(
                    t.translate("", Some(&node.name), &TOptions::ns(NS)),
                    node.link.clone(),
                )
            })
            .collect()
    }
}
