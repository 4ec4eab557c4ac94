//! Splits a built endpoint list into header-delimited groups

use super::registry::Endpoint;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointGroup {
    /// Header text; `None` for entries that precede any header.
    pub header: Option<String>,
    pub is_development: bool,
    pub is_spaced: bool,
    pub networks: Vec<Endpoint>,
}

impl EndpointGroup {
    /// Networks shown when the group is expanded.
    pub fn reachable(&self) -> impl Iterator<Item = &Endpoint> {
        self.networks.iter().filter(|network| !network.is_unreachable)
    }
}

pub fn group_endpoints(entries: &[Endpoint]) -> Vec<EndpointGroup> {
    let mut groups: Vec<EndpointGroup> = Vec::new();

    for entry in entries {
        if entry.is_header {
            groups.push(EndpointGroup {
                header: Some(entry.text.clone()),
                is_development: entry.is_development,
                is_spaced: entry.is_spaced,
                networks: Vec::new(),
            });
            continue;
        }
        match groups.last_mut() {
            Some(group) => group.networks.push(entry.clone()),
            None => groups.push(EndpointGroup {
                networks: vec![entry.clone()],
                ..EndpointGroup::default()
            }),
        }
    }

    groups
}
