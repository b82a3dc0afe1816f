use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use super::ProviderId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    pub domain: String,
    #[serde(default)]
    pub is_builtin: bool,
    #[serde(default)]
    pub needs_waf_bypass: bool,
    #[serde(default)]
    pub account_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderInput {
    pub name: String,
    pub domain: String,
    #[serde(default)]
    pub needs_waf_bypass: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_in_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models_path: Option<String>,
}

/// Node entry exactly as the backend lists it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProviderNode {
    /// Only custom nodes carry an id
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub base_url: String,
    #[serde(default)]
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Builtin,
    Custom(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderNode {
    pub name: String,
    pub base_url: Url,
    pub kind: NodeKind,
}

/// Node list with the default node named explicitly rather than by position
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderNodes {
    pub default: ProviderNode,
    pub others: Vec<ProviderNode>,
}

#[derive(Error, Debug, PartialEq)]
pub enum NodeListError {
    #[error("provider has no nodes")]
    Empty,
    #[error("no node is marked as default and there is no single built-in node")]
    NoDefault,
    #[error("{0} nodes claim to be the default")]
    MultipleDefaults(usize),
    #[error("node `{name}` has an invalid base url")]
    InvalidUrl { name: String, source: url::ParseError },
}

impl TryFrom<RawProviderNode> for ProviderNode {
    type Error = NodeListError;

    fn try_from(raw: RawProviderNode) -> Result<Self, Self::Error> {
        let base_url = Url::parse(&raw.base_url).map_err(|source| NodeListError::InvalidUrl {
            name: raw.name.clone(),
            source,
        })?;

        Ok(Self {
            name: raw.name,
            base_url,
            kind: raw.id.map(NodeKind::Custom).unwrap_or(NodeKind::Builtin),
        })
    }
}

impl TryFrom<Vec<RawProviderNode>> for ProviderNodes {
    type Error = NodeListError;

    /// An explicit `is_default` flag wins; without one the single built-in node is the default.
    /// List order is never consulted.
    fn try_from(raw: Vec<RawProviderNode>) -> Result<Self, Self::Error> {
        if raw.is_empty() {
            return Err(NodeListError::Empty);
        }

        let flagged: Vec<usize> = raw
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_default == Some(true))
            .map(|(i, _)| i)
            .collect();

        let default_idx = match flagged.as_slice() {
            [idx] => *idx,
            [] => {
                let builtin: Vec<usize> = raw
                    .iter()
                    .enumerate()
                    .filter(|(_, n)| n.id.is_none())
                    .map(|(i, _)| i)
                    .collect();
                match builtin.as_slice() {
                    [idx] => *idx,
                    [] => return Err(NodeListError::NoDefault),
                    many => return Err(NodeListError::MultipleDefaults(many.len())),
                }
            }
            many => return Err(NodeListError::MultipleDefaults(many.len())),
        };

        let mut default = None;
        let mut others = Vec::with_capacity(raw.len() - 1);
        for (idx, node) in raw.into_iter().enumerate() {
            let node = ProviderNode::try_from(node)?;
            if idx == default_idx {
                default = Some(node);
            } else {
                others.push(node);
            }
        }

        let default = default.ok_or(NodeListError::NoDefault)?;
        Ok(Self { default, others })
    }
}

impl ProviderNodes {
    pub fn custom(&self) -> impl Iterator<Item = &ProviderNode> {
        self.others
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Custom(_)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn node(id: Option<i64>, name: &str, is_default: Option<bool>) -> RawProviderNode {
        RawProviderNode {
            id,
            name: name.to_string(),
            base_url: format!("https://{name}.example.com"),
            is_default,
        }
    }

    #[test]
    fn builtin_node_is_default_regardless_of_position() {
        let nodes = ProviderNodes::try_from(vec![
            node(Some(7), "mirror", None),
            node(None, "main", None),
            node(Some(8), "backup", None),
        ])
        .unwrap();

        assert_eq!(nodes.default.name, "main");
        assert_eq!(nodes.default.kind, NodeKind::Builtin);
        assert_eq!(nodes.custom().count(), 2);
    }

    #[test]
    fn explicit_flag_wins() {
        let nodes = ProviderNodes::try_from(vec![
            node(None, "main", Some(false)),
            node(Some(3), "fast", Some(true)),
        ])
        .unwrap();

        assert_eq!(nodes.default.kind, NodeKind::Custom(3));
        assert_eq!(nodes.others.len(), 1);
    }

    #[test]
    fn ambiguous_lists_are_rejected() {
        assert_eq!(
            ProviderNodes::try_from(Vec::new()).unwrap_err(),
            NodeListError::Empty
        );
        assert_eq!(
            ProviderNodes::try_from(vec![node(Some(1), "a", None), node(Some(2), "b", None)])
                .unwrap_err(),
            NodeListError::NoDefault
        );
        assert_eq!(
            ProviderNodes::try_from(vec![node(None, "a", None), node(None, "b", None)])
                .unwrap_err(),
            NodeListError::MultipleDefaults(2)
        );
        assert_eq!(
            ProviderNodes::try_from(vec![node(None, "a", Some(true)), node(None, "b", Some(true))])
                .unwrap_err(),
            NodeListError::MultipleDefaults(2)
        );
    }

    #[test]
    fn invalid_url_is_reported() {
        let mut bad = node(None, "main", None);
        bad.base_url = "not a url".to_string();
        assert!(matches!(
            ProviderNodes::try_from(vec![bad]),
            Err(NodeListError::InvalidUrl { .. })
        ));
    }
}
