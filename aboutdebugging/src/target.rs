//! Debug target records, raw and display-ready

use serde::{Deserialize, Serialize};

/// Kind of a debug target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugTargetType {
    Extension,
    Tab,
    Worker,
}

/// Type-specific details of a [`DebugTarget`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TargetDetails {
    Extension {
        actor: String,
        /// Filesystem path, only for temporarily installed add-ons loaded
        /// from a `file://` URL
        location: Option<String>,
        manifest_url: Option<String>,
        /// Host part of the `moz-extension://` manifest URL
        uuid: Option<String>,
    },
    Tab {
        url: String,
    },
    Worker {
        actor: Option<String>,
        fetch: bool,
        is_active: bool,
        registration_actor: Option<String>,
        url: Option<String>,
    },
}

/// Display-ready record of a debug target
///
/// The icon is always a URL; fallbacks are applied during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugTarget {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub target_type: DebugTargetType,
    pub details: TargetDetails,
}

/// Add-on as reported by the remote runtime
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExtensionDescriptor {
    pub actor: String,
    #[serde(rename = "iconURL", default)]
    pub icon_url: Option<String>,
    pub id: String,
    #[serde(rename = "manifestURL", default)]
    pub manifest_url: Option<String>,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub temporarily_installed: bool,
    #[serde(default = "default_debuggable")]
    pub debuggable: bool,
}

fn default_debuggable() -> bool {
    true
}

impl Default for RawExtensionDescriptor {
    fn default() -> Self {
        Self {
            actor: String::new(),
            icon_url: None,
            id: String::new(),
            manifest_url: None,
            name: String::new(),
            url: None,
            temporarily_installed: false,
            debuggable: default_debuggable(),
        }
    }
}

/// Tab as reported by the remote runtime
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTabDescriptor {
    pub actor: String,
    /// Raw PNG bytes
    #[serde(default)]
    pub favicon: Option<Vec<u8>>,
    #[serde(rename = "outerWindowID")]
    pub outer_window_id: u64,
    #[serde(default)]
    pub title: String,
    pub url: String,
}

/// Worker as reported by the remote runtime
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWorkerDescriptor {
    #[serde(default)]
    pub actor: Option<String>,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub registration_actor: Option<String>,
    #[serde(default)]
    pub fetch: bool,
    #[serde(default)]
    pub active: bool,
}

/// Target list carried by a `*_SUCCESS` action
///
/// Async code produces `Raw` lists; the component-data middleware replace
/// them with `Normalized` ones before the reducer runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetList<R> {
    Raw(Vec<R>),
    Normalized(Vec<DebugTarget>),
}

impl<R> TargetList<R> {
    pub fn is_normalized(&self) -> bool {
        matches!(self, TargetList::Normalized(_))
    }

    pub fn len(&self) -> usize {
        match self {
            TargetList::Raw(items) => items.len(),
            TargetList::Normalized(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalized records, if any
    pub fn normalized(&self) -> Option<&[DebugTarget]> {
        match self {
            TargetList::Normalized(items) => Some(items),
            TargetList::Raw(_) => None,
        }
    }

    /// Replace a raw list using `normalize`; normalized lists pass through
    pub fn normalize_with<E>(
        self,
        normalize: impl FnOnce(&[R]) -> Result<Vec<DebugTarget>, E>,
    ) -> Result<Self, E> {
        match self {
            TargetList::Raw(raw) => normalize(&raw).map(TargetList::Normalized),
            normalized => Ok(normalized),
        }
    }
}

impl<R> Default for TargetList<R> {
    fn default() -> Self {
        TargetList::Raw(Vec::new())
    }
}

impl<R> From<Vec<R>> for TargetList<R> {
    fn from(raw: Vec<R>) -> Self {
        TargetList::Raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_descriptor_from_transport_json() {
        let raw: RawExtensionDescriptor = serde_json::from_str(
            r#"{
                "actor": "server1.conn0.addon5",
                "iconURL": "moz-extension://abc/icon.png",
                "id": "ext@example.com",
                "manifestURL": "moz-extension://abc/manifest.json",
                "name": "Example",
                "url": "file:///home/dev/ext/",
                "temporarilyInstalled": true
            }"#,
        )
        .unwrap();

        assert_eq!(raw.icon_url.as_deref(), Some("moz-extension://abc/icon.png"));
        assert_eq!(raw.manifest_url.as_deref(), Some("moz-extension://abc/manifest.json"));
        assert!(raw.temporarily_installed);
        assert!(raw.debuggable);
    }

    #[test]
    fn test_optional_fields_default() {
        let raw: RawExtensionDescriptor =
            serde_json::from_str(r#"{"actor": "a", "id": "x", "name": "X"}"#).unwrap();
        assert_eq!(raw.icon_url, None);
        assert_eq!(raw.manifest_url, None);
        assert!(!raw.temporarily_installed);

        let worker: RawWorkerDescriptor =
            serde_json::from_str(r#"{"name": "sw", "registrationActor": "reg1"}"#).unwrap();
        assert_eq!(worker.registration_actor.as_deref(), Some("reg1"));
        assert!(!worker.active);

        let tab: RawTabDescriptor =
            serde_json::from_str(r#"{"actor": "t", "outerWindowID": 7, "url": "about:home"}"#)
                .unwrap();
        assert_eq!(tab.outer_window_id, 7);
        assert!(tab.title.is_empty());
    }

    #[test]
    fn test_target_list_normalize_with() {
        let list: TargetList<u8> = vec![1, 2].into();
        assert!(!list.is_normalized());
        assert_eq!(list.len(), 2);

        let list = list
            .normalize_with(|raw| Ok::<_, ()>(Vec::with_capacity(raw.len())))
            .unwrap();
        assert!(list.is_normalized());
        assert_eq!(list.normalized(), Some(&[][..]));
    }
}
