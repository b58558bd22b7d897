//! Conversion of raw runtime descriptors into [`DebugTarget`] records
//!
//! All functions are pure: they read the raw records by reference, never
//! retain them, and keep the input order (no filtering or deduplication).

use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use regex::Regex;
use thiserror::Error;

use crate::target::{
    DebugTarget, DebugTargetType, RawExtensionDescriptor, RawTabDescriptor, RawWorkerDescriptor,
    TargetDetails,
};

pub const EXTENSION_FALLBACK_ICON: &str = "chrome://mozapps/skin/extensions/extensionGeneric.svg";
pub const TAB_FALLBACK_ICON: &str = "chrome://devtools/skin/images/globe.svg";
pub const WORKER_ICON: &str = "chrome://devtools/skin/images/debugging-workers.svg";

const FILE_SCHEME: &str = "file://";

/// A raw record that cannot be turned into a [`DebugTarget`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRecordError {
    #[error("extension `{id}` has a malformed manifest URL: {manifest_url}")]
    ManifestUrl { id: String, manifest_url: String },

    #[error("worker `{name}` has neither an actor nor a registration actor")]
    MissingWorkerId { name: String },
}

/// Normalize add-on descriptors
pub fn normalize_extensions(
    raw: &[RawExtensionDescriptor],
) -> Result<Vec<DebugTarget>, InvalidRecordError> {
    raw.iter().map(normalize_extension).collect()
}

fn normalize_extension(raw: &RawExtensionDescriptor) -> Result<DebugTarget, InvalidRecordError> {
    let uuid = match raw.manifest_url.as_deref().filter(|url| !url.is_empty()) {
        None => None,
        Some(manifest_url) => Some(manifest_uuid(manifest_url).ok_or_else(|| {
            InvalidRecordError::ManifestUrl {
                id: raw.id.clone(),
                manifest_url: manifest_url.to_string(),
            }
        })?),
    };

    let icon = match raw.icon_url.as_deref() {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => EXTENSION_FALLBACK_ICON.to_string(),
    };

    Ok(DebugTarget {
        id: raw.id.clone(),
        name: raw.name.clone(),
        icon,
        target_type: DebugTargetType::Extension,
        details: TargetDetails::Extension {
            actor: raw.actor.clone(),
            location: file_path(raw),
            manifest_url: raw.manifest_url.clone(),
            uuid: uuid.map(str::to_string),
        },
    })
}

/// Filesystem location of a temporarily installed add-on
///
/// `file:///C:/foo` -> `C:/foo`, `file:///home/foo` -> `/home/foo`.
pub fn file_path(raw: &RawExtensionDescriptor) -> Option<String> {
    static WINDOWS_PATH: OnceLock<Regex> = OnceLock::new();

    if !raw.temporarily_installed {
        return None;
    }
    let url = raw.url.as_deref()?;
    let rest = url.strip_prefix(FILE_SCHEME)?;

    let re = WINDOWS_PATH.get_or_init(|| Regex::new(r"^/([a-zA-Z]:/.*)").unwrap());
    match re.captures(rest).and_then(|c| c.get(1)) {
        Some(drive_path) => Some(drive_path.as_str().to_string()),
        None => Some(rest.to_string()),
    }
}

/// Host part of a `moz-extension://<uuid>/...` URL
pub fn manifest_uuid(manifest_url: &str) -> Option<&str> {
    static MANIFEST_HOST: OnceLock<Regex> = OnceLock::new();

    let re = MANIFEST_HOST.get_or_init(|| Regex::new(r"moz-extension://([^/]*)").unwrap());
    re.captures(manifest_url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Normalize tab descriptors
pub fn normalize_tabs(raw: &[RawTabDescriptor]) -> Vec<DebugTarget> {
    raw.iter().map(normalize_tab).collect()
}

fn normalize_tab(raw: &RawTabDescriptor) -> DebugTarget {
    let icon = match raw.favicon.as_deref() {
        Some(bytes) if !bytes.is_empty() => {
            format!("data:image/png;base64,{}", STANDARD.encode(bytes))
        }
        _ => TAB_FALLBACK_ICON.to_string(),
    };
    let name = if raw.title.is_empty() {
        raw.url.clone()
    } else {
        raw.title.clone()
    };

    DebugTarget {
        id: raw.outer_window_id.to_string(),
        name,
        icon,
        target_type: DebugTargetType::Tab,
        details: TargetDetails::Tab {
            url: raw.url.clone(),
        },
    }
}

/// Normalize worker descriptors
pub fn normalize_workers(
    raw: &[RawWorkerDescriptor],
) -> Result<Vec<DebugTarget>, InvalidRecordError> {
    raw.iter().map(normalize_worker).collect()
}

fn normalize_worker(raw: &RawWorkerDescriptor) -> Result<DebugTarget, InvalidRecordError> {
    let id = raw
        .actor
        .as_ref()
        .or(raw.registration_actor.as_ref())
        .ok_or_else(|| InvalidRecordError::MissingWorkerId {
            name: raw.name.clone(),
        })?;

    Ok(DebugTarget {
        id: id.clone(),
        name: raw.name.clone(),
        icon: WORKER_ICON.to_string(),
        target_type: DebugTargetType::Worker,
        details: TargetDetails::Worker {
            actor: raw.actor.clone(),
            fetch: raw.fetch,
            is_active: raw.active,
            registration_actor: raw.registration_actor.clone(),
            url: raw.url.clone(),
        },
    })
}
