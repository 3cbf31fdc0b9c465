//! OpenAPI fingerprint of the Agent Connect Protocol.

use super::NotDetectedReason;
use serde_json::Value;

/// Paths every ACP server's OpenAPI document must declare.
pub const REQUIRED_ACP_PATHS: [&str; 4] = [
    "/agents/search",
    "/agents/{agent_id}/descriptor",
    "/agents/{agent_id}/openapi",
    "/runs/wait",
];

/// Facts extracted from a matching ACP OpenAPI document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcpDocument {
    /// `info.title`, when present.
    pub title: Option<String>,
    /// `info.version`, when present.
    pub version: Option<String>,
}

/// Checks whether an OpenAPI document describes an ACP server.
///
/// The document must carry a top-level `openapi` key and a `paths` object
/// containing every entry of [`REQUIRED_ACP_PATHS`]. Partial matches are
/// rejected.
///
/// # Errors
///
/// Returns the [`NotDetectedReason`] describing the first check that failed.
pub fn match_acp_document(document: &Value) -> Result<AcpDocument, NotDetectedReason> {
    let Some(root) = document.as_object() else {
        return Err(NotDetectedReason::MalformedDocument(
            "document is not an object".to_owned(),
        ));
    };

    if !root.contains_key("openapi") {
        return Err(NotDetectedReason::MalformedDocument(
            "missing 'openapi' field".to_owned(),
        ));
    }

    let paths = root
        .get("paths")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            NotDetectedReason::MalformedDocument("'paths' is missing or not a map".to_owned())
        })?;

    if let Some(missing) = REQUIRED_ACP_PATHS
        .into_iter()
        .find(|path| !paths.contains_key(*path))
    {
        return Err(NotDetectedReason::MissingRequiredPath(missing));
    }

    let info = root.get("info");
    let info_text = |key: &str| {
        info.and_then(|value| value.get(key))
            .and_then(Value::as_str)
            .map(str::to_owned)
    };

    Ok(AcpDocument {
        title: info_text("title"),
        version: info_text("version"),
    })
}
