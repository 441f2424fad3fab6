//! Registry-relative resource paths (no HTTP, no base URL).
//!
//! Every caller-supplied value is encoded here; [`crate::RegistryClient::fetch`]
//! takes the result verbatim.

use crate::types::ServerListQuery;

pub const SERVERS: &str = "/v0/servers";
pub const HEALTH: &str = "/v0/health";

/// Percent-encode a single path segment. `/` becomes `%2F`.
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// `GET /v0/servers[?cursor&limit&search&updated_since&version]`
///
/// Parameters are appended in a fixed order and only when present. Values are
/// form-encoded but otherwise passed through unchanged.
pub fn servers(query: &ServerListQuery) -> String {
    let mut params = url::form_urlencoded::Serializer::new(String::new());

    if let Some(cursor) = &query.cursor {
        params.append_pair("cursor", cursor);
    }
    if let Some(limit) = query.limit {
        params.append_pair("limit", &limit.to_string());
    }
    if let Some(search) = &query.search {
        params.append_pair("search", search);
    }
    if let Some(updated_since) = &query.updated_since {
        params.append_pair("updated_since", updated_since);
    }
    if let Some(version) = query.version {
        params.append_pair("version", version.as_str());
    }

    let query_string = params.finish();
    if query_string.is_empty() {
        SERVERS.to_string()
    } else {
        format!("{}?{}", SERVERS, query_string)
    }
}

/// `GET /v0/servers/{name}/versions`
pub fn server_versions(name: &str) -> String {
    format!("{}/{}/versions", SERVERS, encode_segment(name))
}

/// `GET /v0/servers/{name}/versions/{version}`
pub fn server_version(name: &str, version: &str) -> String {
    format!(
        "{}/{}/versions/{}",
        SERVERS,
        encode_segment(name),
        encode_segment(version)
    )
}

/// `GET /v0/health`
pub fn health() -> String {
    HEALTH.to_string()
}
