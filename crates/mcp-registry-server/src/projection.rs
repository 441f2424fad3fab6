//! Projections from raw registry resources to tool output payloads.
//!
//! All functions are pure. Optional keys are inserted only when the source
//! has them; a missing key means "unknown", never `null`.

use mcp_registry_client::{
    HealthResponse, OfficialMeta, Repository, ServerList, ServerResponse, ServerSummaryResponse,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Builds a JSON object one key at a time, skipping absent optionals.
#[derive(Debug, Default)]
pub struct ObjectBuilder {
    map: Map<String, Value>,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. Anything that serializes to `null` is left out.
    pub fn field(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        if !value.is_null() {
            self.map.insert(key.to_string(), value);
        }
        self
    }

    /// Insert only when `value` is `Some`.
    pub fn optional<T: Serialize>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    pub fn build(self) -> Value {
        Value::Object(self.map)
    }
}

/// `list_servers` output: summary records plus pagination.
pub fn project_server_list(list: &ServerList<ServerSummaryResponse>) -> Value {
    let servers: Vec<Value> = list.servers.iter().map(project_server_summary).collect();

    let metadata = list.metadata.as_ref().map(|meta| {
        ObjectBuilder::new()
            .field("count", meta.count.unwrap_or(0))
            .optional("nextCursor", meta.next_cursor.as_deref())
            .build()
    });

    ObjectBuilder::new()
        .field("servers", servers)
        .optional("metadata", metadata)
        .build()
}

fn project_server_summary(entry: &ServerSummaryResponse) -> Value {
    let server = &entry.server;
    ObjectBuilder::new()
        .field("name", &server.name)
        .field("description", &server.description)
        .field("version", &server.version)
        .optional("title", server.title.as_deref())
        .optional("websiteUrl", server.website_url.as_deref())
        .optional("repository", server.repository.as_ref().map(repository_summary))
        .build()
}

fn repository_summary(repo: &Repository) -> Value {
    ObjectBuilder::new()
        .field("url", &repo.url)
        .field("source", &repo.source)
        .build()
}

/// `list_server_versions` output, in registry order.
pub fn project_version_list(list: &ServerList<ServerSummaryResponse>) -> Value {
    let servers: Vec<Value> = list
        .servers
        .iter()
        .map(|entry| {
            let official = entry.meta.official.as_ref();
            ObjectBuilder::new()
                .field("name", &entry.server.name)
                .field("version", &entry.server.version)
                .optional(
                    "publishedAt",
                    official.and_then(|o| o.published_at.as_deref()),
                )
                .optional("isLatest", official.and_then(|o| o.is_latest))
                .build()
        })
        .collect();

    ObjectBuilder::new().field("servers", servers).build()
}

/// `get_server` output: the full record with the official metadata flattened
/// into `metadata`.
pub fn project_server_detail(entry: &ServerResponse) -> Value {
    let server = &entry.server;
    ObjectBuilder::new()
        .field("name", &server.name)
        .field("description", &server.description)
        .field("version", &server.version)
        .optional("title", server.title.as_deref())
        .optional("websiteUrl", server.website_url.as_deref())
        .optional("repository", server.repository.as_ref())
        .optional("packages", server.packages.as_ref())
        .optional("icons", server.icons.as_ref())
        .optional("metadata", entry.meta.official.as_ref().map(official_metadata))
        .build()
}

fn official_metadata(meta: &OfficialMeta) -> Value {
    ObjectBuilder::new()
        .optional("status", meta.status)
        .optional("publishedAt", meta.published_at.as_deref())
        .optional("updatedAt", meta.updated_at.as_deref())
        .optional("isLatest", meta.is_latest)
        .build()
}

/// `health_check` output.
pub fn project_health(health: &HealthResponse) -> Value {
    ObjectBuilder::new()
        .field("status", health.status)
        .optional("timestamp", health.timestamp.as_deref())
        .build()
}
