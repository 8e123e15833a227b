//! MCP server exposing the snapshot catalog as tools.

use crate::catalog::SnapshotCatalog;
use crate::format::{format_search_results, format_snapshot_list};
use crate::search::SearchRequest;
use crate::types::Category;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars, tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// Parameters for the search tool
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchToolRequest {
    /// Case-insensitive text to find in titles and documentation bodies
    pub query: String,
    /// Snapshot version to search (default: latest, stable or dev)
    #[serde(default)]
    pub snapshot: Option<String>,
    /// Restrict to one category: page, section, type, method or function
    #[serde(default)]
    pub category: Option<String>,
    /// Maximum number of results to return
    #[serde(default)]
    pub limit: Option<usize>,
}

/// MCP server over a set of documentation snapshots
#[derive(Clone)]
pub struct SearchServer {
    catalog: Arc<SnapshotCatalog>,
    default_limit: usize,
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for SearchServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchServer")
            .field("catalog", &self.catalog)
            .field("default_limit", &self.default_limit)
            .finish_non_exhaustive()
    }
}

#[tool_router]
impl SearchServer {
    pub fn new(catalog: Arc<SnapshotCatalog>, default_limit: usize) -> Self {
        Self {
            catalog,
            default_limit,
            tool_router: Self::tool_router(),
        }
    }

    pub const fn catalog(&self) -> &Arc<SnapshotCatalog> {
        &self.catalog
    }

    #[tool(
        description = "Search a documentation snapshot. Matches a case-insensitive substring against entry titles and documentation text; title matches are listed first."
    )]
    async fn search(
        &self,
        Parameters(request): Parameters<SearchToolRequest>,
    ) -> std::result::Result<String, String> {
        self.run_search(request).await
    }

    #[tool(description = "List the documentation snapshots (versions) available for search.")]
    async fn list_snapshots(&self) -> std::result::Result<String, String> {
        Ok(format_snapshot_list(&self.catalog).await)
    }
}

impl SearchServer {
    /// Shared body of the search tool, callable without the MCP wrapper.
    pub async fn run_search(
        &self,
        request: SearchToolRequest,
    ) -> std::result::Result<String, String> {
        let category = request
            .category
            .as_deref()
            .map(str::parse::<Category>)
            .transpose()
            .map_err(|e| e.to_string())?;

        let entry = self
            .catalog
            .resolve(request.snapshot.as_deref())
            .map_err(|e| e.to_string())?;
        let version = entry.version.clone();

        let engine = self
            .catalog
            .engine(Some(&version))
            .await
            .map_err(|e| format!("Failed to load snapshot '{}': {}", version, e))?;

        let search = SearchRequest {
            query: request.query,
            category,
            limit: Some(request.limit.unwrap_or(self.default_limit)),
        };
        let outcome = engine.search_with(&search).map_err(|e| e.to_string())?;

        Ok(format_search_results(&outcome, &search.query, &version))
    }
}

#[tool_handler]
impl ServerHandler for SearchServer {
    // ServerInfo is non_exhaustive, so it cannot be built with a struct literal.
    #[allow(clippy::field_reassign_with_default)]
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.protocol_version = ProtocolVersion::V_2024_11_05;
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info = Implementation::from_build_env();
        info.instructions = Some(
            "docsearch: search generated documentation indexes. \
             Use list_snapshots to see available versions, then search with a text fragment."
                .to_string(),
        );
        info
    }
}
