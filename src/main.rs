use anyhow::Context;
use clap::Parser;
use docsearch::cli::{Cli, Commands};
use docsearch::format::{format_search_results, format_snapshot_list};
use docsearch::server::SearchServer;
use docsearch::{SearchRequest, Settings, SnapshotCatalog};
use rmcp::{ServiceExt, transport::stdio};
use std::num::NonZeroUsize;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    docsearch::tracing::init();

    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    if let Some(root) = cli.root {
        settings.docs_root = root;
    }

    let cache_size = NonZeroUsize::new(settings.cache_size).unwrap_or(NonZeroUsize::MIN);
    let catalog = SnapshotCatalog::discover(&settings.docs_root, cache_size)
        .with_context(|| format!("Failed to open documentation root {}", settings.docs_root.display()))?
        .with_default_version(settings.default_version.clone());

    match cli.command {
        Commands::Search {
            query,
            snapshot,
            category,
            limit,
        } => {
            let entry = catalog.resolve(snapshot.as_deref())?;
            let engine = catalog
                .engine(Some(&entry.version))
                .await
                .with_context(|| format!("Failed to load snapshot '{}'", entry.version))?;

            let request = SearchRequest {
                query,
                category,
                limit: Some(limit.unwrap_or(settings.limit)),
            };
            let outcome = engine.search_with(&request)?;
            print!("{}", format_search_results(&outcome, &request.query, &entry.version));
        }
        Commands::List => {
            print!("{}", format_snapshot_list(&catalog).await);
        }
        Commands::Serve => {
            tracing::info!("Starting docsearch MCP server");

            let server = SearchServer::new(Arc::new(catalog), settings.limit);
            let service = server.serve(stdio()).await.inspect_err(|e| {
                tracing::error!("Error serving MCP server: {:?}", e);
            })?;

            service.waiting().await?;
        }
    }

    Ok(())
}
