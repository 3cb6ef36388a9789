//! `kupo catalog build`

use anyhow::{Context, Result};
use kupo_config::KupoConfig;
use kupo_lookup::CatalogBuilder;
use kupo_store::ItemCatalog;

use crate::terminal_output::{note_info, note_success, note_warn, render_table, Column};

pub async fn build(config: &KupoConfig, workers: Option<usize>) -> Result<()> {
    let path = &config.storage.items_file;
    let catalog = ItemCatalog::load(path).await?;
    note_info(&format!("Catalog at {} holds {} item(s)", path.display(), catalog.len()));

    let mut builder = CatalogBuilder::from_config(&config.catalog, &config.lookup)?;
    if let Some(workers) = workers {
        builder = builder.with_workers(workers);
    }

    let (catalog, summary) = builder
        .build(catalog, path)
        .await
        .context("Catalog build failed")?;

    let rows = vec![
        vec!["added".to_string(), summary.added.to_string()],
        vec!["already known".to_string(), summary.skipped.to_string()],
        vec!["failed".to_string(), summary.failed.to_string()],
        vec!["total".to_string(), catalog.len().to_string()],
    ];
    print!("{}", render_table(&[Column::left("Items"), Column::right("Count")], &rows));

    if summary.failed > 0 {
        note_warn("Some item pages could not be fetched; rerun to retry them");
    } else {
        note_success(&format!("Catalog written to {}", path.display()));
    }
    Ok(())
}
