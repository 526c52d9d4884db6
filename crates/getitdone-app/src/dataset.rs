//! Loading the JSON dataset the CLI queries.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use getitdone_core::error::CoreError;
use getitdone_service::store::InMemoryTaskRepository;
use getitdone_service::store::record::Dataset;

/// ## Summary
/// Reads and parses a dataset file. A missing file is an empty dataset.
///
/// ## Errors
/// Returns an error for an empty path, an unreadable file or malformed JSON.
pub async fn load(path: &str) -> Result<Dataset> {
    if path.trim().is_empty() {
        return Err(CoreError::InvalidConfiguration("data.path is empty".to_string()).into());
    }

    let raw = match tokio::fs::read_to_string(Path::new(path)).await {
        Ok(raw) => raw,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            tracing::warn!(path, "Dataset file not found, starting empty");
            return Ok(Dataset::default());
        }
        Err(error) => {
            return Err(error).with_context(|| format!("failed to read dataset {path}"));
        }
    };

    serde_json::from_str(&raw).with_context(|| format!("invalid dataset JSON in {path}"))
}

/// ## Summary
/// Loads a dataset file into an in-memory repository.
///
/// ## Errors
/// Returns an error if the file cannot be loaded or holds duplicate rows.
pub async fn repository(path: &str) -> Result<InMemoryTaskRepository> {
    let dataset = load(path).await?;
    tracing::info!(
        path,
        tasks = dataset.tasks.len(),
        exceptions = dataset.exceptions.len(),
        completions = dataset.completions.len(),
        "Dataset loaded"
    );
    Ok(InMemoryTaskRepository::from_dataset(dataset)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_missing_file_is_empty_dataset() {
        let dataset = load("definitely/not/here/tasks.json")
            .await
            .expect("empty dataset");
        assert_eq!(dataset, Dataset::default());
    }

    #[test_log::test(tokio::test)]
    async fn test_empty_path_rejected() {
        let error = load("  ").await.expect_err("empty path");
        assert!(matches!(
            error.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidConfiguration(_))
        ));
    }

    #[test_log::test(tokio::test)]
    async fn test_reads_dataset_file() {
        let path = std::env::temp_dir().join(format!("getitdone-{}.json", std::process::id()));
        tokio::fs::write(
            &path,
            r#"{"tasks":[{"id":"6b1f0c2a-3d4e-4f50-8a61-7b8c9d0e1f21","user_slug":"me","title":"Plants","date":"2026-03-01"}]}"#,
        )
        .await
        .expect("write");

        let dataset = load(path.to_str().expect("utf-8 path")).await.expect("load");
        tokio::fs::remove_file(&path).await.expect("cleanup");

        assert_eq!(dataset.tasks.len(), 1);
        assert!(dataset.exceptions.is_empty());
    }
}
