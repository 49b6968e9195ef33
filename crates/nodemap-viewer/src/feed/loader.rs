use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use nodemap_core::{Dataset, FeedError};
use std::time::{Duration, Instant};

use crate::feed::Incoming;
use crate::util::config::DataConfig;

/// Fetches the three entity arrays on a background thread and sends exactly
/// one [`Incoming`] back. The render loop never waits on it.
pub fn spawn_loader(cfg: DataConfig, tx: Sender<Incoming>) {
    std::thread::spawn(move || {
        let source = cfg.locations.clone();
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                let _ = tx.send(Incoming::unavailable(source, format!("tokio runtime: {e}")));
                return;
            }
        };
        let started = Instant::now();
        let msg = match rt.block_on(fetch_dataset(&cfg)) {
            Ok(dataset) => Incoming::loaded(source, dataset, started.elapsed()),
            Err(e) => Incoming::unavailable(source, format!("{e:#}")),
        };
        let _ = tx.send(msg);
    });
}

async fn fetch_dataset(cfg: &DataConfig) -> Result<Dataset> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(cfg.timeout_ms.max(1)))
        .build()
        .context("build http client")?;

    let (locations, projects, providers) = futures_util::future::try_join3(
        fetch(&client, &cfg.locations),
        fetch(&client, &cfg.projects),
        fetch(&client, &cfg.providers),
    )
    .await?;

    let dataset = Dataset::from_json_parts(
        (cfg.locations.as_str(), locations.as_slice()),
        (cfg.projects.as_str(), projects.as_slice()),
        (cfg.providers.as_str(), providers.as_slice()),
    )?;
    Ok(dataset)
}

async fn fetch(client: &reqwest::Client, endpoint: &str) -> Result<Vec<u8>> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(FeedError::Unavailable {
            endpoint: String::new(),
            reason: "no endpoint configured".to_string(),
        }
        .into());
    }

    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        let resp = client
            .get(endpoint)
            .send()
            .await
            .with_context(|| format!("GET {endpoint}"))?
            .error_for_status()
            .with_context(|| format!("GET {endpoint}"))?;
        let body = resp.bytes().await.with_context(|| format!("read body of {endpoint}"))?;
        return Ok(body.to_vec());
    }

    let path = endpoint.strip_prefix("file://").unwrap_or(endpoint);
    tokio::fs::read(path)
        .await
        .with_context(|| format!("read {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn file_config(dir: &std::path::Path) -> DataConfig {
        DataConfig {
            locations: dir.join("locations.json").display().to_string(),
            projects: dir.join("projects.json").display().to_string(),
            providers: dir.join("providers.json").display().to_string(),
            timeout_ms: 500,
            mock_seed: 1,
        }
    }

    #[tokio::test]
    async fn reads_local_files() {
        let dir = tempdir().expect("tempdir");
        fs::write(
            dir.path().join("locations.json"),
            r#"[{"id":1,"displayName":"Galpón","cityText":"Valparaíso"}]"#,
        )
        .expect("write");
        fs::write(dir.path().join("projects.json"), r#"[{"id":"p-1"}]"#).expect("write");
        fs::write(dir.path().join("providers.json"), "[]").expect("write");

        let data = fetch_dataset(&file_config(dir.path())).await.expect("load");
        assert_eq!(data.locations.len(), 1);
        assert_eq!(data.projects.len(), 1);
        assert!(data.providers.is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_an_error_naming_the_path() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("locations.json"), "[]").expect("write");
        fs::write(dir.path().join("projects.json"), "[]").expect("write");

        let err = fetch_dataset(&file_config(dir.path())).await.unwrap_err();
        assert!(format!("{err:#}").contains("providers.json"));
    }

    #[tokio::test]
    async fn malformed_payload_is_an_error() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("locations.json"), "{\"not\":\"an array\"}").expect("write");
        fs::write(dir.path().join("projects.json"), "[]").expect("write");
        fs::write(dir.path().join("providers.json"), "[]").expect("write");

        assert!(fetch_dataset(&file_config(dir.path())).await.is_err());
    }

    #[test]
    fn loader_thread_reports_unavailable_source() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let cfg = DataConfig {
            locations: String::new(),
            ..DataConfig::default()
        };
        spawn_loader(cfg, tx);
        let msg = rx.recv_timeout(Duration::from_secs(10)).expect("one message");
        assert!(matches!(msg.kind, crate::feed::protocol::IncomingKind::Unavailable(_)));
    }
}
