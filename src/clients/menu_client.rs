//! # Menu Client
//!
//! Resolves the provider's dish catalog into a [`MenuIndex`]. The live `menu`
//! endpoint is always tried first; the local snapshot is only read when the
//! live catalog cannot be used. A run only fails here when both are
//! unavailable.
use crate::clients::{ApiClient, MenuFetchError, MenuUnavailableError, SnapshotError};
use crate::model::MenuIndex;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

/// Endpoint of the dish catalog.
pub const MENU_ENDPOINT: &str = "menu";

/// Where a resolved index came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSource {
    Live,
    Snapshot,
}

impl Display for MenuSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuSource::Live => write!(f, "live"),
            MenuSource::Snapshot => write!(f, "snapshot"),
        }
    }
}

/// A dish index together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMenu {
    pub index: MenuIndex,
    pub source: MenuSource,
}

/// Client for the dish catalog.
#[derive(Clone)]
pub struct MenuClient {
    inner: ApiClient,
    snapshot_path: PathBuf,
}

impl MenuClient {
    pub fn new(inner: ApiClient, snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            snapshot_path: snapshot_path.into(),
        }
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Fetches the live catalog, falling back to the snapshot on any failure.
    ///
    /// # Errors
    ///
    /// Returns [`MenuUnavailableError`] carrying both reasons when neither the
    /// live endpoint nor the snapshot yields a catalog.
    #[instrument(skip(self))]
    pub async fn resolve_menu(&self) -> Result<ResolvedMenu, MenuUnavailableError> {
        let live = match self.fetch_live().await {
            Ok(index) => {
                info!(dishes = index.len(), source = %MenuSource::Live, "Menu resolved");
                return Ok(ResolvedMenu {
                    index,
                    source: MenuSource::Live,
                });
            }
            Err(e) => e,
        };

        warn!(
            error = %live,
            snapshot = %self.snapshot_path.display(),
            "Live menu unavailable, falling back to snapshot"
        );

        match self.read_snapshot().await {
            Ok(index) => {
                info!(dishes = index.len(), source = %MenuSource::Snapshot, "Menu resolved");
                Ok(ResolvedMenu {
                    index,
                    source: MenuSource::Snapshot,
                })
            }
            Err(fallback) => {
                let e = MenuUnavailableError { live, fallback };
                error!(error = %e, "No menu available");
                Err(e)
            }
        }
    }

    async fn fetch_live(&self) -> Result<MenuIndex, MenuFetchError> {
        let response = self.inner.get(MENU_ENDPOINT).await?;
        if !response.is_success() {
            return Err(MenuFetchError::Status(response.status));
        }
        let catalog = response
            .json()
            .map_err(|e| MenuFetchError::Decode(e.to_string()))?;
        Ok(MenuIndex::from_catalog(&catalog)?)
    }

    async fn read_snapshot(&self) -> Result<MenuIndex, SnapshotError> {
        let path = self.snapshot_path.display().to_string();
        let raw = tokio::fs::read_to_string(&self.snapshot_path)
            .await
            .map_err(|e| SnapshotError::Io {
                path: path.clone(),
                message: e.to_string(),
            })?;
        let catalog: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| SnapshotError::Decode {
                path: path.clone(),
                message: e.to_string(),
            })?;
        MenuIndex::from_catalog(&catalog).map_err(|source| SnapshotError::Catalog { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockTransport;
    use crate::framework::{RetryPolicy, TransportError};
    use crate::model::DishId;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn client(mock: &MockTransport, snapshot: impl Into<PathBuf>) -> MenuClient {
        let api = ApiClient::new("http://api.test", mock.transport()).with_retry(RetryPolicy::none());
        MenuClient::new(api, snapshot)
    }

    fn snapshot_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_live_menu_wins_over_snapshot() {
        let mut mock = MockTransport::new();
        mock.expect_get("v1/menu")
            .return_json(200, &json!({"dishes": [{"name": "Pizza Quattro Formaggi", "id": 7}]}));
        let snapshot = snapshot_file(r#"{"dishes": [{"name": "Pizza Quattro Formaggi", "id": 99}]}"#);

        let menu = client(&mock, snapshot.path()).resolve_menu().await.unwrap();

        assert_eq!(menu.source, MenuSource::Live);
        assert_eq!(menu.index.resolve("Pizza Quattro Formaggi"), Some(&DishId::Number(7)));
        mock.verify();
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back_to_snapshot() {
        let mut mock = MockTransport::new();
        mock.expect_get("menu")
            .return_err(TransportError::Connect("refused".to_string()));
        let snapshot = snapshot_file(r#"{"dishes": [{"name": "Lasagne", "id": 3}]}"#);

        let menu = client(&mock, snapshot.path()).resolve_menu().await.unwrap();

        assert_eq!(menu.source, MenuSource::Snapshot);
        assert_eq!(menu.index.resolve("Lasagne"), Some(&DishId::Number(3)));
        mock.verify();
    }

    #[tokio::test]
    async fn test_bad_status_and_bad_body_fall_back() {
        let snapshot = snapshot_file(r#"{"dishes": [{"name": "Lasagne", "id": 3}]}"#);

        let mut mock = MockTransport::new();
        mock.expect_get("menu").return_status(503, "maintenance");
        let menu = client(&mock, snapshot.path()).resolve_menu().await.unwrap();
        assert_eq!(menu.source, MenuSource::Snapshot);

        let mut mock = MockTransport::new();
        mock.expect_get("menu").return_status(200, "<html>");
        let menu = client(&mock, snapshot.path()).resolve_menu().await.unwrap();
        assert_eq!(menu.source, MenuSource::Snapshot);

        let mut mock = MockTransport::new();
        mock.expect_get("menu").return_json(200, &json!({"items": []}));
        let menu = client(&mock, snapshot.path()).resolve_menu().await.unwrap();
        assert_eq!(menu.source, MenuSource::Snapshot);
    }

    #[tokio::test]
    async fn test_both_sources_unavailable() {
        let mut mock = MockTransport::new();
        mock.expect_get("menu")
            .return_err(TransportError::Timeout("slow".to_string()));

        let result = client(&mock, "/nonexistent/menu.json").resolve_menu().await;

        let e = result.unwrap_err();
        assert_eq!(
            e.live,
            MenuFetchError::Transport(TransportError::Timeout("slow".to_string()))
        );
        assert!(matches!(e.fallback, SnapshotError::Io { .. }));
        mock.verify();
    }

    #[tokio::test]
    async fn test_snapshot_is_gone_once_dropped() {
        let snapshot = snapshot_file(r#"{"dishes": [{"name": "Lasagne", "id": 3}]}"#);
        let path = snapshot.path().to_path_buf();
        drop(snapshot);

        let mut mock = MockTransport::new();
        mock.expect_get("menu").return_status(503, "");
        let e = client(&mock, path).resolve_menu().await.unwrap_err();

        assert!(matches!(e.fallback, SnapshotError::Io { .. }));
        mock.verify();
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_unavailable() {
        let mut mock = MockTransport::new();
        mock.expect_get("menu").return_status(500, "");
        let snapshot = snapshot_file("{ not json");

        let e = client(&mock, snapshot.path()).resolve_menu().await.unwrap_err();

        assert_eq!(e.live, MenuFetchError::Status(500));
        assert!(matches!(e.fallback, SnapshotError::Decode { .. }));
    }
}
