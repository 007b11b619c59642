//! Business logic services

pub mod catalog;
pub mod sessions;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    config::CatalogConfig,
    error::AppResult,
    models::{Session, User},
    repository::Repository,
};

/// Container for all services.
///
/// The catalog is single-writer: readers share the lock, every mutation takes
/// it exclusively for the duration of one synchronous call.
pub struct Services {
    pub catalog: RwLock<catalog::CatalogManager>,
    pub sessions: RwLock<sessions::SessionStore>,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Repository, catalog_config: &CatalogConfig) -> AppResult<Self> {
        let mut catalog = catalog::CatalogManager::with_repository(repository);
        if catalog_config.seed_demo_data {
            catalog.seed_demo_data()?;
            tracing::info!("Loaded demo catalog");
        }

        Ok(Self {
            catalog: RwLock::new(catalog),
            sessions: RwLock::new(sessions::SessionStore::new()),
        })
    }

    /// Log a reader in. A live `current` token has its session overwritten and
    /// is handed back; otherwise a new token is opened.
    pub async fn login(&self, student_id: &str, current: Option<&Uuid>) -> AppResult<(Uuid, User)> {
        let mut session = Session::logged_out();
        let user = self.catalog.read().await.login(&mut session, student_id)?;

        let mut sessions = self.sessions.write().await;
        let token = match current {
            Some(token) if sessions.replace(token, session.clone()) => *token,
            _ => sessions.open(session),
        };
        Ok((token, user))
    }

    /// Drop the session behind `token`, if any
    pub async fn logout(&self, token: &Uuid) {
        let closed = self.sessions.write().await.close(token);
        if let Some(mut session) = closed {
            self.catalog.read().await.logout(&mut session);
        }
    }

    /// Session for an optional bearer token
    pub async fn session(&self, token: Option<&Uuid>) -> Session {
        match token {
            Some(token) => self.sessions.read().await.resolve(token),
            None => Session::logged_out(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn services(seed: bool) -> Services {
        let config = CatalogConfig { seed_demo_data: seed };
        Services::new(Repository::new(), &config).unwrap()
    }

    #[test]
    fn test_seeding_follows_config() {
        tokio_test::block_on(async {
            let empty = services(false);
            assert_eq!(empty.catalog.read().await.list_books().count(), 0);

            let seeded = services(true);
            let catalog = seeded.catalog.read().await;
            assert_eq!(catalog.list_books().count(), 3);
            assert_eq!(catalog.list_users().count(), 1);
        });
    }

    #[test]
    fn test_login_then_logout() {
        tokio_test::block_on(async {
            let services = services(true);
            let (token, user) = services.login("20230001", None).await.unwrap();
            assert_eq!(user.name, "Zhang San");
            assert!(services.session(Some(&token)).await.is_logged_in());

            services.logout(&token).await;
            assert!(!services.session(Some(&token)).await.is_logged_in());
            assert!(!services.session(None).await.is_logged_in());
        });
    }

    #[test]
    fn test_relogin_reuses_live_token() {
        tokio_test::block_on(async {
            let services = services(true);
            services
                .catalog
                .write()
                .await
                .register_user("Li Si", "20230002")
                .unwrap();

            let (first, _) = services.login("20230001", None).await.unwrap();
            for _ in 0..10 {
                let (again, user) = services.login("20230002", Some(&first)).await.unwrap();
                assert_eq!(again, first);
                assert_eq!(user.student_id, "20230002");
            }

            assert_eq!(services.sessions.read().await.len(), 1);
            let session = services.session(Some(&first)).await;
            assert_eq!(session.current().unwrap().student_id, "20230002");
        });
    }

    #[test]
    fn test_relogin_with_stale_token_opens_new_session() {
        tokio_test::block_on(async {
            let services = services(true);
            let stale = Uuid::new_v4();
            let (token, _) = services.login("20230001", Some(&stale)).await.unwrap();
            assert_ne!(token, stale);
            assert_eq!(services.sessions.read().await.len(), 1);
        });
    }

    #[test]
    fn test_failed_relogin_keeps_session() {
        tokio_test::block_on(async {
            let services = services(true);
            let (token, _) = services.login("20230001", None).await.unwrap();
            assert!(services.login("nobody", Some(&token)).await.is_err());
            let session = services.session(Some(&token)).await;
            assert_eq!(session.current().unwrap().student_id, "20230001");
        });
    }

    #[test]
    fn test_login_unknown_reader() {
        tokio_test::block_on(async {
            let services = services(false);
            let err = services.login("nobody", None).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)));
            assert!(services.sessions.read().await.is_empty());
        });
    }
}
