//! Signup, login and session validation.
//!
//! [`AuthService`] owns an injected [`DocumentStore`] handle and the
//! [`SessionPolicy`]; it is built once at startup and cloned into handlers
//! through `AppState`.
//!
//! Signup checks for an existing email before inserting. Two concurrent
//! signups for one email can both pass that check; the store's unique index
//! on account email is what rejects the second insert, and that rejection is
//! reported as [`AuthError::EmailInUse`] as well.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use validator::ValidateEmail;
use workaround_core::error::AuthError;
use workaround_core::roles::DEFAULT_ROLE;
use workaround_core::types::DocumentId;
use workaround_db::models::account::CreateAccount;
use workaround_db::repositories::{AccountRepo, SessionRepo};
use workaround_db::{DocumentStore, StoreError};

use super::password::{hash_password, validate_password, verify_password};
use super::session::{create_session, mint_token, SessionPolicy};
use super::storage_unavailable;

/// Maximum length for an account display name in characters.
pub const MAX_NAME_LENGTH: usize = 200;

/// Stand-in credentials verified when no account matches the email, so an
/// unknown email costs the same key derivation as a wrong password.
const DUMMY_SALT: &str = "5f4dcc3b5aa765d61d8327deb882cf99";
const DUMMY_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// The result of a successful signup or login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub name: String,
    pub email: String,
}

/// The account behind a valid session token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedAccount {
    pub id: DocumentId,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn DocumentStore>,
    policy: SessionPolicy,
}

impl AuthService {
    pub fn new(store: Arc<dyn DocumentStore>, policy: SessionPolicy) -> Self {
        Self { store, policy }
    }

    /// Create an account and open its first session.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let name = name.trim();
        validate_name(name)?;
        let email = normalize_email(email);
        validate_email(&email)?;
        validate_password(password)?;

        let store = self.store.as_ref();
        if AccountRepo::email_exists(store, &email)
            .await
            .map_err(storage_unavailable)?
        {
            return Err(AuthError::EmailInUse);
        }

        let digest = hash_password(password, None)?;
        let input = CreateAccount {
            name: name.to_string(),
            email,
            password_hash: digest.hash,
            password_salt: digest.salt,
            avatar: None,
            role: DEFAULT_ROLE.to_string(),
            is_active: true,
        };

        let account_id = match AccountRepo::create(store, &input).await {
            Ok(id) => id,
            Err(StoreError::Duplicate { index }) => {
                tracing::info!(%index, "Signup lost email race to a concurrent insert");
                return Err(AuthError::EmailInUse);
            }
            Err(e) => return Err(storage_unavailable(e)),
        };

        let token = self.issue_session(&account_id).await?;
        tracing::info!(account_id = %account_id, "Account created");

        Ok(AuthSession {
            token,
            name: input.name,
            email: input.email,
        })
    }

    /// Verify credentials and open a new session.
    ///
    /// Unknown email, wrong password, an unreadable stored account, an unusable
    /// stored salt and an inactive account all yield
    /// [`AuthError::InvalidCredentials`]. Only an unreachable store is
    /// [`AuthError::StorageUnavailable`].
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = normalize_email(email);
        validate_email(&email)?;

        let account = match AccountRepo::find_by_email(self.store.as_ref(), &email).await {
            Ok(account) => account,
            Err(e @ StoreError::Malformed { .. }) => {
                tracing::error!(error = %e, "Stored account is unreadable");
                equalize_timing(password);
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(storage_unavailable(e)),
        };

        let Some(account) = account else {
            equalize_timing(password);
            tracing::debug!("Login rejected: no matching account");
            return Err(AuthError::InvalidCredentials);
        };

        let verified =
            match verify_password(password, &account.password_salt, &account.password_hash) {
                Ok(verified) => verified,
                Err(e) => {
                    tracing::error!(account_id = %account.id, error = %e, "Stored password salt is unusable");
                    false
                }
            };

        if !verified {
            tracing::debug!(account_id = %account.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }
        if !account.is_active {
            tracing::debug!(account_id = %account.id, "Login rejected: account inactive");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_session(&account.id).await?;
        tracing::info!(account_id = %account.id, "Login succeeded");

        Ok(AuthSession {
            token,
            name: account.name,
            email: account.email,
        })
    }

    /// Resolve a session token to its account.
    ///
    /// Unknown tokens, tokens past the configured TTL, and sessions whose
    /// account is missing or inactive yield [`AuthError::InvalidCredentials`].
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedAccount, AuthError> {
        if token.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        let store = self.store.as_ref();

        let session = SessionRepo::find_by_token(store, token)
            .await
            .map_err(storage_unavailable)?
            .ok_or(AuthError::InvalidCredentials)?;

        if self.policy.is_expired(&session, Utc::now()) {
            tracing::debug!(session_id = %session.id, "Session token expired");
            return Err(AuthError::InvalidCredentials);
        }

        let account = AccountRepo::find_by_id(store, &session.owner_id)
            .await
            .map_err(storage_unavailable)?
            .filter(|account| account.is_active)
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(AuthenticatedAccount {
            id: account.id,
            name: account.name,
            email: account.email,
            role: account.role,
        })
    }

    async fn issue_session(&self, owner_id: &str) -> Result<String, AuthError> {
        let session = create_session(self.store.as_ref(), owner_id, mint_token()).await?;
        Ok(session.token)
    }
}

/// Trim surrounding whitespace and lowercase the domain.
///
/// The local part keeps its case: existing account documents hold addresses
/// as they were typed, and lookups are exact matches.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Run one key derivation against a fixed digest so a login for an unknown
/// or unreadable account costs the same as a wrong password.
fn equalize_timing(password: &str) {
    let _timing = std::hint::black_box(verify_password(password, DUMMY_SALT, DUMMY_HASH));
}

fn validate_email(email: &str) -> Result<(), AuthError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(AuthError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

fn validate_name(name: &str) -> Result<(), AuthError> {
    if name.is_empty() {
        return Err(AuthError::Validation("Name must not be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AuthError::Validation(format!(
            "Name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::Duration;
    use serde_json::{json, Value};
    use workaround_core::collections::ACCOUNTS;
    use workaround_db::models::session::CreateSession;
    use workaround_db::{Document, Filter, MemoryDocumentStore};

    use super::*;

    fn service_with(store: Arc<MemoryDocumentStore>) -> AuthService {
        AuthService::new(store, SessionPolicy::default())
    }

    fn service() -> (AuthService, Arc<MemoryDocumentStore>) {
        let store = Arc::new(MemoryDocumentStore::with_default_indexes());
        (service_with(Arc::clone(&store)), store)
    }

    /// A store whose lookups never see existing documents, reproducing two
    /// signups that both pass the existence check before either inserts.
    struct RacingStore(MemoryDocumentStore);

    #[async_trait]
    impl DocumentStore for RacingStore {
        async fn find_one(&self, _: &str, _: &Filter) -> Result<Option<Document>, StoreError> {
            Ok(None)
        }
        async fn find_by_id(&self, c: &str, id: &str) -> Result<Option<Document>, StoreError> {
            self.0.find_by_id(c, id).await
        }
        async fn find_many(
            &self,
            c: &str,
            f: &Filter,
            limit: i64,
        ) -> Result<Vec<Document>, StoreError> {
            self.0.find_many(c, f, limit).await
        }
        async fn insert_one(&self, c: &str, record: Value) -> Result<DocumentId, StoreError> {
            self.0.insert_one(c, record).await
        }
        async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
            self.0.list_collections().await
        }
        async fn ping(&self) -> Result<(), StoreError> {
            self.0.ping().await
        }
    }

    #[tokio::test]
    async fn test_signup_returns_token_and_profile() {
        let (auth, store) = service();

        let session = auth
            .signup("  Ada Lovelace ", "ada@X.com ", "secret123")
            .await
            .expect("signup should succeed");

        assert_eq!(session.token.len(), 48);
        assert_eq!(session.name, "Ada Lovelace");
        assert_eq!(session.email, "ada@x.com");

        let account = AccountRepo::find_by_email(store.as_ref(), "ada@x.com")
            .await
            .unwrap()
            .expect("account should be stored");
        assert_eq!(account.role, "worker");
        assert!(account.is_active);
        assert_ne!(account.password_hash, "secret123");
        assert_eq!(account.password_salt.len(), 32);

        let stored = SessionRepo::find_by_token(store.as_ref(), &session.token)
            .await
            .unwrap()
            .expect("session should be stored");
        assert_eq!(stored.owner_id, account.id);
    }

    #[tokio::test]
    async fn test_duplicate_signup_is_email_in_use() {
        let (auth, _store) = service();
        auth.signup("A", "a@x.com", "secret123").await.unwrap();

        let second = auth.signup("B", "a@x.com", "other-password").await;
        assert_matches!(second, Err(AuthError::EmailInUse));

        let domain_cased = auth.signup("C", "a@X.COM", "other-password").await;
        assert_matches!(domain_cased, Err(AuthError::EmailInUse));
    }

    #[tokio::test]
    async fn test_signup_race_is_caught_by_unique_index() {
        let store = Arc::new(RacingStore(MemoryDocumentStore::with_default_indexes()));
        let auth = AuthService::new(store, SessionPolicy::default());

        auth.signup("A", "a@x.com", "secret123").await.unwrap();
        let second = auth.signup("B", "a@x.com", "secret123").await;
        assert_matches!(second, Err(AuthError::EmailInUse));
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let (auth, _store) = service();

        assert_matches!(
            auth.signup("   ", "a@x.com", "secret123").await,
            Err(AuthError::Validation(_))
        );
        assert_matches!(
            auth.signup("A", "not-an-email", "secret123").await,
            Err(AuthError::Validation(_))
        );
        assert_matches!(
            auth.signup("A", "a@x.com", "").await,
            Err(AuthError::Validation(_))
        );
    }

    #[tokio::test]
    async fn test_login_issues_fresh_session_each_time() {
        let (auth, _store) = service();
        let signup = auth.signup("Ada", "ada@x.com", "secret123").await.unwrap();

        let first = auth.login("ada@x.com", "secret123").await.unwrap();
        let second = auth.login(" ada@X.com", "secret123").await.unwrap();

        assert_eq!(first.name, "Ada");
        assert_eq!(first.email, "ada@x.com");
        assert_ne!(first.token, signup.token);
        assert_ne!(first.token, second.token);

        // Every session stays valid; there is no single-session constraint.
        for token in [&signup.token, &first.token, &second.token] {
            assert!(auth.authenticate(token).await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let (auth, _store) = service();
        auth.signup("Ada", "ada@x.com", "secret123").await.unwrap();

        let wrong = auth.login("ada@x.com", "wrong").await.unwrap_err();
        let unknown = auth.login("ghost@x.com", "secret123").await.unwrap_err();

        assert_matches!(wrong, AuthError::InvalidCredentials);
        assert_matches!(unknown, AuthError::InvalidCredentials);
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn test_login_rejects_inactive_account() {
        let (auth, store) = service();
        let digest = hash_password("secret123", None).unwrap();
        AccountRepo::create(
            store.as_ref(),
            &CreateAccount {
                name: "Off".to_string(),
                email: "off@x.com".to_string(),
                password_hash: digest.hash,
                password_salt: digest.salt,
                avatar: None,
                role: DEFAULT_ROLE.to_string(),
                is_active: false,
            },
        )
        .await
        .unwrap();

        assert_matches!(
            auth.login("off@x.com", "secret123").await,
            Err(AuthError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_login_with_corrupt_salt_is_invalid_credentials() {
        let (auth, store) = service();
        AccountRepo::create(
            store.as_ref(),
            &CreateAccount {
                name: "Bad".to_string(),
                email: "bad@x.com".to_string(),
                password_hash: "00".repeat(32),
                password_salt: "zz-not-hex".to_string(),
                avatar: None,
                role: DEFAULT_ROLE.to_string(),
                is_active: true,
            },
        )
        .await
        .unwrap();

        assert_matches!(
            auth.login("bad@x.com", "secret123").await,
            Err(AuthError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_as_unavailable() {
        let (auth, store) = service();
        store.set_available(false);

        assert_matches!(
            auth.signup("Ada", "ada@x.com", "secret123").await,
            Err(AuthError::StorageUnavailable(_))
        );
        assert_matches!(
            auth.login("ada@x.com", "secret123").await,
            Err(AuthError::StorageUnavailable(_))
        );
    }

    #[tokio::test]
    async fn test_authenticate_unknown_token() {
        let (auth, _store) = service();
        assert_matches!(
            auth.authenticate("deadbeef").await,
            Err(AuthError::InvalidCredentials)
        );
        assert_matches!(auth.authenticate("").await, Err(AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_authenticate_returns_account() {
        let (auth, _store) = service();
        let session = auth.signup("Ada", "ada@x.com", "secret123").await.unwrap();

        let account = auth.authenticate(&session.token).await.unwrap();
        assert_eq!(account.name, "Ada");
        assert_eq!(account.email, "ada@x.com");
        assert_eq!(account.role, "worker");
    }

    #[tokio::test]
    async fn test_authenticate_honours_ttl() {
        let store = Arc::new(MemoryDocumentStore::with_default_indexes());
        let auth = AuthService::new(
            Arc::clone(&store) as Arc<dyn DocumentStore>,
            SessionPolicy::with_ttl(Duration::hours(1)),
        );
        let fresh = auth.signup("Ada", "ada@x.com", "secret123").await.unwrap();
        let account = auth.authenticate(&fresh.token).await.unwrap();

        let stale_token = mint_token();
        SessionRepo::create(
            store.as_ref(),
            &CreateSession {
                owner_id: account.id,
                token: stale_token.clone(),
                created_at: Utc::now() - Duration::hours(2),
            },
        )
        .await
        .unwrap();

        assert_matches!(
            auth.authenticate(&stale_token).await,
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_normalize_email_keeps_local_part_case() {
        assert_eq!(normalize_email("  John@X.COM "), "John@x.com");
        assert_eq!(normalize_email("ada@x.com"), "ada@x.com");
        assert_eq!(normalize_email(" no-at-sign "), "no-at-sign");
    }

    #[tokio::test]
    async fn test_existing_mixed_case_account_logs_in_and_blocks_duplicate() {
        let (auth, store) = service();
        let digest = hash_password("secret123", None).unwrap();
        store
            .insert_one(
                ACCOUNTS,
                json!({
                    "name": "John",
                    "email": "John@x.com",
                    "password_hash": digest.hash,
                    "password_salt": digest.salt,
                }),
            )
            .await
            .unwrap();

        let session = auth.login("John@x.com", "secret123").await.unwrap();
        assert_eq!(session.email, "John@x.com");

        assert_matches!(
            auth.signup("Dup", "John@x.com", "other-password").await,
            Err(AuthError::EmailInUse)
        );
    }

    #[tokio::test]
    async fn test_login_against_unreadable_account_is_invalid_credentials() {
        let (auth, store) = service();
        store
            .insert_one(
                ACCOUNTS,
                json!({ "name": "x", "email": "m@x.com", "password_hash": "ab" }),
            )
            .await
            .unwrap();

        assert_matches!(
            auth.login("m@x.com", "pw").await,
            Err(AuthError::InvalidCredentials)
        );
    }
}
