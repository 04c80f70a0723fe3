//! Test utilities for driving commands against a mock server.
//!
//! ```ignore
//! let mut t = TestContext::new().await;
//! t.mock_list_users(vec![sample_user("1", AccountType::Admin)]).await;
//! t.ctx.enqueue_command::<FetchUsersCommand>();
//! t.flush_and_wait().await;
//! ```

use std::time::Duration;

use accounts_states::StateCtx;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{AccountType, BusinessConfig, Session, User, build_state_ctx};

pub const TEST_TOKEN: &str = "test-token";

pub struct TestContext {
    pub mock_server: MockServer,
    pub ctx: StateCtx,
}

impl TestContext {
    /// Fresh mock server and a signed-in context pointing at it.
    pub async fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mock_server = MockServer::start().await;
        let ctx = build_state_ctx(
            BusinessConfig::new(mock_server.uri()),
            Session::with_token(TEST_TOKEN),
        );
        Self { mock_server, ctx }
    }

    pub fn sign_out(&mut self) {
        self.ctx.update::<Session>(Session::sign_out);
    }

    /// Puts `users` straight into the collection, as if fetched.
    pub fn seed_users(&mut self, users: Vec<User>) {
        self.ctx.update::<crate::UsersState>(|s| {
            s.users = users;
            s.has_fetched = true;
        });
        self.ctx.run_computed();
    }

    /// Sync, flush queued commands, then await every task, syncing as each
    /// one completes.
    pub async fn flush_and_wait(&mut self) {
        self.ctx.sync_computes();
        self.ctx.flush_commands();

        let timeout = Duration::from_secs(5);
        let start = std::time::Instant::now();
        while self.ctx.task_count() > 0 {
            assert!(
                start.elapsed() <= timeout,
                "Timed out waiting for pending tasks ({} still in JoinSet)",
                self.ctx.task_count()
            );
            if self.ctx.task_set_mut().join_next().await.is_some() {
                self.ctx.sync_computes();
            }
        }

        self.ctx.sync_computes();
        self.ctx.run_computed();
    }

    pub async fn mock_list_users(&self, users: Vec<User>) {
        Mock::given(method("GET"))
            .and(path("/api/v1/auth/getAllUsers"))
            .and(header("Authorization", TEST_TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": users,
            })))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_list_users_error(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/api/v1/auth/getAllUsers"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.mock_server)
            .await;
    }

    /// Number of requests the mock server has seen so far.
    pub async fn request_count(&self) -> usize {
        self.mock_server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}

pub fn sample_user(id: &str, account_type: AccountType) -> User {
    User {
        id: id.to_owned(),
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        email: format!("user{id}@example.com"),
        account_type,
        created_at: chrono::DateTime::from_timestamp(1_700_000_000, 0),
    }
}
