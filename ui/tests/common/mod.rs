use accounts_states::StateCtx;
use accounts_ui::AccountsApp;
use accounts_ui::state::State;
use egui_kittest::Harness;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(unused)]
pub const TEST_TOKEN: &str = "test-token";

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, AccountsApp>,
}

impl<'a> TestCtx<'a> {
    /// App signed in against a fresh mock server that lists `users`.
    ///
    /// The list mock is mounted before the harness exists, so the first
    /// frame's fetch always reaches it.
    pub async fn new_app(users: Value) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/auth/getAllUsers"))
            .and(header("Authorization", TEST_TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": users,
            })))
            .mount(&mock_server)
            .await;

        let state = State::test(mock_server.uri(), Some(TEST_TOKEN));
        let app = AccountsApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, AccountsApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    pub fn state_ctx(&self) -> &StateCtx {
        &self.harness.state().state().ctx
    }

    pub fn state_ctx_mut(&mut self) -> &mut StateCtx {
        &mut self.harness.state_mut().state_mut().ctx
    }

    /// Renders a frame, lets spawned commands reach the mock server, then
    /// renders again so their results are applied.
    pub async fn settle(&mut self) {
        self.harness.step();
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        self.harness.step();
        self.harness.step();
    }

    #[allow(unused)]
    pub async fn requests_to(&self, method_name: &str, url_path: &str) -> usize {
        self.mock_server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.as_str() == method_name && r.url.path() == url_path)
            .count()
    }
}

pub fn user_json(id: &str, first: &str, last: &str, account_type: &str) -> Value {
    json!({
        "_id": id,
        "firstName": first,
        "lastName": last,
        "email": format!("{}@example.com", first.to_lowercase()),
        "accountType": account_type,
        "created": "2024-03-05T10:00:00Z",
    })
}

/// An admin and a super admin, in that order.
#[allow(unused)]
pub fn sample_users() -> Value {
    json!([
        user_json("u1", "Ada", "Lovelace", "Admin"),
        user_json("u2", "Root", "Owner", "SuperAdmin"),
    ])
}
