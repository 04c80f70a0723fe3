//! Widget tests for the create, edit and delete dialogs.

mod common;

use accounts_business::{
    AccountType, CreateUserCompute, UpdateUserCompute, UserDialogsState, UsersState,
};
use common::{TEST_TOKEN, TestCtx, sample_users};
use kittest::Queryable;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_add_user_opens_create_dialog() {
    let mut ctx = TestCtx::new_app(sample_users()).await;
    ctx.settle().await;

    ctx.harness_mut().get_by_label("Add User").click();
    ctx.settle().await;

    assert!(ctx.state_ctx().state::<UserDialogsState>().create_open);
    let harness = ctx.harness_mut();
    assert!(harness.query_by_label_contains("Create New User").is_some());
    assert!(harness.query_by_label_contains("Create Account").is_some());
}

#[tokio::test]
async fn test_create_dialog_cancel_discards_input() {
    let mut ctx = TestCtx::new_app(sample_users()).await;
    ctx.settle().await;

    ctx.harness_mut().get_by_label("Add User").click();
    ctx.settle().await;
    ctx.state_ctx_mut()
        .state_mut::<UserDialogsState>()
        .create
        .first_name = "Grace".to_owned();

    ctx.harness_mut().get_by_label("Cancel").click();
    ctx.settle().await;

    let dialogs = ctx.state_ctx().state::<UserDialogsState>();
    assert!(!dialogs.create_open);
    assert!(dialogs.create.first_name.is_empty());
    assert!(
        ctx.harness_mut()
            .query_by_label_contains("Create New User")
            .is_none()
    );
}

#[tokio::test]
async fn test_create_account_posts_draft_and_closes_dialog() {
    let mut ctx = TestCtx::new_app(sample_users()).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/create-account"))
        .and(header("Authorization", TEST_TOKEN))
        .and(body_json(serde_json::json!({
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": "grace@example.com",
            "password": "cobol59",
            "accountType": "Graphics",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "success": true,
        })))
        .expect(1)
        .mount(ctx.mock_server())
        .await;

    ctx.settle().await;
    ctx.harness_mut().get_by_label("Add User").click();
    ctx.settle().await;

    {
        let draft = &mut ctx.state_ctx_mut().state_mut::<UserDialogsState>().create;
        draft.first_name = "Grace".to_owned();
        draft.last_name = "Hopper".to_owned();
        draft.email = "grace@example.com".to_owned();
        draft.password = "cobol59".to_owned();
        draft.account_type = AccountType::Graphics;
    }

    ctx.harness_mut().get_by_label("Create Account").click();
    ctx.settle().await;
    ctx.settle().await;

    let state_ctx = ctx.state_ctx();
    assert!(!state_ctx.state::<UserDialogsState>().create_open);
    assert!(
        state_ctx
            .cached::<CreateUserCompute>()
            .is_some_and(|c| c.result.is_succeeded())
    );
    // The list is fetched again after a successful create.
    assert_eq!(
        ctx.requests_to("GET", "/api/v1/auth/getAllUsers").await,
        2
    );
}

#[tokio::test]
async fn test_create_with_missing_fields_shows_error_inline() {
    let mut ctx = TestCtx::new_app(sample_users()).await;
    ctx.settle().await;

    ctx.harness_mut().get_by_label("Add User").click();
    ctx.settle().await;
    ctx.harness_mut().get_by_label("Create Account").click();
    ctx.settle().await;

    assert!(ctx.state_ctx().state::<UserDialogsState>().create_open);
    assert!(
        ctx.harness_mut()
            .query_by_label_contains("First Name is required")
            .is_some()
    );
    assert_eq!(
        ctx.requests_to("POST", "/api/v1/auth/create-account").await,
        0
    );
}

#[tokio::test]
async fn test_edit_password_mismatch_is_shown_without_request() {
    let mut ctx = TestCtx::new_app(sample_users()).await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/auth/updateUser/u1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(ctx.mock_server())
        .await;

    ctx.settle().await;
    ctx.harness_mut()
        .get_all_by_label("Edit")
        .next()
        .expect("edit button of the first row")
        .click();
    ctx.settle().await;

    assert!(ctx.harness_mut().query_by_label_contains("Edit User").is_some());
    assert!(
        ctx.harness_mut()
            .query_by_label_contains("Email cannot be changed")
            .is_some()
    );

    {
        let dialogs = ctx.state_ctx_mut().state_mut::<UserDialogsState>();
        dialogs.set_new_password("secret1");
        dialogs.set_confirm_password("secret2");
    }

    ctx.harness_mut().get_by_label("Save Changes").click();
    ctx.settle().await;

    assert!(
        ctx.harness_mut()
            .query_by_label_contains("Passwords do not match")
            .is_some()
    );
    assert!(ctx.state_ctx().state::<UserDialogsState>().edit.is_some());
}

#[tokio::test]
async fn test_edit_super_admin_shows_locked_role() {
    let mut ctx = TestCtx::new_app(sample_users()).await;
    ctx.settle().await;

    {
        let harness = ctx.harness_mut();
        let edit_buttons: Vec<_> = harness.get_all_by_label("Edit").collect();
        assert_eq!(edit_buttons.len(), 2);
        edit_buttons[1].click();
    }
    ctx.settle().await;

    let draft = ctx
        .state_ctx()
        .state::<UserDialogsState>()
        .edit
        .clone()
        .expect("edit dialog open");
    assert!(draft.role_locked());
    assert!(
        ctx.harness_mut()
            .query_by_label_contains("SuperAdmin role cannot be changed")
            .is_some()
    );
}

#[tokio::test]
async fn test_edit_saves_profile_and_closes_dialog() {
    let mut ctx = TestCtx::new_app(sample_users()).await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/auth/updateUser/u1"))
        .and(body_json(serde_json::json!({
            "userId": "u1",
            "firstName": "Augusta",
            "lastName": "Lovelace",
            "accountType": "Admin",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(ctx.mock_server())
        .await;

    ctx.settle().await;
    ctx.harness_mut()
        .get_all_by_label("Edit")
        .next()
        .expect("edit button of the first row")
        .click();
    ctx.settle().await;

    if let Some(draft) = ctx.state_ctx_mut().state_mut::<UserDialogsState>().edit.as_mut() {
        draft.first_name = "Augusta".to_owned();
    }

    ctx.harness_mut().get_by_label("Save Changes").click();
    ctx.settle().await;
    ctx.settle().await;

    let state_ctx = ctx.state_ctx();
    assert!(state_ctx.state::<UserDialogsState>().edit.is_none());
    assert!(
        state_ctx
            .cached::<UpdateUserCompute>()
            .is_some_and(|c| c.result.is_succeeded())
    );
    assert_eq!(
        state_ctx
            .state::<UsersState>()
            .find("u1")
            .map(|u| u.first_name.as_str()),
        Some("Augusta")
    );
    assert!(
        ctx.harness_mut()
            .query_by_label_contains("Augusta Lovelace")
            .is_some()
    );
}

#[tokio::test]
async fn test_delete_dialog_cancel_keeps_user() {
    let mut ctx = TestCtx::new_app(sample_users()).await;
    ctx.settle().await;

    {
        let harness = ctx.harness_mut();
        let delete_buttons: Vec<_> = harness.get_all_by_label("Delete").collect();
        delete_buttons[0].click();
    }
    ctx.settle().await;

    assert!(
        ctx.harness_mut()
            .query_by_label_contains("Are you sure you want to delete this user?")
            .is_some()
    );
    assert_eq!(
        ctx.state_ctx()
            .state::<UserDialogsState>()
            .pending_delete
            .as_ref()
            .map(|p| p.id.as_str()),
        Some("u1")
    );

    ctx.harness_mut().get_by_label("Cancel").click();
    ctx.settle().await;

    assert!(ctx.state_ctx().state::<UserDialogsState>().pending_delete.is_none());
    assert_eq!(ctx.state_ctx().state::<UsersState>().users.len(), 2);
    assert_eq!(
        ctx.requests_to("DELETE", "/api/v1/auth/deleteUser/u1").await,
        0
    );
}

#[tokio::test]
async fn test_confirmed_delete_removes_row() {
    let mut ctx = TestCtx::new_app(sample_users()).await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/auth/deleteUser/u1"))
        .and(header("Authorization", TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
        })))
        .expect(1)
        .mount(ctx.mock_server())
        .await;

    ctx.settle().await;
    {
        let harness = ctx.harness_mut();
        let delete_buttons: Vec<_> = harness.get_all_by_label("Delete").collect();
        delete_buttons[0].click();
    }
    ctx.settle().await;

    accounts_business::users::confirm_delete(ctx.state_ctx_mut());
    ctx.settle().await;
    ctx.settle().await;

    let state_ctx = ctx.state_ctx();
    assert!(state_ctx.state::<UsersState>().find("u1").is_none());
    assert!(state_ctx.state::<UserDialogsState>().pending_delete.is_none());
    assert!(
        ctx.harness_mut()
            .query_by_label_contains("Ada Lovelace")
            .is_none()
    );
}

#[tokio::test]
async fn test_edit_blank_name_is_shown_without_request() {
    let mut ctx = TestCtx::new_app(sample_users()).await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/auth/updateUser/u1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(ctx.mock_server())
        .await;

    ctx.settle().await;
    ctx.harness_mut()
        .get_all_by_label("Edit")
        .next()
        .expect("edit button of the first row")
        .click();
    ctx.settle().await;

    if let Some(draft) = ctx.state_ctx_mut().state_mut::<UserDialogsState>().edit.as_mut() {
        draft.first_name.clear();
    }

    ctx.harness_mut().get_by_label("Save Changes").click();
    ctx.settle().await;

    assert!(
        ctx.harness_mut()
            .query_by_label_contains("First Name is required")
            .is_some()
    );
    assert!(ctx.state_ctx().state::<UserDialogsState>().edit.is_some());
}
