//! Widget tests for the user table: initial load, filtering, refresh and
//! the per-row restrictions.

mod common;

use accounts_business::{AccountType, UserDialogsState, UserFilterState, UsersState};
use common::{TestCtx, sample_users};
use kittest::Queryable;

const LIST_PATH: &str = "/api/v1/auth/getAllUsers";

#[tokio::test]
async fn test_users_are_loaded_on_first_frame() {
    let mut ctx = TestCtx::new_app(sample_users()).await;

    ctx.settle().await;

    let users = ctx.state_ctx().state::<UsersState>();
    assert_eq!(users.users.len(), 2);
    assert!(!users.is_loading);

    let harness = ctx.harness_mut();
    assert!(harness.query_by_label_contains("User Management").is_some());
    assert!(harness.query_by_label_contains("Ada Lovelace").is_some());
    assert!(harness.query_by_label_contains("Root Owner").is_some());
    assert!(harness.query_by_label_contains("2024-03-05").is_some());
}

#[tokio::test]
async fn test_no_repeat_fetch_on_subsequent_frames() {
    let mut ctx = TestCtx::new_app(sample_users()).await;

    ctx.settle().await;
    for _ in 0..5 {
        ctx.harness_mut().step();
    }
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    assert_eq!(ctx.requests_to("GET", LIST_PATH).await, 1);
}

#[tokio::test]
async fn test_refresh_button_fetches_again() {
    let mut ctx = TestCtx::new_app(sample_users()).await;
    ctx.settle().await;

    ctx.harness_mut().get_by_label("Refresh").click();
    ctx.settle().await;

    assert_eq!(ctx.requests_to("GET", LIST_PATH).await, 2);
    assert!(ctx.harness_mut().query_by_label_contains("Ada Lovelace").is_some());
}

#[tokio::test]
async fn test_role_filter_hides_other_rows() {
    let mut ctx = TestCtx::new_app(sample_users()).await;
    ctx.settle().await;

    ctx.state_ctx_mut()
        .update::<UserFilterState>(|f| f.role = Some(AccountType::SuperAdmin));
    ctx.settle().await;

    let harness = ctx.harness_mut();
    assert!(harness.query_by_label_contains("Root Owner").is_some());
    assert!(harness.query_by_label_contains("Ada Lovelace").is_none());
}

#[tokio::test]
async fn test_search_without_matches_shows_empty_message() {
    let mut ctx = TestCtx::new_app(sample_users()).await;
    ctx.settle().await;

    ctx.state_ctx_mut()
        .update::<UserFilterState>(|f| f.search = "nobody".to_owned());
    ctx.settle().await;

    let harness = ctx.harness_mut();
    assert!(harness.query_by_label_contains("No users found").is_some());
    assert!(harness.query_by_label_contains("Ada Lovelace").is_none());

    ctx.state_ctx_mut().update::<UserFilterState>(UserFilterState::clear);
    ctx.settle().await;

    let harness = ctx.harness_mut();
    assert!(harness.query_by_label_contains("Ada Lovelace").is_some());
    assert!(harness.query_by_label_contains("Root Owner").is_some());
}

#[tokio::test]
async fn test_super_admin_delete_button_does_nothing() {
    let mut ctx = TestCtx::new_app(sample_users()).await;
    ctx.settle().await;

    // Rows render in list order; the second Delete belongs to the super admin.
    {
        let harness = ctx.harness_mut();
        let delete_buttons: Vec<_> = harness.get_all_by_label("Delete").collect();
        assert_eq!(delete_buttons.len(), 2);
        delete_buttons[1].click();
    }
    ctx.settle().await;

    assert!(ctx.state_ctx().state::<UserDialogsState>().pending_delete.is_none());
    assert!(
        ctx.harness_mut()
            .query_by_label_contains("Are you sure you want to delete this user?")
            .is_none()
    );
}
