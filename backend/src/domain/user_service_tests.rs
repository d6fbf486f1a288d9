//! Tests for the user service.

use std::sync::Arc;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockUserStore;
use rstest::{fixture, rstest};

fn make_service(store: MockUserStore) -> UserService {
    UserService::new(Arc::new(store))
}

#[fixture]
fn valid_record() -> UserRecord {
    UserRecord {
        email: Some("a@b.com".to_owned()),
        password: Some("longpass1".to_owned()),
        name: Some("Al".to_owned()),
        ..UserRecord::default()
    }
}

#[fixture]
fn invalid_record() -> UserRecord {
    UserRecord {
        email: Some("bad".to_owned()),
        password: Some("short".to_owned()),
        name: Some("A".to_owned()),
        ..UserRecord::default()
    }
}

fn row(id: i32, email: &str, name: &str) -> StoredUser {
    StoredUser::new(UserId::new(id), email, "longpass1", name)
}

#[rstest]
#[tokio::test]
async fn list_returns_rows_with_passwords() {
    let mut store = MockUserStore::new();
    store
        .expect_list()
        .times(1)
        .return_once(|| Ok(vec![row(1, "a@b.com", "Al"), row(2, "c@d.com", "Cy")]));

    let users = make_service(store).list().await.expect("list succeeds");
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|user| user.password() == "longpass1"));
}

#[rstest]
#[tokio::test]
async fn list_surfaces_store_message_and_statement() {
    let mut store = MockUserStore::new();
    store.expect_list().times(1).return_once(|| {
        Err(UserStoreError::statement(
            "relation \"users\" does not exist",
            "SELECT \"users\".\"id\" FROM \"users\"",
        ))
    });

    let err = make_service(store).list().await.expect_err("list fails");
    assert_eq!(
        err,
        Error::store(
            "relation \"users\" does not exist",
            Some("SELECT \"users\".\"id\" FROM \"users\"".to_owned()),
        )
    );
}

#[rstest]
#[tokio::test]
async fn create_rejects_invalid_record_without_touching_store(invalid_record: UserRecord) {
    let store = MockUserStore::new();

    let err = make_service(store)
        .create(invalid_record)
        .await
        .expect_err("validation fails");

    let Error::Validation(violations) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(
        violations.fields().collect::<Vec<_>>(),
        ["email", "password", "name"]
    );
}

#[rstest]
#[tokio::test]
async fn create_inserts_then_reads_back_public_view(valid_record: UserRecord) {
    let mut store = MockUserStore::new();
    store
        .expect_insert()
        .withf(|user| user.email() == "a@b.com" && user.password() == "longpass1")
        .times(1)
        .return_once(|_| Ok(UserId::new(1)));
    store
        .expect_find_by_id()
        .withf(|id| *id == UserId::new(1))
        .times(1)
        .return_once(|_| Ok(Some(row(1, "a@b.com", "Al"))));

    let user = make_service(store)
        .create(valid_record)
        .await
        .expect("create succeeds");

    assert_eq!(user.id(), UserId::new(1));
    assert_eq!(user.email(), "a@b.com");
    assert_eq!(user.name(), "Al");
}

#[rstest]
#[tokio::test]
async fn create_maps_unique_violation_to_conflict(valid_record: UserRecord) {
    let mut store = MockUserStore::new();
    store.expect_insert().times(1).return_once(|_| {
        Err(UserStoreError::unique_violation(
            "duplicate key value violates unique constraint \"users_email_key\"",
            "INSERT INTO \"users\" ...",
        ))
    });

    let err = make_service(store)
        .create(valid_record)
        .await
        .expect_err("duplicate email");

    assert_eq!(err, Error::conflict(UniqueField::Email));
    assert_eq!(err.to_string(), "Email already exists");
}

#[rstest]
#[case(UserStoreError::statement("value too long", "INSERT INTO \"users\" ..."), Some("INSERT INTO \"users\" ..."))]
#[case(UserStoreError::connection("pool timed out"), None)]
#[case(UserStoreError::unknown_column("role"), None)]
#[tokio::test]
async fn create_maps_other_insert_failures_to_store_error(
    valid_record: UserRecord,
    #[case] failure: UserStoreError,
    #[case] expected_sql: Option<&str>,
) {
    let expected_message = failure.to_string();
    let mut store = MockUserStore::new();
    store.expect_insert().times(1).return_once(move |_| Err(failure));

    let err = make_service(store)
        .create(valid_record)
        .await
        .expect_err("insert fails");

    assert_eq!(err.code(), ErrorCode::StoreFailure);
    assert_eq!(
        err,
        Error::store(expected_message, expected_sql.map(str::to_owned))
    );
}

#[rstest]
#[tokio::test]
async fn create_reports_failed_read_back_after_insert(valid_record: UserRecord) {
    let mut store = MockUserStore::new();
    store
        .expect_insert()
        .times(1)
        .return_once(|_| Ok(UserId::new(5)));
    store.expect_find_by_id().times(1).return_once(|_| {
        Err(UserStoreError::statement(
            "canceling statement due to statement timeout",
            "SELECT ... WHERE \"users\".\"id\" = $1",
        ))
    });

    let err = make_service(store)
        .create(valid_record)
        .await
        .expect_err("read-back fails");

    assert_eq!(err.code(), ErrorCode::StoreFailure);
    assert_eq!(
        err.to_string(),
        "canceling statement due to statement timeout"
    );
}

#[rstest]
#[tokio::test]
async fn update_rejects_invalid_record_without_touching_store(invalid_record: UserRecord) {
    let store = MockUserStore::new();

    let err = make_service(store)
        .update(UserId::new(1), invalid_record)
        .await
        .expect_err("validation fails");

    assert_eq!(err.code(), ErrorCode::ValidationFailed);
}

#[rstest]
#[tokio::test]
async fn update_returns_refreshed_row(mut valid_record: UserRecord) {
    valid_record.name = Some("Alan".to_owned());
    let mut store = MockUserStore::new();
    store
        .expect_update()
        .withf(|id, user| *id == UserId::new(3) && user.name() == "Alan")
        .times(1)
        .return_once(|_, _| Ok(()));
    store
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(row(3, "a@b.com", "Alan"))));

    let user = make_service(store)
        .update(UserId::new(3), valid_record)
        .await
        .expect("update succeeds");

    assert_eq!(user.id(), UserId::new(3));
    assert_eq!(user.name(), "Alan");
}

#[rstest]
#[tokio::test]
async fn update_does_not_map_unique_violation_to_conflict(valid_record: UserRecord) {
    let mut store = MockUserStore::new();
    store.expect_update().times(1).return_once(|_, _| {
        Err(UserStoreError::unique_violation(
            "duplicate key value violates unique constraint \"users_email_key\"",
            "UPDATE \"users\" ...",
        ))
    });

    let err = make_service(store)
        .update(UserId::new(1), valid_record)
        .await
        .expect_err("duplicate email");

    assert_eq!(err.code(), ErrorCode::StoreFailure);
    assert_eq!(
        err,
        Error::store(
            "duplicate key value violates unique constraint \"users_email_key\"",
            Some("UPDATE \"users\" ...".to_owned()),
        )
    );
}

#[rstest]
#[tokio::test]
async fn update_of_missing_row_fails_on_read_back(valid_record: UserRecord) {
    let mut store = MockUserStore::new();
    store.expect_update().times(1).return_once(|_, _| Ok(()));
    store.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let err = make_service(store)
        .update(UserId::new(99), valid_record)
        .await
        .expect_err("row is missing");

    assert_eq!(err, Error::store("user 99 not found", None));
}
