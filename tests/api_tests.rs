//! API integration tests
//!
//! Run against a live server with a migrated database:
//! `cargo test -- --ignored`
//!
//! Assumes a seeded account "librarian"/"librarian" with is_staff and
//! can_mark_returned set; everything else is created through the API.

use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an authenticated token for the seeded librarian
async fn get_librarian_token(client: &Client) -> String {
    login(client, "librarian", "librarian").await
}

async fn login(client: &Client, username: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": username,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Create a patron account (no staff rights, no mark-returned capability)
/// and return (user_id, token).
async fn create_patron(client: &Client, librarian_token: &str) -> (i64, String) {
    let username = format!("patron{}", Utc::now().timestamp_micros());

    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", librarian_token))
        .json(&json!({
            "username": username,
            "password": "patronpass"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let user_id = body["id"].as_i64().expect("No user ID");

    let token = login(client, &username, "patronpass").await;
    (user_id, token)
}

/// Create an on-loan copy for a borrower with the given due date offset
/// (days from today; None leaves the due date unset).
async fn create_on_loan_instance(
    client: &Client,
    librarian_token: &str,
    borrower_id: i64,
    due_offset_days: Option<i64>,
) -> String {
    let due_back = due_offset_days.map(|days| {
        (Utc::now().date_naive() + Duration::days(days))
            .format("%Y-%m-%d")
            .to_string()
    });

    let response = client
        .post(format!("{}/instances", BASE_URL))
        .header("Authorization", format!("Bearer {}", librarian_token))
        .json(&json!({
            "imprint": "Test Imprint, 2016",
            "status": "on_loan",
            "borrower_id": borrower_id,
            "due_back": due_back
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_str().expect("No instance ID").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "librarian",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_catalog_write_requires_authentication() {
    let client = Client::new();

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({"first_name": "No", "last_name": "Token"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_author_delete_keeps_book_with_null_author() {
    let client = Client::new();
    let token = get_librarian_token(&client).await;

    // Create author
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"first_name": "Dominique", "last_name": "Rousseau"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let author: Value = response.json().await.expect("Failed to parse response");
    let author_id = author["id"].as_i64().expect("No author ID");

    // Create book referencing the author
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"title": "Orphaned Title", "author_id": author_id}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let book: Value = response.json().await.expect("Failed to parse response");
    let book_id = book["id"].as_i64().expect("No book ID");
    assert_eq!(book["author"]["id"].as_i64(), Some(author_id));

    // Delete the author
    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // The book survives with its author reference cleared
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let book: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(book["title"], "Orphaned Title");
    assert!(book["author"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_renewal_requires_mark_returned_permission() {
    let client = Client::new();
    let librarian_token = get_librarian_token(&client).await;
    let (patron_id, patron_token) = create_patron(&client, &librarian_token).await;
    let instance_id =
        create_on_loan_instance(&client, &librarian_token, patron_id, Some(7)).await;

    // A valid date is rejected all the same when the capability is missing
    let valid_date = (Utc::now().date_naive() + Duration::days(7))
        .format("%Y-%m-%d")
        .to_string();

    let response = client
        .post(format!("{}/instances/{}/renew", BASE_URL, instance_id))
        .header("Authorization", format!("Bearer {}", patron_token))
        .json(&json!({"renewal_date": valid_date}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_renewal_of_missing_instance_is_404() {
    let client = Client::new();
    let token = get_librarian_token(&client).await;

    // A past date on a missing copy still yields 404, not a date rejection
    let past_date = (Utc::now().date_naive() - Duration::days(3))
        .format("%Y-%m-%d")
        .to_string();

    let response = client
        .post(format!(
            "{}/instances/00000000-0000-0000-0000-000000000000/renew",
            BASE_URL
        ))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"renewal_date": past_date}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_renewal_rejects_past_date_and_keeps_instance() {
    let client = Client::new();
    let librarian_token = get_librarian_token(&client).await;
    let (patron_id, _) = create_patron(&client, &librarian_token).await;
    let instance_id =
        create_on_loan_instance(&client, &librarian_token, patron_id, Some(2)).await;

    let original_due = (Utc::now().date_naive() + Duration::days(2))
        .format("%Y-%m-%d")
        .to_string();
    let past_date = (Utc::now().date_naive() - Duration::days(3))
        .format("%Y-%m-%d")
        .to_string();

    let response = client
        .post(format!("{}/instances/{}/renew", BASE_URL, instance_id))
        .header("Authorization", format!("Bearer {}", librarian_token))
        .json(&json!({"renewal_date": past_date}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "PAST_DATE");
    assert_eq!(body["message"], "Invalid date - renewal in past");

    // Instance unchanged
    let response = client
        .get(format!("{}/instances/{}", BASE_URL, instance_id))
        .send()
        .await
        .expect("Failed to send request");
    let instance: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(instance["due_back"].as_str(), Some(original_due.as_str()));
    assert_eq!(instance["status"], "on_loan");
}

#[tokio::test]
#[ignore]
async fn test_renewal_rejects_date_beyond_four_weeks() {
    let client = Client::new();
    let librarian_token = get_librarian_token(&client).await;
    let (patron_id, _) = create_patron(&client, &librarian_token).await;
    let instance_id =
        create_on_loan_instance(&client, &librarian_token, patron_id, Some(7)).await;

    let too_far = (Utc::now().date_naive() + Duration::days(29))
        .format("%Y-%m-%d")
        .to_string();

    let response = client
        .post(format!("{}/instances/{}/renew", BASE_URL, instance_id))
        .header("Authorization", format!("Bearer {}", librarian_token))
        .json(&json!({"renewal_date": too_far}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "TOO_FAR_AHEAD");
    assert_eq!(body["message"], "Invalid date - renewal more than 4 weeks ahead");
}

#[tokio::test]
#[ignore]
async fn test_renewal_accepts_window_boundary_and_keeps_status() {
    let client = Client::new();
    let librarian_token = get_librarian_token(&client).await;
    let (patron_id, _) = create_patron(&client, &librarian_token).await;
    let instance_id =
        create_on_loan_instance(&client, &librarian_token, patron_id, Some(2)).await;

    // today + 28 days is the last acceptable date
    let boundary = (Utc::now().date_naive() + Duration::days(28))
        .format("%Y-%m-%d")
        .to_string();

    let response = client
        .post(format!("{}/instances/{}/renew", BASE_URL, instance_id))
        .header("Authorization", format!("Bearer {}", librarian_token))
        .json(&json!({"renewal_date": boundary}))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let instance: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(instance["due_back"].as_str(), Some(boundary.as_str()));
    // Renewal only moves the due date
    assert_eq!(instance["status"], "on_loan");
    assert_eq!(instance["borrower_id"].as_i64(), Some(patron_id));
}

#[tokio::test]
#[ignore]
async fn test_renewal_defaults_to_three_weeks() {
    let client = Client::new();
    let librarian_token = get_librarian_token(&client).await;
    let (patron_id, _) = create_patron(&client, &librarian_token).await;
    let instance_id =
        create_on_loan_instance(&client, &librarian_token, patron_id, Some(2)).await;

    // The GET proposal and the applied default agree: today + 3 weeks
    let expected = (Utc::now().date_naive() + Duration::weeks(3))
        .format("%Y-%m-%d")
        .to_string();

    let response = client
        .get(format!("{}/instances/{}/renew", BASE_URL, instance_id))
        .header("Authorization", format!("Bearer {}", librarian_token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let proposal: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(proposal["proposed_date"].as_str(), Some(expected.as_str()));

    let response = client
        .post(format!("{}/instances/{}/renew", BASE_URL, instance_id))
        .header("Authorization", format!("Bearer {}", librarian_token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let instance: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(instance["due_back"].as_str(), Some(expected.as_str()));
}

#[tokio::test]
#[ignore]
async fn test_my_loans_lists_only_own_on_loan_copies_in_due_order() {
    let client = Client::new();
    let librarian_token = get_librarian_token(&client).await;
    let (patron_id, patron_token) = create_patron(&client, &librarian_token).await;

    // Fresh patron has nothing outstanding
    let response = client
        .get(format!("{}/catalog/my-loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", patron_token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["items"].as_array().map(|a| a.len()), Some(0));
    assert_eq!(body["total"].as_i64(), Some(0));

    // Three copies on loan, created out of due-date order, one undated
    create_on_loan_instance(&client, &librarian_token, patron_id, Some(14)).await;
    create_on_loan_instance(&client, &librarian_token, patron_id, Some(3)).await;
    create_on_loan_instance(&client, &librarian_token, patron_id, None).await;

    let response = client
        .get(format!("{}/catalog/my-loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", patron_token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let items = body["items"].as_array().expect("items not an array");
    assert_eq!(items.len(), 3);
    assert_eq!(body["total"].as_i64(), Some(3));

    // Ascending by due date, with the undated copy sorting first
    assert!(items[0]["due_back"].is_null());
    let first = items[1]["due_back"].as_str().expect("No due date");
    let second = items[2]["due_back"].as_str().expect("No due date");
    assert!(first < second);
}

#[tokio::test]
#[ignore]
async fn test_all_borrowed_needs_permission_and_lists_every_on_loan_copy() {
    let client = Client::new();
    let librarian_token = get_librarian_token(&client).await;
    let (patron_id, patron_token) = create_patron(&client, &librarian_token).await;
    create_on_loan_instance(&client, &librarian_token, patron_id, Some(40)).await;

    // Patrons cannot see the full outstanding list
    let response = client
        .get(format!("{}/catalog/borrowed", BASE_URL))
        .header("Authorization", format!("Bearer {}", patron_token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // The privileged list includes on-loan copies that are not overdue
    let response = client
        .get(format!("{}/catalog/borrowed", BASE_URL))
        .header("Authorization", format!("Bearer {}", librarian_token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total"].as_i64().unwrap_or(0) >= 1);
}

#[tokio::test]
#[ignore]
async fn test_list_pagination_is_ten() {
    let client = Client::new();
    let token = get_librarian_token(&client).await;

    for i in 0..12 {
        let response = client
            .post(format!("{}/genres", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({"name": format!("Paging Genre {}", i)}))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
    }

    let response = client
        .get(format!("{}/genres?page=1", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["per_page"].as_i64(), Some(10));
    assert_eq!(body["items"].as_array().map(|a| a.len()), Some(10));
    assert!(body["total"].as_i64().unwrap_or(0) >= 12);
}

#[tokio::test]
#[ignore]
async fn test_stats_counts_move_with_catalog() {
    let client = Client::new();
    let token = get_librarian_token(&client).await;

    let before: Value = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"title": "Counted Title"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let after: Value = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(
        after["books"].as_i64().unwrap(),
        before["books"].as_i64().unwrap() + 1
    );
}
