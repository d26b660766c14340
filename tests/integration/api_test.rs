//! HTTP-level tests for the REST API, driven against in-memory stores.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/rest/api/2/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "not_configured");
    assert_eq!(response.body["mail"], true);
}

#[tokio::test]
async fn test_permission_query_for_developer() {
    let app = TestApp::new();
    let response = app
        .request(
            "GET",
            "/rest/api/2/permission-query?permission=BROWSE",
            None,
            Some("fred"),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["permissionId"], 10);
    assert_eq!(response.body["permission"], "BROWSE");
    assert_eq!(response.body["user"], "fred");
    assert_eq!(response.body["empty"], false);
    assert_eq!(
        response.body["queryString"],
        "+(projid:10001 (+projid:10001 +issue_author:fred) projid:10000 (+projid:10000 +issue_author:fred)) \
         +(issue_security_level:-1 issue_security_level:10100)"
    );
    assert_eq!(response.body["query"]["type"], "boolean");
}

#[tokio::test]
async fn test_permission_query_for_anonymous_without_grants_is_empty() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/rest/api/2/permission-query?permission=10", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["empty"], true);
    assert_eq!(response.body["queryString"], "");
    assert!(response.body["user"].is_null());
}

#[tokio::test]
async fn test_permission_query_for_anonymous_with_open_grant() {
    let app = TestApp::new();
    let response = app
        .request(
            "GET",
            "/rest/api/2/permission-query?permission=CREATE_ISSUE",
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["queryString"],
        "+(projid:10001 projid:10000) +(issue_security_level:-1)"
    );
}

#[tokio::test]
async fn test_permission_query_rejects_unknown_permission_and_user() {
    let app = TestApp::new();

    let response = app
        .request(
            "GET",
            "/rest/api/2/permission-query?permission=FLY",
            None,
            Some("fred"),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["status"], 400);

    let response = app
        .request(
            "GET",
            "/rest/api/2/permission-query?permission=BROWSE",
            None,
            Some("nobody"),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["errorMessages"][0], "Unknown user 'nobody'");

    let response = app
        .request(
            "GET",
            "/rest/api/2/permission-query?permission=BROWSE",
            None,
            Some("barney"),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auditing_requires_administrator() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/rest/api/2/auditing/record", None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/rest/api/2/auditing/record", None, Some("fred"))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_store_and_query_audit_records() {
    let app = TestApp::new();

    for summary in ["User created", "Group created", "User deleted"] {
        let response = app
            .request(
                "POST",
                "/rest/api/2/auditing/record",
                Some(json!({
                    "category": "USER_MANAGEMENT",
                    "summary": summary,
                    "objectItem": {"objectName": "fred", "objectId": "fred", "typeName": "USER"}
                })),
                Some("admin"),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["authorKey"], "admin");
    }

    let response = app
        .request("GET", "/rest/api/2/auditing/record", None, Some("admin"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total"], 3);
    assert_eq!(response.body["items"][0]["summary"], "User deleted");

    let response = app
        .request(
            "GET",
            "/rest/api/2/auditing/record?filter=user&from=2&limit=1",
            None,
            Some("admin"),
        )
        .await;
    assert_eq!(response.body["total"], 2);
    assert_eq!(response.body["items"].as_array().unwrap().len(), 1);
    assert_eq!(response.body["isLast"], false);
}

#[tokio::test]
async fn test_audit_record_without_summary_is_rejected() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/rest/api/2/auditing/record",
            Some(json!({"category": "SYSTEM", "summary": ""})),
            Some("admin"),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errors"]["summary"], "audit.summary.required");
    assert!(app.tracker.audit_records().is_empty());
}

#[tokio::test]
async fn test_scheme_event_is_audited() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/rest/api/2/admin/scheme-event",
            Some(json!({
                "type": "PermissionAdded",
                "scheme_id": 0,
                "scheme_name": "Default Permission Scheme",
                "permission_id": 10,
                "grant": {"grant_type": "group", "parameter": "jira-developers"}
            })),
            Some("admin"),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["category"], "PERMISSIONS");
    assert_eq!(response.body["summary"], "Permission added to permission scheme");
    assert_eq!(response.body["associatedItems"][0]["typeName"], "GROUP");
    assert_eq!(app.tracker.audit_records().len(), 1);
}

#[tokio::test]
async fn test_bulk_mail_to_group() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/rest/api/2/admin/bulk-mail",
            Some(json!({
                "groups": ["jira-developers"],
                "subject": "Maintenance",
                "messageType": "text",
                "message": "Down at noon"
            })),
            Some("admin"),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["recipients"], json!(["fred", "wilma"]));
    assert_eq!(response.body["messages"], 1);

    let sent = app.mail.as_ref().unwrap().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec!["fred@example.com", "wilma@example.com"]);
    assert_eq!(sent[0].from_name.as_deref(), Some("admin"));
    assert_eq!(sent[0].reply_to.as_deref(), Some("admin@example.com"));
}

#[tokio::test]
async fn test_bulk_mail_to_project_role() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/rest/api/2/admin/bulk-mail",
            Some(json!({
                "sendToRoles": true,
                "projects": [helpers::MONKEY],
                "roles": [helpers::DEVELOPERS_ROLE],
                "subject": "Release",
                "messageType": "html",
                "message": "<p>Shipped</p>",
                "sendBlindCopy": true
            })),
            Some("admin"),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let sent = app.mail.as_ref().unwrap().sent();
    assert_eq!(sent[0].bcc, vec!["fred@example.com"]);
    assert!(sent[0].to.is_empty());
}

#[tokio::test]
async fn test_bulk_mail_validation() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/rest/api/2/admin/bulk-mail",
            Some(json!({"groups": [], "replyTo": "bademail"})),
            Some("admin"),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errors"]["sendToRoles"], "select.one.group");
    assert_eq!(response.body["errors"]["subject"], "no.subject");
    assert_eq!(response.body["errors"]["replyTo"], "invalid.email");
}

#[tokio::test]
async fn test_bulk_mail_without_mail_server() {
    let app = TestApp::without_mail();
    let response = app
        .request(
            "POST",
            "/rest/api/2/admin/bulk-mail",
            Some(json!({
                "groups": ["jira-developers"],
                "subject": "Maintenance",
                "messageType": "text",
                "message": "Down at noon"
            })),
            Some("admin"),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errorMessages"][0], "no.mail.server");
}

#[tokio::test]
async fn test_missing_permission_parameter_is_an_error_collection() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/rest/api/2/permission-query", None, Some("fred"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["status"], 400);
    assert!(response.body["errorMessages"][0].is_string());
}

#[tokio::test]
async fn test_non_numeric_audit_range_is_an_error_collection() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/rest/api/2/auditing/record?from=abc", None, Some("admin"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["status"], 400);
    assert!(response.body["errorMessages"][0].is_string());
}

#[tokio::test]
async fn test_malformed_json_body_is_an_error_collection() {
    let app = TestApp::new();
    let response = app
        .request_raw("POST", "/rest/api/2/auditing/record", "{\"summary\": ", "admin")
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["status"], 400);
    assert!(response.body["errorMessages"][0].is_string());
    assert!(app.tracker.audit_records().is_empty());
}
