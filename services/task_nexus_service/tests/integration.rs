use std::sync::Arc;

use axum_test::{TestResponse, TestServer};
use http::StatusCode;
use serde_json::{Value, json};
use task_nexus_service::{
    config::{Configuration, DatabaseConfiguration, SecurityConfiguration},
    routes::root::{RouterConfig, build_router},
    state::ServiceState,
};

fn default_config() -> Configuration {
    Configuration {
        security: SecurityConfiguration {
            token_secret: "test-secret".to_string(),
            search_result_cap: 10,
        },
        database: DatabaseConfiguration {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
    }
}

async fn create_server() -> TestServer {
    let route_config = RouterConfig::new(Some("/api".to_string()), true);

    let state = ServiceState::from_config(
        Arc::new(default_config()),
        route_config.clone(),
    )
    .await
    .expect("must be able to construct state");

    let router = build_router(&route_config).with_state(state);

    TestServer::new(router).expect("should be able to create test server")
}

async fn register(
    server: &TestServer,
    username: &str,
    email: &str,
    password: &str,
) -> TestResponse {
    server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "email": email,
            "password": password,
        }))
        .await
}

async fn register_ok(
    server: &TestServer,
    username: &str,
    email: &str,
    password: &str,
) -> String {
    let response = register(server, username, email, password).await;
    response.assert_status_ok();

    response.json::<Value>()["token"]
        .as_str()
        .expect("registration must return a token")
        .to_string()
}

async fn login(
    server: &TestServer,
    email: &str,
    password: &str,
) -> TestResponse {
    server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await
}

async fn get_with_token(
    server: &TestServer,
    token: &str,
    path: &str,
) -> TestResponse {
    server
        .get(path)
        .add_header("Authorization", format!("Bearer {token}"))
        .await
}

async fn post_with_token(
    server: &TestServer,
    token: &str,
    path: &str,
    body: Value,
) -> TestResponse {
    server
        .post(path)
        .add_header("Authorization", format!("Bearer {token}"))
        .json(&body)
        .await
}

async fn put_with_token(
    server: &TestServer,
    token: &str,
    path: &str,
    body: Value,
) -> TestResponse {
    server
        .put(path)
        .add_header("Authorization", format!("Bearer {token}"))
        .json(&body)
        .await
}

async fn delete_with_token(
    server: &TestServer,
    token: &str,
    path: &str,
) -> TestResponse {
    server
        .delete(path)
        .add_header("Authorization", format!("Bearer {token}"))
        .await
}

/// The caller's sole workspace id, from the workspace listing.
async fn only_workspace_id(server: &TestServer, token: &str) -> i64 {
    let workspaces = get_with_token(server, token, "/api/workspaces")
        .await
        .json::<Value>();
    let workspaces = workspaces.as_array().expect("workspace list");

    assert_eq!(workspaces.len(), 1);
    workspaces[0]["id"].as_i64().expect("workspace id")
}

async fn starter_project_id(
    server: &TestServer,
    token: &str,
    workspace_id: i64,
) -> i64 {
    let projects = get_with_token(
        server,
        token,
        &format!("/api/projects/workspace/{workspace_id}"),
    )
    .await
    .json::<Value>();
    let projects = projects.as_array().expect("project list");

    assert_eq!(projects.len(), 1);
    projects[0]["id"].as_i64().expect("project id")
}

async fn dashboard(server: &TestServer, token: &str) -> Value {
    let response =
        get_with_token(server, token, "/api/analytics/dashboard").await;
    response.assert_status_ok();

    response.json::<Value>()
}

#[tokio::test]
async fn registration_bootstraps_workspace_membership_and_project() {
    let server = create_server().await;

    let response =
        register(&server, "ada", "ada@example.com", "hunter2").await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["user"]["username"], "ada");
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert!(body["user"].get("password_hash").is_none());

    let token = body["token"].as_str().unwrap();

    let workspaces = get_with_token(&server, token, "/api/workspaces")
        .await
        .json::<Value>();
    assert_eq!(workspaces.as_array().unwrap().len(), 1);
    assert_eq!(workspaces[0]["name"], "ada Workspace");
    assert_eq!(workspaces[0]["role"], "owner");

    let workspace_id = workspaces[0]["id"].as_i64().unwrap();
    let projects = get_with_token(
        &server,
        token,
        &format!("/api/projects/workspace/{workspace_id}"),
    )
    .await
    .json::<Value>();

    assert_eq!(projects.as_array().unwrap().len(), 1);
    assert_eq!(projects[0]["name"], "My First Project");
    assert_eq!(projects[0]["task_count"], 0);
    assert_eq!(projects[0]["completed_count"], 0);
}

#[tokio::test]
async fn duplicate_registration_conflicts_and_leaves_first_user_intact() {
    let server = create_server().await;

    register_ok(&server, "ada", "ada@example.com", "hunter2").await;

    let duplicate_email =
        register(&server, "grace", "ada@example.com", "other").await;
    duplicate_email.assert_status(StatusCode::CONFLICT);

    let duplicate_username =
        register(&server, "ada", "grace@example.com", "other").await;
    duplicate_username.assert_status(StatusCode::CONFLICT);

    let response = login(&server, "ada@example.com", "hunter2").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["user"]["username"], "ada");
}

#[tokio::test]
async fn login_distinguishes_missing_account_from_wrong_password() {
    let server = create_server().await;

    register_ok(&server, "ada", "ada@example.com", "hunter2").await;

    let unknown = login(&server, "nobody@example.com", "hunter2").await;
    unknown.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        unknown.json::<Value>()["detail"],
        "No account found with this email"
    );

    let wrong = login(&server, "ada@example.com", "nope").await;
    wrong.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.json::<Value>()["detail"], "Wrong password");
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let server = create_server().await;

    let token =
        register_ok(&server, "ada", "ada@example.com", "hunter2").await;

    let me = get_with_token(&server, &token, "/api/auth/me").await;
    me.assert_status_ok();
    assert_eq!(me.json::<Value>()["username"], "ada");

    let garbage = get_with_token(&server, "garbage", "/api/auth/me").await;
    garbage.assert_status(StatusCode::UNAUTHORIZED);

    let missing = server.get("/api/auth/me").await;
    missing.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn search_requires_a_token_and_three_characters() {
    let server = create_server().await;

    let token =
        register_ok(&server, "ada", "ada@example.com", "hunter2").await;
    register_ok(&server, "grace", "grace@example.com", "hunter2").await;

    let unauthenticated =
        server.get("/api/users/search?email=grace").await;
    unauthenticated.assert_status(StatusCode::UNAUTHORIZED);

    let short =
        get_with_token(&server, &token, "/api/users/search?email=gr").await;
    short.assert_status_ok();
    assert_eq!(short.json::<Value>().as_array().unwrap().len(), 0);

    let found =
        get_with_token(&server, &token, "/api/users/search?email=GRACE")
            .await;
    found.assert_status_ok();
    let found = found.json::<Value>();
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["email"], "grace@example.com");
}

#[tokio::test]
async fn invite_flow_covers_not_found_success_and_conflict() {
    let server = create_server().await;

    let owner_token =
        register_ok(&server, "ada", "ada@example.com", "hunter2").await;
    register_ok(&server, "grace", "grace@example.com", "hunter2").await;

    let workspace_id = only_workspace_id(&server, &owner_token).await;
    let invite_path = format!("/api/workspaces/{workspace_id}/invite");

    let unknown = post_with_token(
        &server,
        &owner_token,
        &invite_path,
        json!({ "email": "nobody@example.com" }),
    )
    .await;
    unknown.assert_status(StatusCode::NOT_FOUND);

    let invited = post_with_token(
        &server,
        &owner_token,
        &invite_path,
        json!({ "email": "grace@example.com" }),
    )
    .await;
    invited.assert_status_ok();
    assert_eq!(invited.json::<Value>()["success"], true);

    let members = get_with_token(
        &server,
        &owner_token,
        &format!("/api/workspaces/{workspace_id}/members"),
    )
    .await
    .json::<Value>();
    let members = members.as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert!(members.iter().any(|m| m["username"] == "grace"
        && m["role"] == "member"));

    let again = post_with_token(
        &server,
        &owner_token,
        &invite_path,
        json!({ "email": "grace@example.com" }),
    )
    .await;
    again.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn only_owners_and_admins_may_invite() {
    let server = create_server().await;

    let owner_token =
        register_ok(&server, "ada", "ada@example.com", "hunter2").await;
    let member_token =
        register_ok(&server, "grace", "grace@example.com", "hunter2").await;
    let outsider_token =
        register_ok(&server, "mary", "mary@example.com", "hunter2").await;

    let workspace_id = only_workspace_id(&server, &owner_token).await;
    let invite_path = format!("/api/workspaces/{workspace_id}/invite");

    post_with_token(
        &server,
        &owner_token,
        &invite_path,
        json!({ "email": "grace@example.com" }),
    )
    .await
    .assert_status_ok();

    let as_member = post_with_token(
        &server,
        &member_token,
        &invite_path,
        json!({ "email": "mary@example.com" }),
    )
    .await;
    as_member.assert_status(StatusCode::FORBIDDEN);

    let as_outsider = post_with_token(
        &server,
        &outsider_token,
        &invite_path,
        json!({ "email": "mary@example.com" }),
    )
    .await;
    as_outsider.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn workspace_reads_and_deletes_are_membership_gated() {
    let server = create_server().await;

    let owner_token =
        register_ok(&server, "ada", "ada@example.com", "hunter2").await;
    let other_token =
        register_ok(&server, "grace", "grace@example.com", "hunter2").await;

    let workspace_id = only_workspace_id(&server, &owner_token).await;
    let workspace_path = format!("/api/workspaces/{workspace_id}");

    let foreign_read =
        get_with_token(&server, &other_token, &workspace_path).await;
    foreign_read.assert_status(StatusCode::FORBIDDEN);

    let foreign_delete =
        delete_with_token(&server, &other_token, &workspace_path).await;
    foreign_delete.assert_status(StatusCode::FORBIDDEN);

    // Members without the owner role cannot delete either.
    post_with_token(
        &server,
        &owner_token,
        &format!("/api/workspaces/{workspace_id}/invite"),
        json!({ "email": "grace@example.com" }),
    )
    .await
    .assert_status_ok();

    let member_delete =
        delete_with_token(&server, &other_token, &workspace_path).await;
    member_delete.assert_status(StatusCode::FORBIDDEN);

    let owner_delete =
        delete_with_token(&server, &owner_token, &workspace_path).await;
    owner_delete.assert_status_ok();

    let after_delete =
        get_with_token(&server, &owner_token, &workspace_path).await;
    after_delete.assert_status_not_found();
}

#[tokio::test]
async fn task_creation_applies_documented_defaults() {
    let server = create_server().await;

    let token =
        register_ok(&server, "ada", "ada@example.com", "hunter2").await;
    let workspace_id = only_workspace_id(&server, &token).await;
    let project_id =
        starter_project_id(&server, &token, workspace_id).await;

    let created = post_with_token(
        &server,
        &token,
        "/api/tasks",
        json!({ "title": "Write the report", "project_id": project_id }),
    )
    .await;
    created.assert_status_ok();

    let task = created.json::<Value>();
    assert_eq!(task["status"], "todo");
    assert_eq!(task["priority"], "medium");
    assert_eq!(task["description"], "");
    assert_eq!(task["completed"], false);

    let listed = get_with_token(
        &server,
        &token,
        &format!("/api/tasks?projectId={project_id}"),
    )
    .await
    .json::<Value>();
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["assignee_name"], Value::Null);
}

#[tokio::test]
async fn completing_a_task_is_idempotent_and_one_directional() {
    let server = create_server().await;

    let token =
        register_ok(&server, "ada", "ada@example.com", "hunter2").await;
    let workspace_id = only_workspace_id(&server, &token).await;
    let project_id =
        starter_project_id(&server, &token, workspace_id).await;

    let task = post_with_token(
        &server,
        &token,
        "/api/tasks",
        json!({ "title": "Finish me", "project_id": project_id }),
    )
    .await
    .json::<Value>();
    let task_id = task["id"].as_i64().unwrap();
    let task_path = format!("/api/tasks/{task_id}");

    // The completed flag wins over the status carried in the same patch.
    for _ in 0..2 {
        put_with_token(
            &server,
            &token,
            &task_path,
            json!({ "completed": true, "status": "todo" }),
        )
        .await
        .assert_status_ok();

        let tasks = get_with_token(
            &server,
            &token,
            &format!("/api/tasks?projectId={project_id}"),
        )
        .await
        .json::<Value>();
        assert_eq!(tasks[0]["status"], "done");
        assert_eq!(tasks[0]["completed"], true);
    }

    // Setting status to done directly does not mark the task completed.
    let other = post_with_token(
        &server,
        &token,
        "/api/tasks",
        json!({ "title": "Only status", "project_id": project_id }),
    )
    .await
    .json::<Value>();
    let other_path = format!("/api/tasks/{}", other["id"].as_i64().unwrap());

    put_with_token(&server, &token, &other_path, json!({ "status": "done" }))
        .await
        .assert_status_ok();

    let tasks = get_with_token(
        &server,
        &token,
        &format!("/api/tasks?projectId={project_id}"),
    )
    .await
    .json::<Value>();
    let only_status = tasks
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["title"] == "Only status")
        .unwrap();
    assert_eq!(only_status["status"], "done");
    assert_eq!(only_status["completed"], false);
}

#[tokio::test]
async fn null_due_date_clears_while_an_absent_field_does_not() {
    let server = create_server().await;

    let token =
        register_ok(&server, "ada", "ada@example.com", "hunter2").await;
    let workspace_id = only_workspace_id(&server, &token).await;
    let project_id =
        starter_project_id(&server, &token, workspace_id).await;

    let task = post_with_token(
        &server,
        &token,
        "/api/tasks",
        json!({
            "title": "Due soon",
            "project_id": project_id,
            "due_date": "2030-01-01T00:00:00Z",
        }),
    )
    .await
    .json::<Value>();
    let task_path = format!("/api/tasks/{}", task["id"].as_i64().unwrap());
    let tasks_path = format!("/api/tasks?projectId={project_id}");

    put_with_token(&server, &token, &task_path, json!({ "priority": "high" }))
        .await
        .assert_status_ok();

    let tasks =
        get_with_token(&server, &token, &tasks_path).await.json::<Value>();
    assert!(tasks[0]["due_date"].is_string());
    assert_eq!(tasks[0]["priority"], "high");

    put_with_token(&server, &token, &task_path, json!({ "due_date": null }))
        .await
        .assert_status_ok();

    let tasks =
        get_with_token(&server, &token, &tasks_path).await.json::<Value>();
    assert_eq!(tasks[0]["due_date"], Value::Null);
}

#[tokio::test]
async fn dashboard_totals_are_additive_across_status_buckets() {
    let server = create_server().await;

    let token =
        register_ok(&server, "ada", "ada@example.com", "hunter2").await;
    let workspace_id = only_workspace_id(&server, &token).await;
    let project_id =
        starter_project_id(&server, &token, workspace_id).await;

    for (title, status, priority) in [
        ("first", "todo", Some("low")),
        ("second", "todo", None),
        ("third", "in_progress", Some("high")),
        ("fourth", "done", None),
        ("fifth", "review", None),
    ] {
        let mut body = json!({
            "title": title,
            "project_id": project_id,
            "status": status,
        });
        if let Some(priority) = priority {
            body["priority"] = json!(priority);
        }

        post_with_token(&server, &token, "/api/tasks", body)
            .await
            .assert_status_ok();
    }

    let summary = dashboard(&server, &token).await;

    assert_eq!(summary["totalTasks"], 5);
    assert_eq!(summary["completedTasks"], 1);
    assert_eq!(summary["inProgressTasks"], 1);
    assert_eq!(summary["totalProjects"], 1);
    assert_eq!(summary["totalWorkspaces"], 1);

    let by_status_total: i64 = summary["tasksByStatus"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["count"].as_i64().unwrap())
        .sum();
    assert_eq!(by_status_total, summary["totalTasks"].as_i64().unwrap());

    let by_priority = summary["tasksByPriority"].as_array().unwrap();
    let priority_count = |name: &str| {
        by_priority
            .iter()
            .find(|entry| entry["priority"] == name)
            .map(|entry| entry["count"].as_i64().unwrap())
            .unwrap_or(0)
    };
    assert_eq!(priority_count("low"), 1);
    assert_eq!(priority_count("medium"), 3);
    assert_eq!(priority_count("high"), 1);
}

#[tokio::test]
async fn overdue_tasks_drop_out_once_done() {
    let server = create_server().await;

    let token =
        register_ok(&server, "ada", "ada@example.com", "hunter2").await;
    let workspace_id = only_workspace_id(&server, &token).await;
    let project_id =
        starter_project_id(&server, &token, workspace_id).await;

    let task = post_with_token(
        &server,
        &token,
        "/api/tasks",
        json!({
            "title": "Late already",
            "project_id": project_id,
            "due_date": "2020-01-01T00:00:00Z",
        }),
    )
    .await
    .json::<Value>();

    let summary = dashboard(&server, &token).await;
    assert_eq!(summary["overdueTasks"], 1);

    put_with_token(
        &server,
        &token,
        &format!("/api/tasks/{}", task["id"].as_i64().unwrap()),
        json!({ "status": "done" }),
    )
    .await
    .assert_status_ok();

    let summary = dashboard(&server, &token).await;
    assert_eq!(summary["overdueTasks"], 0);
}

#[tokio::test]
async fn dashboard_is_all_zero_without_memberships() {
    let server = create_server().await;

    let token =
        register_ok(&server, "ada", "ada@example.com", "hunter2").await;
    let workspace_id = only_workspace_id(&server, &token).await;

    delete_with_token(
        &server,
        &token,
        &format!("/api/workspaces/{workspace_id}"),
    )
    .await
    .assert_status_ok();

    let workspaces = get_with_token(&server, &token, "/api/workspaces")
        .await
        .json::<Value>();
    assert_eq!(workspaces.as_array().unwrap().len(), 0);

    let summary = dashboard(&server, &token).await;
    assert_eq!(summary["totalTasks"], 0);
    assert_eq!(summary["totalProjects"], 0);
    assert_eq!(summary["totalWorkspaces"], 0);
    assert_eq!(summary["tasksByStatus"].as_array().unwrap().len(), 0);
    assert_eq!(summary["tasksByPriority"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn task_listing_without_project_is_scoped_to_the_caller() {
    let server = create_server().await;

    let ada_token =
        register_ok(&server, "ada", "ada@example.com", "hunter2").await;
    let grace_token =
        register_ok(&server, "grace", "grace@example.com", "hunter2").await;

    let ada_workspace = only_workspace_id(&server, &ada_token).await;
    let ada_project =
        starter_project_id(&server, &ada_token, ada_workspace).await;

    post_with_token(
        &server,
        &ada_token,
        "/api/tasks",
        json!({ "title": "Ada's task", "project_id": ada_project }),
    )
    .await
    .assert_status_ok();

    let ada_tasks = get_with_token(&server, &ada_token, "/api/tasks")
        .await
        .json::<Value>();
    assert_eq!(ada_tasks.as_array().unwrap().len(), 1);

    let grace_tasks = get_with_token(&server, &grace_token, "/api/tasks")
        .await
        .json::<Value>();
    assert_eq!(grace_tasks.as_array().unwrap().len(), 0);

    // Nor can outsiders read the project's tasks directly.
    let foreign = get_with_token(
        &server,
        &grace_token,
        &format!("/api/tasks?projectId={ada_project}"),
    )
    .await;
    foreign.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn bearer_routes_reject_missing_tokens_instead_of_falling_back() {
    let server = create_server().await;

    register_ok(&server, "ada", "ada@example.com", "hunter2").await;

    for path in [
        "/api/workspaces",
        "/api/tasks",
        "/api/analytics/dashboard",
    ] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    let create = server
        .post("/api/workspaces")
        .json(&json!({ "name": "No token" }))
        .await;
    create.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn workspace_deletion_cascades_to_projects_and_tasks() {
    let server = create_server().await;

    let token =
        register_ok(&server, "ada", "ada@example.com", "hunter2").await;

    let created = post_with_token(
        &server,
        &token,
        "/api/workspaces",
        json!({ "name": "Side project", "description": "scratch" }),
    )
    .await;
    created.assert_status_ok();
    let created = created.json::<Value>();
    assert_eq!(created["role"], "owner");
    let side_workspace = created["id"].as_i64().unwrap();

    let project = post_with_token(
        &server,
        &token,
        "/api/projects",
        json!({ "name": "Experiments", "workspaceId": side_workspace }),
    )
    .await
    .json::<Value>();
    assert_eq!(project["color"], "#3B82F6");
    let project_id = project["id"].as_i64().unwrap();

    post_with_token(
        &server,
        &token,
        "/api/tasks",
        json!({ "title": "Throwaway", "project_id": project_id }),
    )
    .await
    .assert_status_ok();

    let summary = dashboard(&server, &token).await;
    assert_eq!(summary["totalTasks"], 1);
    assert_eq!(summary["totalProjects"], 2);
    assert_eq!(summary["totalWorkspaces"], 2);

    delete_with_token(
        &server,
        &token,
        &format!("/api/workspaces/{side_workspace}"),
    )
    .await
    .assert_status_ok();

    let summary = dashboard(&server, &token).await;
    assert_eq!(summary["totalTasks"], 0);
    assert_eq!(summary["totalProjects"], 1);
    assert_eq!(summary["totalWorkspaces"], 1);
}

#[tokio::test]
async fn openapi_document_is_served_in_both_formats() {
    let server = create_server().await;

    let as_json = server.get("/openapi/json").await;
    as_json.assert_status_ok();
    let doc = as_json.json::<Value>();
    assert!(doc["paths"].get("/api/auth/register").is_some());

    let as_yaml = server.get("/openapi/yaml").await;
    as_yaml.assert_status_ok();
    as_yaml.assert_header("Content-Type", "application/yaml");
}
