//! In-process HTTP mock of the lost & found backend.
//!
//! Implements the REST surface the client consumes (auth with role
//! checking, items with approve/delete moderation, flat per-report
//! comments, multipart submission, `/uploads` lookup) over in-memory
//! state, so integration tests can drive the real binary end to end
//! without a deployed backend.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tokio::sync::oneshot;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct UserRecord {
    id: String,
    name: String,
    email: String,
    password: String,
    role: String,
}

#[derive(Debug, Clone)]
struct ReportRecord {
    id: String,
    title: String,
    description: String,
    image: Option<String>,
    status: String,
    created_by: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct CommentRecord {
    id: String,
    report_id: String,
    parent_comment_id: Option<String>,
    content: String,
    user_id: String,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct CampusState {
    users: Vec<UserRecord>,
    tokens: HashMap<String, String>,
    reports: Vec<ReportRecord>,
    comments: Vec<CommentRecord>,
    uploads: HashMap<String, Vec<u8>>,
}

type Shared = Arc<Mutex<CampusState>>;

/// A running mock backend bound to an ephemeral localhost port.
///
/// The server lives on a background thread with its own tokio runtime and
/// shuts down gracefully on drop.
pub struct MockCampus {
    addr: SocketAddr,
    state: Shared,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl MockCampus {
    pub fn spawn() -> Self {
        let state: Shared = Arc::new(Mutex::new(CampusState::default()));
        let router_state = state.clone();

        let (addr_tx, addr_rx) = std::sync::mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = std::thread::Builder::new()
            .name("mock-campus".to_string())
            .spawn(move || {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .expect("Failed to build mock server runtime");

                runtime.block_on(async move {
                    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                        .await
                        .expect("Failed to bind mock server");
                    addr_tx
                        .send(listener.local_addr().expect("Missing local addr"))
                        .expect("Failed to report mock server addr");

                    axum::serve(listener, router(router_state))
                        .with_graceful_shutdown(async move {
                            let _ = shutdown_rx.await;
                        })
                        .await
                        .expect("Mock server failed");
                });
            })
            .expect("Failed to spawn mock server thread");

        let addr = addr_rx.recv().expect("Mock server never came up");

        Self {
            addr,
            state,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// Base origin, e.g. `http://127.0.0.1:49152`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn lock(&self) -> MutexGuard<'_, CampusState> {
        self.state.lock().expect("Mock state poisoned")
    }

    /// Register an account directly in state; returns the user id.
    pub fn seed_user(&self, name: &str, email: &str, password: &str, role: &str) -> String {
        let id = format!("u-{}", Uuid::new_v4());
        self.lock().users.push(UserRecord {
            id: id.clone(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        });
        id
    }

    /// Insert a report directly in state; returns the report id.
    pub fn seed_report(&self, title: &str, description: &str, status: &str, owner_id: &str) -> String {
        let id = format!("r-{}", Uuid::new_v4());
        self.lock().reports.push(ReportRecord {
            id: id.clone(),
            title: title.to_string(),
            description: description.to_string(),
            image: None,
            status: status.to_string(),
            created_by: owner_id.to_string(),
            created_at: Utc::now(),
        });
        id
    }

    /// Insert a comment directly in state; returns the comment id.
    pub fn seed_comment(
        &self,
        report_id: &str,
        parent_comment_id: Option<&str>,
        content: &str,
        user_id: &str,
    ) -> String {
        let id = format!("c-{}", Uuid::new_v4());
        self.lock().comments.push(CommentRecord {
            id: id.clone(),
            report_id: report_id.to_string(),
            parent_comment_id: parent_comment_id.map(String::from),
            content: content.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
        });
        id
    }

    pub fn report_count(&self) -> usize {
        self.lock().reports.len()
    }

    pub fn comment_count(&self, report_id: &str) -> usize {
        self.lock()
            .comments
            .iter()
            .filter(|c| c.report_id == report_id)
            .count()
    }

    pub fn report_status(&self, report_id: &str) -> Option<String> {
        self.lock()
            .reports
            .iter()
            .find(|r| r.id == report_id)
            .map(|r| r.status.clone())
    }
}

impl Drop for MockCampus {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/items", get(list_items).post(submit_item))
        .route("/api/items/approved", get(list_approved))
        .route("/api/items/{id}", put(approve_item).delete(delete_item))
        .route("/api/comments/{report_id}", get(list_comments))
        .route("/api/comments", post(post_comment))
        .route("/uploads/{filename}", get(serve_upload))
        .with_state(state)
}

fn message(status: StatusCode, text: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": text })))
}

/// Resolve the bearer token to a user, or fail with 401.
fn authenticate(
    state: &CampusState,
    headers: &HeaderMap,
) -> Result<UserRecord, (StatusCode, Json<Value>)> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| message(StatusCode::UNAUTHORIZED, "Missing token"))?;

    let user_id = state
        .tokens
        .get(token)
        .ok_or_else(|| message(StatusCode::UNAUTHORIZED, "Invalid token"))?;

    state
        .users
        .iter()
        .find(|u| &u.id == user_id)
        .cloned()
        .ok_or_else(|| message(StatusCode::UNAUTHORIZED, "Unknown user"))
}

fn require_admin(user: &UserRecord) -> Result<(), (StatusCode, Json<Value>)> {
    if user.role == "admin" {
        Ok(())
    } else {
        Err(message(StatusCode::FORBIDDEN, "Admin access required"))
    }
}

fn report_json(state: &CampusState, report: &ReportRecord) -> Value {
    let created_by = match state.users.iter().find(|u| u.id == report.created_by) {
        Some(user) => json!({ "_id": user.id, "email": user.email }),
        None => json!(report.created_by),
    };
    json!({
        "_id": report.id,
        "title": report.title,
        "description": report.description,
        "image": report.image,
        "status": report.status,
        "createdBy": created_by,
        "createdAt": report.created_at.to_rfc3339(),
    })
}

fn comment_json(state: &CampusState, comment: &CommentRecord) -> Value {
    let author = state
        .users
        .iter()
        .find(|u| u.id == comment.user_id)
        .map(|user| json!({ "_id": user.id, "email": user.email, "role": user.role }))
        .unwrap_or_else(|| {
            json!({ "_id": comment.user_id, "email": "unknown@campus.edu", "role": "student" })
        });
    json!({
        "_id": comment.id,
        "reportId": comment.report_id,
        "parentCommentId": comment.parent_comment_id,
        "content": comment.content,
        "userId": author,
        "createdAt": comment.created_at.to_rfc3339(),
    })
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> impl IntoResponse {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();
    let role = body["role"].as_str().unwrap_or("student").to_string();

    let mut state = state.lock().expect("Mock state poisoned");
    let user = state
        .users
        .iter()
        .find(|u| u.email == email && u.password == password)
        .cloned();

    let Some(user) = user else {
        return message(StatusCode::UNAUTHORIZED, "Invalid credentials");
    };

    // Presenting the wrong role is a hard 401, not a downgrade.
    if user.role != role {
        return message(StatusCode::UNAUTHORIZED, "Role mismatch");
    }

    let token = format!("tok-{}", Uuid::new_v4());
    state.tokens.insert(token.clone(), user.id.clone());

    (
        StatusCode::OK,
        Json(json!({
            "token": token,
            "user": { "_id": user.id, "email": user.email, "role": user.role },
        })),
    )
}

async fn register(State(state): State<Shared>, Json(body): Json<Value>) -> impl IntoResponse {
    let name = body["name"].as_str().unwrap_or_default().to_string();
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();
    let role = body["role"].as_str().unwrap_or("student").to_string();

    let mut state = state.lock().expect("Mock state poisoned");
    if state.users.iter().any(|u| u.email == email) {
        return message(StatusCode::CONFLICT, "Email already registered");
    }

    state.users.push(UserRecord {
        id: format!("u-{}", Uuid::new_v4()),
        name,
        email,
        password,
        role,
    });

    message(StatusCode::CREATED, "Account created")
}

async fn list_items(State(state): State<Shared>, headers: HeaderMap) -> impl IntoResponse {
    let state = state.lock().expect("Mock state poisoned");
    let user = match authenticate(&state, &headers) {
        Ok(user) => user,
        Err(err) => return err,
    };
    if let Err(err) = require_admin(&user) {
        return err;
    }

    let items: Vec<Value> = state
        .reports
        .iter()
        .map(|r| report_json(&state, r))
        .collect();
    (StatusCode::OK, Json(Value::Array(items)))
}

async fn list_approved(State(state): State<Shared>, headers: HeaderMap) -> impl IntoResponse {
    let state = state.lock().expect("Mock state poisoned");
    if let Err(err) = authenticate(&state, &headers) {
        return err;
    }

    let items: Vec<Value> = state
        .reports
        .iter()
        .filter(|r| r.status == "approved")
        .map(|r| report_json(&state, r))
        .collect();
    (StatusCode::OK, Json(Value::Array(items)))
}

async fn submit_item(
    State(state): State<Shared>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let user = {
        let state = state.lock().expect("Mock state poisoned");
        match authenticate(&state, &headers) {
            Ok(user) => user,
            Err(err) => return err,
        }
    };

    let mut title = String::new();
    let mut description = String::new();
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name().unwrap_or_default() {
            "title" => title = field.text().await.unwrap_or_default(),
            "description" => description = field.text().await.unwrap_or_default(),
            "image" => {
                let filename = field
                    .file_name()
                    .map(String::from)
                    .unwrap_or_else(|| "upload.bin".to_string());
                let bytes = field.bytes().await.unwrap_or_default().to_vec();
                image = Some((filename, bytes));
            }
            _ => {}
        }
    }

    if title.is_empty() || description.is_empty() {
        return message(StatusCode::BAD_REQUEST, "Title and description are required");
    }

    let mut state = state.lock().expect("Mock state poisoned");
    let image_name = image.map(|(filename, bytes)| {
        let stored = format!("{}-{}", Uuid::new_v4(), filename);
        state.uploads.insert(stored.clone(), bytes);
        stored
    });

    let report = ReportRecord {
        id: format!("r-{}", Uuid::new_v4()),
        title,
        description,
        image: image_name,
        status: "pending".to_string(),
        created_by: user.id,
        created_at: Utc::now(),
    };
    state.reports.push(report.clone());

    (StatusCode::CREATED, Json(report_json(&state, &report)))
}

async fn approve_item(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut state = state.lock().expect("Mock state poisoned");
    let user = match authenticate(&state, &headers) {
        Ok(user) => user,
        Err(err) => return err,
    };
    if let Err(err) = require_admin(&user) {
        return err;
    }

    let Some(report) = state.reports.iter_mut().find(|r| r.id == id) else {
        return message(StatusCode::NOT_FOUND, "Report not found");
    };

    // Idempotent: approving twice changes nothing.
    report.status = "approved".to_string();
    let report = report.clone();
    (StatusCode::OK, Json(report_json(&state, &report)))
}

async fn delete_item(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut state = state.lock().expect("Mock state poisoned");
    let user = match authenticate(&state, &headers) {
        Ok(user) => user,
        Err(err) => return err,
    };
    if let Err(err) = require_admin(&user) {
        return err;
    }

    let before = state.reports.len();
    state.reports.retain(|r| r.id != id);
    if state.reports.len() == before {
        return message(StatusCode::NOT_FOUND, "Report not found");
    }
    state.comments.retain(|c| c.report_id != id);

    message(StatusCode::OK, "Report deleted")
}

async fn list_comments(
    State(state): State<Shared>,
    Path(report_id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let state = state.lock().expect("Mock state poisoned");
    if let Err(err) = authenticate(&state, &headers) {
        return err;
    }

    let comments: Vec<Value> = state
        .comments
        .iter()
        .filter(|c| c.report_id == report_id)
        .map(|c| comment_json(&state, c))
        .collect();
    (StatusCode::OK, Json(Value::Array(comments)))
}

async fn post_comment(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let mut state = state.lock().expect("Mock state poisoned");
    let user = match authenticate(&state, &headers) {
        Ok(user) => user,
        Err(err) => return err,
    };

    let report_id = body["reportId"].as_str().unwrap_or_default().to_string();
    let content = body["content"].as_str().unwrap_or_default().to_string();
    let parent_comment_id = body["parentCommentId"].as_str().map(String::from);

    if !state.reports.iter().any(|r| r.id == report_id) {
        return message(StatusCode::NOT_FOUND, "Report not found");
    }
    if content.trim().is_empty() {
        return message(StatusCode::BAD_REQUEST, "Comment content is required");
    }

    let comment = CommentRecord {
        id: format!("c-{}", Uuid::new_v4()),
        report_id,
        parent_comment_id,
        content,
        user_id: user.id,
        created_at: Utc::now(),
    };
    state.comments.push(comment.clone());

    (StatusCode::CREATED, Json(comment_json(&state, &comment)))
}

async fn serve_upload(
    State(state): State<Shared>,
    Path(filename): Path<String>,
) -> impl IntoResponse {
    let state = state.lock().expect("Mock state poisoned");
    match state.uploads.get(&filename) {
        Some(bytes) => (StatusCode::OK, bytes.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
