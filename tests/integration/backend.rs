//! In-process account API for end-to-end tests.
//!
//! One account: phone 9876543210 / email avi@farm.in, password secret1.
//! Login issues access token `A` and refresh token `R`; refreshing `R`
//! issues `A2`.

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex, OnceLock};

type Reply = (StatusCode, Json<Value>);

/// Shared runtime for every backend in this test binary
static RT: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

fn runtime() -> &'static tokio::runtime::Runtime {
    RT.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("Failed to create runtime")
    })
}

/// A request as the backend decoded it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: Value,
}

#[derive(Clone)]
struct Account {
    requests: Arc<Mutex<Vec<Recorded>>>,
    profile: Arc<Mutex<Value>>,
}

impl Account {
    fn record(&self, method: &Method, uri: &Uri, body: Value) {
        self.requests.lock().unwrap().push(Recorded {
            method: method.to_string(),
            path: uri.path().to_string(),
            body,
        });
    }
}

pub struct Backend {
    port: u16,
    account: Account,
}

impl Backend {
    pub fn start() -> Self {
        let account = Account {
            requests: Arc::new(Mutex::new(Vec::new())),
            profile: Arc::new(Mutex::new(json!({
                "firstName": "Avi",
                "lastName": "Rao",
                "email": "avi@farm.in",
                "location": "Pune",
                "profileImage": "",
            }))),
        };

        let app = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/token/refresh", post(refresh))
            .route("/auth/signup", post(signup))
            .route("/auth/forgot-password", post(acknowledge))
            .route("/auth/reset-password", post(acknowledge))
            .route("/auth/me", get(me).put(update_me).delete(delete_me))
            .with_state(account.clone());

        let listener = runtime()
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .expect("Failed to bind to random port");
        let port = listener.local_addr().expect("Failed to get local address").port();

        runtime().spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { port, account }
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Requests seen so far, oldest first
    pub fn requests(&self) -> Vec<Recorded> {
        self.account.requests.lock().unwrap().clone()
    }

    /// Requests to one method and path
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

fn error(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "error": message })))
}

fn signed_in(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "Bearer A" || v == "Bearer A2")
}

async fn login(
    State(account): State<Account>,
    method: Method,
    uri: Uri,
    Json(body): Json<Value>,
) -> Reply {
    account.record(&method, &uri, body.clone());

    let known = body["phone"] == "9876543210" || body["email"] == "avi@farm.in";
    if known && body["password"] == "secret1" {
        (
            StatusCode::OK,
            Json(json!({
                "accessToken": "A",
                "refreshToken": "R",
                "user": { "firstName": "Avi" },
            })),
        )
    } else {
        error(StatusCode::UNAUTHORIZED, "Invalid credentials")
    }
}

async fn refresh(
    State(account): State<Account>,
    method: Method,
    uri: Uri,
    Json(body): Json<Value>,
) -> Reply {
    account.record(&method, &uri, body.clone());

    if body["refreshToken"] == "R" {
        (StatusCode::OK, Json(json!({ "accessToken": "A2" })))
    } else {
        error(StatusCode::UNAUTHORIZED, "Invalid refresh token")
    }
}

async fn signup(
    State(account): State<Account>,
    method: Method,
    uri: Uri,
    Json(body): Json<Value>,
) -> Reply {
    account.record(&method, &uri, body);
    (StatusCode::CREATED, Json(json!({ "message": "Account created" })))
}

async fn acknowledge(
    State(account): State<Account>,
    method: Method,
    uri: Uri,
    Json(body): Json<Value>,
) -> Reply {
    account.record(&method, &uri, body);
    (StatusCode::OK, Json(json!({ "message": "ok" })))
}

async fn me(State(account): State<Account>, method: Method, uri: Uri, headers: HeaderMap) -> Reply {
    account.record(&method, &uri, Value::Null);

    if !signed_in(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let profile = account.profile.lock().unwrap().clone();
    (StatusCode::OK, Json(profile))
}

async fn update_me(
    State(account): State<Account>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    account.record(&method, &uri, body.clone());

    if !signed_in(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    let mut profile = account.profile.lock().unwrap();
    for key in ["firstName", "lastName", "email", "location"] {
        if let Some(value) = body.get(key) {
            profile[key] = value.clone();
        }
    }
    if let Some(picture) = body.get("profilePicture") {
        profile["profileImage"] = picture.clone();
    }
    (StatusCode::OK, Json(profile.clone()))
}

async fn delete_me(
    State(account): State<Account>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    account.record(&method, &uri, body.clone());

    if !signed_in(&headers) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    if body["phone"] != "9876543210" {
        return error(StatusCode::BAD_REQUEST, "Phone number does not match");
    }
    (StatusCode::OK, Json(json!({ "message": "Account deleted" })))
}
