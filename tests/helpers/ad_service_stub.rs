//! In-process stand-in for the ad listing service.
//!
//! Serves the three contract routes from memory on an ephemeral loopback
//! port. [`StubBehavior`] selects deliberate deviations so tests can check
//! that the oracle notices them.

use std::net::TcpListener as StdTcpListener;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};
use tokio::runtime::Builder;
use tokio::sync::oneshot;

const MARKER: &str = "Сохранили объявление - ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubBehavior {
    /// Validates every field and answers exactly per contract.
    Conforming,
    /// Stores whatever it is sent, never answers 400.
    AcceptEverything,
    /// Conforming, but the create status uses a different success text.
    RenamedMarker,
    /// GET by id answers with a different ad name than was stored.
    WrongLookupBody,
    /// GET by id answers with the stored ad twice.
    DuplicateLookup,
    /// GET by id stamps a per-read counter, so no two reads match.
    FlakyRead,
    /// GET by seller ignores the seller and answers with every stored ad.
    LeakySellerIndex,
    /// 500 for a malformed ad id, 200 with `[]` for a malformed seller id.
    ServerErrorOnMalformed,
}

#[derive(Clone)]
struct StubState {
    behavior: StubBehavior,
    ads: Arc<Mutex<Vec<Value>>>,
    created_sellers: Arc<Mutex<Vec<Value>>>,
    reads: Arc<AtomicU64>,
}

pub struct AdServiceStub {
    base_url: String,
    ads: Arc<Mutex<Vec<Value>>>,
    created_sellers: Arc<Mutex<Vec<Value>>>,
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<thread::JoinHandle<()>>,
}

impl AdServiceStub {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `sellerId` of every body the stub accepted, in arrival order.
    pub fn created_sellers(&self) -> Vec<Value> {
        self.created_sellers
            .lock()
            .map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    pub fn stored_ads(&self) -> usize {
        self.ads.lock().map_or(0, |ads| ads.len())
    }
}

impl Drop for AdServiceStub {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

pub fn spawn_ad_service(behavior: StubBehavior) -> Result<AdServiceStub, String> {
    let listener = StdTcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("ad service stub bind failed: {err}"))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("ad service stub nonblocking failed: {err}"))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("ad service stub local addr failed: {err}"))?;
    let base_url = format!("http://{addr}/api/1");

    let ads = Arc::new(Mutex::new(Vec::new()));
    let created_sellers = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        behavior,
        ads: Arc::clone(&ads),
        created_sellers: Arc::clone(&created_sellers),
        reads: Arc::new(AtomicU64::new(0)),
    };
    let routes = Router::new()
        .route("/item", post(create_item))
        .route("/item/{id}", get(item_by_id))
        .route("/{seller_id}/item", get(items_by_seller))
        .with_state(state);
    let app = Router::new().nest("/api/1", routes);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let join = thread::spawn(move || {
        let Ok(runtime) = Builder::new_current_thread().enable_all().build() else {
            return;
        };
        runtime.block_on(async move {
            let Ok(listener) = tokio::net::TcpListener::from_std(listener) else {
                return;
            };
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });
    });

    Ok(AdServiceStub {
        base_url,
        ads,
        created_sellers,
        shutdown: Some(shutdown_tx),
        join: Some(join),
    })
}

async fn create_item(State(state): State<StubState>, bytes: Bytes) -> Response {
    let Ok(body) = serde_json::from_slice::<Value>(&bytes) else {
        return bad_request("body is not JSON");
    };
    if state.behavior != StubBehavior::AcceptEverything {
        if let Err(reason) = validate(&body) {
            return bad_request(&reason);
        }
    }

    let Ok(mut ads) = state.ads.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    let n = ads.len() as u64 + 1;
    let id = format!("{n:08x}-0000-4000-8000-{n:012x}");
    let mut record = body.clone();
    if let Value::Object(fields) = &mut record {
        fields.insert("id".into(), json!(id));
        fields.insert("createdAt".into(), json!("2024-01-01 00:00:00 +0300 +0300"));
    }
    ads.push(record);
    if let Ok(mut sellers) = state.created_sellers.lock() {
        sellers.push(body["sellerId"].clone());
    }

    let status = match state.behavior {
        StubBehavior::RenamedMarker => format!("Saved ad - {id}"),
        _ => format!("{MARKER}{id}"),
    };
    (StatusCode::OK, axum::Json(json!({ "status": status }))).into_response()
}

async fn item_by_id(State(state): State<StubState>, Path(id): Path<String>) -> Response {
    if !looks_like_ad_id(&id) {
        return match state.behavior {
            StubBehavior::ServerErrorOnMalformed => {
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            _ => not_found(),
        };
    }
    let Ok(ads) = state.ads.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    let mut found: Vec<Value> = ads.iter().filter(|ad| ad["id"] == json!(id)).cloned().collect();
    if found.is_empty() {
        return not_found();
    }
    match state.behavior {
        StubBehavior::WrongLookupBody => {
            for ad in &mut found {
                ad["name"] = json!("Чайник");
            }
        }
        StubBehavior::DuplicateLookup => {
            let copy = found.clone();
            found.extend(copy);
        }
        StubBehavior::FlakyRead => {
            let read = state.reads.fetch_add(1, Ordering::SeqCst);
            for ad in &mut found {
                ad["readCount"] = json!(read);
            }
        }
        _ => {}
    }
    (StatusCode::OK, axum::Json(Value::Array(found))).into_response()
}

async fn items_by_seller(State(state): State<StubState>, Path(seller_id): Path<String>) -> Response {
    let Ok(seller_id) = seller_id.parse::<i64>() else {
        return match state.behavior {
            StubBehavior::ServerErrorOnMalformed => {
                (StatusCode::OK, axum::Json(json!([]))).into_response()
            }
            _ => not_found(),
        };
    };
    let Ok(ads) = state.ads.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    let leaky = state.behavior == StubBehavior::LeakySellerIndex;
    let found: Vec<Value> = ads
        .iter()
        .filter(|ad| leaky || ad["sellerId"].as_i64() == Some(seller_id))
        .cloned()
        .collect();
    (StatusCode::OK, axum::Json(Value::Array(found))).into_response()
}

fn validate(body: &Value) -> Result<(), String> {
    match body["name"].as_str() {
        Some(name) if !name.is_empty() => {}
        _ => return Err("name must be a non-empty string".into()),
    }
    match body["price"].as_f64() {
        Some(price) if price >= 0.0 => {}
        _ => return Err("price must be a non-negative number".into()),
    }
    match body["sellerId"].as_i64() {
        Some(id) if (111_111..=999_999).contains(&id) => {}
        _ => return Err("sellerId must be an integer in 111111..=999999".into()),
    }
    if !body["statistics"].is_object() {
        return Err("statistics must be an object".into());
    }
    for key in ["contacts", "like", "viewCount"] {
        match body["statistics"][key].as_i64() {
            Some(value) if value >= 0 => {}
            _ => return Err(format!("statistics.{key} must be a non-negative integer")),
        }
    }
    Ok(())
}

fn looks_like_ad_id(id: &str) -> bool {
    id.len() == 36 && id.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
}

fn bad_request(reason: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({ "result": { "message": reason }, "status": "400" })),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        axum::Json(json!({ "result": { "message": "not found" }, "status": "404" })),
    )
        .into_response()
}
