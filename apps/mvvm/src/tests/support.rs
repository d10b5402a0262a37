//! Scripted `ApiService` for view-model and screen tests.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use client_core::ApiService;
use shared::error::FetchError;
use url::Url;

pub const LEANNE: &str = r#"[{"id":1,"name":"Leanne Graham","email":"Sincere@april.biz"}]"#;
pub const ERVIN: &str = r#"[{"id":2,"name":"Ervin Howell","email":"Shanna@melissa.tv"}]"#;

struct Step {
    delay: Duration,
    response: Result<String, FetchError>,
}

#[derive(Default)]
pub struct ScriptedApi {
    steps: Mutex<VecDeque<Step>>,
    started: AtomicUsize,
    completed: AtomicUsize,
    last_path: Mutex<Option<String>>,
}

impl ScriptedApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(self: &Arc<Self>, body: &str) -> Arc<Self> {
        self.push(Duration::ZERO, Ok(body.to_string()))
    }

    pub fn respond_after(self: &Arc<Self>, delay: Duration, body: &str) -> Arc<Self> {
        self.push(delay, Ok(body.to_string()))
    }

    pub fn fail(self: &Arc<Self>, err: FetchError) -> Arc<Self> {
        self.push(Duration::ZERO, Err(err))
    }

    fn push(self: &Arc<Self>, delay: Duration, response: Result<String, FetchError>) -> Arc<Self> {
        self.steps
            .lock()
            .expect("steps lock")
            .push_back(Step { delay, response });
        Arc::clone(self)
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn last_path(&self) -> Option<String> {
        self.last_path.lock().expect("path lock").clone()
    }
}

#[async_trait]
impl ApiService for ScriptedApi {
    async fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        *self.last_path.lock().expect("path lock") = Some(url.path().to_string());
        let step = self
            .steps
            .lock()
            .expect("steps lock")
            .pop_front()
            .expect("unscripted request");
        tokio::time::sleep(step.delay).await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        step.response.map(String::into_bytes)
    }
}

pub fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("runtime")
}
