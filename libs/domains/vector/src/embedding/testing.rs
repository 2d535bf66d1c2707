//! In-memory pipeline and loader for exercising the embedding stack without
//! downloading a model.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use super::pipeline::{EmbeddingPipeline, PipelineLoader};
use crate::error::{VectorError, VectorResult};

pub const FAKE_MODEL_ID: &str = "fake/model";

enum Output {
    Constant(Vec<f32>),
    OneHot(usize),
    Fail(String),
}

/// Pipeline returning canned vectors
pub struct FakePipeline {
    output: Output,
    delays: HashMap<String, Duration>,
    completed: Mutex<Vec<String>>,
}

impl FakePipeline {
    /// Every text embeds to `vector`
    pub fn constant(vector: Vec<f32>) -> Self {
        Self::with_output(Output::Constant(vector))
    }

    /// Each text embeds to a unit vector whose hot index is the byte sum of
    /// the text modulo `dimension`
    pub fn one_hot(dimension: usize) -> Self {
        Self::with_output(Output::OneHot(dimension.max(1)))
    }

    /// Every inference fails with `message`
    pub fn failing(message: &str) -> Self {
        Self::with_output(Output::Fail(message.to_string()))
    }

    fn with_output(output: Output) -> Self {
        Self {
            output,
            delays: HashMap::new(),
            completed: Mutex::new(Vec::new()),
        }
    }

    /// Delay inference of `text` by `delay`
    pub fn with_delay(mut self, text: &str, delay: Duration) -> Self {
        self.delays.insert(text.to_string(), delay);
        self
    }

    /// Texts in the order their inference finished
    pub fn completed(&self) -> Vec<String> {
        self.completed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn one_hot_index(text: &str, dimension: usize) -> usize {
        text.bytes().map(usize::from).sum::<usize>() % dimension.max(1)
    }
}

#[async_trait]
impl EmbeddingPipeline for FakePipeline {
    fn dimension(&self) -> usize {
        match &self.output {
            Output::Constant(vector) => vector.len(),
            Output::OneHot(dimension) => *dimension,
            Output::Fail(_) => 0,
        }
    }

    async fn embed(&self, text: &str) -> VectorResult<Vec<f32>> {
        if let Some(delay) = self.delays.get(text) {
            tokio::time::sleep(*delay).await;
        }

        let result = match &self.output {
            Output::Constant(vector) => Ok(vector.clone()),
            Output::OneHot(dimension) => {
                let mut vector = vec![0.0; *dimension];
                vector[Self::one_hot_index(text, *dimension)] = 1.0;
                Ok(vector)
            }
            Output::Fail(message) => Err(VectorError::Embedding(message.clone())),
        };

        self.completed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
        result
    }
}

/// Loader handing out one shared [`FakePipeline`]
pub struct FakeLoader {
    pipeline: Arc<FakePipeline>,
    load_delay: Duration,
    failures_left: AtomicUsize,
    loads: AtomicUsize,
}

impl FakeLoader {
    pub fn new(pipeline: FakePipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            load_delay: Duration::ZERO,
            failures_left: AtomicUsize::new(0),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    /// Fail the first `n` loads
    pub fn failing_first(self, n: usize) -> Self {
        self.failures_left.store(n, Ordering::SeqCst);
        self
    }

    /// Number of load attempts, failed ones included
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn pipeline(&self) -> Arc<FakePipeline> {
        Arc::clone(&self.pipeline)
    }
}

#[async_trait]
impl PipelineLoader for FakeLoader {
    fn model_id(&self) -> &str {
        FAKE_MODEL_ID
    }

    async fn load(&self) -> VectorResult<Arc<dyn EmbeddingPipeline>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if !self.load_delay.is_zero() {
            tokio::time::sleep(self.load_delay).await;
        }

        let should_fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(VectorError::Embedding(format!(
                "failed to load {}",
                FAKE_MODEL_ID
            )));
        }

        Ok(self.pipeline.clone())
    }
}
