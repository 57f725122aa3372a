//! Asynchronous photo ingest
//!
//! Each submitted file runs through read, decode, extract, convert and
//! append as an independent task. A file that fails any step is dropped
//! without touching the collection or its siblings. Records are appended
//! in completion order, not submission order.

pub mod observer;
pub mod report;

pub use observer::{DropKind, DropObserver};
pub use report::{DroppedFile, IngestReport};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::collection::PhotoCollection;
use crate::config::{LayeredConfig, DEFAULT_MAX_CONCURRENCY};
use crate::convert::resolve_coordinates;
use crate::error::{PhotomapError, Result};
use crate::formats::{ExifGeotagReader, ImageLoader};
use crate::models::{Coordinates, PhotoRecord, PhotoSource, RawGeotags};
use crate::ports::{GeotagReader, PhotoLoader};

/// Limits applied to every ingest batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngestOptions {
    /// Files processed at the same time
    pub max_concurrency: usize,

    /// Per-file limit, measured from the moment the file starts processing
    pub timeout: Option<Duration>,
}

impl IngestOptions {
    pub fn from_config(config: &LayeredConfig) -> Self {
        Self {
            max_concurrency: config.max_concurrency.value.max(1),
            timeout: config.timeout_secs.value.map(Duration::from_secs),
        }
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout: None,
        }
    }
}

/// What the pipeline sees in a single file, without appending it
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub file_name: String,
    pub mime: String,
    pub size_bytes: usize,
    pub dimensions: Option<(u32, u32)>,
    pub tags: RawGeotags,
    pub coordinates: Option<Coordinates>,
    /// Set when ingest would drop this file
    pub drop_kind: Option<DropKind>,
    pub reason: Option<String>,
}

/// Runs ingest batches into a shared collection
#[derive(Clone)]
pub struct IngestPipeline {
    collection: PhotoCollection,
    loader: Arc<dyn PhotoLoader>,
    reader: Arc<dyn GeotagReader>,
    observer: Option<Arc<dyn DropObserver>>,
    options: IngestOptions,
    cancel: CancellationToken,
}

impl IngestPipeline {
    /// Pipeline with the filesystem loader and EXIF reader
    pub fn new(collection: PhotoCollection) -> Self {
        Self {
            collection,
            loader: Arc::new(ImageLoader::new()),
            reader: Arc::new(ExifGeotagReader),
            observer: None,
            options: IngestOptions::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn from_config(collection: PhotoCollection, config: &LayeredConfig) -> Self {
        Self::new(collection)
            .with_loader(ImageLoader::new().with_verify_decode(config.verify_decode.value))
            .with_options(IngestOptions::from_config(config))
    }

    pub fn with_loader(mut self, loader: impl PhotoLoader + 'static) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    pub fn with_reader(mut self, reader: impl GeotagReader + 'static) -> Self {
        self.reader = Arc::new(reader);
        self
    }

    pub fn with_observer(mut self, observer: impl DropObserver + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    pub fn with_options(mut self, options: IngestOptions) -> Self {
        self.options = IngestOptions {
            max_concurrency: options.max_concurrency.max(1),
            ..options
        };
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that cancels every in-flight file of this pipeline
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn collection(&self) -> &PhotoCollection {
        &self.collection
    }

    pub fn options(&self) -> IngestOptions {
        self.options
    }

    /// Ingest a batch and wait for every file to finish or drop
    pub async fn ingest(&self, sources: Vec<PhotoSource>) -> IngestReport {
        let mut report = IngestReport::new(sources.len());
        if sources.is_empty() {
            return report;
        }

        tracing::info!(
            files = sources.len(),
            max_concurrency = self.options.max_concurrency,
            "Starting ingest batch"
        );

        let semaphore = Arc::new(Semaphore::new(self.options.max_concurrency));
        let mut tasks = JoinSet::new();
        let mut names = HashMap::with_capacity(sources.len());

        for source in sources {
            let file_name = source.file_name();
            let worker = Worker {
                collection: self.collection.clone(),
                loader: Arc::clone(&self.loader),
                reader: Arc::clone(&self.reader),
                timeout: self.options.timeout,
            };
            let semaphore = Arc::clone(&semaphore);
            let cancel = self.cancel.clone();
            let task_name = file_name.clone();

            let handle = tasks.spawn(async move {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(PhotomapError::Cancelled {
                        file_name: file_name.clone(),
                    }),
                    outcome = async {
                        match semaphore.acquire_owned().await {
                            Ok(_permit) => worker.run(source, &file_name).await,
                            Err(_) => Err(PhotomapError::Cancelled {
                                file_name: file_name.clone(),
                            }),
                        }
                    } => outcome,
                }
            });
            names.insert(handle.id(), task_name);
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, Ok(index))) => {
                    names.remove(&id);
                    report.appended += 1;
                    tracing::trace!(index, "Photo appended");
                }
                Ok((id, Err(err))) => {
                    let file_name = names.remove(&id).unwrap_or_default();
                    self.record_drop(&mut report, file_name, &err);
                }
                Err(join_err) => {
                    let file_name = names.remove(&join_err.id()).unwrap_or_default();
                    tracing::error!(file_name = %file_name, error = %join_err, "Ingest task failed");
                    let kind = if self.cancel.is_cancelled() || join_err.is_cancelled() {
                        DropKind::Cancelled
                    } else {
                        DropKind::Decode
                    };
                    self.notify(&mut report, file_name, kind, join_err.to_string());
                }
            }
        }

        tracing::info!(
            submitted = report.submitted,
            appended = report.appended,
            dropped = report.dropped_count(),
            "Ingest batch finished"
        );

        report
    }

    /// Run a batch in the background; the caller may drop the handle
    pub fn spawn(&self, sources: Vec<PhotoSource>) -> JoinHandle<IngestReport> {
        let pipeline = self.clone();
        tokio::spawn(async move { pipeline.ingest(sources).await })
    }

    /// Read, decode and extract one file without appending it
    pub async fn inspect(&self, source: &PhotoSource) -> Result<Inspection> {
        let file_name = source.file_name();
        let data = self.loader.read(source).await?;
        let size_bytes = data.len();
        let decoded = self.loader.decode(&file_name, data).await?;
        let tags = self.reader.read_geotags(&decoded)?;
        let (coordinates, drop_kind, reason) = match resolve_coordinates(&tags, &file_name) {
            Ok(coordinates) => (Some(coordinates), None, None),
            Err(err) => (None, Some(DropKind::from_error(&err)), Some(err.to_string())),
        };

        Ok(Inspection {
            file_name,
            mime: decoded.mime,
            size_bytes,
            dimensions: decoded.dimensions,
            tags,
            coordinates,
            drop_kind,
            reason,
        })
    }

    fn record_drop(&self, report: &mut IngestReport, file_name: String, err: &PhotomapError) {
        let kind = DropKind::from_error(err);
        self.notify(report, file_name, kind, err.to_string());
    }

    fn notify(&self, report: &mut IngestReport, file_name: String, kind: DropKind, reason: String) {
        tracing::debug!(file_name = %file_name, kind = %kind, reason = %reason, "Photo dropped");

        if let Some(observer) = &self.observer {
            observer.on_drop(&file_name, kind);
        }

        report.dropped.push(DroppedFile {
            file_name,
            kind,
            reason,
        });
    }
}

impl std::fmt::Debug for IngestPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestPipeline")
            .field("collection_len", &self.collection.len())
            .field("options", &self.options)
            .field("has_observer", &self.observer.is_some())
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

/// Per-file state moved into each task
struct Worker {
    collection: PhotoCollection,
    loader: Arc<dyn PhotoLoader>,
    reader: Arc<dyn GeotagReader>,
    timeout: Option<Duration>,
}

impl Worker {
    async fn run(self, source: PhotoSource, file_name: &str) -> Result<usize> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.process(source, file_name))
                .await
                .unwrap_or_else(|_| {
                    Err(PhotomapError::TimedOut {
                        file_name: file_name.to_string(),
                        limit,
                    })
                }),
            None => self.process(source, file_name).await,
        }
    }

    async fn process(&self, source: PhotoSource, file_name: &str) -> Result<usize> {
        let data = self.loader.read(&source).await?;
        let decoded = self.loader.decode(file_name, data).await?;
        let tags = self.reader.read_geotags(&decoded)?;
        let coordinates = resolve_coordinates(&tags, file_name)?;

        let record = PhotoRecord {
            image_data: decoded.data,
            mime: decoded.mime,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            file_name: file_name.to_string(),
        };

        Ok(self.collection.append(record))
    }
}
