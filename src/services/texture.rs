//! Texture retrieval completion: transcode the decoder's raw pixels to PNG,
//! cache the file locally, optionally archive it to an object store, and
//! report the outcome as an `ImageDownloaded` envelope.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, Mutex as AssetLock};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::TextureConfig;
use crate::domains::envelope::Envelope;
use crate::domains::texture::{RawImage, TextureJob, TextureStage, TextureStatus};
use crate::error::{RelayError, Result};
use crate::interfaces::storage::ObjectStore;
use crate::services::normalize::{image_download_failed, image_downloaded};
use crate::services::queue::Subscriber;

pub const PNG_CONTENT_TYPE: &str = "image/png";
const BYTES_PER_PIXEL: usize = 4;

/// Reverses row order in place. Rows are `width * 4` bytes; `height` must be
/// even and the buffer exactly `width * height * 4` bytes long.
pub fn flip_rows(pixels: &mut [u8], width: usize, height: usize) -> Result<()> {
    let row = width * BYTES_PER_PIXEL;
    if pixels.len() != row * height {
        return Err(RelayError::Image(format!(
            "buffer holds {} bytes, expected {}x{}x{}",
            pixels.len(),
            width,
            height,
            BYTES_PER_PIXEL
        )));
    }
    if height % 2 != 0 {
        return Err(RelayError::Image(format!(
            "cannot flip image with odd height {height}"
        )));
    }
    let half = height / 2;
    let (top, bottom) = pixels.split_at_mut(half * row);
    for i in 0..half {
        let mirror = half - 1 - i;
        top[i * row..(i + 1) * row].swap_with_slice(&mut bottom[mirror * row..(mirror + 1) * row]);
    }
    Ok(())
}

/// Swaps bytes 0 and 2 of every 4-byte pixel. A trailing partial pixel is
/// left alone.
pub fn swap_red_blue(pixels: &mut [u8]) {
    for pixel in pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
        pixel.swap(0, 2);
    }
}

pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RelayError::Image(e.to_string()))?;
        writer
            .write_image_data(pixels)
            .map_err(|e| RelayError::Image(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| RelayError::Image(e.to_string()))?;
    }
    Ok(out)
}

/// Validates the decoder output and turns it into top-down RGBA.
fn decode(image: RawImage) -> Result<(Vec<u8>, u32, u32)> {
    let RawImage {
        width,
        height,
        mut data,
    } = image;
    if width == 0 || height == 0 {
        return Err(RelayError::Image(format!(
            "empty image {width}x{height}"
        )));
    }
    flip_rows(&mut data, width as usize, height as usize)?;
    swap_red_blue(&mut data);
    Ok((data, width, height))
}

/// Result of one texture job, before it is turned into an envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureOutcome {
    pub asset_id: Uuid,
    pub stage: TextureStage,
    pub success: bool,
    pub url: Option<String>,
    pub error: Option<String>,
    failed_status: Option<TextureStatus>,
}

impl TextureOutcome {
    fn download_failed(asset_id: Uuid, status: TextureStatus) -> Self {
        Self {
            asset_id,
            stage: TextureStage::Failed,
            success: false,
            url: None,
            error: Some(format!("Image could not be downloaded: {status}")),
            failed_status: Some(status),
        }
    }

    fn transcode_failed(asset_id: Uuid, error: String) -> Self {
        Self {
            asset_id,
            stage: TextureStage::Failed,
            success: false,
            url: None,
            error: Some(error),
            failed_status: None,
        }
    }

    pub fn to_envelope(&self) -> Envelope {
        match self.failed_status {
            Some(status) => image_download_failed(self.asset_id, status),
            None => image_downloaded(
                self.asset_id,
                self.success,
                self.url.as_deref(),
                self.error.as_deref(),
            ),
        }
    }
}

/// Shared texture transcoder. One instance serves every subscriber; the set
/// of archived ids is kept here so an asset is uploaded at most once.
///
/// Jobs for the same asset run one at a time. A cached file whose local URL
/// has been reported is pinned and survives a later successful upload.
pub struct TexturePipeline {
    cache_dir: PathBuf,
    cache_url_root: String,
    store: Option<Arc<dyn ObjectStore>>,
    archived: Mutex<HashSet<Uuid>>,
    pinned: Mutex<HashSet<Uuid>>,
    in_flight: Mutex<HashMap<Uuid, Arc<AssetLock<()>>>>,
}

impl TexturePipeline {
    pub fn new(config: &TextureConfig, store: Option<Arc<dyn ObjectStore>>) -> Self {
        Self {
            cache_dir: PathBuf::from(config.cache_dir()),
            cache_url_root: config.cache_url_root().to_string(),
            store,
            archived: Mutex::new(HashSet::new()),
            pinned: Mutex::new(HashSet::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub fn cache_path(&self, asset_id: Uuid) -> PathBuf {
        self.cache_dir.join(format!("{asset_id}.png"))
    }

    pub fn local_url(&self, asset_id: Uuid) -> String {
        format!("{}/{asset_id}.png", self.cache_url_root)
    }

    /// Remote URL of an asset that has already been archived.
    pub fn archived_url(&self, asset_id: Uuid) -> Option<String> {
        let store = self.store.as_ref()?;
        self.archived
            .lock()
            .contains(&asset_id)
            .then(|| store.public_url(&asset_id.to_string()))
    }

    /// Runs one job to a terminal stage. `None` means the job has not
    /// completed yet and nothing should be reported.
    pub async fn process(&self, job: TextureJob) -> Option<TextureOutcome> {
        let TextureJob {
            asset_id,
            status,
            image,
        } = job;

        if status.is_failure() {
            tracing::warn!(%asset_id, %status, "texture download failed");
            return Some(TextureOutcome::download_failed(asset_id, status));
        }
        if status == TextureStatus::Pending {
            tracing::debug!(%asset_id, "texture still pending");
            return None;
        }

        let lock = self.asset_lock(asset_id);
        let outcome = {
            let _exclusive = lock.lock().await;
            self.transcode_and_store(asset_id, image).await
        };
        self.release_asset_lock(asset_id, lock);
        Some(outcome)
    }

    fn asset_lock(&self, asset_id: Uuid) -> Arc<AssetLock<()>> {
        self.in_flight.lock().entry(asset_id).or_default().clone()
    }

    fn release_asset_lock(&self, asset_id: Uuid, lock: Arc<AssetLock<()>>) {
        let mut in_flight = self.in_flight.lock();
        // Only the map and this job hold it: nobody else is waiting.
        if Arc::strong_count(&lock) == 2 {
            in_flight.remove(&asset_id);
        }
    }

    async fn transcode_and_store(
        &self,
        asset_id: Uuid,
        image: Option<RawImage>,
    ) -> TextureOutcome {
        if let Some(url) = self.archived_url(asset_id) {
            return TextureOutcome {
                asset_id,
                stage: TextureStage::Completed,
                success: true,
                url: Some(url),
                error: None,
                failed_status: None,
            };
        }

        let Some(image) = image else {
            return TextureOutcome::transcode_failed(
                asset_id,
                "Texture transcoding failed: no image data".to_string(),
            );
        };

        let path = self.cache_path(asset_id);
        let blocking_path = path.clone();
        let transcoded =
            tokio::task::spawn_blocking(move || transcode(asset_id, image, &blocking_path)).await;
        let encoded = match transcoded {
            Ok(Ok(encoded)) => encoded,
            Ok(Err(err)) => {
                tracing::warn!(%asset_id, error = %err, "texture transcoding failed");
                return TextureOutcome::transcode_failed(
                    asset_id,
                    format!("Texture transcoding failed: {err}"),
                );
            }
            Err(err) => {
                tracing::warn!(%asset_id, error = %err, "texture transcoding aborted");
                return TextureOutcome::transcode_failed(
                    asset_id,
                    format!("Texture transcoding aborted: {err}"),
                );
            }
        };

        let Some(store) = &self.store else {
            return self.completed_locally(asset_id, None);
        };

        tracing::debug!(%asset_id, stage = ?TextureStage::Archiving, "archiving texture");
        let key = asset_id.to_string();
        match store.put_public(&key, encoded, PNG_CONTENT_TYPE).await {
            Ok(()) => {
                self.archived.lock().insert(asset_id);
                if !self.pinned.lock().contains(&asset_id) {
                    if let Err(err) = tokio::fs::remove_file(&path).await {
                        tracing::warn!(%asset_id, error = %err, "could not remove cached texture");
                    }
                }
                TextureOutcome {
                    asset_id,
                    stage: TextureStage::Completed,
                    success: true,
                    url: Some(store.public_url(&key)),
                    error: None,
                    failed_status: None,
                }
            }
            Err(err) => {
                tracing::warn!(%asset_id, error = %err, "texture archival failed");
                // The local URL is handed out below; keep the file behind it.
                self.pinned.lock().insert(asset_id);
                self.completed_locally(asset_id, Some(format!("Texture archival failed: {err}")))
            }
        }
    }

    fn completed_locally(&self, asset_id: Uuid, error: Option<String>) -> TextureOutcome {
        TextureOutcome {
            asset_id,
            stage: TextureStage::Completed,
            success: error.is_none(),
            url: Some(self.local_url(asset_id)),
            error,
            failed_status: None,
        }
    }
}

fn transcode(asset_id: Uuid, image: RawImage, path: &Path) -> Result<Vec<u8>> {
    tracing::debug!(%asset_id, stage = ?TextureStage::Decoding, "transcoding texture");
    let (pixels, width, height) = decode(image)?;
    tracing::debug!(%asset_id, stage = ?TextureStage::Encoding, width, height, "encoding texture");
    let encoded = encode_png(&pixels, width, height)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| RelayError::Storage(e.to_string()))?;
    }
    std::fs::write(path, &encoded).map_err(|e| RelayError::Storage(e.to_string()))?;
    tracing::debug!(%asset_id, stage = ?TextureStage::Persisted, path = %path.display(), "texture cached");
    Ok(encoded)
}

/// Handle for submitting jobs to a subscriber's texture worker.
#[derive(Clone)]
pub struct TextureQueue {
    jobs: mpsc::UnboundedSender<TextureJob>,
}

impl TextureQueue {
    /// Starts a worker that runs jobs through `pipeline` one at a time and
    /// records each outcome on `subscriber`. The worker stops once every
    /// handle has been dropped.
    pub fn spawn(
        pipeline: Arc<TexturePipeline>,
        subscriber: Arc<Subscriber>,
    ) -> (Self, JoinHandle<()>) {
        let (jobs, mut receiver) = mpsc::unbounded_channel::<TextureJob>();
        let worker = tokio::spawn(async move {
            while let Some(job) = receiver.recv().await {
                if let Some(outcome) = pipeline.process(job).await {
                    subscriber.record(outcome.to_envelope());
                }
            }
        });
        (Self { jobs }, worker)
    }

    pub fn submit(&self, job: TextureJob) {
        let asset_id = job.asset_id;
        if self.jobs.send(job).is_err() {
            tracing::warn!(%asset_id, "texture worker has stopped; dropping job");
        }
    }
}
