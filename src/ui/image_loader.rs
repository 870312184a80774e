//! Background image picking and decoding.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{EguiContexts, egui};
use futures_lite::future;
use std::path::{Path, PathBuf};

use crate::config::{AppConfig, UpdateLastImagePathRequest};
use crate::view::OverlayBackground;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif", "tif", "tiff"];

/// A decoded image waiting to be uploaded to egui
pub struct DecodedImage {
    pub path: PathBuf,
    pub image: egui::ColorImage,
}

/// State of the "Open image" flow
#[derive(Resource, Default)]
pub struct ImageLoaderState {
    /// Pending async file dialog
    pub pending_pick: Option<Task<Option<PathBuf>>>,
    /// Pending decode of the chosen file
    pub pending_decode: Option<Task<Result<DecodedImage, String>>>,
    /// Last load failure, shown in the side panel
    pub error: Option<String>,
    /// File name of the image currently shown
    pub current_name: Option<String>,
}

impl ImageLoaderState {
    pub fn is_busy(&self) -> bool {
        self.pending_pick.is_some() || self.pending_decode.is_some()
    }

    /// Spawn the async file dialog unless one is already open
    pub fn open_dialog(&mut self) {
        if self.is_busy() {
            return;
        }
        let start_dir = crate::paths::pictures_dir();
        let task_pool = AsyncComputeTaskPool::get();
        self.pending_pick = Some(task_pool.spawn(async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .set_title("Open Image")
                .add_filter("Images", IMAGE_EXTENSIONS);
            if let Some(dir) = start_dir {
                dialog = dialog.set_directory(dir);
            }
            dialog.pick_file().await.map(|h| h.path().to_path_buf())
        }));
    }

    /// Decode `path` off the main thread
    pub fn start_decode(&mut self, path: PathBuf) {
        let task_pool = AsyncComputeTaskPool::get();
        self.pending_decode = Some(task_pool.spawn(async move { decode_image(path) }));
    }
}

/// Read and decode an image file into an egui color image
pub fn decode_image(path: PathBuf) -> Result<DecodedImage, String> {
    let image = image::open(&path)
        .map_err(|e| format!("Could not open {}: {}", display_name(&path), e))?
        .to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    let image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
    Ok(DecodedImage { path, image })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Startup system: reopen the last image if it still exists
pub fn restore_last_image(config: Res<AppConfig>, mut loader: ResMut<ImageLoaderState>) {
    let Some(path) = config.data.last_image_path.clone() else {
        return;
    };
    if path.exists() {
        info!("Reopening last image {:?}", path);
        loader.start_decode(path);
    } else {
        info!("Last opened image no longer exists: {:?}", path);
    }
}

/// Poll the pick and decode tasks; upload finished images as the view background
pub fn poll_image_tasks(
    mut contexts: EguiContexts,
    mut loader: ResMut<ImageLoaderState>,
    mut background: ResMut<OverlayBackground>,
    mut last_image_events: MessageWriter<UpdateLastImagePathRequest>,
) -> Result {
    if let Some(ref mut task) = loader.pending_pick
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        loader.pending_pick = None;
        if let Some(path) = result {
            loader.start_decode(path);
        }
    }

    if let Some(ref mut task) = loader.pending_decode
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        loader.pending_decode = None;
        match result {
            Ok(decoded) => {
                let ctx = contexts.ctx_mut()?;
                let name = display_name(&decoded.path);
                info!(
                    "Loaded image {:?} ({}x{})",
                    decoded.path, decoded.image.size[0], decoded.image.size[1]
                );
                background.texture = Some(ctx.load_texture(
                    "overlay_background",
                    decoded.image,
                    egui::TextureOptions::LINEAR,
                ));
                loader.current_name = Some(name);
                loader.error = None;
                last_image_events.write(UpdateLastImagePathRequest { path: decoded.path });
            }
            Err(e) => {
                warn!("{}", e);
                loader.error = Some(e);
            }
        }
    }

    Ok(())
}
