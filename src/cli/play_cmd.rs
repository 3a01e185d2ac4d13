//! Play command handler

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::application::ports::{AudioPlayer, PlaybackError};
use crate::application::PlaybackEngine;
use crate::domain::playback::SoundRequest;

use super::presenter::Presenter;

/// Play one file on the calling thread and report how long it took.
///
/// Blocks until the clip finished, so run it off the async executor.
pub fn handle_play(
    player: Arc<dyn AudioPlayer>,
    file: &Path,
    presenter: &Presenter,
) -> Result<(), PlaybackError> {
    let engine = PlaybackEngine::new(player, 1);
    presenter.info(&format!("Playing {}", file.display()));

    let started = Instant::now();
    engine.decode_and_render(SoundRequest::blocking(file))?;

    presenter.success(&format!(
        "Finished after {:.1}s",
        started.elapsed().as_secs_f64()
    ));
    Ok(())
}
