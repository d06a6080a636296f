use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use tracing::warn;
use trajscan::progress::{Progress, ProgressCallback};

/// Adapts core progress events to an indicatif frame bar on stderr.
///
/// The scan workflow runs a single fixed-length phase with one step per
/// frame, so the bar starts hidden and is only drawn once the frame count
/// arrives with `TaskStart`. Warnings emitted before that point go straight
/// to stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self {
            pb: Arc::new(Mutex::new(ProgressBar::hidden())),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    pb_guard.set_message(name);
                }
                Progress::TaskStart { total_steps } => {
                    pb_guard.set_length(total_steps);
                    pb_guard.set_position(0);
                    pb_guard.set_style(Self::frame_bar_style());
                    pb_guard.set_draw_target(ProgressDrawTarget::stderr());
                }
                Progress::TaskIncrement => {
                    pb_guard.inc(1);
                }
                Progress::TaskFinish => {
                    if let Some(len) = pb_guard.length() {
                        pb_guard.set_position(len);
                    }
                }
                Progress::PhaseFinish => {
                    pb_guard.finish_with_message("Scan complete");
                }
                Progress::Message(msg) => {
                    if pb_guard.is_hidden() {
                        eprintln!("{}", msg);
                    } else {
                        pb_guard.println(format!("  {}", msg));
                    }
                }
            }
        })
    }

    fn frame_bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<20} [{bar:40.cyan/blue}] {pos}/{len} frames")
            .expect("Failed to create frame bar style template")
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
