use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::geo::GeoPoint;

use super::path::MotionPath;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// One motion run: check cancellation, emit, sleep, repeat.
///
/// Cancellation is observed only between samples, never mid-computation,
/// so a partial sample can never reach the channel. A dropped receiver
/// ends the run early the same way natural termination does.
pub(crate) async fn motion_loop(
    mut path: MotionPath,
    tx: mpsc::Sender<GeoPoint>,
    cancel_token: CancellationToken,
) {
    let mut emitted: u32 = 0;

    loop {
        if cancel_token.is_cancelled() {
            log_info!("motion run cancelled after {emitted} sample(s)");
            return;
        }

        let Some(sample) = path.next_sample() else {
            break;
        };

        tokio::select! {
            sent = tx.send(sample.point) => {
                if sent.is_err() {
                    log_info!("sample receiver dropped, ending motion run");
                    return;
                }
            }
            // A slow consumer must not keep a cancelled run alive.
            _ = cancel_token.cancelled() => {
                log_info!("motion run cancelled after {emitted} sample(s)");
                return;
            }
        }
        emitted += 1;

        tokio::select! {
            _ = tokio::time::sleep(sample.delay) => {}
            _ = cancel_token.cancelled() => {
                log_info!("motion run cancelled after {emitted} sample(s)");
                return;
            }
        }
    }

    log_info!("motion run complete, {emitted} sample(s) emitted");
}
