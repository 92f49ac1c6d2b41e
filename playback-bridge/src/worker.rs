//! Background notification worker
//!
//! Engines that call back from their own thread push notifications into a
//! channel instead of touching the player directly. The worker classifies
//! them one at a time under the player mutex, then publishes the resulting
//! events with the mutex released, so listeners can issue commands.

use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::classifier::Notification;
use crate::engine::{EventChannel, PlaybackEngine, RenderTarget};
use crate::player::{publish_to, VideoPlayer};

/// A player shared between the host, the worker and command handlers
pub type SharedPlayer<E, T, C> = Arc<Mutex<VideoPlayer<E, T, C>>>;

/// Wrap a player for sharing across threads
pub fn shared<E, T, C>(player: VideoPlayer<E, T, C>) -> SharedPlayer<E, T, C>
where
    E: PlaybackEngine,
    T: RenderTarget,
    C: EventChannel,
{
    Arc::new(Mutex::new(player))
}

/// Channel the engine side uses to report notifications
pub fn notification_channel() -> (mpsc::Sender<Notification>, mpsc::Receiver<Notification>) {
    mpsc::channel()
}

/// Spawns the notification worker thread
///
/// The worker exits when every sender has been dropped or when it finds
/// the player disposed.
pub fn spawn_notification_worker<E, T, C>(
    player: SharedPlayer<E, T, C>,
    notifications: mpsc::Receiver<Notification>,
) -> JoinHandle<()>
where
    E: PlaybackEngine + 'static,
    T: RenderTarget + 'static,
    C: EventChannel + 'static,
{
    thread::spawn(move || {
        tracing::info!("Notification worker started");

        for notification in notifications {
            let (events, sink) = {
                let mut player = player.lock();
                if player.is_disposed() {
                    tracing::debug!("Player disposed, notification worker exiting");
                    return;
                }
                (player.classify(notification), player.event_sink())
            };

            // Lock released: a listener reacting to these may drive the player
            for event in events {
                publish_to(&sink, event);
            }
        }

        tracing::info!("Notification worker stopped");
    })
}
