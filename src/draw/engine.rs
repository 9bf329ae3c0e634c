use serde::Serialize;
use tokio::time::{interval_at, sleep, timeout, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::registry::{DrawRegistry, TickOutcome};
use super::types::{DrawSettings, RoomId};
use crate::relay::{command_event, numbers_event, ControlMessage, DrawMessage, CALLER_CATEGORY};

/// Drives one room's draw: optional start delay, then one number per tick.
///
/// The engine owns no draw state. Each tick asks the registry to draw under
/// its lock, which is also how the engine learns it has been replaced.
pub(super) struct DrawEngine {
    room: RoomId,
    generation: u64,
    settings: DrawSettings,
    registry: DrawRegistry,
}

impl DrawEngine {
    pub(super) fn new(
        room: RoomId,
        generation: u64,
        settings: DrawSettings,
        registry: DrawRegistry,
    ) -> Self {
        Self {
            room,
            generation,
            settings,
            registry,
        }
    }

    pub(super) async fn run(self) {
        let period = self.settings.interval;

        let first_tick = if self.settings.has_start_delay() {
            sleep(self.settings.start_delay).await;
            if !self.registry.mark_drawing(self.room, self.generation).await {
                return;
            }
            // With a delay, numbers only come on cadence ticks
            let now = Instant::now();
            let first_tick = now.checked_add(period).unwrap_or(now);
            self.announce_start().await;
            first_tick
        } else {
            Instant::now()
        };

        let mut ticker = interval_at(first_tick, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match self.registry.record_draw(self.room, self.generation).await {
                TickOutcome::Drawn {
                    number,
                    sequence,
                    last,
                } => {
                    info!(
                        room = self.room,
                        number = number,
                        sequence = sequence,
                        pool_size = self.settings.pool_size,
                        "Number drawn"
                    );
                    self.emit_number(number, sequence).await;

                    if last {
                        info!(
                            room = self.room,
                            pool_size = self.settings.pool_size,
                            "All numbers drawn, draw session finished"
                        );
                        return;
                    }
                }
                TickOutcome::Exhausted => {
                    info!(room = self.room, "Pool exhausted, draw session finished");
                    return;
                }
                TickOutcome::Stale => {
                    debug!(room = self.room, "Draw session superseded, engine stopping");
                    return;
                }
            }
        }
    }

    async fn announce_start(&self) {
        let message = ControlMessage::starting(self.registry.clock().now());
        info!(room = self.room, "Start delay elapsed, announcing draw start");
        self.publish(&command_event(self.room), &message).await;
    }

    async fn emit_number(&self, number: u32, sequence: u32) {
        let message = DrawMessage {
            sequence,
            number,
            timestamp: self.registry.clock().now(),
        };
        self.publish(&numbers_event(self.room), &message).await;
    }

    /// Best-effort delivery; failures are logged and never stop the cadence
    async fn publish<M: Serialize>(&self, event_name: &str, message: &M) {
        let payload = match serde_json::to_value(message) {
            Ok(payload) => payload,
            Err(e) => {
                error!(room = self.room, event = %event_name, error = %e, "Failed to encode event");
                return;
            }
        };

        let publisher = self.registry.publisher();
        let delivery = publisher.publish(
            CALLER_CATEGORY,
            event_name,
            self.registry.clock().now(),
            Some(payload),
        );

        match timeout(self.registry.publish_timeout(), delivery).await {
            Ok(true) => debug!(room = self.room, event = %event_name, "Event published"),
            Ok(false) => warn!(
                room = self.room,
                event = %event_name,
                publisher = publisher.name(),
                "Event publish failed"
            ),
            Err(_) => warn!(
                room = self.room,
                event = %event_name,
                timeout_ms = self.registry.publish_timeout().as_millis() as u64,
                "Event publish timed out"
            ),
        }
    }
}
