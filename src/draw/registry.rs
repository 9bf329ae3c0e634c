use chrono::{DateTime, FixedOffset};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use super::engine::DrawEngine;
use super::generator;
use super::types::{DrawError, DrawPhase, DrawRequest, DrawSettings, DrawSnapshot, RoomId};
use crate::clock::LocalClock;
use crate::relay::EventPublisher;

/// Upper bound on a single publish before the engine moves on
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(5);

const MAX_PREALLOCATED: u32 = 1024;

/// State of one room's draw, owned by the registry
struct DrawSession {
    generation: u64,
    settings: DrawSettings,
    phase: DrawPhase,
    drawn: HashSet<u32>,
    order: Vec<u32>,
    started_at: DateTime<FixedOffset>,
    task: Option<JoinHandle<()>>,
}

impl DrawSession {
    fn new(generation: u64, settings: DrawSettings, started_at: DateTime<FixedOffset>) -> Self {
        let phase = if settings.has_start_delay() {
            DrawPhase::WaitingDelay
        } else {
            DrawPhase::Drawing
        };

        let capacity = settings.pool_size.min(MAX_PREALLOCATED) as usize;

        Self {
            generation,
            settings,
            phase,
            drawn: HashSet::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
            started_at,
            task: None,
        }
    }

    /// Aborts the engine task; it will not be polled again
    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn snapshot(&self, room: RoomId) -> DrawSnapshot {
        DrawSnapshot {
            room,
            pool_size: self.settings.pool_size,
            interval_secs: self.settings.interval.as_secs(),
            start_delay_secs: self.settings.start_delay.as_secs(),
            phase: self.phase,
            drawn: self.order.clone(),
            started_at: self.started_at,
        }
    }
}

/// Result of asking the registry for the next number of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TickOutcome {
    /// A fresh number was recorded; `last` means the pool is now used up
    /// and the session has already been removed
    Drawn {
        number: u32,
        sequence: u32,
        last: bool,
    },
    /// Nothing left to draw; the session has been removed
    Exhausted,
    /// The session was replaced or cancelled
    Stale,
}

/// Process-wide set of running draws, keyed by room.
///
/// All mutation of a session's drawn numbers goes through the registry lock,
/// and every engine tick carries the generation it was started with, so a
/// replaced session can never record or emit another number.
#[derive(Clone)]
pub struct DrawRegistry {
    sessions: Arc<Mutex<HashMap<RoomId, DrawSession>>>,
    next_generation: Arc<AtomicU64>,
    publisher: Arc<dyn EventPublisher>,
    clock: LocalClock,
    publish_timeout: Duration,
}

impl DrawRegistry {
    pub fn new(publisher: Arc<dyn EventPublisher>, clock: LocalClock) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            next_generation: Arc::new(AtomicU64::new(1)),
            publisher,
            clock,
            publish_timeout: DEFAULT_PUBLISH_TIMEOUT,
        }
    }

    pub fn with_publish_timeout(mut self, publish_timeout: Duration) -> Self {
        self.publish_timeout = publish_timeout;
        self
    }

    pub(super) fn publisher(&self) -> &Arc<dyn EventPublisher> {
        &self.publisher
    }

    pub(super) fn clock(&self) -> &LocalClock {
        &self.clock
    }

    pub(super) fn publish_timeout(&self) -> Duration {
        self.publish_timeout
    }

    /// Starts a draw for `room`, replacing any draw already running there.
    ///
    /// Returns as soon as the engine task is spawned; nothing here waits on
    /// the relay.
    #[instrument(skip(self))]
    pub async fn start(
        &self,
        room: RoomId,
        request: DrawRequest,
    ) -> Result<DrawSnapshot, DrawError> {
        let settings = request.validate()?;
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        let mut sessions = self.sessions.lock().await;

        if let Some(mut previous) = sessions.remove(&room) {
            previous.stop();
            info!(
                room = room,
                drawn = previous.drawn.len(),
                "Replacing active draw session"
            );
        }

        let mut session = DrawSession::new(generation, settings, self.clock.now());
        let engine = DrawEngine::new(room, generation, settings, self.clone());
        session.task = Some(tokio::spawn(engine.run()));

        let snapshot = session.snapshot(room);
        sessions.insert(room, session);

        info!(
            room = room,
            interval_secs = settings.interval.as_secs(),
            pool_size = settings.pool_size,
            start_delay_secs = settings.start_delay.as_secs(),
            "Draw session started"
        );

        Ok(snapshot)
    }

    /// Stops and forgets the draw for `room`. Returns whether one was running.
    #[instrument(skip(self))]
    pub async fn cancel(&self, room: RoomId) -> bool {
        let mut sessions = self.sessions.lock().await;
        match sessions.remove(&room) {
            Some(mut session) => {
                session.stop();
                info!(room = room, drawn = session.drawn.len(), "Draw session cancelled");
                true
            }
            None => false,
        }
    }

    /// Stops every running draw, returning how many there were
    pub async fn cancel_all(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        let count = sessions.len();
        for (_, mut session) in sessions.drain() {
            session.stop();
        }
        info!(count = count, "All draw sessions cancelled");
        count
    }

    pub async fn snapshot(&self, room: RoomId) -> Option<DrawSnapshot> {
        let sessions = self.sessions.lock().await;
        sessions.get(&room).map(|session| session.snapshot(room))
    }

    pub async fn is_active(&self, room: RoomId) -> bool {
        self.sessions.lock().await.contains_key(&room)
    }

    pub async fn active_rooms(&self) -> Vec<RoomId> {
        let sessions = self.sessions.lock().await;
        let mut rooms: Vec<RoomId> = sessions.keys().copied().collect();
        rooms.sort_unstable();
        rooms
    }

    /// Moves a delayed session into its drawing phase
    pub(super) async fn mark_drawing(&self, room: RoomId, generation: u64) -> bool {
        let mut sessions = self.sessions.lock().await;
        match sessions.get_mut(&room) {
            Some(session) if session.generation == generation => {
                session.phase = DrawPhase::Drawing;
                true
            }
            _ => false,
        }
    }

    /// Draws and records the next number for the given session
    pub(super) async fn record_draw(&self, room: RoomId, generation: u64) -> TickOutcome {
        let mut sessions = self.sessions.lock().await;

        let Some(session) = sessions
            .get_mut(&room)
            .filter(|session| session.generation == generation)
        else {
            return TickOutcome::Stale;
        };

        let next = generator::next_unique(
            &mut rand::rng(),
            &session.drawn,
            session.settings.pool_size,
        );

        let Some(number) = next else {
            sessions.remove(&room);
            debug!(room = room, "Pool exhausted, session removed");
            return TickOutcome::Exhausted;
        };

        session.drawn.insert(number);
        session.order.push(number);
        let sequence = session.drawn.len() as u32;
        let last = sequence >= session.settings.pool_size;

        if last {
            sessions.remove(&room);
            debug!(room = room, "Final number drawn, session removed");
        }

        TickOutcome::Drawn {
            number,
            sequence,
            last,
        }
    }
}
