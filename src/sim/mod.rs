//! Simulation module
//!
//! All gameplay logic lives here, free of rendering and platform code:
//! - Entities live in fixed arenas and are reused by wraparound
//! - Time only advances through the `dt` handed to `tick`
//! - Seeded RNG only

pub mod arena;
pub mod collision;
pub mod lifecycle;
pub mod player;
pub mod state;
pub mod store;
pub mod tick;

pub use arena::{Arena, ArenaError};
pub use collision::{BulletHit, HitReport, check, check_player, point_in_triangle, within_box};
pub use lifecycle::{DeathPolicy, LiveRange, Playfield, ScanReport};
pub use player::{Direction, Hull};
pub use state::{AsteroidPattern, BulletType, GameState, SpawnTimer, default_bullet_types};
pub use store::{Entity, EntityHandle, EntityKind, EntityStore, SpawnParams};
pub use tick::{FrameSink, TickInput, TickReport, tick};
