//! tilewall: directional tile collision with per-entity memo, plus small platform helpers

pub mod types;
pub mod api;
pub mod config;
pub mod grid;
pub mod memo;
pub mod collider;
pub mod input;
pub mod camera;

pub use crate::types::*;
pub use crate::api::*;
pub use crate::config::{CollisionConfig, TileShift};
pub use crate::grid::CollisionGrid;
pub use crate::memo::{CollisionMemo, MemoEntry};
pub use crate::collider::LevelCollider;
