//! Terminal host standing in for the 2D engine: physics bodies, timers, the
//! play scene and the screen flow around it.

pub mod app;
pub mod physics;
pub mod scene;
pub mod timers;

pub use app::{App, HostInput, MenuItem, PauseItem, Screen};
pub use physics::{Aabb, BirdBody, PhysicsWorld};
pub use scene::PlayScene;
pub use timers::Timers;
