#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod id_generator;
pub mod input;
pub mod panels;
pub mod state;
pub mod tier;
pub mod util;
pub mod widgets;

pub use app::TierListApp;
pub use command::{Command, Outcome};
pub use config::AppConfig;
pub use input::{DragSource, InputCoordinator, InputEvent, InteractionState};
pub use tier::{Collection, ContainerId, PlacementEngine, PlacementId, Target};
