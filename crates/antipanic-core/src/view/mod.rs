//! View layer: one state value, one async driver, one pure renderer.

pub mod controller;
pub mod render;
pub mod state;

pub use controller::ViewController;
pub use render::{render, Action, Button, ProfileCard, Screen, Section};
pub use state::{ActionFlow, Proposal, ViewState, Workspace};
