//! Process runner adapters.

pub mod local;
pub mod scripted;

pub use local::LocalProcessRunner;
pub use scripted::ScriptedRunner;
