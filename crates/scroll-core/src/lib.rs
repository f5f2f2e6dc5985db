pub mod config;
pub mod constants;
pub mod controller;
pub mod discovery;
pub mod easing;
pub mod engine;
pub mod events;
pub mod registry;
pub mod relay;
pub mod scheduler;
pub mod speed;
pub mod target;

pub use config::*;
pub use controller::*;
pub use discovery::*;
pub use easing::*;
pub use engine::*;
pub use events::*;
pub use registry::*;
pub use relay::*;
pub use scheduler::*;
pub use speed::*;
pub use target::*;
