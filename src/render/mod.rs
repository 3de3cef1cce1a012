pub mod clock;
pub mod frontend;
pub mod renderer;

pub use clock::TickClock;
pub use frontend::{Frontend, Headless, TuiFrontend};
pub use renderer::{RenderTheme, Renderer};
