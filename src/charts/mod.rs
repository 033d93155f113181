//! Charts module - scales, layout and rendering

mod color;
mod document;
mod layout;
mod renderer;
mod scale;

pub use layout::BubbleLayout;
pub use renderer::ChartRenderer;
