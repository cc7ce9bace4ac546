//! The two demo apps

pub mod breakout;
pub mod shaderplay;

pub use breakout::BreakoutApp;
pub use shaderplay::ShaderplayApp;
