pub mod colorscale;
pub mod process;
