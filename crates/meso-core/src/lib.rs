pub mod channels;
pub mod color;
pub mod consts;
pub mod error;
pub mod filters;
pub mod frame;
pub mod io;
pub mod package;
pub mod pipeline;
pub mod recipes;
