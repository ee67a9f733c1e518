#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{
    init_tracing, render_elements_to_png, render_field_to_png, ElementStyle, RenderConfig,
};
