pub mod aggregate;
pub mod pipeline;
pub mod views;

pub mod data {
    pub mod columnar;
    pub mod loader;
    pub mod matcher;
}

pub mod plot {
    pub mod html;
    pub mod json;
}
