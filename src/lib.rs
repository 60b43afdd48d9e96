pub mod contents_json;
pub mod gradient;
pub mod icon_gen;
pub mod mask;
pub mod variants;
pub mod wordmark;
