#[path = "handlers.rs"]
pub mod handlers;

// File loaders and parsers shared by the binary and its tests
pub use handlers::{
    expand_path, load_html_snapshot, load_pages_from_file, normalize_request_path,
    parse_form_data,
};
