pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STATIC_DIR: &str = ".";
pub const INDEX_FILE: &str = "index.html";
