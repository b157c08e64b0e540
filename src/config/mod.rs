mod loader;
mod model;

pub use loader::{
    ConfigLoader, FileConfigLoader, FileSystem, LOCAL_CONFIG_NAME, RealFileSystem, validate,
};
pub use model::{
    ChangedConfig, Config, DEFAULT_CHUNK_SIZE, DEFAULT_IGNORE_FILE,
    DEFAULT_MIN_FILES_FOR_PARALLEL, ParallelConfig,
};

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
