pub mod downloader;
pub mod index;
pub mod manifest;
