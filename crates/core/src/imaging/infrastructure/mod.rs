pub mod http_image_fetcher;
pub mod image_file_writer;
