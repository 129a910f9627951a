pub mod pexels_client;
