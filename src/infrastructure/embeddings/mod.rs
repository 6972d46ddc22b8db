pub mod clip_http;
