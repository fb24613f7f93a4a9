pub mod http_upload;
pub mod openai;
pub mod opencage;
