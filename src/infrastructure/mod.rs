pub mod ocr_backend;
pub mod vision_client;

pub use ocr_backend::OcrBackend;
pub use vision_client::VisionClient;
