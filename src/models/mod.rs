pub mod category;
pub mod ocr;
pub mod record;

pub use category::{category_for_index, CategoryBook, DEFAULT_CATEGORIES};
pub use ocr::{Block, BoundingPoly, Page, Paragraph, Symbol, TextAnnotation, Vertex, Word};
pub use record::{ImagePair, QaRecord};
