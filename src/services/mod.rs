pub mod csv_exporter;
pub mod image_scanner;
pub mod line_reconstructor;
pub mod record_assembler;
pub mod text_cleaner;

pub use csv_exporter::{answer_with_link, search_url, CsvExporter};
pub use image_scanner::scan_image_pairs;
pub use line_reconstructor::{extract_horizontal_text, reconstruct_lines, DEFAULT_LINE_THRESHOLD};
pub use record_assembler::{pair_records, PairedRecords};
pub use text_cleaner::{clean_text, split_lines};
