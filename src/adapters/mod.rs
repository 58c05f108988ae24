// Adapters layer: concrete document formats the import pipeline reads and writes.

pub mod docx;
