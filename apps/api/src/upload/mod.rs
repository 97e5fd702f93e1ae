// CV upload pipeline: validation, S3 object lifecycle, PDF text conversion,
// extraction, and profile merge.

pub mod handlers;
pub mod service;
