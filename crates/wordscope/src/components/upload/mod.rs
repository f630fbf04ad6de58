//! File selection: picker button and drop zone.

mod upload_card;

pub use upload_card::{PickedFile, UploadCard};
