pub mod timestamp;
pub mod valid_object_id;
