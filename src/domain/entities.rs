pub mod api_response;
pub mod experience;
pub mod list_field;
pub mod option_fields;
pub mod project;
