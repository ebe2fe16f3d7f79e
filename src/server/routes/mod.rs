pub mod debug_form;
pub mod extract;
pub mod notes;
