pub mod delete_event;
pub mod edit_event;
pub mod event_details;
pub mod events_list;
pub mod index;
