pub mod company_size;
pub mod waitlist_entry;
pub mod waitlist_event;
