mod event;
mod event_recipient;
mod profile;
mod school_class;
mod student;

pub use event::Event;
pub use event_recipient::EventRecipient;
pub use profile::{Profile, ProfileRole};
pub use school_class::SchoolClass;
pub use student::{Student, StudentParentEmail};
