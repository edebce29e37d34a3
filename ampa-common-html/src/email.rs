pub mod event_reminder;
pub mod new_event;

pub const SEPARATOR: &str =
    "==============================================================";

pub(crate) const GREETING: &str = "Hello Parent,";
pub(crate) const NO_DESCRIPTION: &str = "No description provided.";
pub(crate) const FOOTER: &str =
    "This is an automated notification from the School Parent Association App.";
