use maud::html;

use crate::email::{FOOTER, GREETING, NO_DESCRIPTION, SEPARATOR};

const INTRO: &str = "This is a reminder for our upcoming event:";
const OUTRO: &str = "We look forward to your participation!";
const SUBJECT: &str = "Reminder: Upcoming Event";

pub fn subject(title: &str) -> String {
    format!("{SUBJECT} - {title}")
}

pub fn build(title: &str, date_line: &str, description: Option<&str>) -> maud::Markup {
    html! {
        h1 { "Event Reminder: " (title) }
        p { (GREETING) }
        p { (INTRO) }
        p { strong { "Title: " } (title) }
        p { strong { "Date: " } (date_line) }
        p { strong { "Description: " } (description.unwrap_or(NO_DESCRIPTION)) }
        p { (OUTRO) }
        p { em { (FOOTER) } }
    }
}

pub fn build_txt(title: &str, date_line: &str, description: Option<&str>) -> String {
    let description = description.unwrap_or(NO_DESCRIPTION);
    format!(
        r#"
{SEPARATOR}

{GREETING}

{INTRO}

Title: {title}
Date: {date_line}
Description: {description}

{OUTRO}

{FOOTER}

{SEPARATOR}
"#
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn body_carries_event_fields() {
        let markup = build("Science Fair", "Friday, 02 February 2024 at 10:00 UTC", None);
        let html = markup.into_string();
        assert!(html.contains("Science Fair"));
        assert!(html.contains("Friday, 02 February 2024 at 10:00 UTC"));
        assert!(html.contains(NO_DESCRIPTION));
    }

    #[test]
    fn subject_names_the_event() {
        assert_eq!(
            subject("Science Fair"),
            "Reminder: Upcoming Event - Science Fair"
        );
    }
}
