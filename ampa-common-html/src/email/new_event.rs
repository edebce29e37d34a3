use maud::html;

use crate::email::{FOOTER, GREETING, NO_DESCRIPTION, SEPARATOR};

const INTRO: &str = "We have a new event scheduled:";
const OUTRO: &str = "We hope to see you there!";
const SUBJECT: &str = "New School Event";

pub fn subject(title: &str) -> String {
    format!("{SUBJECT}: {title}")
}

pub fn build(title: &str, date_line: &str, description: Option<&str>) -> maud::Markup {
    html! {
        h1 { "New Event: " (title) }
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
