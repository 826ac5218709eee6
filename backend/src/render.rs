use anyhow::Result;
use shared::Acronym;

/// A page the web surface can ask the view layer to produce.
///
/// Each variant carries the full context for one view; the index
/// distinguishes "no acronyms" (`None`) from a populated list so the view
/// can say so instead of rendering an empty table.
#[derive(Debug)]
pub enum Page {
    Index {
        title: String,
        acronyms: Option<Vec<Acronym>>,
    },
    Acronym {
        title: String,
        acronym: Acronym,
    },
    CreateAcronym {
        title: String,
    },
    EditAcronym {
        title: String,
        acronym: Acronym,
    },
}

/// Turns a [`Page`] into a complete HTML document.
///
/// The web handlers only depend on this trait; swapping in a template
/// engine touches nothing but the implementation handed to `AppState`.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, page: Page) -> Result<String>;
}

/// Built-in renderer producing plain HTML documents.
pub struct HtmlRenderer;

impl ViewRenderer for HtmlRenderer {
    fn render(&self, page: Page) -> Result<String> {
        let document = match page {
            Page::Index { title, acronyms } => layout(&title, &index_body(acronyms.as_deref())),
            Page::Acronym { title, acronym } => layout(&title, &acronym_body(&acronym)),
            Page::CreateAcronym { title } => layout(&title, &form_body(None)),
            Page::EditAcronym { title, acronym } => layout(&title, &form_body(Some(&acronym))),
        };
        Ok(document)
    }
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | TIL</title>\n\
         <link rel=\"stylesheet\" href=\"/static/styles.css\">\n</head>\n<body>\n\
         <header><a href=\"/\">TIL</a></header>\n\
         <main>\n<h1>{title}</h1>\n{body}</main>\n</body>\n</html>\n",
        title = escape(title),
        body = body,
    )
}

fn index_body(acronyms: Option<&[Acronym]>) -> String {
    match acronyms {
        Some(acronyms) => {
            let mut items = String::new();
            for acronym in acronyms {
                items.push_str(&format!(
                    "<li><a href=\"/acronyms/{id}\">{short}</a> &mdash; {long}</li>\n",
                    id = acronym.id,
                    short = escape(&acronym.short),
                    long = escape(&acronym.long),
                ));
            }
            format!(
                "<ul class=\"acronyms\">\n{items}</ul>\n\
                 <p><a href=\"/acronyms/create\">Create an acronym</a></p>\n"
            )
        }
        None => "<p>There aren't any acronyms yet!</p>\n\
                 <p><a href=\"/acronyms/create\">Create an acronym</a></p>\n"
            .to_string(),
    }
}

fn acronym_body(acronym: &Acronym) -> String {
    format!(
        "<h2>{long}</h2>\n\
         <p>Created by user {user_id}</p>\n\
         <p><a href=\"/acronyms/{id}/edit\">Edit</a></p>\n\
         <form method=\"post\" action=\"/acronyms/{id}/delete\">\n\
         <button type=\"submit\">Delete</button>\n</form>\n",
        long = escape(&acronym.long),
        user_id = acronym.user_id,
        id = acronym.id,
    )
}

fn form_body(acronym: Option<&Acronym>) -> String {
    let action = match acronym {
        Some(acronym) => format!("/acronyms/{}/edit", acronym.id),
        None => "/acronyms/create".to_string(),
    };
    let short = acronym.map(|a| escape(&a.short)).unwrap_or_default();
    let long = acronym.map(|a| escape(&a.long)).unwrap_or_default();
    let user_id = acronym.map(|a| a.user_id.to_string()).unwrap_or_default();
    format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label>Acronym <input type=\"text\" name=\"short\" value=\"{short}\"></label>\n\
         <label>Meaning <input type=\"text\" name=\"long\" value=\"{long}\"></label>\n\
         <label>User ID <input type=\"number\" name=\"userID\" value=\"{user_id}\"></label>\n\
         <button type=\"submit\">Save</button>\n</form>\n"
    )
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
