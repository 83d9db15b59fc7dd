use super::{RenderOptions, cause_entries, escape_markup, markup_field};
use crate::exception::HttpException;

const STYLE: &str = "body{margin:0;padding:30px;font:12px/1.5 Helvetica,Arial,Verdana,sans-serif;}\
h1{margin:0;font-size:48px;font-weight:normal;line-height:48px;}";

/// Fixed page content contributed by a handler
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlPage<'a> {
    /// Page title, the exception message when absent
    pub title: Option<&'a str>,
    /// Paragraph shown below the heading, the description when absent
    pub detail: Option<&'a str>,
}

impl<'a> HtmlPage<'a> {
    pub fn titled(title: &'a str) -> Self {
        Self {
            title: Some(title),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: &'a str) -> Self {
        self.detail = Some(detail);
        self
    }
}

/// Minimal page whose title and heading read `<Title> (Ref. <identifier>)`
pub fn render(
    exception: &HttpException,
    page: &HtmlPage<'_>,
    options: &RenderOptions<'_>,
) -> String {
    let title = page.title.unwrap_or(exception.message());
    let heading = format!(
        "{} (Ref. {})",
        markup_field(title, options.escape),
        markup_field(exception.identifier(), options.escape)
    );

    let mut output = format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta http-equiv=\"Content-Type\" \
         content=\"text/html; charset=utf-8\"><title>{0}</title><style>{1}</style></head>\
         <body><h1>{0}</h1>",
        heading, STYLE
    );

    if let Some(detail) = page.detail.or(exception.description()) {
        output.push_str(&format!("<p>{}</p>", markup_field(detail, options.escape)));
    }

    if let Some(trace) = options.trace {
        output.push_str("<ol>");
        for frame in trace {
            let location = match (&frame.file, frame.line) {
                (Some(file), Some(line)) => {
                    format!(" <small>{}:{}</small>", escape_markup(file), line)
                }
                (Some(file), None) => format!(" <small>{}</small>", escape_markup(file)),
                _ => String::new(),
            };
            output.push_str(&format!(
                "<li><code>{}</code>{}</li>",
                escape_markup(&frame.callable()),
                location
            ));
        }
        output.push_str("</ol>");
    }

    let causes = if options.causes {
        cause_entries(exception)
    } else {
        Vec::new()
    };
    if !causes.is_empty() {
        output.push_str("<h2>Caused by</h2><ul>");
        for cause in causes {
            match cause.status {
                Some(status) => output.push_str(&format!(
                    "<li>{} <small>({})</small></li>",
                    escape_markup(&cause.message),
                    status
                )),
                None => output.push_str(&format!("<li>{}</li>", escape_markup(&cause.message))),
            }
        }
        output.push_str("</ul>");
    }

    output.push_str("</body></html>");
    output
}
