use super::{RenderOptions, cause_entries, escape_markup, markup_field};
use crate::exception::HttpException;

const PROLOG: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// `<root><error><ref/><message/></error></root>` with an XML prolog
pub fn render(exception: &HttpException, options: &RenderOptions<'_>) -> String {
    let mut output = format!(
        "{}<root><error><ref>{}</ref><message>{}</message>",
        PROLOG,
        markup_field(exception.identifier(), options.escape),
        markup_field(exception.message(), options.escape)
    );

    if let Some(trace) = options.trace {
        output.push_str("<trace>");
        for frame in trace {
            output.push_str("<frame>");
            push_element(&mut output, "file", frame.file.as_deref());
            push_element(
                &mut output,
                "line",
                frame.line.map(|line| line.to_string()).as_deref(),
            );
            push_element(&mut output, "function", frame.function.as_deref());
            push_element(&mut output, "class", frame.class.as_deref());
            output.push_str("<args>");
            for arg in &frame.args {
                push_element(&mut output, "arg", Some(arg));
            }
            output.push_str("</args></frame>");
        }
        output.push_str("</trace>");
    }

    if options.causes {
        output.push_str("<causes>");
        for cause in cause_entries(exception) {
            output.push_str("<cause>");
            push_element(&mut output, "message", Some(&cause.message));
            push_element(
                &mut output,
                "status",
                cause.status.map(|status| status.to_string()).as_deref(),
            );
            push_element(
                &mut output,
                "code",
                cause.code.map(|code| code.to_string()).as_deref(),
            );
            output.push_str("</cause>");
        }
        output.push_str("</causes>");
    }

    output.push_str("</error></root>");
    output
}

fn push_element(output: &mut String, name: &str, value: Option<&str>) {
    match value {
        Some(value) => output.push_str(&format!("<{0}>{1}</{0}>", name, escape_markup(value))),
        None => output.push_str(&format!("<{}/>", name)),
    }
}
