use super::{RenderOptions, cause_entries};
use crate::exception::HttpException;

/// `{"error":{"ref":"<identifier>","message":"<message>"}}`
pub fn render(exception: &HttpException, options: &RenderOptions<'_>) -> String {
    let mut output = format!(
        r#"{{"error":{{"ref":{},"message":{}"#,
        field(exception.identifier(), options.escape),
        field(exception.message(), options.escape)
    );

    if let Some(trace) = options.trace {
        let frames = serde_json::to_string(trace).unwrap_or_else(|_| "[]".to_string());
        output.push_str(r#","trace":"#);
        output.push_str(&frames);
    }

    if options.causes {
        let causes =
            serde_json::to_string(&cause_entries(exception)).unwrap_or_else(|_| "[]".to_string());
        output.push_str(r#","causes":"#);
        output.push_str(&causes);
    }

    output.push_str("}}");
    output
}

fn field(value: &str, escape: bool) -> String {
    if escape {
        serde_json::Value::from(value).to_string()
    } else {
        format!("\"{}\"", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Frame;
    use axum::http::StatusCode;

    #[test]
    fn test_plain_output() {
        let exception = HttpException::internal_server_error();
        let body = render(&exception, &RenderOptions::default());

        assert_eq!(
            body,
            format!(
                r#"{{"error":{{"ref":"{}","message":"Application error"}}}}"#,
                exception.identifier()
            )
        );
    }

    #[test]
    fn test_escaped_output_is_valid_json() {
        let exception =
            HttpException::new(StatusCode::BAD_REQUEST, r#"Field "name" is \ required"#);
        let options = RenderOptions {
            escape: true,
            ..RenderOptions::default()
        };

        let value: serde_json::Value = serde_json::from_str(&render(&exception, &options)).unwrap();
        assert_eq!(value["error"]["message"], r#"Field "name" is \ required"#);
        assert_eq!(value["error"]["ref"], exception.identifier());
    }

    #[test]
    fn test_trace_field() {
        let exception = HttpException::not_found();
        let frames = vec![Frame::new(Some("app::routes"), "show").at("src/routes.rs", 8)];
        let options = RenderOptions::default().with_trace(&frames);

        let value: serde_json::Value = serde_json::from_str(&render(&exception, &options)).unwrap();
        assert_eq!(value["error"]["trace"][0]["function"], "show");
        assert_eq!(value["error"]["trace"][0]["line"], 8);
        assert_eq!(value["error"]["trace"][0]["class"], "app::routes");
    }

    #[test]
    fn test_causes_field() {
        let exception = HttpException::internal_server_error()
            .with_cause(std::io::Error::other(r#"reset by "peer""#));
        let options = RenderOptions::default().with_causes();

        let value: serde_json::Value = serde_json::from_str(&render(&exception, &options)).unwrap();
        assert_eq!(value["error"]["causes"][0]["message"], r#"reset by "peer""#);
        assert!(value["error"]["causes"][0].get("status").is_none());
        assert!(value["error"].get("trace").is_none());
    }
}
