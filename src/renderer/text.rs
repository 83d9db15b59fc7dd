use super::{RenderOptions, cause_entries};
use crate::exception::HttpException;

/// `(<identifier>) <message>`, followed by one line per trace frame
pub fn render(exception: &HttpException, options: &RenderOptions<'_>) -> String {
    let mut output = format!("({}) {}", exception.identifier(), exception.message());

    if let Some(trace) = options.trace {
        for (index, frame) in trace.iter().enumerate() {
            output.push_str(&format!("\n#{} ", index));
            if let Some(file) = &frame.file {
                output.push_str(file);
                if let Some(line) = frame.line {
                    output.push_str(&format!(":{}", line));
                }
                output.push(' ');
            }
            output.push_str(&frame.callable());
        }
    }

    if options.causes {
        for cause in cause_entries(exception) {
            output.push_str("\nCaused by: ");
            if let Some(status) = cause.status {
                output.push_str(&format!("({}) ", status));
            }
            output.push_str(&cause.message);
        }
    }

    output
}
