use super::Frame;
use backtrace::Backtrace;

/// Capture the current call stack, most recent call first.
///
/// Frames of the unwinder itself are dropped. Symbol names are demangled
/// without their hash and split into `class` (the path) and `function`.
pub fn capture() -> Vec<Frame> {
    let backtrace = Backtrace::new();

    backtrace
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .map(|symbol| {
            let name = symbol.name().map(|name| format!("{:#}", name));
            let (class, function) = split_symbol(name.as_deref());
            Frame {
                file: symbol.filename().map(|path| path.display().to_string()),
                line: symbol.lineno(),
                function,
                class,
                args: Vec::new(),
                marker: None,
            }
        })
        .skip_while(|frame| {
            frame
                .class
                .as_deref()
                .is_some_and(|class| class.starts_with("backtrace::"))
        })
        .collect()
}

fn split_symbol(name: Option<&str>) -> (Option<String>, Option<String>) {
    match name {
        Some(name) => match name.rsplit_once("::") {
            Some((class, function)) => (Some(class.to_string()), Some(function.to_string())),
            None => (None, Some(name.to_string())),
        },
        None => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_symbol() {
        assert_eq!(
            split_symbol(Some("app::users::show::{{closure}}")),
            (
                Some("app::users::show".to_string()),
                Some("{{closure}}".to_string())
            )
        );
        assert_eq!(split_symbol(Some("main")), (None, Some("main".to_string())));
        assert_eq!(split_symbol(None), (None, None));
    }

    #[test]
    fn test_capture_skips_unwinder_frames() {
        let frames = capture();

        assert!(frames.iter().all(|frame| frame.marker.is_none()));
        if let Some(first) = frames.first() {
            assert!(
                !first
                    .class
                    .as_deref()
                    .is_some_and(|class| class.starts_with("backtrace::"))
            );
        }
    }
}
