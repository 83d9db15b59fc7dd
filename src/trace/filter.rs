use super::{Frame, FrameMarker};
use std::borrow::Cow;

/// Trims a trace down to the first frame relevant to application code.
///
/// Frames are classified by their explicit [`FrameMarker`] when present.
/// Unmarked frames (such as frames captured from the live stack) fall back to
/// prefix matching on file paths and `class::function` callables.
#[derive(Debug, Clone)]
pub struct FrameFilter {
    internal_paths: Vec<String>,
    internal_modules: Vec<String>,
    pipeline_entries: Vec<String>,
    exception_entries: Vec<String>,
}

impl Default for FrameFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameFilter {
    /// A filter treating this crate's own source tree and module path as internal
    pub fn new() -> Self {
        Self {
            internal_paths: vec![concat!(env!("CARGO_MANIFEST_DIR"), "/src/").to_string()],
            internal_modules: vec![format!("{}::", env!("CARGO_CRATE_NAME"))],
            pipeline_entries: Vec::new(),
            exception_entries: Vec::new(),
        }
    }

    /// A filter that only honours explicit frame markers
    pub fn markers_only() -> Self {
        Self {
            internal_paths: Vec::new(),
            internal_modules: Vec::new(),
            pipeline_entries: Vec::new(),
            exception_entries: Vec::new(),
        }
    }

    pub fn internal_path(mut self, prefix: impl Into<String>) -> Self {
        self.internal_paths.push(prefix.into());
        self
    }

    pub fn internal_module(mut self, prefix: impl Into<String>) -> Self {
        self.internal_modules.push(prefix.into());
        self
    }

    /// Callable prefix of the host pipeline's top-level invocation
    pub fn pipeline_entry(mut self, callable: impl Into<String>) -> Self {
        self.pipeline_entries.push(callable.into());
        self
    }

    /// Callable prefix of the host pipeline's centralized exception handling
    pub fn exception_entry(mut self, callable: impl Into<String>) -> Self {
        self.exception_entries.push(callable.into());
        self
    }

    /// Index of the first frame worth showing.
    ///
    /// Scans forward and stops at the first decision. When every frame is
    /// internal no decision fires and the full trace is kept.
    pub fn first_relevant(&self, frames: &[Frame]) -> usize {
        for (index, frame) in frames.iter().enumerate() {
            if self.is_internal(frame) {
                continue;
            }

            if self.is_pipeline_entry(frame) {
                // Not-found/not-allowed handlers invoked straight from the
                // pipeline: keep the manager frame right above it.
                return index.saturating_sub(1);
            }

            let next_is_exception_entry = frames
                .get(index + 1)
                .is_some_and(|next| self.is_exception_entry(next));
            if next_is_exception_entry {
                return index + 2;
            }

            return index;
        }

        0
    }

    /// Suffix of `frames` starting at [`first_relevant`](Self::first_relevant)
    pub fn filter(&self, mut frames: Vec<Frame>) -> Vec<Frame> {
        let cut = self.first_relevant(&frames);
        frames.split_off(cut)
    }

    fn is_internal(&self, frame: &Frame) -> bool {
        if let Some(marker) = frame.marker {
            return marker == FrameMarker::Dispatch;
        }

        let in_source_tree = frame.file.as_deref().is_some_and(|file| {
            self.internal_paths
                .iter()
                .any(|prefix| file.starts_with(prefix.as_str()))
        });

        in_source_tree || matches_any(&frame.callable(), &self.internal_modules)
    }

    fn is_pipeline_entry(&self, frame: &Frame) -> bool {
        match frame.marker {
            Some(marker) => marker == FrameMarker::PipelineEntry,
            None => matches_any(&frame.callable(), &self.pipeline_entries),
        }
    }

    fn is_exception_entry(&self, frame: &Frame) -> bool {
        match frame.marker {
            Some(marker) => marker == FrameMarker::PipelineExceptionEntry,
            None => matches_any(&frame.callable(), &self.exception_entries),
        }
    }
}

fn matches_any(callable: &str, prefixes: &[String]) -> bool {
    let callable = unqualify(callable);
    !callable.is_empty()
        && prefixes
            .iter()
            .any(|prefix| callable.starts_with(prefix.as_str()))
}

/// Rewrite a demangled qualified path to its self type:
/// `<a::B>::f` and `<a::B as c::D>::f` both become `a::B::f`
fn unqualify(callable: &str) -> Cow<'_, str> {
    let Some(inner) = callable.strip_prefix('<') else {
        return Cow::Borrowed(callable);
    };

    let mut depth = 0usize;
    for (index, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' if depth == 0 => {
                let self_type = inner[..index].split(" as ").next().unwrap_or_default();
                return Cow::Owned(format!("{}{}", self_type, &inner[index + 1..]));
            }
            '>' => depth -= 1,
            _ => {}
        }
    }

    Cow::Borrowed(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_frame() -> Frame {
        Frame::new(Some("app::users::UserController"), "show").at("/srv/app/src/users.rs", 31)
    }

    fn framework_frame(function: &str) -> Frame {
        Frame::new(Some("host::App"), function).at("/srv/host/src/app.rs", 100)
    }

    #[test]
    fn test_marked_trace_keeps_only_user_frame() {
        let frames = vec![
            Frame::new(Some("dispatch"), "{{closure}}").marked(FrameMarker::Dispatch),
            framework_frame("call_route"),
            framework_frame("handle_exception").marked(FrameMarker::PipelineExceptionEntry),
            user_frame(),
        ];

        assert_eq!(FrameFilter::new().filter(frames), vec![user_frame()]);
    }

    #[test]
    fn test_pattern_trace_keeps_only_user_frame() {
        let filter = FrameFilter::markers_only()
            .internal_module("http_exception::")
            .exception_entry("host::App::handle_exception");
        let frames = vec![
            Frame::new(Some("http_exception::manager::ExceptionManager"), "dispatch"),
            framework_frame("call_route"),
            framework_frame("handle_exception"),
            user_frame(),
        ];

        assert_eq!(filter.filter(frames), vec![user_frame()]);
    }

    #[test]
    fn test_unqualify() {
        assert_eq!(unqualify("app::run"), "app::run");
        assert_eq!(unqualify("<app::App>::run"), "app::App::run");
        assert_eq!(
            unqualify("<app::Svc<T> as tower_service::Service<R>>::call"),
            "app::Svc<T>::call"
        );
    }

    #[test]
    fn test_impl_symbols_are_internal() {
        let middleware = "<http_exception::layer::ExceptionMiddleware<S> as tower::Service<R>>";
        let frames = vec![
            Frame::new(Some("<http_exception::manager::ExceptionManager>"), "dispatch"),
            Frame::new(Some(middleware), "call"),
            user_frame(),
        ];

        assert_eq!(FrameFilter::new().first_relevant(&frames), 2);
    }

    #[test]
    fn test_impl_symbol_exception_entry() {
        let filter = FrameFilter::markers_only().exception_entry("host::App::handle_exception");
        let frames = vec![
            user_frame(),
            Frame::new(Some("<host::App>"), "handle_exception"),
            framework_frame("respond"),
        ];

        assert_eq!(filter.first_relevant(&frames), 2);
    }

    #[test]
    fn test_source_tree_frames_are_internal() {
        let filter = FrameFilter::markers_only().internal_path("/srv/exceptions/src/");
        let frames = vec![
            Frame::new(None, "render").at("/srv/exceptions/src/renderer/json.rs", 10),
            user_frame(),
        ];

        assert_eq!(filter.first_relevant(&frames), 1);
    }

    #[test]
    fn test_pipeline_entry_keeps_previous_frame() {
        let frames = vec![
            Frame::new(Some("dispatch"), "not_found").marked(FrameMarker::Dispatch),
            Frame::new(Some("manager"), "not_found").marked(FrameMarker::Dispatch),
            framework_frame("invoke").marked(FrameMarker::PipelineEntry),
            user_frame(),
        ];

        assert_eq!(FrameFilter::new().first_relevant(&frames), 1);
    }

    #[test]
    fn test_pipeline_entry_first_keeps_everything() {
        let frames = vec![
            framework_frame("invoke").marked(FrameMarker::PipelineEntry),
            user_frame(),
        ];

        assert_eq!(FrameFilter::new().first_relevant(&frames), 0);
    }

    #[test]
    fn test_plain_user_frame_is_cut_point() {
        let frames = vec![
            Frame::new(None, "internal").marked(FrameMarker::Dispatch),
            user_frame(),
            framework_frame("call_route"),
        ];

        let filtered = FrameFilter::new().filter(frames);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0], user_frame());
    }

    #[test]
    fn test_all_internal_keeps_full_trace() {
        let frames = vec![
            Frame::new(None, "a").marked(FrameMarker::Dispatch),
            Frame::new(None, "b").marked(FrameMarker::Dispatch),
        ];

        assert_eq!(FrameFilter::new().filter(frames.clone()), frames);
    }

    #[test]
    fn test_empty_trace() {
        assert!(FrameFilter::new().filter(Vec::new()).is_empty());
    }

    #[test]
    fn test_last_frame_without_successor() {
        let frames = vec![
            Frame::new(None, "internal").marked(FrameMarker::Dispatch),
            user_frame(),
        ];

        assert_eq!(FrameFilter::new().filter(frames), vec![user_frame()]);
    }
}
