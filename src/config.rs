//! Generator configuration.

use std::path::PathBuf;

use crate::preview::DEFAULT_TAIL_WINDOW;

/// Default job list file name, relative to the working directory.
pub const DEFAULT_OUT_PATH: &str = "jobs.list";

/// Default number of lines shown in each preview block.
pub const DEFAULT_PREVIEW_LINES: usize = 8;

/// Configuration for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// YAML job specification to compile.
    pub spec_path: PathBuf,

    /// Where the job list is published. Overwritten if present.
    pub out_path: PathBuf,

    /// Explicit case order. Empty means declaration order.
    pub case_order: Vec<String>,

    /// Lines per preview block; `None` disables the preview.
    pub preview_lines: Option<usize>,

    /// Bytes read from the end of the job list for the tail preview.
    pub tail_window_bytes: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            spec_path: PathBuf::new(),
            out_path: PathBuf::from(DEFAULT_OUT_PATH),
            case_order: Vec::new(),
            preview_lines: None,
            tail_window_bytes: DEFAULT_TAIL_WINDOW,
        }
    }
}

impl GeneratorConfig {
    pub fn new(spec_path: impl Into<PathBuf>) -> Self {
        Self {
            spec_path: spec_path.into(),
            ..Default::default()
        }
    }

    /// Set the output path.
    pub fn out_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_path = path.into();
        self
    }

    /// Set the case order from a list of names.
    pub fn case_order<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.case_order = names.into_iter().map(Into::into).collect();
        self
    }

    /// Enable the preview with `lines` per block.
    pub fn preview(mut self, lines: usize) -> Self {
        self.preview_lines = Some(lines);
        self
    }

    pub fn tail_window_bytes(mut self, bytes: u64) -> Self {
        self.tail_window_bytes = bytes;
        self
    }
}
