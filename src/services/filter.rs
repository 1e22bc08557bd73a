// ファイル名フィルタの具象実装

use crate::core::FilenameFilter;

/// 何も除外しないフィルタ（既定）
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllFilter;

impl FilenameFilter for AcceptAllFilter {
    fn is_excluded(&self, _file_name: &str) -> bool {
        false
    }
}

/// `.`で始まる隠しファイルを除外するフィルタ
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenFileFilter;

impl FilenameFilter for HiddenFileFilter {
    fn is_excluded(&self, file_name: &str) -> bool {
        file_name.starts_with('.')
    }
}

/// 指定した接尾辞で終わるファイル（サイドカーファイル等）を除外するフィルタ
#[derive(Debug, Default, Clone)]
pub struct SuffixFilter {
    suffixes: Vec<String>,
}

impl SuffixFilter {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl FilenameFilter for SuffixFilter {
    fn is_excluded(&self, file_name: &str) -> bool {
        self.suffixes
            .iter()
            .any(|suffix| file_name.ends_with(suffix.as_str()))
    }
}

/// 複数のフィルタのいずれかに該当すれば除外する
#[derive(Default)]
pub struct AnyFilter {
    filters: Vec<Box<dyn FilenameFilter>>,
}

impl AnyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, filter: impl FilenameFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl FilenameFilter for AnyFilter {
    fn is_excluded(&self, file_name: &str) -> bool {
        self.filters
            .iter()
            .any(|filter| filter.is_excluded(file_name))
    }
}
