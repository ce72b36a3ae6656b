use crate::naming::NamingPolicy;

/// Which writer emits primitive values.
///
/// Both produce byte-identical output; they only differ in how much dispatch happens per
/// primitive. See the `encode_bench` benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteStrategy {
    /// Every primitive is routed through `serde::Serialize` into a fresh generic serializer
    RecursiveGeneric,
    /// Primitives are matched inline and written straight to the output
    #[default]
    DirectWrite,
}

/// Default nesting bound for decoding
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Applied to field names of structured values only
    pub naming_policy: NamingPolicy,
    pub strategy: WriteStrategy,
    /// `None` writes compact JSON, `Some(n)` indents nested lines by `n` spaces (at most 16)
    pub indent: Option<usize>,
    /// Maximum array/object nesting accepted by the decoder. The parser itself stops at 128.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            naming_policy: NamingPolicy::default(),
            strategy: WriteStrategy::default(),
            indent: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
