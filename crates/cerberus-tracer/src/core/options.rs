/// Options to control traversal limits and behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectOptions {
    /// Deepest state-machine / blend-tree nesting explored before the walk is
    /// cut short. Acyclic controllers never come close.
    pub max_depth: usize,
    /// Collect renderers under inactive nodes. The editor's default child
    /// lookup skips inactive subtrees; turn this off to match it.
    pub include_inactive: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            include_inactive: true,
        }
    }
}
