use serde::Serialize;

/// One rendered instruction line, optionally carrying the block rendered
/// from its substeps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedItem {
    pub text: String,
    /// Present for composite steps, even when they have no substeps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<RenderedBlock>,
}

impl RenderedItem {
    pub(crate) fn leaf(text: String) -> Self {
        RenderedItem {
            text,
            children: None,
        }
    }
}

/// An ordered list of rendered steps at a single nesting depth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedBlock {
    /// Nesting depth; 0 is the top-level list of a recipe
    pub depth: usize,
    pub items: Vec<RenderedItem>,
}

/// A pre-order, depth-tagged line for consumers that cannot take nested
/// structures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatStep {
    pub depth: usize,
    pub text: String,
}

impl RenderedBlock {
    pub(crate) fn new(depth: usize) -> Self {
        RenderedBlock {
            depth,
            items: Vec::new(),
        }
    }

    /// True for the outermost list. Presentation layers style it apart from
    /// nested lists.
    pub fn is_top_level(&self) -> bool {
        self.depth == 0
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items at every depth of this block.
    pub fn item_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(block) = pending.pop() {
            count += block.items.len();
            pending.extend(block.items.iter().filter_map(|item| item.children.as_ref()));
        }
        count
    }

    /// Deepest item depth reached inside this block, or `None` if it holds
    /// no items at all.
    pub fn max_depth(&self) -> Option<usize> {
        let mut deepest = None;
        let mut pending = vec![self];
        while let Some(block) = pending.pop() {
            if !block.items.is_empty() {
                deepest = deepest.max(Some(block.depth));
            }
            pending.extend(block.items.iter().filter_map(|item| item.children.as_ref()));
        }
        deepest
    }

    /// Flattens the tree in document order.
    pub fn flatten(&self) -> Vec<FlatStep> {
        let mut lines = Vec::with_capacity(self.items.len());
        let mut pending = vec![(self.depth, self.items.iter())];

        while let Some((depth, items)) = pending.last_mut() {
            let depth = *depth;
            match items.next() {
                Some(item) => {
                    lines.push(FlatStep {
                        depth,
                        text: item.text.clone(),
                    });
                    if let Some(children) = &item.children {
                        pending.push((children.depth, children.items.iter()));
                    }
                }
                None => {
                    pending.pop();
                }
            }
        }

        lines
    }
}

// Nested blocks are released iteratively; see `Step`'s drop.
impl Drop for RenderedBlock {
    fn drop(&mut self) {
        let mut pending: Vec<RenderedBlock> = self
            .items
            .iter_mut()
            .filter_map(|item| item.children.take())
            .collect();
        while let Some(mut block) = pending.pop() {
            pending.extend(
                block
                    .items
                    .iter_mut()
                    .filter_map(|item| item.children.take()),
            );
        }
    }
}
