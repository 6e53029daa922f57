//! Rendering of nested recipe instructions.
//!
//! Turns a recipe's [`Step`] tree into a [`RenderedBlock`]: an ordered,
//! depth-tagged structure that a presentation layer can paint as nested
//! lists without knowing anything about the source data.

use crate::model::Step;
use std::slice;

mod model;
pub use model::{FlatStep, RenderedBlock, RenderedItem};

struct Frame<'a> {
    steps: slice::Iter<'a, Step>,
    block: RenderedBlock,
    /// Text of the composite step this frame renders the substeps of
    heading: Option<String>,
}

impl<'a> Frame<'a> {
    fn new(steps: &'a [Step], depth: usize, heading: Option<String>) -> Self {
        Frame {
            steps: steps.iter(),
            block: RenderedBlock::new(depth),
            heading,
        }
    }
}

/// Render a sequence of steps starting at `depth`.
///
/// Leaves become single items. A composite becomes an item whose `children`
/// hold its substeps rendered at `depth + 1`. Order is preserved at every
/// level.
///
/// Traversal uses an explicit stack, so arbitrarily deep trees are safe.
///
/// # Examples
///
/// ```
/// use recipe_browser::{render_steps, Step};
///
/// let steps = vec![
///     Step::leaf("Boil water"),
///     Step::composite("Prepare sauce", vec![Step::leaf("Beat eggs")]),
/// ];
/// let block = render_steps(&steps, 0);
///
/// assert!(block.is_top_level());
/// assert_eq!(block.items.len(), 2);
/// assert_eq!(block.items[1].children.as_ref().unwrap().depth, 1);
/// ```
pub fn render_steps(steps: &[Step], depth: usize) -> RenderedBlock {
    let mut stack = vec![Frame::new(steps, depth, None)];

    loop {
        let Some(frame) = stack.last_mut() else {
            return RenderedBlock::new(depth);
        };

        match frame.steps.next() {
            Some(Step::Leaf(text)) => frame.block.items.push(RenderedItem::leaf(text.clone())),
            Some(Step::Composite { text, substeps }) => {
                let child_depth = frame.block.depth + 1;
                stack.push(Frame::new(substeps, child_depth, Some(text.clone())));
            }
            None => {
                let Some(finished) = stack.pop() else {
                    return RenderedBlock::new(depth);
                };
                match (stack.last_mut(), finished.heading) {
                    (Some(parent), Some(text)) => parent.block.items.push(RenderedItem {
                        text,
                        children: Some(finished.block),
                    }),
                    _ => return finished.block,
                }
            }
        }
    }
}
