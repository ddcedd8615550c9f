// src/outline/walk.rs
// =============================================================================
// Depth-tagged preorder/postorder walk over an HTML element tree.
//
// The walk uses an explicit stack instead of recursion, so deeply nested
// (or hostile) documents can't overflow the call stack.
//
// Only element nodes are visited. Text, comments and doctype nodes don't
// count towards depth either.
// =============================================================================

use scraper::ElementRef;

/// Receives callbacks while an element tree is walked.
///
/// Both hooks are optional; the defaults do nothing. `depth` is 0 for the
/// element the walk starts from.
pub trait Visitor {
    /// Called before the element's children are visited (preorder).
    fn enter(&mut self, _element: ElementRef<'_>, _depth: usize) {}

    /// Called after the element's children are visited (postorder).
    fn leave(&mut self, _element: ElementRef<'_>, _depth: usize) {}
}

enum Step<'a> {
    Enter(ElementRef<'a>, usize),
    Leave(ElementRef<'a>, usize),
}

// Walks the element subtree rooted at `root`, calling the visitor's hooks
// in document order
pub fn walk<V>(root: ElementRef<'_>, visitor: &mut V)
where
    V: Visitor + ?Sized,
{
    let mut stack = vec![Step::Enter(root, 0)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(element, depth) => {
                visitor.enter(element, depth);
                stack.push(Step::Leave(element, depth));

                // Pushed in reverse so the first child is popped first
                let children: Vec<ElementRef<'_>> =
                    element.children().filter_map(ElementRef::wrap).collect();
                for child in children.into_iter().rev() {
                    stack.push(Step::Enter(child, depth + 1));
                }
            }
            Step::Leave(element, depth) => visitor.leave(element, depth),
        }
    }
}
