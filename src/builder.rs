//! Flattens an error tree into render entries.
//!
//! Entries are produced depth-first, children before their parent, so the
//! deepest error comes first and the outermost node is always the last entry.
//! Each entry records how many entries its subtree produced, which is enough
//! to walk the tree again from the flat list.

use alloc::string::String;
use alloc::vec::Vec;

use crate::classify::{Affix, classify};
use crate::error::ErrorRef;
use crate::printer::{Next, Printer};
use crate::stack::{Frame, elide_shared_suffix};

/// One rendered node.
pub(crate) struct FormatEntry<'a> {
    pub(crate) node: ErrorRef<'a>,
    /// Always-visible text.
    pub(crate) head: String,
    /// Text shown in the detailed view only.
    pub(crate) detail: String,
    /// Set when an ancestor's head already covers this node in the compact line.
    pub(crate) elide_head: bool,
    /// The node's own frames, after eliding the ones shared with the trace
    /// rendered below it.
    pub(crate) frames: Option<&'a [Frame]>,
    pub(crate) elided_frames: bool,
    /// Join nesting level. Children of a joined node sit one level deeper.
    pub(crate) depth: usize,
    /// Number of entries produced by this node's causes.
    pub(crate) descendants: usize,
}

pub(crate) struct Builder<'a> {
    entries: Vec<FormatEntry<'a>>,
    detailed: bool,
}

impl<'a> Builder<'a> {
    pub(crate) fn new(detailed: bool) -> Self {
        Self {
            entries: Vec::new(),
            detailed,
        }
    }

    /// Build the entry list for `root`. The root entry is last.
    pub(crate) fn run(mut self, root: ErrorRef<'a>) -> Vec<FormatEntry<'a>> {
        self.build(root, 0, None);
        self.entries
    }

    /// Append the entries for `node` and its causes.
    ///
    /// `last` is the full trace of the most recently processed node that had
    /// one; the updated cursor is returned with the number of entries the
    /// causes produced.
    fn build(
        &mut self,
        node: ErrorRef<'a>,
        depth: usize,
        mut last: Option<&'a [Frame]>,
    ) -> (usize, Option<&'a [Frame]>) {
        let start = self.entries.len();
        let causes = node.unwrap_multi();
        let single = if causes.is_empty() {
            node.unwrap_once()
        } else {
            None
        };

        if !causes.is_empty() {
            // Rightmost child first so traces elide toward the left, then put
            // the blocks back in reading order.
            let mut blocks = Vec::with_capacity(causes.len());
            for cause in causes.iter().rev() {
                let block_start = self.entries.len();
                let (_, next) = self.build(cause.as_ref(), depth + 1, last);
                last = next;
                blocks.push(self.entries.split_off(block_start));
            }
            for block in blocks.into_iter().rev() {
                self.entries.extend(block);
            }
        } else if let Some(cause) = single {
            let (_, next) = self.build(cause, depth, last);
            last = next;
        }

        let mut head = String::new();
        let mut detail = String::new();
        let printed = {
            let mut printer = Printer::new(&mut head, &mut detail, self.detailed);
            node.print(&mut printer)
        };
        let stop = match printed {
            Some(Next::Cause) => false,
            Some(Next::Stop) => true,
            None => match single {
                Some(cause) => {
                    let own = node.message();
                    let cause_message = cause.message();
                    let (label, affix) = classify(&own, &cause_message);
                    head.push_str(label);
                    affix == Affix::Replacement
                }
                None => {
                    head.push_str(&node.message());
                    true
                }
            },
        };
        if stop {
            for entry in &mut self.entries[start..] {
                entry.elide_head = true;
            }
        }

        let (frames, elided_frames) = match node.stack_trace() {
            Some(stack) => {
                let previous = last.unwrap_or(&[]);
                let (kept, trimmed) = elide_shared_suffix(previous, stack.frames());
                if !stack.is_empty() {
                    last = Some(stack.frames());
                }
                (Some(kept), trimmed)
            }
            None => (None, false),
        };

        let descendants = self.entries.len() - start;
        self.entries.push(FormatEntry {
            node,
            head,
            detail,
            elide_head: false,
            frames,
            elided_frames,
            depth,
            descendants,
        });
        (descendants, last)
    }
}

/// Indices of the direct children of `entries[index]`, left to right.
pub(crate) fn children_of(entries: &[FormatEntry<'_>], index: usize) -> Vec<usize> {
    let first = index - entries[index].descendants;
    let mut children = Vec::new();
    let mut cursor = index;
    while cursor > first {
        let child = cursor - 1;
        children.push(child);
        cursor = child - entries[child].descendants;
    }
    children.reverse();
    children
}
