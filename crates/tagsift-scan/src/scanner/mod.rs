//! The scanner state machine.
//!
//! One scan walks the input once, character by character. Each
//! [`ScanState`] has a handler that looks at the current character and
//! either accumulates it, changes state, or reports a finished construct.
//!
//! Events of a tag are staged until its `>` is seen: a tag cut short by end
//! of input or by another `<` is handed back as character data, and its
//! staged events are never delivered.

mod entity_ref;
mod helpers;
mod machine;
mod markup;
mod tag;

pub use machine::{ScanState, Scanner};
