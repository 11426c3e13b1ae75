pub mod builder;

pub use builder::{build, GameTree, NodeKind, TerminalData, TreeNode};
