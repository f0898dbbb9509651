//! Helpers for unit and integration tests.

use std::sync::Once;

use tracing::{debug, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::RawNode;

static TEST_SETUP: Once = Once::new();

/// Installs a tracing subscriber for the test process, once.
///
/// `RUST_LOG` wins when set; otherwise everything from this crate is traced
/// and the config crate is kept quiet.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("treecheck=trace,config=warn"));
        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter);

        if let Err(e) = tracing_subscriber::registry().with(layer).try_init() {
            eprintln!("Error: Failed to set up logging: {}", e);
        }
        debug!("test logging initialized");
    });
}

/// Builds a raw forest from an indented outline, two spaces per level.
///
/// Each line holds a key followed by optional flags: `disabled`, `group`,
/// `ghost` and `not-loaded`.
///
/// ```
/// use treecheck::util::testing::outline;
///
/// let forest = outline(
///     "
///     0
///       0-0 disabled
///         0-0-0
///       0-1 not-loaded
///     ",
/// );
/// assert_eq!(forest.len(), 1);
/// assert!(forest[0].children.as_ref().unwrap()[0].disabled);
/// ```
pub fn outline(text: &'static str) -> Vec<RawNode<&'static str>> {
    let lines: Vec<&'static str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    let margin = lines.iter().map(|line| indent(line)).min().unwrap_or(0);

    let mut roots = Vec::new();
    let mut open: Vec<(usize, RawNode<&'static str>)> = Vec::new();
    for line in lines {
        let depth = (indent(line) - margin) / 2;
        while open.last().is_some_and(|(d, _)| *d >= depth) {
            close_last(&mut open, &mut roots);
        }
        open.push((depth, parse_line(line.trim())));
    }
    while !open.is_empty() {
        close_last(&mut open, &mut roots);
    }
    roots
}

fn indent(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn parse_line(line: &'static str) -> RawNode<&'static str> {
    let mut parts = line.split_whitespace();
    let key = parts.next().unwrap_or_default();
    parts.fold(RawNode::leaf(key), |node, flag| match flag {
        "disabled" => node.disabled(),
        "group" => node.group(),
        "ghost" => node.ghost(),
        "not-loaded" => RawNode {
            is_leaf: Some(false),
            ..node
        },
        other => {
            warn!(key, flag = other, "ignoring unknown outline flag");
            node
        }
    })
}

fn close_last(open: &mut Vec<(usize, RawNode<&'static str>)>, roots: &mut Vec<RawNode<&'static str>>) {
    let Some((_, node)) = open.pop() else {
        return;
    };
    match open.last_mut() {
        Some((_, parent)) => parent.children.get_or_insert_with(Vec::new).push(node),
        None => roots.push(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NodeType;

    #[test]
    fn given_repeated_calls_when_initializing_then_no_panic() {
        init_test_setup();
        init_test_setup();
    }

    #[test]
    fn given_outline_when_parsed_then_nests_by_indent() {
        let forest = outline(
            "
            a group
              a-0
                a-0-0 ghost
              a-1 not-loaded
            b disabled
            ",
        );
        assert_eq!(forest.len(), 2);
        let a = &forest[0];
        assert_eq!(a.node_type, NodeType::Group);
        let children = a.children.as_ref().unwrap();
        assert_eq!(children.iter().map(|c| c.key).collect::<Vec<_>>(), vec!["a-0", "a-1"]);
        assert_eq!(children[0].children.as_ref().unwrap()[0].node_type, NodeType::Ghost);
        assert!(children[1].is_explicitly_not_loaded());
        assert!(forest[1].disabled);
        assert!(forest[1].is_leaf());
    }
}
