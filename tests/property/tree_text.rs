//! Property-based tests for tree-text line handling

use fstree::tree::format::{line_depth, BLANK_PREFIX, BRANCH, LAST_BRANCH, PIPE_PREFIX};
use fstree::tree::parse_tree_text;
use proptest::prelude::*;

proptest! {
    /// Depth follows the connector column whatever mix of prefixes precedes it
    #[test]
    fn test_depth_from_connector_column(
        prefixes in prop::collection::vec(any::<bool>(), 0..8),
        last in any::<bool>(),
        name in "[a-z][a-z0-9_.]{0,8}",
    ) {
        let mut line: String = prefixes
            .iter()
            .map(|pipe| if *pipe { PIPE_PREFIX } else { BLANK_PREFIX })
            .collect();
        line.push_str(if last { LAST_BRANCH } else { BRANCH });
        line.push_str(&name);

        prop_assert_eq!(line_depth(&line), prefixes.len() + 1);
    }

    /// Trailing comments never change the parsed entries
    #[test]
    fn test_comments_do_not_change_structure(
        names in prop::collection::vec("[a-z][a-z0-9_]{0,6}", 1..6),
        comment in "[ a-z0-9#]{0,12}",
    ) {
        let mut plain = String::from("root/\n");
        let mut commented = String::from("root/  # the root\n");
        for (idx, name) in names.iter().enumerate() {
            let connector = if idx + 1 == names.len() { LAST_BRANCH } else { BRANCH };
            let line = format!("{}{}/\n    {}{}.txt", connector, name, LAST_BRANCH, name);
            plain.push_str(&line);
            plain.push('\n');
            commented.push_str(&line);
            commented.push_str(&format!("  #{}\n", comment));
        }

        let plain = parse_tree_text(&plain);
        let commented = parse_tree_text(&commented);
        prop_assert_eq!(plain.entries, commented.entries);
        prop_assert_eq!(plain.root, commented.root);
    }
}
