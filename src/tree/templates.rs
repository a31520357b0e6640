//! Starter contents for files built without an inlined content block.

use crate::tree::path::PathEntry;

/// Default content keyed by lowercase extension (without the dot).
const DEFAULT_CONTENT: &[(&str, &str)] = &[
    ("php", "<?php\n\n"),
    ("yaml", "# YAML configuration\n"),
    ("yml", "# YAML configuration\n"),
    ("json", "{\n}\n"),
    (
        "html",
        "<!DOCTYPE html>\n<html>\n<head>\n</head>\n<body>\n</body>\n</html>\n",
    ),
    ("twig", "{# Twig template #}\n"),
    ("md", "# Document\n"),
    ("txt", ""),
    ("py", "#!/usr/bin/env python3\n\n"),
    ("sh", "#!/bin/bash\n\n"),
    ("bat", "@echo off\n"),
];

/// Starter content for `entry`; unknown or missing extensions map to "".
pub fn default_content_for(entry: &PathEntry) -> &'static str {
    entry
        .extension()
        .and_then(|ext| {
            DEFAULT_CONTENT
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, content)| *content)
        })
        .unwrap_or("")
}
