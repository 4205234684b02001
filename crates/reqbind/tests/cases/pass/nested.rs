// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use reqbind::{Bind, Schema};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, Bind)]
#[serde(default)]
pub struct Range {
    #[bind(query = "from", rules = "gte=0")]
    pub from: i32,

    #[bind(query = "to")]
    pub to: i32,
}

#[derive(Debug, Default, Deserialize, Bind)]
#[serde(default, rename_all = "camelCase")]
pub struct Report {
    #[bind(recurse)]
    pub range: Range,

    #[bind(recurse, rules = "required")]
    pub compare_to: Option<Range>,

    #[bind(nested)]
    pub extra: Option<Range>,
}

fn main() {
    let descriptors = Report::DESCRIPTORS;
    assert!(descriptors[0].recurses());
    assert!(descriptors[1].kind().is_optional());
    assert_eq!(descriptors[1].json_key(), Some("compareTo"));
    assert!(!descriptors[2].recurses());
}
