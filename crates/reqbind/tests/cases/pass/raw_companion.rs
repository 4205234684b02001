// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use reqbind::{Bind, Schema};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, Bind)]
#[serde(default)]
pub struct Upload {
    #[bind(query = "meta")]
    pub meta_json: Option<String>,

    #[serde(skip)]
    #[bind(raw = "meta_json")]
    pub meta: BTreeMap<String, serde_json::Value>,

    #[bind(query = "ids")]
    pub ids_json: String,

    #[bind(raw = "ids_json", rules = "omitempty,max=10")]
    pub ids: Vec<u64>,
}

fn main() {
    assert_eq!(Upload::DESCRIPTORS[1].raw_companion(), Some("meta_json"));
    assert_eq!(Upload::DESCRIPTORS[1].json_key(), None);
}
