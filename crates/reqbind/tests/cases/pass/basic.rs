// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use reqbind::{Bind, Schema};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, Bind)]
#[serde(default)]
pub struct ListUsers {
    #[bind(url = "org", rules = "required")]
    pub org: i64,

    #[bind(query = "page", default = "1", rules = "min=1")]
    pub page: u32,

    #[bind(header = "X-Locale, Accept-Language", default = "en")]
    pub locale: String,

    #[bind(query = "active")]
    pub active: Option<bool>,

    pub note: String,
}

fn main() {
    assert_eq!(ListUsers::DESCRIPTORS.len(), 5);
    assert_eq!(ListUsers::DESCRIPTORS[2].header_key(), Some("X-Locale"));
}
