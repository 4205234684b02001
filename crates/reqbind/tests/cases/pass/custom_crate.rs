// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

mod runtime {
    pub use reqbind::*;
}

use reqbind::Bind;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, Bind)]
#[serde(default)]
#[bind(crate = "runtime")]
pub struct Ping {
    #[bind(query = "type")]
    pub r#type: String,
}

fn main() {
    use runtime::Schema;
    assert_eq!(Ping::DESCRIPTORS[0].name(), "type");
}
