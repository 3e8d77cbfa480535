// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! File attachments. The blob itself lives in the sync framework.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/src/lib/generated/")
)]
pub struct FileAttachment {
    pub id: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Ids of the activities, accommodation or transportation this file belongs to
    #[serde(default)]
    pub references: Vec<String>,
}

impl FileAttachment {
    pub fn is_attached_to(&self, entity_id: &str) -> bool {
        self.references.iter().any(|r| r == entity_id)
    }
}
