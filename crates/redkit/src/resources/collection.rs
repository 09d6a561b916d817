//! Generic collection document.

use crate::record::Relation;
use crate::schema::{FieldRule, LinkRule, LinkSource, Resource, Source, text, uint};
use serde::Serialize;

/// A document that only lists member links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Collection {
    /// `Members@odata.count` as reported (may cover more pages than this one).
    pub member_count: u64,
    /// Link to the next page of members, if any.
    pub next_link: String,
}

impl Resource for Collection {
    const KIND: &'static str = "collection";

    const FIELDS: &'static [FieldRule<Self>] = &[
        FieldRule {
            name: "member_count",
            sources: &[Source::at("/Members@odata.count")],
            apply: |c, v| c.member_count = uint(v),
        },
        FieldRule {
            name: "next_link",
            sources: &[Source::at("/Members@odata.nextLink")],
            apply: |c, v| c.next_link = text(v),
        },
    ];

    const LINKS: &'static [LinkRule] = &[LinkRule {
        relation: Relation::Members,
        sources: &[LinkSource::Members("/Members"), LinkSource::Members("/members")],
    }];
}
