use std::collections::{HashMap, HashSet};

use crate::validators::Validator;

/// One declarative allow-list rule set. The article policy is the union of
/// several of these: an element or attribute survives if any sub-policy
/// allows it.
pub(crate) struct Policy {
    pub tags: &'static [&'static str],
    pub tag_attributes: &'static [(&'static str, &'static [&'static str])],
    /// Attributes allowed on every tag. A `"*"` validator entry covers them.
    pub generic_attributes: &'static [&'static str],
    pub validators: &'static [(&'static str, &'static str, Validator)],
    /// Tags removed from the output when the named attribute did not survive
    /// validation.
    pub require_attribute: &'static [(&'static str, &'static str)],
    /// Whether the configured `rel` value is forced onto links.
    pub force_link_rel: bool,
}

/// Structural elements, kept as-is.
pub(crate) const BLOCKS: Policy = Policy {
    tags: &[
        "blockquote", "div", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ol", "p", "pre", "ul",
    ],
    tag_attributes: &[],
    generic_attributes: &[],
    validators: &[],
    require_attribute: &[],
    force_link_rel: false,
};

/// Basic inline formatting.
pub(crate) const FORMATTING: Policy = Policy {
    tags: &[
        "b", "br", "code", "del", "em", "i", "ins", "s", "small", "span", "strike", "strong",
        "sub", "sup", "tt", "u",
    ],
    tag_attributes: &[],
    generic_attributes: &[],
    validators: &[],
    require_attribute: &[],
    force_link_rel: false,
};

/// Images with validated dimensions; `src` is completed against the feed
/// website URL.
pub(crate) const IMAGES: Policy = Policy {
    tags: &["img"],
    tag_attributes: &[("img", &["alt", "border", "height", "src", "width"])],
    generic_attributes: &[],
    validators: &[
        ("img", "border", Validator::Integer),
        ("img", "height", Validator::Integer),
        ("img", "src", Validator::CompleteUrl),
        ("img", "width", Validator::Integer),
    ],
    require_attribute: &[],
    force_link_rel: false,
};

/// Safe links: `href` completed against the feed website URL, `rel` forced.
pub(crate) const LINKS: Policy = Policy {
    tags: &["a"],
    tag_attributes: &[("a", &["href"])],
    generic_attributes: &[],
    validators: &[("a", "href", Validator::CompleteUrl)],
    require_attribute: &[],
    force_link_rel: true,
};

/// Inline styles, filtered to a conservative declaration set.
pub(crate) const STYLES: Policy = Policy {
    tags: &[],
    tag_attributes: &[],
    generic_attributes: &["style"],
    validators: &[("*", "style", Validator::Style)],
    require_attribute: &[],
    force_link_rel: false,
};

/// Video embeds: an iframe survives only with a whitelisted `src`.
pub(crate) const VIDEOS: Policy = Policy {
    tags: &["iframe"],
    tag_attributes: &[("iframe", &["height", "src", "width"])],
    generic_attributes: &[],
    validators: &[("iframe", "src", Validator::VideoEmbed)],
    require_attribute: &[("iframe", "src")],
    force_link_rel: false,
};

/// Union of sub-policies, in the shape the ammonia builder consumes.
pub(crate) struct UnionPolicy {
    pub tags: HashSet<&'static str>,
    pub tag_attributes: HashMap<&'static str, HashSet<&'static str>>,
    pub generic_attributes: HashSet<&'static str>,
    pub validators: Vec<(&'static str, &'static str, Validator)>,
    pub require_attribute: Vec<(&'static str, &'static str)>,
    pub force_link_rel: bool,
}

impl UnionPolicy {
    fn of(policies: &[&Policy]) -> Self {
        let mut union = UnionPolicy {
            tags: HashSet::new(),
            tag_attributes: HashMap::new(),
            generic_attributes: HashSet::new(),
            validators: Vec::new(),
            require_attribute: Vec::new(),
            force_link_rel: false,
        };
        for policy in policies {
            union.tags.extend(policy.tags.iter().copied());
            for (tag, attributes) in policy.tag_attributes.iter().copied() {
                union
                    .tag_attributes
                    .entry(tag)
                    .or_default()
                    .extend(attributes.iter().copied());
            }
            union
                .generic_attributes
                .extend(policy.generic_attributes.iter().copied());
            union.validators.extend(policy.validators.iter().copied());
            union
                .require_attribute
                .extend(policy.require_attribute.iter().copied());
            union.force_link_rel |= policy.force_link_rel;
        }
        union
    }
}

/// The composite policy for article bodies.
pub(crate) fn article_policy(allow_videos: bool) -> UnionPolicy {
    let mut policies: Vec<&Policy> = vec![&BLOCKS, &FORMATTING, &IMAGES, &LINKS, &STYLES];
    if allow_videos {
        policies.push(&VIDEOS);
    }
    UnionPolicy::of(&policies)
}

/// Validator registered for `(element, attribute)`, if any; `"*"` entries
/// match every element.
pub(crate) fn validator_for(
    validators: &[(&str, &str, Validator)],
    element: &str,
    attribute: &str,
) -> Option<Validator> {
    validators
        .iter()
        .find(|(el, attr, _)| (*el == element || *el == "*") && *attr == attribute)
        .map(|(_, _, validator)| *validator)
}
