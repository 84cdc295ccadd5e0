//! Cascading option resolution.
//!
//! Options are evaluated left to right. The values offered at index `i` are
//! those still reachable given the concrete picks at lower indices; a pick
//! that is no longer reachable is cleared together with every pick after it.

use storefront_core::product::distinct_values;
use storefront_core::Variant;

/// Selection state: one slot per option, `None` when unselected.
pub type Selection = Vec<Option<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    /// The input selection with unreachable picks cleared.
    pub selection: Selection,
    /// Reachable values per option index, first-seen order. Empty when the
    /// product has no variants.
    pub legal_values: Vec<Vec<&'a str>>,
    /// Set only when every slot is concrete and names an existing variant.
    pub variant: Option<&'a Variant>,
}

impl Resolution<'_> {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.selection.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn variant_id(&self) -> Option<u64> {
        self.variant.map(|v| v.id)
    }
}

/// Resolves `selection` against `variants`.
///
/// Missing trailing slots are treated as unselected; extra slots beyond
/// `option_count` are ignored.
#[must_use]
pub fn resolve<'a>(
    variants: &'a [Variant],
    option_count: usize,
    selection: &[Option<String>],
) -> Resolution<'a> {
    if variants.is_empty() {
        return Resolution {
            selection: vec![None; option_count],
            legal_values: Vec::new(),
            variant: None,
        };
    }

    let mut chosen: Selection = Vec::with_capacity(option_count);
    let mut legal_values = Vec::with_capacity(option_count);
    let mut invalidated = false;

    for index in 0..option_count {
        let reachable = variants.iter().filter(|v| matches_prefix(v, &chosen));
        let legal = distinct_values(reachable, index);

        let requested = if invalidated {
            None
        } else {
            selection.get(index).cloned().flatten()
        };
        let kept = match requested {
            Some(value) if legal.contains(&value.as_str()) => Some(value),
            Some(value) => {
                tracing::debug!(index, %value, "selection no longer reachable; clearing");
                invalidated = true;
                None
            }
            None => None,
        };

        chosen.push(kept);
        legal_values.push(legal);
    }

    let variant = if chosen.iter().all(Option::is_some) {
        variants.iter().find(|v| matches_prefix(v, &chosen))
    } else {
        None
    };

    Resolution {
        selection: chosen,
        legal_values,
        variant,
    }
}

/// Selection that resolves to `variant`.
#[must_use]
pub fn selection_for(variant: &Variant) -> Selection {
    variant.options.iter().cloned().map(Some).collect()
}

/// `true` when `variant` agrees with every concrete slot of `chosen`.
fn matches_prefix(variant: &Variant, chosen: &[Option<String>]) -> bool {
    chosen.iter().enumerate().all(|(index, slot)| {
        slot.as_deref()
            .is_none_or(|value| variant.options.get(index).map(String::as_str) == Some(value))
    })
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
