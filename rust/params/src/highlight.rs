// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Highlight and selection state
//!
//! Named element groups shared between the component and the presentation
//! layer, as an explicit state object rather than ambient globals. The
//! component owns one instance; the presentation layer reads and writes it
//! by reference. State starts empty and the restrictor clears it on record
//! deselection.

use ids_lite_core::ElementIdMap;
use rustc_hash::FxHashMap;

/// Group holding the elements a record may be applied to
pub const RESTRICTION_GROUP: &str = "selectable";

/// Group holding the user's active selection
pub const SELECTION_GROUP: &str = "select";

/// sRGB color of a highlight group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Visual style of one group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupStyle {
    pub color: Rgb,
}

impl Default for GroupStyle {
    /// The yellow used for restricted-but-selectable elements
    fn default() -> Self {
        Self {
            color: Rgb {
                r: 248,
                g: 236,
                b: 60,
            },
        }
    }
}

/// Mutable highlight state: named groups plus an optional selectable set
#[derive(Debug, Default)]
pub struct HighlightState {
    groups: FxHashMap<String, ElementIdMap>,
    styles: FxHashMap<String, GroupStyle>,
    /// When set, only these elements may enter the selection group
    selectable: Option<ElementIdMap>,
}

impl HighlightState {
    /// Create empty state with the restriction group styled
    pub fn new() -> Self {
        let mut state = Self::default();
        state.set_style(RESTRICTION_GROUP, GroupStyle::default());
        state
    }

    /// Set the style of a group
    pub fn set_style(&mut self, name: impl Into<String>, style: GroupStyle) {
        self.styles.insert(name.into(), style);
    }

    /// Style of a group, if one was set
    pub fn style(&self, name: &str) -> Option<GroupStyle> {
        self.styles.get(name).copied()
    }

    /// Highlight elements under a group name
    ///
    /// Non-additive calls replace the group's previous content.
    pub fn highlight(&mut self, name: &str, ids: &ElementIdMap, additive: bool) {
        let group = self.groups.entry(name.to_string()).or_default();
        if !additive {
            group.clear();
        }
        for (model_id, elements) in ids {
            group
                .entry(model_id.clone())
                .or_default()
                .extend(elements.iter().copied());
        }
    }

    /// Empty one group
    pub fn clear(&mut self, name: &str) {
        if let Some(group) = self.groups.get_mut(name) {
            group.clear();
        }
    }

    /// Current content of a group; empty if the group was never touched
    pub fn group(&self, name: &str) -> Option<&ElementIdMap> {
        self.groups.get(name)
    }

    /// True when a group holds no elements
    pub fn is_clear(&self, name: &str) -> bool {
        self.groups
            .get(name)
            .map(|g| g.values().all(|ids| ids.is_empty()))
            .unwrap_or(true)
    }

    /// Restrict future selections to the given elements
    pub fn set_selectable(&mut self, ids: ElementIdMap) {
        self.selectable = Some(ids);
    }

    /// Drop the selection restriction
    pub fn clear_selectable(&mut self) {
        self.selectable = None;
    }

    /// The restriction set, when one is installed
    pub fn selectable(&self) -> Option<&ElementIdMap> {
        self.selectable.as_ref()
    }

    /// Check whether an element may be selected under the current
    /// restriction
    pub fn is_selectable(&self, model_id: &str, element: u32) -> bool {
        match &self.selectable {
            None => true,
            Some(ids) => ids
                .get(model_id)
                .map(|set| set.contains(&element))
                .unwrap_or(false),
        }
    }

    /// Add one element to the selection group, honoring the restriction
    ///
    /// This is the presentation layer's entry point for click-selection.
    /// Returns false when the element is outside the selectable set.
    pub fn select(&mut self, model_id: &str, element: u32) -> bool {
        if !self.is_selectable(model_id, element) {
            return false;
        }
        self.groups
            .entry(SELECTION_GROUP.to_string())
            .or_default()
            .entry(model_id.to_string())
            .or_default()
            .insert(element);
        true
    }

    /// Current selection as an element-id map
    pub fn selection(&self) -> ElementIdMap {
        self.groups
            .get(SELECTION_GROUP)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn ids(model: &str, elements: &[u32]) -> ElementIdMap {
        let mut map = ElementIdMap::default();
        map.insert(model.to_string(), FxHashSet::from_iter(elements.iter().copied()));
        map
    }

    #[test]
    fn test_highlight_additive_and_replace() {
        let mut state = HighlightState::new();

        state.highlight(RESTRICTION_GROUP, &ids("m", &[1, 2]), false);
        state.highlight(RESTRICTION_GROUP, &ids("m", &[3]), true);
        assert_eq!(state.group(RESTRICTION_GROUP).unwrap()["m"].len(), 3);

        state.highlight(RESTRICTION_GROUP, &ids("m", &[9]), false);
        assert_eq!(state.group(RESTRICTION_GROUP).unwrap()["m"].len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut state = HighlightState::new();
        state.highlight(SELECTION_GROUP, &ids("m", &[1]), false);
        assert!(!state.is_clear(SELECTION_GROUP));

        state.clear(SELECTION_GROUP);
        assert!(state.is_clear(SELECTION_GROUP));
    }

    #[test]
    fn test_selectable_gating() {
        let mut state = HighlightState::new();

        // No restriction: everything selectable
        assert!(state.select("m", 7));

        state.set_selectable(ids("m", &[1, 2]));
        assert!(state.is_selectable("m", 1));
        assert!(!state.is_selectable("m", 7));
        assert!(!state.is_selectable("other", 1));
        assert!(!state.select("m", 7));
        assert!(state.select("m", 2));

        state.clear_selectable();
        assert!(state.is_selectable("m", 7));
    }

    #[test]
    fn test_restriction_group_has_default_style() {
        let state = HighlightState::new();
        let style = state.style(RESTRICTION_GROUP).unwrap();
        assert_eq!(style.color, Rgb { r: 248, g: 236, b: 60 });
    }
}
