use crate::color::{self, CategoryColors};
use crate::config::LayoutConfig;
use crate::dataset::{DatasetError, RawNode};
use crate::hierarchy::Hierarchy;
use crate::layout::{compute_layout, Layout, LegendItemLayout, TileLayout};
use crate::theme::Theme;

/// One loaded visualization: the aggregated tree, its computed geometry,
/// and the category color mapping.
///
/// State is immutable after `create`; a new dataset replaces everything
/// wholesale via [`Visualization::replace`]. Teardown is `Drop`.
#[derive(Debug, Clone)]
pub struct Visualization {
    hierarchy: Hierarchy,
    colors: CategoryColors,
    layout: Layout,
}

impl Visualization {
    pub fn create(
        raw: &RawNode,
        theme: &Theme,
        config: &LayoutConfig,
    ) -> Result<Self, DatasetError> {
        let mut hierarchy = Hierarchy::build(raw)?;
        let layout = compute_layout(&mut hierarchy, theme, config);
        // Same pure assignment the layout ran, so lookups here always agree
        // with the rendered tiles and legend.
        let colors = color::assign(hierarchy.categories(), &theme.category_colors);
        Ok(Self {
            hierarchy,
            colors,
            layout,
        })
    }

    /// Rebuilds from a new dataset. No incremental update: on failure the
    /// previous state is kept untouched.
    pub fn replace(
        &mut self,
        raw: &RawNode,
        theme: &Theme,
        config: &LayoutConfig,
    ) -> Result<(), DatasetError> {
        *self = Self::create(raw, theme, config)?;
        Ok(())
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn colors(&self) -> &CategoryColors {
        &self.colors
    }

    pub fn tiles(&self) -> &[TileLayout] {
        &self.layout.tiles
    }

    pub fn legend(&self) -> &[LegendItemLayout] {
        &self.layout.legend
    }
}
