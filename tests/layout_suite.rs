use std::path::Path;

use fundmap::hierarchy::{Hierarchy, NodeId};
use fundmap::layout::compute_layout;
use fundmap::render::{render_svg, tooltip_text};
use fundmap::{LayoutConfig, Theme, parse_dataset};

// Keep this list explicit so new dataset shapes must be added intentionally.
const FIXTURES: [&str; 6] = [
    "funding/basic.json",
    "funding/skewed.json",
    "funding/ties.json",
    "funding/zero_group.json",
    "funding/deep.json",
    "funding/single_leaf.json",
];

fn fixture_path(rel: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel)
}

fn build_fixture(rel: &str) -> (Hierarchy, fundmap::Layout) {
    let input = std::fs::read_to_string(fixture_path(rel)).expect("fixture read failed");
    let raw = parse_dataset(&input).expect("parse failed");
    let mut tree = Hierarchy::build(&raw).expect("build failed");
    let layout = compute_layout(&mut tree, &Theme::classic(), &LayoutConfig::default());
    (tree, layout)
}

fn assert_partitioned(tree: &Hierarchy, id: NodeId, fixture: &str) {
    let node = tree.node(id);
    if node.is_leaf() {
        return;
    }
    if node.aggregate <= 0.0 {
        // Zero-aggregate subtrees collapse to zero area by design.
        for &child in &node.children {
            assert!(
                tree.node(child).rect.is_degenerate(),
                "{fixture}: zero subtree `{}` kept area",
                tree.node(child).name
            );
        }
        return;
    }
    let child_area: f32 = node
        .children
        .iter()
        .map(|&child| tree.node(child).rect.area())
        .sum();
    let tolerance = node.rect.area() * 1e-4 + 1e-2;
    assert!(
        (child_area - node.rect.area()).abs() <= tolerance,
        "{fixture}: children of `{}` cover {child_area} of {}",
        node.name,
        node.rect.area()
    );
    for (i, &a) in node.children.iter().enumerate() {
        for &b in &node.children[i + 1..] {
            let ra = tree.node(a).rect;
            let rb = tree.node(b).rect;
            let overlap_w = (ra.x1.min(rb.x1) - ra.x0.max(rb.x0)).max(0.0);
            let overlap_h = (ra.y1.min(rb.y1) - ra.y0.max(rb.y0)).max(0.0);
            assert!(
                overlap_w * overlap_h < 0.5,
                "{fixture}: siblings `{}` and `{}` overlap",
                tree.node(a).name,
                tree.node(b).name
            );
        }
    }
    for &child in &node.children {
        assert_partitioned(tree, child, fixture);
    }
}

#[test]
fn render_all_fixtures() {
    for rel in FIXTURES {
        let path = fixture_path(rel);
        assert!(path.exists(), "fixture missing: {rel}");
        let (_, layout) = build_fixture(rel);
        let svg = render_svg(&layout, &Theme::classic(), &LayoutConfig::default());
        assert!(svg.contains("<svg"), "{rel}: missing <svg tag");
        assert!(svg.contains("</svg>"), "{rel}: missing </svg tag");
        assert!(svg.contains("class=\"tile\""), "{rel}: no tiles rendered");
    }
}

#[test]
fn every_fixture_partitions_its_canvas() {
    for rel in FIXTURES {
        let (tree, _) = build_fixture(rel);
        assert_partitioned(&tree, tree.root(), rel);
    }
}

#[test]
fn aggregates_are_conserved() {
    for rel in FIXTURES {
        let input = std::fs::read_to_string(fixture_path(rel)).expect("fixture read failed");
        let raw = parse_dataset(&input).expect("parse failed");
        let tree = Hierarchy::build(&raw).expect("build failed");

        fn leaf_sum(raw: &fundmap::RawNode) -> f64 {
            match raw.children.as_deref() {
                Some(children) => children.iter().map(leaf_sum).sum(),
                None => raw.value.unwrap_or(0.0),
            }
        }
        assert_eq!(tree.total_value(), leaf_sum(&raw), "{rel}: aggregate drift");
    }
}

#[test]
fn rendering_is_deterministic() {
    for rel in FIXTURES {
        let (_, first) = build_fixture(rel);
        let (_, second) = build_fixture(rel);
        let svg_a = render_svg(&first, &Theme::classic(), &LayoutConfig::default());
        let svg_b = render_svg(&second, &Theme::classic(), &LayoutConfig::default());
        assert_eq!(svg_a, svg_b, "{rel}: non-deterministic output");
    }
}

#[test]
fn tiles_agree_with_legend_colors() {
    for rel in FIXTURES {
        let (_, layout) = build_fixture(rel);
        for tile in &layout.tiles {
            let legend_color = layout
                .legend
                .iter()
                .find(|item| item.category == tile.category)
                .map(|item| item.color.as_str());
            assert_eq!(
                legend_color,
                Some(tile.color.as_str()),
                "{rel}: `{}` disagrees with legend",
                tile.category
            );
        }
    }
}

#[test]
fn tooltip_contract_holds_for_every_tile() {
    for rel in FIXTURES {
        let (_, layout) = build_fixture(rel);
        for tile in &layout.tiles {
            let tooltip = tooltip_text(tile);
            assert!(tooltip.starts_with("Name: "), "{rel}: {tooltip}");
            assert!(tooltip.contains(", Category: "), "{rel}: {tooltip}");
            assert!(tooltip.contains(", Value: "), "{rel}: {tooltip}");
            assert!(!tile.name.is_empty());
            assert!(!tile.category.is_empty());
        }
    }
}

#[test]
fn tied_siblings_keep_declaration_order() {
    let (tree, layout) = build_fixture("funding/ties.json");
    let names: Vec<&str> = tree
        .node(tree.root())
        .children
        .iter()
        .map(|&id| tree.node(id).name.as_str())
        .collect();
    assert_eq!(names, vec!["FirstDeclared", "SecondDeclared", "ThirdDeclared"]);
    // Tiles come out in the same order.
    let tile_names: Vec<&str> = layout.tiles.iter().map(|tile| tile.name.as_str()).collect();
    assert_eq!(
        tile_names,
        vec!["FirstDeclared", "SecondDeclared", "ThirdDeclared"]
    );
}

#[test]
fn single_leaf_dataset_fills_the_canvas() {
    let (tree, layout) = build_fixture("funding/single_leaf.json");
    assert_eq!(layout.tiles.len(), 1);
    let tile = &layout.tiles[0];
    let config = LayoutConfig::default();
    assert_eq!(tile.rect.width(), config.treemap.width);
    assert_eq!(tile.rect.height(), config.treemap.height);
    assert_eq!(tile.category, "Art");
    assert_eq!(tree.total_value(), 7500.0);
}
