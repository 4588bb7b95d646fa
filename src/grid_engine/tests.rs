use crate::common::config::{DragSettings, EngineSettings};
use crate::grid_engine::{GridEngine, MagneticWidth, PreviewDecision, ResizeEdge};
use crate::model::{FieldId, Layout, Placement, PointerPos};

const CONTAINER: f64 = 600.0;

fn f(raw: u32) -> FieldId {
    FieldId(raw)
}

fn at(x: f64, y: f64, width: f64) -> Placement {
    Placement::visible(x, y, width)
}

fn p(x: f64, y: f64) -> PointerPos {
    PointerPos { x, y }
}

/// Settings with the drag threshold and preview throttle zeroed so a single
/// pointer move promotes the drag and recomputes the preview.
fn instant_settings() -> EngineSettings {
    EngineSettings {
        drag: DragSettings { drag_threshold: 0.0, preview_throttle_ms: 0 },
        ..EngineSettings::default()
    }
}

fn engine_with(defaults: impl IntoIterator<Item = (FieldId, Placement)>) -> GridEngine {
    GridEngine::new(instant_settings(), defaults)
}

fn assert_no_overlaps(engine: &GridEngine) {
    let layout = engine.layout();
    let grid = engine.grid();
    for row in layout.occupied_rows(grid) {
        let occupants = layout.row_occupants(grid, row, None);
        for pair in occupants.windows(2) {
            assert!(
                pair[0].end_column() < pair[1].start_column,
                "row {row}: {} and {} overlap",
                pair[0].id,
                pair[1].id,
            );
        }
    }
}

fn assert_magnetic_widths(engine: &GridEngine) {
    for (id, _, width) in engine.layout().visible() {
        let snapped = MagneticWidth::nearest(width).fraction();
        assert!(
            (width - snapped).abs() < 1e-9,
            "{id} rests at non-magnetic width {width}",
        );
    }
}

mod drag_commit {
    use test_log::test;

    use super::*;

    #[test]
    fn dragged_field_expands_into_a_larger_gap() {
        // Half-width field dragged into a row whose free run is four columns.
        let mut engine = engine_with([
            (f(1), at(0.0, 0.0, 0.5)),
            (f(2), at(4.0 / 6.0, 80.0, 1.0 / 3.0)),
        ]);
        engine.on_drag_start(f(1), p(10.0, 10.0));
        let update = engine.on_drag_move(p(10.0, 110.0), CONTAINER);
        let preview = update.preview.expect("preview after promotion");
        assert_eq!(
            preview.decision,
            PreviewDecision::Resized { from: MagneticWidth::Half, to: MagneticWidth::TwoThirds },
        );
        engine.on_drag_end();

        // Row 0 emptied out, so the combined row reflows to the top.
        pretty_assertions::assert_eq!(
            engine.layout().get(f(1)),
            Some(at(0.0, 0.0, 2.0 / 3.0)),
        );
        pretty_assertions::assert_eq!(
            engine.layout().get(f(2)),
            Some(at(4.0 / 6.0, 0.0, 1.0 / 3.0)),
        );
        assert_no_overlaps(&engine);
        assert_magnetic_widths(&engine);
    }

    #[test]
    fn dragged_field_shrinks_into_a_smaller_gap() {
        // Target row only has two free columns, so the half-width field
        // shrinks to a third on commit.
        let mut engine = engine_with([
            (f(1), at(0.0, 0.0, 0.5)),
            (f(3), at(0.5, 0.0, 0.5)),
            (f(2), at(0.0, 80.0, 2.0 / 3.0)),
        ]);
        engine.on_drag_start(f(1), p(10.0, 10.0));
        let update = engine.on_drag_move(p(10.0, 110.0), CONTAINER);
        assert_eq!(
            update.preview.expect("preview after promotion").decision,
            PreviewDecision::Resized { from: MagneticWidth::Half, to: MagneticWidth::Third },
        );
        engine.on_drag_end();

        pretty_assertions::assert_eq!(
            engine.layout().get(f(1)),
            Some(at(4.0 / 6.0, 80.0, 1.0 / 3.0)),
        );
        // Left alone in row 0, the remaining field grows to full width.
        pretty_assertions::assert_eq!(engine.layout().get(f(3)), Some(at(0.0, 0.0, 1.0)));
        assert_no_overlaps(&engine);
        assert_magnetic_widths(&engine);
    }

    #[test]
    fn dragged_field_shrinks_into_a_gap_between_neighbours() {
        // Row 0 holds third-width fields in its outer columns; the
        // two-column gap between them shrinks the half-width field.
        let mut engine = engine_with([
            (f(1), at(0.0, 0.0, 1.0 / 3.0)),
            (f(3), at(4.0 / 6.0, 0.0, 1.0 / 3.0)),
            (f(2), at(0.0, 80.0, 0.5)),
        ]);
        engine.on_drag_start(f(2), p(10.0, 90.0));
        let update = engine.on_drag_move(p(10.0, 10.0), CONTAINER);
        assert_eq!(
            update.preview.expect("preview after promotion").decision,
            PreviewDecision::Resized { from: MagneticWidth::Half, to: MagneticWidth::Third },
        );
        engine.on_drag_end();

        pretty_assertions::assert_eq!(
            engine.layout().get(f(2)),
            Some(at(2.0 / 6.0, 0.0, 1.0 / 3.0)),
        );
        // The fields on either side keep their columns.
        pretty_assertions::assert_eq!(engine.layout().get(f(1)), Some(at(0.0, 0.0, 1.0 / 3.0)));
        pretty_assertions::assert_eq!(
            engine.layout().get(f(3)),
            Some(at(4.0 / 6.0, 0.0, 1.0 / 3.0)),
        );
        assert_no_overlaps(&engine);
        assert_magnetic_widths(&engine);
    }

    #[test]
    fn drop_on_a_full_row_takes_the_next_free_slot() {
        let mut engine = engine_with([
            (f(1), at(0.0, 0.0, 0.5)),
            (f(3), at(0.5, 0.0, 0.5)),
            (f(2), at(0.0, 80.0, 1.0)),
        ]);
        engine.on_drag_start(f(1), p(10.0, 10.0));
        let update = engine.on_drag_move(p(10.0, 110.0), CONTAINER);
        assert_eq!(
            update.preview.expect("preview after promotion").decision,
            PreviewDecision::PushedDown,
        );
        engine.on_drag_end();

        pretty_assertions::assert_eq!(engine.layout().get(f(1)), Some(at(0.0, 160.0, 0.5)));
        // No gap fill on this path: the field left behind keeps its width.
        pretty_assertions::assert_eq!(engine.layout().get(f(3)), Some(at(0.5, 0.0, 0.5)));
        pretty_assertions::assert_eq!(engine.layout().get(f(2)), Some(at(0.0, 80.0, 1.0)));
        assert_no_overlaps(&engine);
    }

    #[test]
    fn cancel_restores_the_resting_layout() {
        let mut engine = engine_with([
            (f(1), at(0.0, 0.0, 0.5)),
            (f(2), at(0.0, 80.0, 1.0)),
        ]);
        let before = engine.layout().clone();
        engine.on_drag_start(f(1), p(10.0, 10.0));
        let _ = engine.on_drag_move(p(400.0, 500.0), CONTAINER);
        engine.cancel_drag();
        pretty_assertions::assert_eq!(*engine.layout(), before);
        assert!(!engine.is_dragging());
    }
}

mod push_down_preview {
    use test_log::test;

    use super::*;

    #[test]
    fn occupants_of_the_hovered_row_shift_down_in_the_preview() {
        let mut engine = engine_with([
            (f(1), at(0.0, 0.0, 0.5)),
            (f(3), at(0.5, 0.0, 0.5)),
            (f(2), at(0.0, 80.0, 1.0)),
        ]);
        engine.on_drag_start(f(1), p(10.0, 10.0));
        let update = engine.on_drag_move(p(10.0, 110.0), CONTAINER);
        let preview = update.preview.expect("preview after promotion");

        assert!(!preview.has_space());
        pretty_assertions::assert_eq!(preview.layout.get(f(1)), Some(at(0.0, 80.0, 0.5)));
        pretty_assertions::assert_eq!(preview.layout.get(f(2)), Some(at(0.0, 160.0, 1.0)));
        // Rows above the hovered one are untouched.
        pretty_assertions::assert_eq!(preview.layout.get(f(3)), Some(at(0.5, 0.0, 0.5)));
        // The resting layout has not moved.
        pretty_assertions::assert_eq!(engine.layout().get(f(2)), Some(at(0.0, 80.0, 1.0)));
    }

    #[test]
    fn hovering_the_same_row_twice_yields_the_same_preview() {
        let mut engine = engine_with([
            (f(1), at(0.0, 0.0, 0.5)),
            (f(3), at(0.5, 0.0, 0.5)),
            (f(2), at(0.0, 80.0, 1.0)),
        ]);
        engine.on_drag_start(f(1), p(10.0, 10.0));
        let first = engine.on_drag_move(p(10.0, 110.0), CONTAINER).preview;
        let _ = engine.on_drag_move(p(10.0, 190.0), CONTAINER);
        let again = engine.on_drag_move(p(10.0, 110.0), CONTAINER).preview;
        pretty_assertions::assert_eq!(first, again);
    }
}

mod visibility {
    use test_log::test;

    use super::*;

    #[test]
    fn hiding_a_middle_row_reflows_the_rows_below() {
        let mut engine = engine_with([
            (f(1), at(0.0, 0.0, 1.0)),
            (f(2), at(0.0, 80.0, 1.0)),
            (f(3), at(0.0, 160.0, 1.0)),
        ]);
        engine.on_field_visibility_toggle(f(2));

        assert!(engine.layout().get(f(2)).is_some_and(|placement| placement.is_hidden()));
        pretty_assertions::assert_eq!(engine.layout().get(f(1)), Some(at(0.0, 0.0, 1.0)));
        pretty_assertions::assert_eq!(engine.layout().get(f(3)), Some(at(0.0, 80.0, 1.0)));
        assert_no_overlaps(&engine);
    }

    #[test]
    fn reshowing_takes_the_first_empty_row() {
        let mut engine = engine_with([
            (f(1), at(0.0, 0.0, 1.0)),
            (f(2), at(0.0, 80.0, 1.0)),
            (f(3), at(0.0, 160.0, 1.0)),
        ]);
        engine.on_field_visibility_toggle(f(2));
        engine.on_field_visibility_toggle(f(2));

        pretty_assertions::assert_eq!(engine.layout().get(f(2)), Some(at(0.0, 160.0, 1.0)));
        assert_no_overlaps(&engine);
    }

    #[test]
    fn reshowing_on_a_full_grid_appends_below_the_bottom_row() {
        let mut engine = engine_with(
            (0..12)
                .map(|row| (f(row), at(0.0, f64::from(row) * 80.0, 1.0)))
                .chain([(f(99), Placement::Hidden)]),
        );
        engine.on_field_visibility_toggle(f(99));

        pretty_assertions::assert_eq!(engine.layout().get(f(99)), Some(at(0.0, 960.0, 1.0)));
        assert_no_overlaps(&engine);
    }
}

mod resize_steps {
    use test_log::test;

    use super::*;

    // step_fraction 0.1 of a 600px container: one step per 60px of travel.

    #[test]
    fn growing_a_lone_field_steps_up_the_ladder() {
        let mut engine = engine_with([(f(1), at(0.0, 0.0, 0.5))]);
        assert_eq!(
            engine.on_resize_step(f(1), ResizeEdge::Right, 70.0, CONTAINER),
            Some(MagneticWidth::TwoThirds),
        );
        assert_eq!(
            engine.on_resize_step(f(1), ResizeEdge::Right, 70.0, CONTAINER),
            Some(MagneticWidth::Full),
        );
        pretty_assertions::assert_eq!(engine.layout().get(f(1)), Some(at(0.0, 0.0, 1.0)));
        assert_magnetic_widths(&engine);
    }

    #[test]
    fn growing_past_the_right_boundary_is_rejected() {
        // Third-width field in the last two columns has no room to grow.
        let mut engine = engine_with([(f(1), at(4.0 / 6.0, 0.0, 1.0 / 3.0))]);
        assert_eq!(engine.on_resize_step(f(1), ResizeEdge::Right, 70.0, CONTAINER), None);
        pretty_assertions::assert_eq!(
            engine.layout().get(f(1)),
            Some(at(4.0 / 6.0, 0.0, 1.0 / 3.0)),
        );
    }

    #[test]
    fn growing_into_a_neighbour_is_rejected_each_crossing() {
        let mut engine = engine_with([
            (f(1), at(0.0, 0.0, 0.5)),
            (f(2), at(0.5, 0.0, 0.5)),
        ]);
        assert_eq!(engine.on_resize_step(f(1), ResizeEdge::Right, 70.0, CONTAINER), None);
        // Travel was consumed by the rejected step; more travel is needed
        // before the next attempt, which is rejected again.
        assert_eq!(engine.on_resize_step(f(1), ResizeEdge::Right, 30.0, CONTAINER), None);
        assert_eq!(engine.on_resize_step(f(1), ResizeEdge::Right, 40.0, CONTAINER), None);
        pretty_assertions::assert_eq!(engine.layout().get(f(1)), Some(at(0.0, 0.0, 0.5)));
        assert_no_overlaps(&engine);
    }

    #[test]
    fn releasing_the_handle_discards_pending_travel() {
        let mut engine = engine_with([(f(1), at(0.0, 0.0, 0.5))]);
        assert_eq!(engine.on_resize_step(f(1), ResizeEdge::Right, 50.0, CONTAINER), None);
        engine.on_resize_release();
        assert_eq!(engine.on_resize_step(f(1), ResizeEdge::Right, 20.0, CONTAINER), None);
        assert_eq!(
            engine.on_resize_step(f(1), ResizeEdge::Right, 50.0, CONTAINER),
            Some(MagneticWidth::TwoThirds),
        );
    }

    #[test]
    fn shrinking_from_the_left_edge_keeps_the_right_boundary() {
        let mut engine = engine_with([(f(1), at(0.0, 0.0, 2.0 / 3.0))]);
        assert_eq!(
            engine.on_resize_step(f(1), ResizeEdge::Left, 70.0, CONTAINER),
            Some(MagneticWidth::Half),
        );
        // Columns 0..=3 became 1..=3: the right boundary stayed put.
        pretty_assertions::assert_eq!(
            engine.layout().get(f(1)),
            Some(at(1.0 / 6.0, 0.0, 0.5)),
        );
    }
}

mod serialization {
    use super::*;

    #[test]
    fn settings_serialize_back_to_toml() {
        let settings = EngineSettings::default();
        let toml = toml::to_string(&settings).expect("serialize");
        let back = EngineSettings::parse(&toml).expect("parse");
        pretty_assertions::assert_eq!(settings, back);
    }

    #[test]
    fn layout_round_trips_through_json() {
        let layout: Layout = [
            (f(1), at(0.0, 0.0, 0.5)),
            (f(2), at(0.5, 0.0, 0.5)),
            (f(3), Placement::Hidden),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&layout).expect("serialize");
        let back: Layout = serde_json::from_str(&json).expect("deserialize");
        pretty_assertions::assert_eq!(layout, back);
    }

    #[test]
    fn magnetic_width_uses_snake_case_names() {
        assert_eq!(
            serde_json::to_string(&MagneticWidth::TwoThirds).expect("serialize"),
            "\"two_thirds\"",
        );
    }
}
